use axum::{Router, routing::post};

use crate::modules::auth::controller::{login, register};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}
