use axum::{Router, routing::get};

use crate::modules::courses::controller::{
    create_course, delete_course, get_course, get_courses, update_course,
};
use crate::state::AppState;

/// Reads are public; writes are gated per handler by `RequireAdmin`.
pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}
