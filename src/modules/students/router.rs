use axum::{Router, middleware, routing::get};

use crate::middleware::role::{require_admin, require_student};
use crate::modules::students::controller::{
    create_student, delete_student, get_my_details, get_student, get_students,
    get_students_by_course, update_student,
};
use crate::state::AppState;

/// `/me` is for students; everything else is admin only.
///
/// The static `/me` route takes precedence over `/{id}`.
pub fn init_students_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", get(get_students).post(create_student))
        .route("/course/{course_id}", get(get_students_by_course))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let student_routes = Router::new()
        .route("/me", get(get_my_details))
        .route_layer(middleware::from_fn_with_state(state, require_student));

    admin_routes.merge(student_routes)
}
