use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use coursedesk_core::{ApiResponse, AppError, ErrorBody, MessageBody};
use coursedesk_models::CourseId;

use crate::metrics::track_course_created;
use crate::middleware::role::RequireAdmin;
use crate::modules::courses::model::{Course, CourseDto};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses, ordered by name", body = ApiResponse<Vec<Course>>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let courses = CourseService::list(&state.db).await?;
    Ok(Json(ApiResponse::list("Courses retrieved successfully", courses)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = ApiResponse<Course>),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    PathId(id): PathId<CourseId>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::get(&state.db, id).await?;
    Ok(Json(ApiResponse::ok("Course retrieved successfully", course)))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseDto,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<Course>),
        (status = 400, description = "Validation error or course code already exists", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn create_course(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let course = CourseService::create(&state.db, dto).await?;
    track_course_created();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Course created successfully", course)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    request_body = CourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<Course>),
        (status = 400, description = "Validation error or course code already exists", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn update_course(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathId(id): PathId<CourseId>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::update(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::ok("Course updated successfully", course)))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageBody),
        (status = 400, description = "Students are enrolled in this course", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_course(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathId(id): PathId<CourseId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    CourseService::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Course deleted successfully")))
}
