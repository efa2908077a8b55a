use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use coursedesk_core::{ApiResponse, AppError, ErrorBody, MessageBody};
use coursedesk_models::{CourseId, StudentId};

use crate::metrics::track_student_created;
use crate::middleware::auth::AuthUser;
use crate::modules::students::model::{
    CourseRoster, CreateStudentDto, StudentDetails, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

/// Create a student, optionally with a login
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = ApiResponse<StudentDetails>),
        (status = 400, description = "Validation error, unknown course, or email/username taken", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<ApiResponse<StudentDetails>>), AppError> {
    let with_login = dto.credentials().is_some();
    let student =
        StudentService::create(&state.db, dto, state.password_config.bcrypt_cost).await?;
    track_student_created(with_login);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Student created successfully", student)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students with their course", body = ApiResponse<Vec<StudentDetails>>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StudentDetails>>>, AppError> {
    let students = StudentService::list(&state.db).await?;
    Ok(Json(ApiResponse::list("Students retrieved successfully", students)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = ApiResponse<StudentDetails>),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    PathId(id): PathId<StudentId>,
) -> Result<Json<ApiResponse<StudentDetails>>, AppError> {
    let student = StudentService::get(&state.db, id).await?;
    Ok(Json(ApiResponse::ok("Student retrieved successfully", student)))
}

/// Students enrolled in one course
#[utoipa::path(
    get,
    path = "/api/students/course/{course_id}",
    params(
        ("course_id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "The course and its students", body = ApiResponse<CourseRoster>),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students_by_course(
    State(state): State<AppState>,
    PathId(course_id): PathId<CourseId>,
) -> Result<Json<ApiResponse<CourseRoster>>, AppError> {
    let roster = StudentService::list_by_course(&state.db, course_id).await?;
    let count = roster.students.len();
    Ok(Json(
        ApiResponse::ok("Students retrieved successfully", roster).with_count(count),
    ))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = ApiResponse<StudentDetails>),
        (status = 400, description = "Validation error, unknown course, or email taken", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    PathId(id): PathId<StudentId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<ApiResponse<StudentDetails>>, AppError> {
    let student = StudentService::update(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::ok("Student updated successfully", student)))
}

/// Delete a student together with their login
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageBody),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden - Admin only", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    PathId(id): PathId<StudentId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    StudentService::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Student deleted successfully")))
}

/// The calling student's own profile
#[utoipa::path(
    get,
    path = "/api/students/me",
    responses(
        (status = 200, description = "Your student record", body = ApiResponse<StudentDetails>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Only accessible to students", body = ErrorBody),
        (status = 404, description = "Student profile not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_my_details(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<StudentDetails>>, AppError> {
    let student = StudentService::get_own(&state.db, &auth_user).await?;
    Ok(Json(ApiResponse::ok("Your details retrieved successfully", student)))
}
