use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coursedesk_auth::Role;
use coursedesk_core::{ErrorBody, MessageBody};
use coursedesk_models::{
    AuthResponse, Course, CourseDto, CourseRoster, CourseSummary, CreateStudentDto, LoginRequest,
    RegisterRequest, StudentDetails, UpdateStudentDto, UserInfo,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::get_students_by_course,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::get_my_details,
    ),
    components(
        schemas(
            Role,
            UserInfo,
            LoginRequest,
            RegisterRequest,
            AuthResponse,
            Course,
            CourseDto,
            CourseSummary,
            StudentDetails,
            CourseRoster,
            CreateStudentDto,
            UpdateStudentDto,
            MessageBody,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and student self-registration"),
        (name = "Courses", description = "Course catalog; writes are admin only"),
        (name = "Students", description = "Student records; admin only except /me")
    ),
    info(
        title = "Coursedesk API",
        version = "0.1.0",
        description = "Course and student management REST API built with Rust, Axum, and PostgreSQL, secured with JWT bearer tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
