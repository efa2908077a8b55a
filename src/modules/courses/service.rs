use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use coursedesk_core::AppError;
use coursedesk_db::map_db_error;
use coursedesk_models::CourseId;

use crate::modules::courses::model::{Course, CourseDto};

pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const CODE_TAKEN: &str = "Course code already exists";
pub const HAS_ENROLLMENTS: &str = "Cannot delete course. Students are enrolled in this course.";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT course_id, course_name, course_code, course_duration, created_at, updated_at
               FROM courses
               ORDER BY course_name, course_id"#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch courses")
        .map_err(AppError::database)?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, course_id: CourseId) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"SELECT course_id, course_name, course_code, course_duration, created_at, updated_at
               FROM courses
               WHERE course_id = $1"#,
        )
        .bind(course_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch course by ID")
        .map_err(AppError::database)?;

        Ok(course)
    }

    pub async fn get(db: &PgPool, course_id: CourseId) -> Result<Course, AppError> {
        Self::find_by_id(db, course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND)))
    }

    pub async fn exists(db: &PgPool, course_id: CourseId) -> Result<bool, AppError> {
        Ok(Self::find_by_id(db, course_id).await?.is_some())
    }

    #[instrument(skip(db))]
    pub async fn code_exists(db: &PgPool, course_code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE course_code = $1)",
        )
        .bind(course_code)
        .fetch_one(db)
        .await
        .context("Failed to check course code")
        .map_err(AppError::database)?;

        Ok(exists)
    }

    #[instrument(skip(db))]
    pub async fn count_students(db: &PgPool, course_id: CourseId) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(db)
                .await
                .context("Failed to count enrolled students")
                .map_err(AppError::database)?;

        Ok(count)
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CourseDto) -> Result<Course, AppError> {
        if Self::code_exists(db, &dto.course_code).await? {
            return Err(AppError::conflict(anyhow!(CODE_TAKEN)));
        }

        let course = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (course_name, course_code, course_duration)
               VALUES ($1, $2, $3)
               RETURNING course_id, course_name, course_code, course_duration, created_at, updated_at"#,
        )
        .bind(&dto.course_name)
        .bind(&dto.course_code)
        .bind(dto.course_duration)
        .fetch_one(db)
        .await
        .map_err(map_db_error)?;

        Ok(course)
    }

    /// Replaces every field of a course. The code is re-checked only when it changes.
    #[instrument(skip(db))]
    pub async fn update(db: &PgPool, course_id: CourseId, dto: CourseDto) -> Result<Course, AppError> {
        let existing = Self::get(db, course_id).await?;

        if dto.course_code != existing.course_code && Self::code_exists(db, &dto.course_code).await? {
            return Err(AppError::conflict(anyhow!(CODE_TAKEN)));
        }

        let course = sqlx::query_as::<_, Course>(
            r#"UPDATE courses
               SET course_name = $1, course_code = $2, course_duration = $3, updated_at = NOW()
               WHERE course_id = $4
               RETURNING course_id, course_name, course_code, course_duration, created_at, updated_at"#,
        )
        .bind(&dto.course_name)
        .bind(&dto.course_code)
        .bind(dto.course_duration)
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND)))?;

        Ok(course)
    }

    /// Deletes a course that has no enrolled students.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, course_id: CourseId) -> Result<(), AppError> {
        Self::get(db, course_id).await?;

        if Self::count_students(db, course_id).await? > 0 {
            return Err(AppError::conflict(anyhow!(HAS_ENROLLMENTS)));
        }

        // The foreign key still blocks an enrollment that lands after the count.
        let result = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(course_id)
            .execute(db)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!(COURSE_NOT_FOUND)));
        }

        Ok(())
    }
}
