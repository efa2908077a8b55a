use anyhow::{Context, anyhow};
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use coursedesk_auth::Role;
use coursedesk_core::AppError;
use coursedesk_core::password::hash_password_blocking;
use coursedesk_db::map_db_error;
use coursedesk_models::{CourseId, CourseSummary, StudentId};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::STUDENTS_ONLY;
use crate::modules::courses::service::{COURSE_NOT_FOUND, CourseService};
use crate::modules::students::model::{
    CourseRoster, CreateStudentDto, StudentDetails, UpdateStudentDto,
};
use crate::modules::users::service::UserService;

pub const STUDENT_NOT_FOUND: &str = "Student not found";
pub const PROFILE_NOT_FOUND: &str = "Student profile not found";
pub const INVALID_COURSE: &str = "Invalid course. Course does not exist.";
pub const EMAIL_TAKEN: &str = "Email already exists";
pub const USERNAME_TAKEN: &str = "Username already exists";

const DETAILS_SELECT: &str = r#"SELECT s.student_id, s.name, s.email, s.course_id,
       c.course_name, c.course_code, c.course_duration,
       s.created_at, s.updated_at
  FROM students s
  JOIN courses c ON c.course_id = s.course_id"#;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<StudentDetails>, AppError> {
        let sql = format!("{DETAILS_SELECT} ORDER BY s.name, s.student_id");
        let students = sqlx::query_as::<_, StudentDetails>(&sql)
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok(students)
    }

    /// The student joined with their course. Runs on any executor so it can
    /// read rows written earlier in the same transaction.
    #[instrument(skip(executor))]
    pub async fn find_details<'e, E>(
        executor: E,
        student_id: StudentId,
    ) -> Result<Option<StudentDetails>, AppError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("{DETAILS_SELECT} WHERE s.student_id = $1");
        let student = sqlx::query_as::<_, StudentDetails>(&sql)
            .bind(student_id)
            .fetch_optional(executor)
            .await
            .context("Failed to fetch student by ID")
            .map_err(AppError::database)?;

        Ok(student)
    }

    pub async fn get(db: &PgPool, student_id: StudentId) -> Result<StudentDetails, AppError> {
        Self::find_details(db, student_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(STUDENT_NOT_FOUND)))
    }

    #[instrument(skip(db))]
    pub async fn email_exists(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE email = $1)")
                .bind(email)
                .fetch_one(db)
                .await
                .context("Failed to check student email")
                .map_err(AppError::database)?;

        Ok(exists)
    }

    #[instrument(skip(db))]
    pub async fn list_by_course(db: &PgPool, course_id: CourseId) -> Result<CourseRoster, AppError> {
        let course = CourseService::find_by_id(db, course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND)))?;

        let sql = format!("{DETAILS_SELECT} WHERE s.course_id = $1 ORDER BY s.name, s.student_id");
        let students = sqlx::query_as::<_, StudentDetails>(&sql)
            .bind(course_id)
            .fetch_all(db)
            .await
            .context("Failed to fetch students by course")
            .map_err(AppError::database)?;

        Ok(CourseRoster {
            course: CourseSummary::from(&course),
            students,
        })
    }

    /// The caller's own profile.
    #[instrument(skip(db))]
    pub async fn get_own(db: &PgPool, auth_user: &AuthUser) -> Result<StudentDetails, AppError> {
        let student_id = match (auth_user.role, auth_user.student_id) {
            (Role::Student, Some(student_id)) => student_id,
            _ => return Err(AppError::forbidden(STUDENTS_ONLY.to_string())),
        };

        Self::find_details(db, student_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(PROFILE_NOT_FOUND)))
    }

    /// Inserts the bare student row and returns its id.
    #[instrument(skip(executor))]
    pub async fn insert<'e, E>(
        executor: E,
        name: &str,
        email: &str,
        course_id: CourseId,
    ) -> Result<StudentId, AppError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, StudentId>(
            r#"INSERT INTO students (name, email, course_id)
               VALUES ($1, $2, $3)
               RETURNING student_id"#,
        )
        .bind(name)
        .bind(email)
        .bind(course_id)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    /// Creates a student, plus a STUDENT login when credentials are supplied.
    /// Both rows are written in one transaction.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn create(
        db: &PgPool,
        dto: CreateStudentDto,
        bcrypt_cost: u32,
    ) -> Result<StudentDetails, AppError> {
        let course_id = CourseId::from(dto.course_id);

        if !CourseService::exists(db, course_id).await? {
            return Err(AppError::conflict(anyhow!(INVALID_COURSE)));
        }
        if Self::email_exists(db, &dto.email).await? {
            return Err(AppError::conflict(anyhow!(EMAIL_TAKEN)));
        }

        let login = match dto.credentials() {
            Some((username, password)) => {
                if UserService::username_exists(db, username).await? {
                    return Err(AppError::conflict(anyhow!(USERNAME_TAKEN)));
                }
                let hash = hash_password_blocking(password.to_string(), bcrypt_cost).await?;
                Some((username.to_string(), hash))
            }
            None => None,
        };

        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        let student_id = Self::insert(&mut *tx, &dto.name, &dto.email, course_id).await?;

        if let Some((username, hash)) = &login {
            UserService::create(&mut *tx, username, hash, Role::Student, Some(student_id)).await?;
        }

        let student = Self::find_details(&mut *tx, student_id)
            .await?
            .ok_or_else(|| AppError::internal_error("Created student vanished".to_string()))?;

        tx.commit()
            .await
            .context("Failed to commit student creation")
            .map_err(AppError::database)?;

        Ok(student)
    }

    /// Replaces name, email and course. The email is re-checked only when it changes.
    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        student_id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<StudentDetails, AppError> {
        let existing = Self::get(db, student_id).await?;
        let course_id = CourseId::from(dto.course_id);

        if !CourseService::exists(db, course_id).await? {
            return Err(AppError::conflict(anyhow!(INVALID_COURSE)));
        }
        if dto.email != existing.email && Self::email_exists(db, &dto.email).await? {
            return Err(AppError::conflict(anyhow!(EMAIL_TAKEN)));
        }

        let result = sqlx::query(
            r#"UPDATE students
               SET name = $1, email = $2, course_id = $3, updated_at = NOW()
               WHERE student_id = $4"#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(course_id)
        .bind(student_id)
        .execute(db)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!(STUDENT_NOT_FOUND)));
        }

        Self::get(db, student_id).await
    }

    /// Deletes a student and its login atomically.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, student_id: StudentId) -> Result<(), AppError> {
        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        sqlx::query("DELETE FROM users WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Dropping the transaction rolls it back.
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!(STUDENT_NOT_FOUND)));
        }

        tx.commit()
            .await
            .context("Failed to commit student deletion")
            .map_err(AppError::database)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use coursedesk_models::CourseDto;

    async fn course(pool: &PgPool, code: &str) -> CourseId {
        CourseService::create(
            pool,
            CourseDto {
                course_name: format!("Course {code}"),
                course_code: code.to_string(),
                course_duration: 6,
            },
        )
        .await
        .unwrap()
        .course_id
    }

    fn new_student(email: &str, course_id: CourseId, login: Option<(&str, &str)>) -> CreateStudentDto {
        CreateStudentDto {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            course_id: course_id.into_inner(),
            username: login.map(|(u, _)| u.to_string()),
            password: login.map(|(_, p)| p.to_string()),
        }
    }

    async fn user_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_with_login_links_user(pool: PgPool) {
        let course_id = course(&pool, "CS201").await;
        let student = StudentService::create(
            &pool,
            new_student("ada@example.com", course_id, Some(("ada", "secret1"))),
            4,
        )
        .await
        .unwrap();

        assert_eq!(student.course_code, "CS201");
        let user = UserService::find_by_username(&pool, "ada").await.unwrap().unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.student_id, Some(student.student_id));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_rejects_unknown_course(pool: PgPool) {
        let err = StudentService::create(&pool, new_student("ada@example.com", CourseId(42), None), 4)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), INVALID_COURSE);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_taken_username_rolls_back_nothing_written(pool: PgPool) {
        let course_id = course(&pool, "CS201").await;
        StudentService::create(
            &pool,
            new_student("ada@example.com", course_id, Some(("ada", "secret1"))),
            4,
        )
        .await
        .unwrap();

        let err = StudentService::create(
            &pool,
            new_student("grace@example.com", course_id, Some(("ada", "secret2"))),
            4,
        )
        .await
        .unwrap_err();

        assert_eq!(err.error.to_string(), USERNAME_TAKEN);
        assert!(!StudentService::email_exists(&pool, "grace@example.com").await.unwrap());
        assert_eq!(user_count(&pool).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_removes_login(pool: PgPool) {
        let course_id = course(&pool, "CS201").await;
        let student = StudentService::create(
            &pool,
            new_student("ada@example.com", course_id, Some(("ada", "secret1"))),
            4,
        )
        .await
        .unwrap();

        StudentService::delete(&pool, student.student_id).await.unwrap();

        assert_eq!(user_count(&pool).await, 0);
        let err = StudentService::get(&pool, student.student_id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_missing_student(pool: PgPool) {
        let err = StudentService::delete(&pool, StudentId(7)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_moves_course_and_keeps_own_email(pool: PgPool) {
        let first = course(&pool, "CS201").await;
        let second = course(&pool, "CS310").await;
        let student = StudentService::create(&pool, new_student("ada@example.com", first, None), 4)
            .await
            .unwrap();

        let updated = StudentService::update(
            &pool,
            student.student_id,
            UpdateStudentDto {
                name: "Ada King".to_string(),
                email: "ada@example.com".to_string(),
                course_id: second.into_inner(),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Ada King");
        assert_eq!(updated.course_code, "CS310");
    }
}
