//! Fake course catalog for development databases.

use std::time::Instant;

use fake::Fake;
use sqlx::PgPool;

const SUBJECTS: &[(&str, &str)] = &[
    ("CS", "Computer Science"),
    ("MATH", "Mathematics"),
    ("PHYS", "Physics"),
    ("CHEM", "Chemistry"),
    ("BIO", "Biology"),
    ("ECON", "Economics"),
    ("HIST", "History"),
    ("PHIL", "Philosophy"),
    ("ENG", "Engineering"),
    ("STAT", "Statistics"),
];

const LEVELS: &[&str] = &[
    "Introduction to",
    "Foundations of",
    "Applied",
    "Advanced",
    "Topics in",
];

/// Seed data for one course.
#[derive(Debug, Clone)]
pub struct CourseSeed {
    pub course_name: String,
    pub course_code: String,
    pub course_duration: i32,
}

pub fn generate_course() -> CourseSeed {
    let (prefix, subject) = SUBJECTS[(0..SUBJECTS.len()).fake::<usize>()];
    let level = LEVELS[(0..LEVELS.len()).fake::<usize>()];
    let number: u16 = (100..500).fake();

    CourseSeed {
        course_name: format!("{level} {subject} {number}"),
        course_code: format!("{prefix}{number}"),
        course_duration: (1..=48).fake(),
    }
}

pub fn generate_courses(count: usize) -> Vec<CourseSeed> {
    (0..count).map(|_| generate_course()).collect()
}

/// Inserts `count` fake courses. Codes that already exist are skipped, so the
/// number inserted can be lower than requested.
pub async fn seed_courses(db: &PgPool, count: usize) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("📚 Seeding {} courses...", count);

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for course in generate_courses(count) {
        inserted += sqlx::query(
            r#"INSERT INTO courses (course_name, course_code, course_duration)
               VALUES ($1, $2, $3)
               ON CONFLICT (course_code) DO NOTHING"#,
        )
        .bind(&course.course_name)
        .bind(&course.course_code)
        .bind(course.course_duration)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_courses_fit_catalog_rules() {
        for course in generate_courses(50) {
            assert!(course.course_name.len() >= 3);
            assert!((2..=50).contains(&course.course_code.len()));
            assert!(course.course_code.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!((1..=120).contains(&course.course_duration));
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_seed_skips_existing_codes(pool: PgPool) {
        let inserted = seed_courses(&pool, 5).await.unwrap();
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total as u64, inserted);
        assert!(inserted >= 1);
    }
}
