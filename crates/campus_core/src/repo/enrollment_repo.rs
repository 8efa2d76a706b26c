//! Enrollment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Link students to courses through the `enrollments` table.
//! - Provide joined listings for console display.
//!
//! # Invariants
//! - One enrollment per (student, course) pair; repeats are ignored.
//! - Enrollments disappear with their student or course (FK cascade).

use crate::model::course::CourseId;
use crate::model::enrollment::{Enrollment, EnrollmentView};
use crate::model::student::StudentId;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, ToSql};

const ENROLLMENT_VIEW_SQL: &str = "SELECT
    e.id AS enrollment_id,
    e.student_id AS student_id,
    s.first_name AS first_name,
    s.last_name AS last_name,
    s.student_number AS student_number,
    e.course_id AS course_id,
    c.code AS course_code,
    e.enrolled_at AS enrolled_at
FROM enrollments e
JOIN students s ON s.id = e.student_id
JOIN courses c ON c.id = e.course_id";

const ENROLLMENT_COLUMNS: &[&str] = &["id", "student_id", "course_id", "enrolled_at"];

/// Repository interface for enrollment links.
pub trait EnrollmentRepository {
    /// Enrolls the student; returns `false` when the pair already exists.
    fn enroll(&self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool>;
    fn unenroll(&self, student_id: StudentId, course_id: CourseId) -> RepoResult<()>;
    /// Returns the stored link for one pair, if any.
    fn get_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> RepoResult<Option<Enrollment>>;
    fn list_enrollments(&self) -> RepoResult<Vec<EnrollmentView>>;
    fn list_for_course(&self, course_id: CourseId) -> RepoResult<Vec<EnrollmentView>>;
    fn list_for_student(&self, student_id: StudentId) -> RepoResult<Vec<EnrollmentView>>;
}

/// SQLite-backed enrollment repository.
pub struct SqliteEnrollmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEnrollmentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "enrollments", ENROLLMENT_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_views(&self, filter: &str, bind: &[&dyn ToSql]) -> RepoResult<Vec<EnrollmentView>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENROLLMENT_VIEW_SQL} {filter} ORDER BY e.id ASC;"))?;
        let views = stmt
            .query_map(bind, parse_view_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(views)
    }
}

impl EnrollmentRepository for SqliteEnrollmentRepository<'_> {
    fn enroll(&self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool> {
        ensure_exists(self.conn, "students", "student", student_id)?;
        ensure_exists(self.conn, "courses", "course", course_id)?;

        let changed = self.conn.execute(
            "INSERT INTO enrollments (student_id, course_id)
             VALUES (?1, ?2)
             ON CONFLICT (student_id, course_id) DO NOTHING;",
            params![student_id, course_id],
        )?;
        Ok(changed > 0)
    }

    fn unenroll(&self, student_id: StudentId, course_id: CourseId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2;",
            params![student_id, course_id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(
                "enrollment",
                format!("student={student_id} course={course_id}"),
            ));
        }
        Ok(())
    }

    fn get_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> RepoResult<Option<Enrollment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, course_id, enrolled_at
             FROM enrollments
             WHERE student_id = ?1 AND course_id = ?2;",
        )?;
        let mut rows = stmt.query(params![student_id, course_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_enrollment_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_enrollments(&self) -> RepoResult<Vec<EnrollmentView>> {
        self.query_views("", &[])
    }

    fn list_for_course(&self, course_id: CourseId) -> RepoResult<Vec<EnrollmentView>> {
        self.query_views("WHERE e.course_id = ?1", &[&course_id])
    }

    fn list_for_student(&self, student_id: StudentId) -> RepoResult<Vec<EnrollmentView>> {
        self.query_views("WHERE e.student_id = ?1", &[&student_id])
    }
}

fn ensure_exists(
    conn: &Connection,
    table: &str,
    entity: &'static str,
    id: i64,
) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::not_found(entity, id));
    }
    Ok(())
}

fn parse_enrollment_row(row: &Row<'_>) -> rusqlite::Result<Enrollment> {
    Ok(Enrollment {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        course_id: row.get("course_id")?,
        enrolled_at: row.get("enrolled_at")?,
    })
}

fn parse_view_row(row: &Row<'_>) -> rusqlite::Result<EnrollmentView> {
    let first_name: String = row.get("first_name")?;
    let last_name: Option<String> = row.get("last_name")?;
    let student_name = format!("{} {}", first_name, last_name.unwrap_or_default())
        .trim()
        .to_string();

    Ok(EnrollmentView {
        enrollment_id: row.get("enrollment_id")?,
        student_id: row.get("student_id")?,
        student_name,
        student_number: row
            .get::<_, Option<String>>("student_number")?
            .unwrap_or_default(),
        course_id: row.get("course_id")?,
        course_code: row.get("course_code")?,
        enrolled_at: row.get("enrolled_at")?,
    })
}
