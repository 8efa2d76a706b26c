//! Course repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `courses` table, including instructor assignment.
//!
//! # Invariants
//! - Inserts are ignored when the course code already exists.
//! - Read paths reject unknown `kind` values and non-positive credits
//!   instead of masking them.

use crate::model::course::{Course, CourseId, CourseKind};
use crate::model::instructor::InstructorId;
use crate::model::validation::require_text;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const COURSE_SELECT_SQL: &str = "SELECT
    id,
    code,
    title,
    kind,
    credits,
    instructor_id
FROM courses";

const COURSE_COLUMNS: &[&str] = &["id", "code", "title", "kind", "credits", "instructor_id"];

/// Repository interface for course CRUD operations.
pub trait CourseRepository {
    /// Inserts `course`; returns `None` when the code is already taken.
    fn insert_course(&self, course: &Course) -> RepoResult<Option<CourseId>>;
    fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>>;
    fn find_course_by_code(&self, code: &str) -> RepoResult<Option<Course>>;
    fn update_course_title(&self, id: CourseId, title: &str) -> RepoResult<()>;
    /// Sets or clears (`None`) the teaching instructor.
    fn assign_instructor(
        &self,
        id: CourseId,
        instructor_id: Option<InstructorId>,
    ) -> RepoResult<()>;
    fn delete_course(&self, id: CourseId) -> RepoResult<()>;
    fn list_courses(&self) -> RepoResult<Vec<Course>>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCourseRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "courses", COURSE_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_courses(&self, sql: &str, key: Option<&str>) -> RepoResult<Vec<Course>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match key {
            Some(value) => stmt.query([value])?,
            None => stmt.query([])?,
        };
        let mut courses = Vec::new();
        while let Some(row) = rows.next()? {
            courses.push(parse_course_row(row)?);
        }
        Ok(courses)
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn insert_course(&self, course: &Course) -> RepoResult<Option<CourseId>> {
        course.validate()?;

        let changed = self.conn.execute(
            "INSERT INTO courses (code, title, kind, credits, instructor_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (code) DO NOTHING;",
            params![
                course.code.trim(),
                course.title.trim(),
                course.kind.as_str(),
                i64::from(course.credits),
                course.instructor_id,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }

    fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COURSE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_course_row(row)?));
        }
        Ok(None)
    }

    fn find_course_by_code(&self, code: &str) -> RepoResult<Option<Course>> {
        let mut courses = self.query_courses(
            &format!("{COURSE_SELECT_SQL} WHERE code = ?1;"),
            Some(code.trim()),
        )?;
        Ok(courses.pop())
    }

    fn update_course_title(&self, id: CourseId, title: &str) -> RepoResult<()> {
        require_text("title", title)?;

        let changed = self.conn.execute(
            "UPDATE courses SET title = ?1 WHERE id = ?2;",
            params![title.trim(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("course", id));
        }
        Ok(())
    }

    fn assign_instructor(
        &self,
        id: CourseId,
        instructor_id: Option<InstructorId>,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE courses SET instructor_id = ?1 WHERE id = ?2;",
            params![instructor_id, id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("course", id));
        }
        Ok(())
    }

    fn delete_course(&self, id: CourseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM courses WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("course", id));
        }
        Ok(())
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        self.query_courses(&format!("{COURSE_SELECT_SQL} ORDER BY id ASC;"), None)
    }
}

fn parse_course_row(row: &Row<'_>) -> RepoResult<Course> {
    let kind_text: String = row.get("kind")?;
    let kind = CourseKind::parse_tag(&kind_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid course kind `{kind_text}` in courses.kind"))
    })?;

    let credits_raw: i64 = row.get("credits")?;
    let credits = u32::try_from(credits_raw)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid credits value `{credits_raw}` in courses.credits"
            ))
        })?;

    Ok(Course {
        id: Some(row.get("id")?),
        code: row.get("code")?,
        title: row.get("title")?,
        kind,
        credits,
        instructor_id: row.get("instructor_id")?,
    })
}
