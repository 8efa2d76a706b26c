//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `students` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Inserts are ignored (not failed) when the email already exists.
//! - Update/delete of a missing id returns `RepoError::NotFound`.
//! - Listings are ordered by id.

use crate::model::student::{Student, StudentId};
use crate::model::validation::require_email;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    student_number
FROM students";

const STUDENT_COLUMNS: &[&str] = &["id", "first_name", "last_name", "email", "student_number"];

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    /// Inserts `student`; returns `None` when the email is already taken.
    fn insert_student(&self, student: &Student) -> RepoResult<Option<StudentId>>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn find_student_by_email(&self, email: &str) -> RepoResult<Option<Student>>;
    fn update_student_email(&self, id: StudentId, email: &str) -> RepoResult<()>;
    fn delete_student(&self, id: StudentId) -> RepoResult<()>;
    fn list_students(&self) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for foreign schemas.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "students", STUDENT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn insert_student(&self, student: &Student) -> RepoResult<Option<StudentId>> {
        student.validate()?;

        let changed = self.conn.execute(
            "INSERT INTO students (first_name, last_name, email, student_number)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (email) DO NOTHING;",
            params![
                student.first_name.trim(),
                student.last_name.trim(),
                student.email.trim(),
                student.student_number.trim(),
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }
        Ok(None)
    }

    fn find_student_by_email(&self, email: &str) -> RepoResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE email = ?1;"),
                [email.trim()],
                parse_student_row,
            )
            .optional()?;
        Ok(student)
    }

    fn update_student_email(&self, id: StudentId, email: &str) -> RepoResult<()> {
        require_email(email)?;

        let changed = self.conn.execute(
            "UPDATE students SET email = ?1 WHERE id = ?2;",
            params![email.trim(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("student", id));
        }
        Ok(())
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("student", id));
        }
        Ok(())
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let students = stmt
            .query_map([], parse_student_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get::<_, Option<String>>("last_name")?.unwrap_or_default(),
        email: row.get("email")?,
        student_number: row
            .get::<_, Option<String>>("student_number")?
            .unwrap_or_default(),
    })
}
