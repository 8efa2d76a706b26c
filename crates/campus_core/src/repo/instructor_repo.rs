//! Instructor repository contract and SQLite implementation.

use crate::model::instructor::{Instructor, InstructorId};
use crate::model::validation::require_email;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const INSTRUCTOR_SELECT_SQL: &str = "SELECT id, first_name, last_name, email FROM instructors";
const INSTRUCTOR_COLUMNS: &[&str] = &["id", "first_name", "last_name", "email"];

/// Repository interface for instructor CRUD operations.
pub trait InstructorRepository {
    /// Inserts `instructor`; returns `None` when the email is already taken.
    fn insert_instructor(&self, instructor: &Instructor) -> RepoResult<Option<InstructorId>>;
    fn get_instructor(&self, id: InstructorId) -> RepoResult<Option<Instructor>>;
    fn update_instructor_email(&self, id: InstructorId, email: &str) -> RepoResult<()>;
    fn delete_instructor(&self, id: InstructorId) -> RepoResult<()>;
    fn list_instructors(&self) -> RepoResult<Vec<Instructor>>;
}

/// SQLite-backed instructor repository.
pub struct SqliteInstructorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInstructorRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "instructors", INSTRUCTOR_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl InstructorRepository for SqliteInstructorRepository<'_> {
    fn insert_instructor(&self, instructor: &Instructor) -> RepoResult<Option<InstructorId>> {
        instructor.validate()?;

        let changed = self.conn.execute(
            "INSERT INTO instructors (first_name, last_name, email)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (email) DO NOTHING;",
            params![
                instructor.first_name.trim(),
                instructor.last_name.trim(),
                instructor.email.trim(),
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }

    fn get_instructor(&self, id: InstructorId) -> RepoResult<Option<Instructor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INSTRUCTOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_instructor_row(row)?));
        }
        Ok(None)
    }

    fn update_instructor_email(&self, id: InstructorId, email: &str) -> RepoResult<()> {
        require_email(email)?;

        let changed = self.conn.execute(
            "UPDATE instructors SET email = ?1 WHERE id = ?2;",
            params![email.trim(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("instructor", id));
        }
        Ok(())
    }

    fn delete_instructor(&self, id: InstructorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM instructors WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("instructor", id));
        }
        Ok(())
    }

    fn list_instructors(&self) -> RepoResult<Vec<Instructor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INSTRUCTOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let instructors = stmt
            .query_map([], parse_instructor_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(instructors)
    }
}

fn parse_instructor_row(row: &Row<'_>) -> rusqlite::Result<Instructor> {
    Ok(Instructor {
        id: Some(row.get("id")?),
        first_name: row.get::<_, Option<String>>("first_name")?.unwrap_or_default(),
        last_name: row.get::<_, Option<String>>("last_name")?.unwrap_or_default(),
        email: row.get::<_, Option<String>>("email")?.unwrap_or_default(),
    })
}
