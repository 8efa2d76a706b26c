//! Student use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for console callers.
//! - Load persisted students into an in-memory store for batch registration.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.

use crate::model::student::{Student, StudentId};
use crate::repo::memory_repo::InMemoryRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts `student`; `Ok(None)` means the email was already registered.
    pub fn add_student(&self, student: &Student) -> RepoResult<Option<StudentId>> {
        self.repo.insert_student(student)
    }

    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.get_student(id)
    }

    pub fn change_email(&self, id: StudentId, email: &str) -> RepoResult<()> {
        self.repo.update_student_email(id, email)
    }

    pub fn remove_student(&self, id: StudentId) -> RepoResult<()> {
        self.repo.delete_student(id)
    }

    pub fn list_students(&self) -> RepoResult<Vec<Student>> {
        self.repo.list_students()
    }

    /// Returns the persisted copy of `student`, inserting it first if needed.
    ///
    /// Lookup is by email, so an existing row wins over the given fields.
    pub fn ensure_student(&self, student: &Student) -> RepoResult<Student> {
        if let Some(existing) = self.repo.find_student_by_email(&student.email)? {
            return Ok(existing);
        }
        let id = self.repo.insert_student(student)?;
        let stored = match id {
            Some(id) => self.repo.get_student(id)?,
            None => self.repo.find_student_by_email(&student.email)?,
        };
        stored.ok_or_else(|| RepoError::not_found("student", student.email.trim()))
    }

    /// Snapshots every persisted student into a fresh in-memory store.
    pub fn load_into_memory(&self) -> RepoResult<InMemoryRepository<Student>> {
        Ok(InMemoryRepository::with_items(self.repo.list_students()?))
    }
}
