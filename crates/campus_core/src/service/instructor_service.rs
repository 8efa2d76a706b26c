//! Instructor use-case service.

use crate::model::instructor::{Instructor, InstructorId};
use crate::repo::instructor_repo::InstructorRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for instructor CRUD operations.
pub struct InstructorService<R: InstructorRepository> {
    repo: R,
}

impl<R: InstructorRepository> InstructorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_instructor(&self, instructor: &Instructor) -> RepoResult<Option<InstructorId>> {
        self.repo.insert_instructor(instructor)
    }

    pub fn get_instructor(&self, id: InstructorId) -> RepoResult<Option<Instructor>> {
        self.repo.get_instructor(id)
    }

    pub fn change_email(&self, id: InstructorId, email: &str) -> RepoResult<()> {
        self.repo.update_instructor_email(id, email)
    }

    pub fn remove_instructor(&self, id: InstructorId) -> RepoResult<()> {
        self.repo.delete_instructor(id)
    }

    pub fn list_instructors(&self) -> RepoResult<Vec<Instructor>> {
        self.repo.list_instructors()
    }
}
