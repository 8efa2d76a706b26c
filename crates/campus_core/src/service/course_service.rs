//! Course use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for courses.
//! - Create courses from console type tags through [`CourseFactory`].

use crate::model::course::{Course, CourseFactory, CourseId};
use crate::model::instructor::InstructorId;
use crate::repo::course_repo::CourseRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for course CRUD operations.
pub struct CourseService<R: CourseRepository> {
    repo: R,
}

impl<R: CourseRepository> CourseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a course from a type tag, overriding the template code/title.
    ///
    /// # Contract
    /// - Blank `code` / `title` keep the factory template values.
    /// - Returns the stored course; an existing course with the same code is
    ///   returned unchanged.
    pub fn create_from_tag(&self, tag: &str, code: &str, title: &str) -> RepoResult<Course> {
        let mut course = CourseFactory::create(tag)?;
        if !code.trim().is_empty() {
            course.code = code.trim().to_string();
        }
        if !title.trim().is_empty() {
            course.title = title.trim().to_string();
        }

        if let Some(id) = self.repo.insert_course(&course)? {
            course.id = Some(id);
            return Ok(course);
        }
        self.repo
            .find_course_by_code(&course.code)?
            .ok_or_else(|| RepoError::not_found("course", course.code.as_str()))
    }

    pub fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        self.repo.get_course(id)
    }

    pub fn find_by_code(&self, code: &str) -> RepoResult<Option<Course>> {
        self.repo.find_course_by_code(code)
    }

    pub fn rename_course(&self, id: CourseId, title: &str) -> RepoResult<()> {
        self.repo.update_course_title(id, title)
    }

    pub fn assign_instructor(
        &self,
        id: CourseId,
        instructor_id: Option<InstructorId>,
    ) -> RepoResult<()> {
        self.repo.assign_instructor(id, instructor_id)
    }

    pub fn remove_course(&self, id: CourseId) -> RepoResult<()> {
        self.repo.delete_course(id)
    }

    pub fn list_courses(&self) -> RepoResult<Vec<Course>> {
        self.repo.list_courses()
    }
}
