//! Core domain logic for the campus manager.
//! Owns the university model, SQLite persistence, the generic in-memory
//! repository and the batch registration pipeline.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{Course, CourseFactory, CourseId, CourseKind};
pub use model::enrollment::{Enrollment, EnrollmentView};
pub use model::instructor::{Instructor, InstructorId};
pub use model::student::{Student, StudentBuilder, StudentId};
pub use model::validation::ValidationError;
pub use repo::course_repo::{CourseRepository, SqliteCourseRepository};
pub use repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
pub use repo::instructor_repo::{InstructorRepository, SqliteInstructorRepository};
pub use repo::memory_repo::InMemoryRepository;
pub use repo::repository::Repository;
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{RepoError, RepoResult};
pub use service::course_service::CourseService;
pub use service::enrollment_service::EnrollmentService;
pub use service::instructor_service::InstructorService;
pub use service::registration::{ConsoleRegistration, EnrollmentRecorder, RegistrationAction};
pub use service::seed::{demo_students, seed_demo_data, SeedSummary};
pub use service::student_service::StudentService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
