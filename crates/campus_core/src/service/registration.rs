//! Registration actions applied by the enrollment pipeline.
//!
//! # Responsibility
//! - Define the per-entity "register into target" contract.
//! - Ship a console confirmation action and a SQLite-persisting action.
//!
//! # Invariants
//! - An action either completes for one entity or returns its error; it never
//!   undoes earlier registrations.

use crate::model::course::Course;
use crate::model::enrollment::Enrollment;
use crate::model::student::Student;
use crate::repo::course_repo::{CourseRepository, SqliteCourseRepository};
use crate::repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
use crate::repo::student_repo::{SqliteStudentRepository, StudentRepository};
use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::Connection;
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Side-effecting "register `entity` into `target`" step.
pub trait RegistrationAction<T, C> {
    type Error;

    fn register(&self, entity: &T, target: &C) -> Result<(), Self::Error>;
}

/// Writes one `Registered <entity> for <target>` line per registration.
#[derive(Debug)]
pub struct ConsoleRegistration<W> {
    out: Mutex<W>,
}

impl<W: Write> ConsoleRegistration<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, C, W> RegistrationAction<T, C> for ConsoleRegistration<W>
where
    T: Display,
    C: Display,
    W: Write,
{
    type Error = io::Error;

    fn register(&self, entity: &T, target: &C) -> Result<(), Self::Error> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "Registered {entity} for {target}")
    }
}

/// Persists a student-to-course enrollment row.
///
/// Students are resolved by `id` when present, otherwise by email. Courses
/// are resolved by `id` when present, otherwise by code. A pair that was
/// already enrolled still counts as registered; its existing row is kept in
/// [`EnrollmentRecorder::already_enrolled`].
pub struct EnrollmentRecorder<'conn> {
    conn: &'conn Connection,
    already_enrolled: Mutex<Vec<Enrollment>>,
}

impl<'conn> EnrollmentRecorder<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            already_enrolled: Mutex::new(Vec::new()),
        }
    }

    /// Existing rows met so far, in registration order.
    pub fn already_enrolled(&self) -> Vec<Enrollment> {
        self.already_enrolled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn resolve_student_id(&self, student: &Student) -> RepoResult<i64> {
        if let Some(id) = student.id {
            return Ok(id);
        }
        SqliteStudentRepository::try_new(self.conn)?
            .find_student_by_email(&student.email)?
            .and_then(|stored| stored.id)
            .ok_or_else(|| RepoError::not_found("student", student.email.trim()))
    }

    fn resolve_course_id(&self, course: &Course) -> RepoResult<i64> {
        if let Some(id) = course.id {
            return Ok(id);
        }
        SqliteCourseRepository::try_new(self.conn)?
            .find_course_by_code(&course.code)?
            .and_then(|stored| stored.id)
            .ok_or_else(|| RepoError::not_found("course", course.code.trim()))
    }
}

impl RegistrationAction<Student, Course> for EnrollmentRecorder<'_> {
    type Error = RepoError;

    fn register(&self, entity: &Student, target: &Course) -> Result<(), Self::Error> {
        let student_id = self.resolve_student_id(entity)?;
        let course_id = self.resolve_course_id(target)?;
        let repo = SqliteEnrollmentRepository::try_new(self.conn)?;
        let inserted = repo.enroll(student_id, course_id)?;
        debug!(
            "event=enrollment_record module=registration status=ok student_id={} course_id={} inserted={}",
            student_id, course_id, inserted
        );

        if !inserted {
            let existing = repo
                .get_enrollment(student_id, course_id)?
                .ok_or_else(|| {
                    RepoError::not_found(
                        "enrollment",
                        format!("student={student_id} course={course_id}"),
                    )
                })?;
            self.already_enrolled
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(existing);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleRegistration, EnrollmentRecorder, RegistrationAction};
    use crate::db::open_db_in_memory;
    use crate::model::course::{Course, CourseKind};
    use crate::model::student::Student;
    use crate::repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
    use crate::service::seed::seed_demo_data;

    #[test]
    fn console_registration_writes_confirmation_line() {
        let action = ConsoleRegistration::new(Vec::new());
        let student = Student::new("Timur", "Bekov", "timur@uni.kz", "CS-2415");
        let course = Course::new("CS-101", "Intro", CourseKind::Lecture, 3);

        action
            .register(&student, &course)
            .expect("writing to a Vec cannot fail");

        let output = String::from_utf8(action.into_inner()).expect("utf-8 output");
        assert_eq!(
            output,
            "Registered Timur Bekov (CS-2415) for CS-101 Intro (lecture)\n"
        );
    }

    #[test]
    fn recorder_keeps_existing_rows_for_repeat_registrations() {
        let conn = open_db_in_memory().expect("open db");
        seed_demo_data(&conn).expect("seed");
        let timur = Student::new("Timur", "Bekov", "timur.bekov@uni.kz", "CS-2415");
        let course = Course::new("CS-101", "Programming Basics", CourseKind::Lecture, 5);

        let first = EnrollmentRecorder::new(&conn);
        first.register(&timur, &course).expect("first enrollment");
        assert!(first.already_enrolled().is_empty());

        let second = EnrollmentRecorder::new(&conn);
        second.register(&timur, &course).expect("repeat is not an error");

        let repo = SqliteEnrollmentRepository::try_new(&conn).expect("repo");
        let rows = repo.list_enrollments().expect("list");
        assert_eq!(rows.len(), 1);

        let existing = second.already_enrolled();
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].id, rows[0].enrollment_id);
        assert_eq!(existing[0].student_id, rows[0].student_id);
        assert_eq!(existing[0].course_id, rows[0].course_id);
    }

    #[test]
    fn recorder_fails_for_unknown_course() {
        let conn = open_db_in_memory().expect("open db");
        seed_demo_data(&conn).expect("seed");
        let timur = Student::new("Timur", "Bekov", "timur.bekov@uni.kz", "CS-2415");
        let course = Course::new("NOPE-1", "Missing", CourseKind::Lab, 1);

        let err = EnrollmentRecorder::new(&conn)
            .register(&timur, &course)
            .expect_err("course does not exist");
        assert!(err.to_string().contains("NOPE-1"));
    }
}
