//! Idempotent demo data for fresh databases.

use crate::model::course::{Course, CourseKind};
use crate::model::instructor::Instructor;
use crate::model::student::Student;
use crate::repo::course_repo::{CourseRepository, SqliteCourseRepository};
use crate::repo::instructor_repo::{InstructorRepository, SqliteInstructorRepository};
use crate::repo::student_repo::{SqliteStudentRepository, StudentRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

/// Rows actually inserted by one [`seed_demo_data`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub students: usize,
    pub instructors: usize,
    pub courses: usize,
}

/// Demo students inserted on startup.
pub fn demo_students() -> Vec<Student> {
    vec![
        Student::new("Ayan", "Sadykov", "ayan.sadykov@uni.kz", "IT-2513"),
        Student::new("Dana", "Nurpeisova", "dana.nurpeisova@uni.kz", "SE-2302"),
        Student::new("Timur", "Bekov", "timur.bekov@uni.kz", "CS-2415"),
    ]
}

/// Inserts demo students, instructors and courses.
///
/// Rows that already exist (same email / course code) are left untouched, so
/// repeated calls are safe.
pub fn seed_demo_data(conn: &Connection) -> RepoResult<SeedSummary> {
    let students = SqliteStudentRepository::try_new(conn)?;
    let instructors = SqliteInstructorRepository::try_new(conn)?;
    let courses = SqliteCourseRepository::try_new(conn)?;
    let mut summary = SeedSummary::default();

    for student in demo_students() {
        if students.insert_student(&student)?.is_some() {
            summary.students += 1;
        }
    }

    let demo_instructors = [
        Instructor::new("Aigerim", "Tulegenova", "a.tulegenova@uni.kz"),
        Instructor::new("Marat", "Iskakov", "m.iskakov@uni.kz"),
    ];
    for instructor in &demo_instructors {
        if instructors.insert_instructor(instructor)?.is_some() {
            summary.instructors += 1;
        }
    }

    let demo_courses = [
        Course::new("CS-101", "Programming Basics", CourseKind::Lecture, 5),
        Course::new("CS-102L", "Programming Lab", CourseKind::Lab, 2),
    ];
    for course in &demo_courses {
        if courses.insert_course(course)?.is_some() {
            summary.courses += 1;
        }
    }

    info!(
        "event=seed_demo module=service status=ok students={} instructors={} courses={}",
        summary.students, summary.instructors, summary.courses
    );
    Ok(summary)
}
