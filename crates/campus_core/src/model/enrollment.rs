//! Enrollment link between a student and a course.

use crate::model::course::CourseId;
use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};

pub type EnrollmentId = i64;

/// One row of `enrollments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Unix epoch milliseconds.
    pub enrolled_at: i64,
}

/// Enrollment joined with display fields for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentView {
    pub enrollment_id: EnrollmentId,
    pub student_id: StudentId,
    pub student_name: String,
    pub student_number: String,
    pub course_id: CourseId,
    pub course_code: String,
    pub enrolled_at: i64,
}
