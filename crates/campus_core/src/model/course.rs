//! Course record, course kinds and the kind-tag factory.
//!
//! # Responsibility
//! - Define the course record used as a registration target.
//! - Map console type tags (`LECTURE` / `LAB`) to ready-made courses.
//!
//! # Invariants
//! - `code` is unique in storage.
//! - `credits` is always greater than zero for persisted courses.

use crate::model::instructor::InstructorId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type CourseId = i64;

/// Teaching format of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseKind {
    /// Classroom lecture.
    Lecture,
    /// Hands-on laboratory session.
    Lab,
}

impl CourseKind {
    /// Stable storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Lab => "lab",
        }
    }

    /// Parses a type tag, ignoring case and surrounding whitespace.
    pub fn parse_tag(tag: &str) -> Result<Self, ValidationError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "lecture" => Ok(Self::Lecture),
            "lab" => Ok(Self::Lab),
            other => Err(ValidationError::UnknownCourseKind(other.to_string())),
        }
    }
}

/// Course record persisted in `courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Option<CourseId>,
    pub code: String,
    pub title: String,
    pub kind: CourseKind,
    pub credits: u32,
    pub instructor_id: Option<InstructorId>,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        kind: CourseKind,
        credits: u32,
    ) -> Self {
        Self {
            id: None,
            code: code.into(),
            title: title.into(),
            kind,
            credits,
            instructor_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("code", &self.code)?;
        require_text("title", &self.title)?;
        if self.credits == 0 {
            return Err(ValidationError::ZeroCredits);
        }
        Ok(())
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.code, self.title, self.kind.as_str())
    }
}

/// Builds template courses from a console type tag.
pub struct CourseFactory;

impl CourseFactory {
    /// Creates the template course for `tag`.
    ///
    /// # Errors
    /// - `UnknownCourseKind` when `tag` is neither `LECTURE` nor `LAB`.
    pub fn create(tag: &str) -> Result<Course, ValidationError> {
        Ok(Self::for_kind(CourseKind::parse_tag(tag)?))
    }

    pub fn for_kind(kind: CourseKind) -> Course {
        match kind {
            CourseKind::Lecture => Course::new("LEC-101", "General Lecture", kind, 3),
            CourseKind::Lab => Course::new("LAB-101", "Laboratory Practice", kind, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Course, CourseFactory, CourseKind};
    use crate::model::validation::ValidationError;

    #[test]
    fn factory_maps_tags_case_insensitively() {
        let lecture = CourseFactory::create("LECTURE").expect("lecture tag");
        assert_eq!(lecture.kind, CourseKind::Lecture);
        assert_eq!(lecture.credits, 3);

        let lab = CourseFactory::create(" lab ").expect("lab tag");
        assert_eq!(lab.kind, CourseKind::Lab);
        assert!(lab.validate().is_ok());
    }

    #[test]
    fn factory_rejects_unknown_tag() {
        let err = CourseFactory::create("SEMINAR").expect_err("unknown tag");
        assert_eq!(err, ValidationError::UnknownCourseKind("seminar".to_string()));
    }

    #[test]
    fn validate_requires_credits() {
        let course = Course::new("CS-101", "Intro", CourseKind::Lecture, 0);
        assert_eq!(course.validate(), Err(ValidationError::ZeroCredits));
    }

    #[test]
    fn serializes_kind_as_storage_value() {
        let course = CourseFactory::for_kind(CourseKind::Lab);
        let json = serde_json::to_value(&course).expect("serialize course");

        assert_eq!(json["kind"], "lab");
        assert_eq!(json["code"], "LAB-101");
        assert!(json["id"].is_null());
        assert!(json["instructor_id"].is_null());

        let back: Course = serde_json::from_value(json).expect("deserialize course");
        assert_eq!(back, course);
    }
}
