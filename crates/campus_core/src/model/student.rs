//! Student record and its builder.
//!
//! # Responsibility
//! - Define the student record persisted in `students` and held by the
//!   in-memory store.
//! - Provide a fluent builder for interactive construction.
//!
//! # Invariants
//! - `email` is the natural key in storage (unique).
//! - The builder only assigns fields; validation happens on write paths.

use crate::model::validation::{require_email, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage identifier assigned by SQLite on insert.
pub type StudentId = i64;

/// Student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// `None` until the row has been inserted.
    pub id: Option<StudentId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Programme-prefixed number such as `CS-2415`.
    pub student_number: String,
}

impl Student {
    /// Creates an unsaved student.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        student_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            student_number: student_number.into(),
        }
    }

    /// Starts a builder with every field empty.
    pub fn builder() -> StudentBuilder {
        StudentBuilder::default()
    }

    /// Checks write-path invariants.
    ///
    /// # Errors
    /// - `BlankField` when first name or student number is blank.
    /// - `InvalidEmail` when `email` is malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("first_name", &self.first_name)?;
        require_email(&self.email)?;
        require_text("student_number", &self.student_number)?;
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.student_number)
    }
}

/// Fluent builder for [`Student`].
#[derive(Debug, Clone, Default)]
pub struct StudentBuilder {
    first_name: String,
    last_name: String,
    email: String,
    student_number: String,
}

impl StudentBuilder {
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = value.into();
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = value.into();
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = value.into();
        self
    }

    pub fn student_number(mut self, value: impl Into<String>) -> Self {
        self.student_number = value.into();
        self
    }

    pub fn build(self) -> Student {
        Student::new(
            self.first_name,
            self.last_name,
            self.email,
            self.student_number,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Student, StudentBuilder};
    use crate::model::validation::ValidationError;

    #[test]
    fn builder_assigns_every_field() {
        let student = StudentBuilder::default()
            .first_name("Timur")
            .last_name("Bekov")
            .email("timur.bekov@uni.kz")
            .student_number("CS-2415")
            .build();

        assert_eq!(
            student,
            Student::new("Timur", "Bekov", "timur.bekov@uni.kz", "CS-2415")
        );
        assert!(student.id.is_none());
    }

    #[test]
    fn display_matches_console_listing() {
        let student = Student::new("Dana", "Nurpeisova", "dana@uni.kz", "SE-2302");
        assert_eq!(student.to_string(), "Dana Nurpeisova (SE-2302)");

        let no_last = Student::new("Dana", "", "dana@uni.kz", "SE-2302");
        assert_eq!(no_last.to_string(), "Dana (SE-2302)");
    }

    #[test]
    fn validate_rejects_blank_name_and_bad_email() {
        let blank = Student::builder()
            .email("x@uni.kz")
            .student_number("CS-1")
            .build();
        assert_eq!(
            blank.validate(),
            Err(ValidationError::BlankField("first_name"))
        );

        let bad_email = Student::new("Ayan", "Sadykov", "ayan", "IT-2513");
        assert!(matches!(
            bad_email.validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
    }
}
