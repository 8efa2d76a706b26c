//! Shared field validation for domain records.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validation failures for student/instructor/course records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace only.
    BlankField(&'static str),
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Course type tag is not `LECTURE` or `LAB`.
    UnknownCourseKind(String),
    /// Courses must be worth at least one credit.
    ZeroCredits,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::UnknownCourseKind(value) => {
                write!(f, "unknown course type `{value}`; expected LECTURE|LAB")
            }
            Self::ZeroCredits => write!(f, "course credits must be greater than zero"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_email, require_text, ValidationError};

    #[test]
    fn email_shape_is_checked() {
        assert!(require_email("ayan.sadykov@uni.kz").is_ok());
        assert_eq!(
            require_email("not-an-email"),
            Err(ValidationError::InvalidEmail("not-an-email".to_string()))
        );
        assert!(require_email("two@@uni.kz").is_err());
        assert!(require_email("spaced name@uni.kz").is_err());
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        assert_eq!(
            require_text("first_name", "   "),
            Err(ValidationError::BlankField("first_name"))
        );
        assert!(require_text("first_name", "Dana").is_ok());
    }
}
