//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Run batch registration over any [`crate::Repository`] implementation.
//! - Keep the console layer decoupled from storage details.

pub mod course_service;
pub mod enrollment_service;
pub mod instructor_service;
pub mod registration;
pub mod seed;
pub mod student_service;
