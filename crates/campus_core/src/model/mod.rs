//! University domain model.
//!
//! # Responsibility
//! - Define the records shared by the SQLite repositories, the in-memory
//!   store and the registration pipeline.
//! - Keep construction helpers (builder, factory) next to the records.
//!
//! # Invariants
//! - `id` is `None` until a record has been persisted.
//! - Write paths call `validate()` before touching storage.

pub mod course;
pub mod enrollment;
pub mod instructor;
pub mod student;
pub mod validation;
