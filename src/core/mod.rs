//! Core value types.

pub mod uri;
