//! Domain layer types and invariants.

pub mod entities;
pub mod push;
pub mod types;
pub mod user;
