//! Application services sitting between HTTP handlers and repositories.

pub mod error;
pub mod escrow;
pub mod inbox;
pub mod opportunities;
pub mod push;
pub mod repos;
pub mod stats;
