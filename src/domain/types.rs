//! Shared domain enumerations aligned with persisted database enums.

pub use creatuno_api_types::{EscrowStatus, NotificationKind};
