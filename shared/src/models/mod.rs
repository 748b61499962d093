//! Data models
//!
//! Persisted as part of the resort snapshot. Rooms are keyed by their
//! string id (`d-1`, `v-1`, ...); every other record uses a
//! snowflake `i64` from [`crate::util::snowflake_id`].

pub mod booking;
pub mod inventory;
pub mod member;
pub mod room;

// Re-exports
pub use booking::*;
pub use inventory::*;
pub use member::*;
pub use room::*;
