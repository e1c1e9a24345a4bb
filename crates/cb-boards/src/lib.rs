//! # cb-boards
//!
//! Per-asset discussion boards: an append-only message board and a mutable
//! post board, both persisted whole under their asset-scoped storage key.
//!
//! Every mutation is a read-modify-write of the full board. That keeps each
//! operation atomic from the caller's perspective (no torn reads), but two
//! concurrent writers race with last-writer-wins semantics. A single active
//! writer per store is assumed, as in the original design.

pub mod messages;
pub mod posts;

pub use messages::MessageBoard;
pub use posts::{PostBoard, SortKey};

/// Allocates a creation-time id (epoch milliseconds), bumped past the
/// board's current maximum so two entries created within the same
/// millisecond still get distinct ids.
pub(crate) fn creation_id(current_max: Option<i64>) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    match current_max {
        Some(max) if max >= now => max + 1,
        _ => now,
    }
}
