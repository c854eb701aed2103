//! telemetry/mod.rs
//! Codec counters and immutable snapshots.
//!
//! Notes:
//! - Counters are plain structs owned by one caller (a connection, a worker);
//!   combine them with `merge` instead of sharing them behind a lock.
//! - Snapshots are read-only and serializable for export.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
