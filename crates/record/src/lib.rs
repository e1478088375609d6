//! Sample record type for restorable values.
//!
//! # Invariants
//! - Saving a record never mutates it; the save log is the only side effect.
//! - A record with a blank name cannot be saved.

pub mod record;

pub use record::{Record, RecordError, SaveLog, load_record};
