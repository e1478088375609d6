//! Restorable values: a working copy plus the original snapshot it can revert to.
//!
//! # Invariants
//! - The original snapshot is taken once, at construction, and never mutated.
//! - A wrapper owns both copies; it never aliases caller-owned storage.
//! - Persistence failures propagate unchanged; the core adds no error kinds.

pub mod factory;
pub mod handle;
pub mod value;

pub use factory::{make_handle, make_handle_from, make_restorable, make_restorable_from};
pub use handle::{BoxError, Handle, PersistableHandle};
pub use value::{Persistable, RestorableValue};
