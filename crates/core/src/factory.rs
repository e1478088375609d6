//! Constructors that persist a sample before snapshotting it.
//!
//! The factories take the sample by value, so the wrapper always owns its
//! storage. Borrowed samples go through the `_from` variants, which turn the
//! borrow into `B::Owned` before anything is wrapped. No [`Persistable`] impl
//! exists for references, which keeps `RestorableValue<&S>` out of reach.

use crate::handle::{BoxError, Handle};
use crate::value::{Persistable, RestorableValue};

/// Persist `sample` once, then wrap it.
///
/// The snapshot is taken after the save succeeds, so the original always
/// matches persisted state. On failure the error is returned unchanged and
/// nothing is wrapped.
pub fn make_restorable<T>(sample: T) -> Result<RestorableValue<T>, T::Error>
where
    T: Persistable + Clone,
{
    sample.persist()?;
    tracing::debug!(sample = %sample.render_text(), "baseline persisted");
    Ok(RestorableValue::new(sample))
}

/// Like [`make_restorable`], but copies from a borrowed sample.
pub fn make_restorable_from<B>(
    sample: &B,
) -> Result<RestorableValue<B::Owned>, <B::Owned as Persistable>::Error>
where
    B: ToOwned + ?Sized,
    B::Owned: Persistable + Clone,
{
    make_restorable(sample.to_owned())
}

/// Persist and wrap `sample`, then erase its type behind a [`Handle`].
pub fn make_handle<T>(sample: T) -> Result<Handle, T::Error>
where
    T: Persistable + Clone + 'static,
    T::Error: Into<BoxError>,
{
    let restorable = make_restorable(sample)?;
    Ok(Box::new(restorable))
}

/// Like [`make_handle`], but copies from a borrowed sample.
pub fn make_handle_from<B>(sample: &B) -> Result<Handle, <B::Owned as Persistable>::Error>
where
    B: ToOwned + ?Sized,
    B::Owned: Persistable + Clone + 'static,
    <B::Owned as Persistable>::Error: Into<BoxError>,
{
    make_handle(sample.to_owned())
}
