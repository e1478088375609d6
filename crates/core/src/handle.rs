use std::error::Error;
use std::fmt;

use crate::value::{Persistable, RestorableValue};

/// Boxed persistence failure returned through an erased handle.
///
/// The concrete error produced by the wrapped type sits inside unchanged and
/// can be recovered with `downcast_ref`.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Owning, type-erased handle over a [`RestorableValue`].
pub type Handle = Box<dyn PersistableHandle>;

/// The capabilities of a restorable value that survive type erasure.
///
/// Only persist and render are exposed. Change detection and restore need the
/// concrete [`RestorableValue<T>`]. A value can be erased only when its error
/// converts into [`BoxError`].
pub trait PersistableHandle {
    /// Persist the wrapped working copy.
    fn persist(&self) -> Result<(), BoxError>;

    /// Render the wrapped working copy.
    fn render_text(&self) -> String;
}

impl<T> PersistableHandle for RestorableValue<T>
where
    T: Persistable,
    T::Error: Into<BoxError>,
{
    fn persist(&self) -> Result<(), BoxError> {
        RestorableValue::persist(self).map_err(Into::into)
    }

    fn render_text(&self) -> String {
        RestorableValue::render_text(self)
    }
}

impl fmt::Display for dyn PersistableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}

impl fmt::Debug for dyn PersistableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PersistableHandle")
            .field(&self.render_text())
            .finish()
    }
}
