/// A value that can be saved somewhere and rendered as text.
///
/// This is the contract the core consumes from wrapped types. The core never
/// inspects `Self::Error`; it hands failures back to the caller as-is. Only the
/// type-erased handle asks more of it (see [`crate::PersistableHandle`]).
pub trait Persistable {
    /// Failure raised by [`Persistable::persist`].
    type Error;

    /// Save the value. The side effect belongs entirely to the implementor.
    fn persist(&self) -> Result<(), Self::Error>;

    /// Human-readable rendering. Must not have side effects.
    fn render_text(&self) -> String;
}

/// A value paired with the snapshot it started from.
///
/// Both copies are owned by the wrapper. The snapshot is taken in
/// [`RestorableValue::new`] and only ever read afterwards; all mutation goes
/// through [`RestorableValue::value_mut`] and lands on the working copy.
#[derive(Debug, Clone)]
pub struct RestorableValue<T> {
    working: T,
    original: T,
}

impl<T: Clone> RestorableValue<T> {
    /// Wrap `initial`, keeping an independent copy as the original snapshot.
    pub fn new(initial: T) -> Self {
        Self {
            original: initial.clone(),
            working: initial,
        }
    }

    /// Revert the working copy to the original snapshot.
    pub fn restore(&mut self) {
        self.working.clone_from(&self.original);
        tracing::debug!("restored working copy to original snapshot");
    }
}

impl<T: PartialEq> RestorableValue<T> {
    /// Whether the working copy differs from the original snapshot.
    pub fn is_changed(&self) -> bool {
        self.working != self.original
    }
}

impl<T> RestorableValue<T> {
    /// Read-only access to the working copy.
    pub fn value(&self) -> &T {
        &self.working
    }

    /// Mutable access to the working copy. Mutations are not validated.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.working
    }

    /// The snapshot taken at construction.
    pub fn original(&self) -> &T {
        &self.original
    }

    /// Consume the wrapper and return the working copy.
    pub fn into_inner(self) -> T {
        self.working
    }
}

impl<T: Persistable> RestorableValue<T> {
    /// Persist the working copy. The original snapshot is not touched.
    pub fn persist(&self) -> Result<(), T::Error> {
        tracing::debug!("persisting working copy");
        self.working.persist()
    }

    /// Render the working copy.
    pub fn render_text(&self) -> String {
        self.working.render_text()
    }
}

impl<T: Clone> From<T> for RestorableValue<T> {
    fn from(initial: T) -> Self {
        Self::new(initial)
    }
}
