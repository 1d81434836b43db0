//! One controlled-or-uncontrolled state slot.
//!
//! Whether a cell is externally owned is latched at construction and
//! never changes. A controlled cell treats `set` as a request: it
//! notifies the listener and waits for the host to push the new value
//! back via `sync_external`. An uncontrolled cell applies the value
//! itself, then notifies.

/// A single unit of view state with a fixed ownership mode.
pub struct StateCell<V> {
    value: V,
    external: bool,
    listener: Option<Box<dyn Fn(&V)>>,
}

impl<V: Clone> StateCell<V> {
    /// Internally owned cell starting at `value`.
    pub fn internal(value: V) -> Self {
        Self {
            value,
            external: false,
            listener: None,
        }
    }

    /// Externally owned cell mirroring the host's `value`.
    pub fn controlled(value: V) -> Self {
        Self {
            value,
            external: true,
            listener: None,
        }
    }

    /// Attach the change listener.
    pub fn with_listener(mut self, f: impl Fn(&V) + 'static) -> Self {
        self.listener = Some(Box::new(f));
        self
    }

    /// Current value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// True when the host owns this cell.
    pub fn is_external(&self) -> bool {
        self.external
    }

    /// Apply a state change. Controlled cells only notify; uncontrolled
    /// cells store the value first, then notify.
    pub fn set(&mut self, next: V) {
        if !self.external {
            self.value = next.clone();
        }
        if let Some(listener) = &self.listener {
            listener(&next);
        }
    }

    /// Host pushes the authoritative value of a controlled cell. No-op
    /// for uncontrolled cells.
    pub fn sync_external(&mut self, value: V) {
        if self.external {
            self.value = value;
        }
    }

    /// Silent internal replacement, used by reconciliation. Never
    /// notifies and never touches a controlled cell's mirror.
    pub(crate) fn replace_internal(&mut self, value: V) {
        if !self.external {
            self.value = value;
        }
    }
}
