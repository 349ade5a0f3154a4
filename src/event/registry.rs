//! Event registry: named listener lists with synchronous, ordered dispatch.
//!
//! Each declared event owns an ordered list of [`Listener`]s. Firing an event
//! runs a snapshot of that list so listeners may subscribe further listeners
//! or mutate the component that fired without tripping a `RefCell` borrow.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Error returned by a listener. Aborts the remaining dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// A listener callback receiving the event payload.
pub type Listener = Rc<dyn Fn(&Value) -> Result<(), ListenerError>>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&Value) -> Result<(), ListenerError> + 'static,
{
    Rc::new(f)
}

// ---------------------------------------------------------------------------
// EventRegistry
// ---------------------------------------------------------------------------

/// Per-instance table of declared events and their listeners.
#[derive(Default, Clone)]
pub struct EventRegistry {
    events: HashMap<String, Vec<Listener>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with an empty listener list. Re-declaring keeps existing listeners.
    pub fn declare(&mut self, name: &str) {
        self.events.entry(name.to_owned()).or_default();
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// Append a listener. Returns `false` if `name` was never declared.
    pub fn subscribe(&mut self, name: &str, listener: Listener) -> bool {
        match self.events.get_mut(name) {
            Some(list) => {
                list.push(listener);
                true
            }
            None => false,
        }
    }

    /// Number of listeners registered on `name` (0 if undeclared).
    pub fn listener_count(&self, name: &str) -> usize {
        self.events.get(name).map_or(0, Vec::len)
    }

    /// Snapshot of `name`'s listeners, or `None` if undeclared.
    pub fn listeners(&self, name: &str) -> Option<Vec<Listener>> {
        self.events.get(name).cloned()
    }

    /// Declared event names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.events.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Fire `name` directly on this registry. Undeclared names are a no-op.
    pub fn fire(&self, name: &str, payload: &Value) -> Result<(), ListenerError> {
        match self.listeners(name) {
            Some(listeners) => dispatch(&listeners, payload),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in self.names() {
            map.entry(&name, &self.listener_count(name));
        }
        map.finish()
    }
}

/// Run `listeners` in order with `payload`, stopping at the first error.
pub fn dispatch(listeners: &[Listener], payload: &Value) -> Result<(), ListenerError> {
    for listener in listeners {
        listener(payload)?;
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
