//! Construction parameters.

use std::fmt;

use super::handle::Component;
use crate::event::{Listener, ListenerError};
use crate::value::Value;

/// One construction parameter value.
#[derive(Clone)]
pub enum Param {
    /// Initial value of a property.
    Value(Value),
    /// Initial members of an aggregation.
    Children(Vec<Component>),
    /// A listener to append to an event.
    Listener(Listener),
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Param::Children(c) => f.debug_tuple("Children").field(&c.len()).finish(),
            Param::Listener(_) => f.write_str("Listener"),
        }
    }
}

/// Flat, ordered `name → value` mapping applied after the descriptor.
///
/// ```
/// use trellis::component::Params;
///
/// let params = Params::new().with("title", "X").with("description", "Y");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, Param)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value (builder).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.entries.push((name.to_owned(), Param::Value(value.into())));
        self
    }

    /// Set an aggregation's initial members (builder).
    pub fn with_children(mut self, name: &str, children: Vec<Component>) -> Self {
        self.entries.push((name.to_owned(), Param::Children(children)));
        self
    }

    /// Append a listener to an event (builder).
    pub fn with_listener<F>(mut self, name: &str, listener: F) -> Self
    where
        F: Fn(&Value) -> Result<(), ListenerError> + 'static,
    {
        self.entries
            .push((name.to_owned(), Param::Listener(crate::event::listener(listener))));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Params {
    type Item = (String, Param);
    type IntoIter = std::vec::IntoIter<(String, Param)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
