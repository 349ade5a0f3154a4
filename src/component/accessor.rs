//! The per-instance accessor table.
//!
//! Every generated accessor (`getTitle`, `setTitle`, `addCard`, ...) is an
//! [`Accessor`] entry keyed by its name. A view may register [`Accessor::Custom`]
//! closures before generation runs; generation never overwrites an entry,
//! so a custom `setLoading` replaces the generated one.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::error::ComponentError;
use super::handle::Component;
use crate::value::Value;

/// Custom accessor body.
pub type CustomAccessor = Rc<dyn Fn(&Component, Arg) -> Result<Returned, ComponentError>>;

/// One entry in the accessor table. Generated variants carry the member name.
#[derive(Clone)]
pub enum Accessor {
    GetProperty(String),
    SetProperty(String),
    GetAggregation(String),
    SetAggregation(String),
    AddChild(String),
    RemoveChild(String),
    InsertChildAt(String),
    RemoveChildAt(String),
    Custom(CustomAccessor),
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, member) = match self {
            Accessor::GetProperty(m) => ("GetProperty", m.as_str()),
            Accessor::SetProperty(m) => ("SetProperty", m.as_str()),
            Accessor::GetAggregation(m) => ("GetAggregation", m.as_str()),
            Accessor::SetAggregation(m) => ("SetAggregation", m.as_str()),
            Accessor::AddChild(m) => ("AddChild", m.as_str()),
            Accessor::RemoveChild(m) => ("RemoveChild", m.as_str()),
            Accessor::InsertChildAt(m) => ("InsertChildAt", m.as_str()),
            Accessor::RemoveChildAt(m) => ("RemoveChildAt", m.as_str()),
            Accessor::Custom(_) => return f.write_str("Custom"),
        };
        f.debug_tuple(kind).field(&member).finish()
    }
}

/// Argument passed to an accessor.
#[derive(Debug, Clone, Default)]
pub enum Arg {
    #[default]
    None,
    Value(Value),
    Child(Component),
    Children(Vec<Component>),
    Index(usize),
    At(usize, Component),
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<Component> for Arg {
    fn from(child: Component) -> Self {
        Arg::Child(child)
    }
}

impl From<Vec<Component>> for Arg {
    fn from(children: Vec<Component>) -> Self {
        Arg::Children(children)
    }
}

/// Result of an accessor call.
#[derive(Debug, Clone)]
pub enum Returned {
    Value(Value),
    Children(Vec<Component>),
    /// The receiver, for chaining.
    Component(Component),
    Unit,
}

impl Returned {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Returned::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_children(self) -> Option<Vec<Component>> {
        match self {
            Returned::Children(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_component(self) -> Option<Component> {
        match self {
            Returned::Component(c) => Some(c),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// AccessorTable
// ---------------------------------------------------------------------------

#[derive(Default, Clone)]
pub struct AccessorTable {
    entries: HashMap<String, Accessor>,
}

impl AccessorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom accessor, replacing any entry of the same name.
    pub fn custom<F>(&mut self, name: &str, body: F)
    where
        F: Fn(&Component, Arg) -> Result<Returned, ComponentError> + 'static,
    {
        self.entries.insert(name.to_owned(), Accessor::Custom(Rc::new(body)));
    }

    /// Insert `accessor` unless `name` is taken. Returns whether it was inserted.
    pub fn define(&mut self, name: &str, accessor: Accessor) -> bool {
        if self.entries.contains_key(name) {
            tracing::debug!(accessor = name, "keeping view-defined accessor");
            return false;
        }
        self.entries.insert(name.to_owned(), accessor);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Accessor> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All accessor names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for AccessorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
