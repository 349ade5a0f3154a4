//! Per-instance property and aggregation tables.

use std::collections::HashMap;

use super::handle::Component;
use crate::value::Value;

/// Named property values.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: HashMap<String, Value>,
}

impl PropertyStore {
    /// Create an entry holding `initial`. An existing entry is left alone.
    pub fn create(&mut self, name: &str, initial: Value) {
        self.values.entry(name.to_owned()).or_insert(initial);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Overwrite an existing entry. Returns `false` if `name` has no entry.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Named ordered child sequences. Membership is by reference identity.
#[derive(Debug, Clone, Default)]
pub struct AggregationStore {
    lists: HashMap<String, Vec<Component>>,
}

impl AggregationStore {
    /// Create an empty sequence. An existing entry is left alone.
    pub fn create(&mut self, name: &str) {
        self.lists.entry(name.to_owned()).or_default();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&[Component]> {
        self.lists.get(name).map(Vec::as_slice)
    }

    /// Replace the sequence, returning the previous members.
    pub fn replace(&mut self, name: &str, members: Vec<Component>) -> Vec<Component> {
        std::mem::replace(self.lists.entry(name.to_owned()).or_default(), members)
    }

    pub fn push(&mut self, name: &str, child: Component) {
        self.lists.entry(name.to_owned()).or_default().push(child);
    }

    /// Insert at `index` (clamped to the length).
    pub fn insert(&mut self, name: &str, index: usize, child: Component) {
        let list = self.lists.entry(name.to_owned()).or_default();
        let index = index.min(list.len());
        list.insert(index, child);
    }

    /// Remove the first member identical to `child`. Returns its former position.
    pub fn remove(&mut self, name: &str, child: &Component) -> Option<usize> {
        let list = self.lists.get_mut(name)?;
        let index = list.iter().position(|member| member.ptr_eq(child))?;
        list.remove(index);
        Some(index)
    }

    pub fn member_at(&self, name: &str, index: usize) -> Option<&Component> {
        self.lists.get(name)?.get(index)
    }

    /// Every member of every aggregation.
    pub fn all_members(&self) -> Vec<Component> {
        self.lists.values().flatten().cloned().collect()
    }
}
