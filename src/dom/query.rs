//! DOM queries: by id, class, tag, ref; subtree-scoped lookups; text content.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node in tree order whose `id` attribute matches.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root()?;
        self.find_in_subtree(root, |data| data.id() == Some(id))
    }

    /// Find all elements that have the given CSS class, in tree order.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.as_element().is_some_and(|el| el.has_class(class)))
    }

    /// Find all elements with the given tag, in tree order.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|data| data.as_element().is_some_and(|el| el.tag == tag))
    }

    /// Find all nodes under the root matching an arbitrary predicate, in tree order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    /// First node in `start`'s subtree (inclusive, pre-order) matching `predicate`.
    pub fn find_in_subtree(&self, start: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Option<NodeId> {
        self.walk_depth_first(start)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Resolve a named sub-element strictly below `scope`: an element whose
    /// `ref` attribute is `name`, or whose `id` is `ref_id`.
    ///
    /// The search stays inside the scope's own markup. A nested element whose
    /// `id` is not one of the scope's `<scope-id>-*` ids is the root of
    /// another component; it is neither matched nor descended into.
    pub fn find_ref(&self, scope: NodeId, name: &str, ref_id: &str) -> Option<NodeId> {
        let own_prefix = self.get(scope).and_then(NodeData::id).map(|id| format!("{id}-"));
        let is_own_id = |id: &str| {
            id == ref_id || own_prefix.as_deref().is_some_and(|prefix| id.starts_with(prefix))
        };

        let mut pending: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = pending.pop() {
            if let Some(element) = self.get(node).and_then(NodeData::as_element) {
                match element.id() {
                    Some(id) if id == ref_id => return Some(node),
                    Some(id) if !is_own_id(id) => continue,
                    _ if element.ref_name() == Some(name) => return Some(node),
                    _ => {}
                }
            }
            pending.extend(self.children(node).iter().rev());
        }
        None
    }

    /// Concatenated text of all text nodes under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk_depth_first(id)
            .into_iter()
            .filter_map(|n| match self.get(n) {
                Some(NodeData::Text(t)) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}
