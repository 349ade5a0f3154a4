//! The node arena: parent/child links, fragment grafting, subtree removal.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// A detached node with its subtree, as produced by the markup parser.
///
/// Parsing yields fragments first and grafting happens only once the whole
/// input parsed, so malformed markup never leaves a half-applied patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub data: NodeData,
    pub children: Vec<Fragment>,
}

impl Fragment {
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    /// Add a child fragment (builder).
    pub fn with_child(mut self, child: Fragment) -> Self {
        self.children.push(child);
        self
    }
}

// ---------------------------------------------------------------------------
// Dom
// ---------------------------------------------------------------------------

/// A rendered tree stored in a slotmap arena.
///
/// Node ids stay valid until their node is removed; a removed id simply stops
/// resolving. The first detached node inserted becomes the root that
/// document-wide queries start from.
#[derive(Default)]
pub struct Dom {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with no parent. The first such node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.root.get_or_insert(id);
        id
    }

    /// Append `data` under `parent`. `None` if `parent` is gone.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> Option<NodeId> {
        self.insert_child_at(parent, usize::MAX, data)
    }

    /// Insert `data` under `parent` at `index`, clamped to the child count.
    pub fn insert_child_at(&mut self, parent: NodeId, index: usize, data: NodeData) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);

        let siblings = self.children.get_mut(parent)?;
        siblings.insert(index.min(siblings.len()), id);
        Some(id)
    }

    /// Insert parsed fragments under `parent`, starting at `index` (`None`
    /// appends). Returns the ids of the top-level nodes, in order.
    pub fn graft(&mut self, parent: NodeId, index: Option<usize>, fragments: Vec<Fragment>) -> Vec<NodeId> {
        let start = index.unwrap_or_else(|| self.children(parent).len());
        fragments
            .into_iter()
            .enumerate()
            .filter_map(|(offset, fragment)| self.graft_at(parent, start + offset, fragment))
            .collect()
    }

    fn graft_at(&mut self, parent: NodeId, index: usize, fragment: Fragment) -> Option<NodeId> {
        let Fragment { data, children } = fragment;
        let id = self.insert_child_at(parent, index, data)?;
        for child in children {
            self.graft_at(id, usize::MAX, child);
        }
        Some(id)
    }

    /// Remove `id` with its whole subtree. Returns the node's own data.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        if let Some(parent) = self.parent.get(id).copied() {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&sibling| sibling != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let subtree = self.walk_depth_first(id);
        let mut removed = None;
        for node in subtree {
            self.children.remove(node);
            self.parent.remove(node);
            let data = self.nodes.remove(node);
            if node == id {
                removed = data;
            }
        }
        removed
    }

    /// Remove every descendant of `id`, keeping `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of `id`; empty if `id` is a leaf or gone.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Position of `id` among its siblings.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&sibling| sibling == id)
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// `start` and its descendants in document (pre-)order.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut pending = vec![start];
        while let Some(node) = pending.pop() {
            if self.nodes.contains_key(node) {
                order.push(node);
                pending.extend(self.children(node).iter().rev());
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::ElementData;

    fn el(tag: &str, id: &str) -> NodeData {
        ElementData::new(tag).with_id(id).into()
    }

    /// ```text
    /// body
    /// ├── ul#list
    /// │   ├── li#one
    /// │   └── "text"
    /// └── div#loader
    /// ```
    struct Fixture {
        dom: Dom,
        body: NodeId,
        list: NodeId,
        loader: NodeId,
        one: NodeId,
        text: NodeId,
    }

    fn fixture() -> Fixture {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::element("body"));
        let list = dom.insert_child(body, el("ul", "list")).unwrap();
        let loader = dom.insert_child(body, el("div", "loader")).unwrap();
        let one = dom.insert_child(list, el("li", "one")).unwrap();
        let text = dom.insert_child(list, NodeData::text("text")).unwrap();
        Fixture {
            dom,
            body,
            list,
            loader,
            one,
            text,
        }
    }

    #[test]
    fn first_detached_node_is_root() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::element("body"));
        dom.insert(NodeData::element("template"));
        assert_eq!(dom.root(), Some(body));
    }

    #[test]
    fn parent_links() {
        let f = fixture();
        assert_eq!(f.dom.parent(f.list), Some(f.body));
        assert_eq!(f.dom.parent(f.one), Some(f.list));
        assert_eq!(f.dom.parent(f.body), None);
    }

    #[test]
    fn insert_under_removed_parent_fails() {
        let mut f = fixture();
        f.dom.remove(f.list);
        assert!(f.dom.insert_child(f.list, NodeData::text("x")).is_none());
    }

    #[test]
    fn insert_at_clamps() {
        let mut f = fixture();
        let head = f.dom.insert_child_at(f.body, 0, el("h2", "head")).unwrap();
        let tail = f.dom.insert_child_at(f.body, 42, el("p", "tail")).unwrap();
        assert_eq!(f.dom.children(f.body), &[head, f.list, f.loader, tail]);
        assert_eq!(f.dom.index_of(f.loader), Some(2));
        assert_eq!(f.dom.index_of(f.body), None);
    }

    #[test]
    fn graft_keeps_fragment_order() {
        let mut f = fixture();
        let fragments = vec![
            Fragment::new(el("li", "a")).with_child(Fragment::new(NodeData::text("A"))),
            Fragment::new(el("li", "b")),
        ];
        let inserted = f.dom.graft(f.list, Some(1), fragments);
        assert_eq!(f.dom.children(f.list), &[f.one, inserted[0], inserted[1], f.text]);
        assert_eq!(f.dom.children(inserted[0]).len(), 1);

        let appended = f.dom.graft(f.list, None, vec![Fragment::new(el("li", "c"))]);
        assert_eq!(f.dom.children(f.list).last(), appended.first());
    }

    #[test]
    fn edit_node_in_place() {
        let mut f = fixture();
        if let Some(element) = f.dom.get_mut(f.loader).and_then(NodeData::as_element_mut) {
            element.add_class("loading");
        }
        let loader = f.dom.get(f.loader).and_then(NodeData::as_element).unwrap();
        assert!(loader.has_class("loading"));
    }

    #[test]
    fn remove_takes_subtree() {
        let mut f = fixture();
        let data = f.dom.remove(f.list).unwrap();
        assert_eq!(data.id(), Some("list"));
        assert!(!f.dom.contains(f.one));
        assert!(!f.dom.contains(f.text));
        assert_eq!(f.dom.children(f.body), &[f.loader]);
        assert_eq!(f.dom.len(), 2);
        assert!(f.dom.remove(f.list).is_none());
    }

    #[test]
    fn removing_root_empties_queries() {
        let mut f = fixture();
        f.dom.remove(f.body);
        assert!(f.dom.is_empty());
        assert_eq!(f.dom.root(), None);
    }

    #[test]
    fn clear_children_keeps_parent() {
        let mut f = fixture();
        f.dom.clear_children(f.list);
        assert!(f.dom.contains(f.list));
        assert!(f.dom.children(f.list).is_empty());
        assert_eq!(f.dom.len(), 3);
    }

    #[test]
    fn pre_order_walk() {
        let f = fixture();
        assert_eq!(
            f.dom.walk_depth_first(f.body),
            vec![f.body, f.list, f.one, f.text, f.loader]
        );
        assert_eq!(f.dom.walk_depth_first(f.list), vec![f.list, f.one, f.text]);
    }
}
