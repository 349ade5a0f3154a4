//! In-memory render target backed by the DOM arena.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::node::{ElementData, NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::identity::IdentityToken;
use crate::markup::parse_fragment;
use crate::render::journal::{Journal, Mutation};
use crate::render::target::{ElementSnapshot, RenderError, RenderTarget};

/// A parsed document: a `<body>` element holding everything mounted into it.
///
/// Implements [`RenderTarget`] by parsing markup into [`Dom`] nodes and
/// locating components by their `id` attribute. Every applied change is
/// recorded in the [`Journal`].
pub struct Document {
    dom: Dom,
    body: NodeId,
    journal: Journal,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::element("body"));
        Self {
            dom,
            body,
            journal: Journal::new(),
        }
    }

    /// A document whose body contains `markup` (typically the mount
    /// locations, e.g. `<div id="app"></div>`).
    pub fn from_markup(markup: &str) -> Result<Self, RenderError> {
        let fragments = parse_fragment(markup)?;
        let mut doc = Self::new();
        doc.dom.graft(doc.body, None, fragments);
        Ok(doc)
    }

    /// A document whose body holds one empty `<div>` with id `location`.
    pub fn with_mount_point(location: &str) -> Self {
        let mut doc = Self::new();
        doc.dom
            .insert_child(doc.body, ElementData::new("div").with_id(location).into());
        doc
    }

    /// Wrap in `Rc<RefCell<_>>` for sharing with components.
    pub fn into_shared(self) -> Rc<RefCell<Document>> {
        Rc::new(RefCell::new(self))
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Markup of everything inside the body.
    pub fn markup(&self) -> String {
        self.dom.inner_markup(self.body)
    }

    /// Outer markup of component `id`, if mounted.
    pub fn markup_of(&self, id: &IdentityToken) -> Option<String> {
        self.locate(id).map(|node| self.dom.outer_markup(node))
    }

    /// Inner markup of anchor `anchor` in component `id`.
    pub fn anchor_markup(&self, id: &IdentityToken, anchor: &str) -> Option<String> {
        self.anchor(id, anchor).map(|node| self.dom.inner_markup(node))
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    fn locate(&self, id: &IdentityToken) -> Option<NodeId> {
        self.dom.query_by_id(id.as_str())
    }

    fn anchor(&self, id: &IdentityToken, anchor: &str) -> Option<NodeId> {
        let root = self.locate(id)?;
        self.dom.find_ref(root, anchor, &id.ref_id(anchor))
    }

    fn snapshot(&self, node: NodeId) -> Option<ElementSnapshot> {
        let element = self.dom.get(node)?.as_element()?.clone();
        Some(ElementSnapshot {
            element,
            markup: self.dom.outer_markup(node),
            text: self.dom.text_content(node),
        })
    }

    /// Child of `anchor` (or deeper) carrying component `child`'s id.
    fn member_node(&self, anchor: NodeId, child: &IdentityToken) -> Option<NodeId> {
        self.dom
            .find_in_subtree(anchor, |data| data.id() == Some(child.as_str()))
            .filter(|&node| node != anchor)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for Document {
    fn mount(&mut self, location: &str, markup: &str) -> Result<(), RenderError> {
        let node = self
            .dom
            .query_by_id(location)
            .ok_or_else(|| RenderError::MissingLocation(location.to_owned()))?;
        let fragments = parse_fragment(markup)?;
        self.dom.clear_children(node);
        self.dom.graft(node, None, fragments);
        self.journal.record(Mutation::Mount {
            location: location.to_owned(),
        });
        Ok(())
    }

    fn is_mounted(&self, id: &IdentityToken) -> bool {
        self.locate(id).is_some()
    }

    fn element(&self, id: &IdentityToken) -> Option<ElementSnapshot> {
        self.locate(id).and_then(|node| self.snapshot(node))
    }

    fn element_ref(&self, id: &IdentityToken, name: &str) -> Option<ElementSnapshot> {
        self.anchor(id, name).and_then(|node| self.snapshot(node))
    }

    fn replace(&mut self, id: &IdentityToken, markup: &str) -> Result<bool, RenderError> {
        let Some(node) = self.locate(id) else {
            return Ok(false);
        };
        let (Some(parent), Some(index)) = (self.dom.parent(node), self.dom.index_of(node)) else {
            return Ok(false);
        };
        let fragments = parse_fragment(markup)?;
        self.dom.remove(node);
        self.dom.graft(parent, Some(index), fragments);
        self.journal.record(Mutation::Replace { id: id.clone() });
        Ok(true)
    }

    fn fill_anchor(&mut self, id: &IdentityToken, anchor: &str, markup: &str) -> Result<bool, RenderError> {
        let Some(node) = self.anchor(id, anchor) else {
            return Ok(false);
        };
        let fragments = parse_fragment(markup)?;
        self.dom.clear_children(node);
        self.dom.graft(node, None, fragments);
        self.journal.record(Mutation::FillAnchor {
            id: id.clone(),
            anchor: anchor.to_owned(),
        });
        Ok(true)
    }

    fn append_to_anchor(&mut self, id: &IdentityToken, anchor: &str, markup: &str) -> Result<bool, RenderError> {
        let Some(node) = self.anchor(id, anchor) else {
            return Ok(false);
        };
        let fragments = parse_fragment(markup)?;
        self.dom.graft(node, None, fragments);
        self.journal.record(Mutation::Append {
            id: id.clone(),
            anchor: anchor.to_owned(),
        });
        Ok(true)
    }

    fn insert_before(
        &mut self,
        id: &IdentityToken,
        anchor: &str,
        sibling: &IdentityToken,
        markup: &str,
    ) -> Result<bool, RenderError> {
        let Some(anchor_node) = self.anchor(id, anchor) else {
            return Ok(false);
        };
        let Some(sibling_node) = self.member_node(anchor_node, sibling) else {
            return Ok(false);
        };
        let (Some(parent), Some(index)) = (self.dom.parent(sibling_node), self.dom.index_of(sibling_node)) else {
            return Ok(false);
        };
        let fragments = parse_fragment(markup)?;
        self.dom.graft(parent, Some(index), fragments);
        self.journal.record(Mutation::InsertBefore {
            id: id.clone(),
            anchor: anchor.to_owned(),
            sibling: sibling.clone(),
        });
        Ok(true)
    }

    fn remove_from_anchor(&mut self, id: &IdentityToken, anchor: &str, child: &IdentityToken) -> bool {
        let Some(anchor_node) = self.anchor(id, anchor) else {
            return false;
        };
        let Some(child_node) = self.member_node(anchor_node, child) else {
            return false;
        };
        self.dom.remove(child_node);
        self.journal.record(Mutation::Remove {
            id: id.clone(),
            anchor: anchor.to_owned(),
            child: child.clone(),
        });
        true
    }

    fn set_ref_class(&mut self, id: &IdentityToken, name: &str, class: &str, enabled: bool) -> bool {
        let Some(node) = self.anchor(id, name) else {
            return false;
        };
        let Some(element) = self.dom.get_mut(node).and_then(NodeData::as_element_mut) else {
            return false;
        };
        element.set_class(class, enabled);
        self.journal.record(Mutation::ClassChange {
            id: id.clone(),
            name: name.to_owned(),
            class: class.to_owned(),
            enabled,
        });
        true
    }
}
