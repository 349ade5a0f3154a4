//! The render-target capability.
//!
//! Components never touch a global document. Every mount, lookup and patch
//! goes through a [`RenderTarget`] handed to them at mount time, addressed by
//! the component's [`IdentityToken`] and, for patches inside a component, by
//! the ref name of an anchor element in its subtree.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::node::ElementData;
use crate::identity::IdentityToken;
use crate::markup::MarkupError;

/// Errors raised by render targets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("malformed markup: {0}")]
    Markup(#[from] MarkupError),
    #[error("mount location `{0}` does not exist")]
    MissingLocation(String),
}

/// A detached copy of a rendered element, returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Tag and attributes.
    pub element: ElementData,
    /// Outer markup of the element's subtree.
    pub markup: String,
    /// Concatenated text content of the subtree.
    pub text: String,
}

impl ElementSnapshot {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.attr(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.element.has_class(class)
    }
}

/// A live rendered tree that components mount into and patch.
///
/// Patch operations return `Ok(false)` when the addressed node or anchor is
/// not present; that is a no-op, not an error.
pub trait RenderTarget {
    /// Write `markup` as the sole content of the element whose id is `location`.
    fn mount(&mut self, location: &str, markup: &str) -> Result<(), RenderError>;

    /// Whether an element with id `id` is present.
    fn is_mounted(&self, id: &IdentityToken) -> bool;

    /// The root element of component `id`.
    fn element(&self, id: &IdentityToken) -> Option<ElementSnapshot>;

    /// A named sub-element inside component `id`'s subtree.
    fn element_ref(&self, id: &IdentityToken, name: &str) -> Option<ElementSnapshot>;

    /// Replace component `id`'s whole subtree with `markup`.
    fn replace(&mut self, id: &IdentityToken, markup: &str) -> Result<bool, RenderError>;

    /// Replace the content of anchor `anchor` in component `id` with `markup`.
    fn fill_anchor(&mut self, id: &IdentityToken, anchor: &str, markup: &str) -> Result<bool, RenderError>;

    /// Append `markup` at the end of anchor `anchor` in component `id`.
    fn append_to_anchor(&mut self, id: &IdentityToken, anchor: &str, markup: &str) -> Result<bool, RenderError>;

    /// Insert `markup` immediately before the node of component `sibling`
    /// inside anchor `anchor` of component `id`.
    fn insert_before(
        &mut self,
        id: &IdentityToken,
        anchor: &str,
        sibling: &IdentityToken,
        markup: &str,
    ) -> Result<bool, RenderError>;

    /// Remove the node of component `child` from anchor `anchor` of component `id`.
    fn remove_from_anchor(&mut self, id: &IdentityToken, anchor: &str, child: &IdentityToken) -> bool;

    /// Add or remove `class` on sub-element `name` of component `id`.
    fn set_ref_class(&mut self, id: &IdentityToken, name: &str, class: &str, enabled: bool) -> bool;
}

/// A render target shared between the components mounted into it.
pub type SharedTarget = Rc<RefCell<dyn RenderTarget>>;
