//! Harness: a headless document for driving components in tests.
//!
//! The `Harness` owns a [`Document`] with a single mount point and exposes
//! the rendered markup and the mutation journal, so tests can assert both
//! what a component shows and how it got there.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::component::{Component, ComponentError};
use crate::render::{Document, Mutation, RenderError, SharedTarget};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A headless render target for testing.
///
/// # Examples
///
/// ```
/// use trellis::component::{Component, RenderContext, View};
/// use trellis::testing::Harness;
///
/// struct Hello;
///
/// impl View for Hello {
///     fn render(&self, cx: &RenderContext<'_>) -> String {
///         format!(r#"<p id="{}">hello</p>"#, cx.id())
///     }
/// }
///
/// let harness = Harness::new();
/// let hello = Component::new(Hello).unwrap();
/// harness.mount(&hello).unwrap();
/// assert!(harness.markup().contains("hello"));
/// ```
pub struct Harness {
    document: Rc<RefCell<Document>>,
}

impl Harness {
    /// Id of the default mount point.
    pub const ROOT: &'static str = "root";

    /// A document containing `<div id="root"></div>`.
    pub fn new() -> Self {
        Self {
            document: Document::with_mount_point(Self::ROOT).into_shared(),
        }
    }

    /// A document whose body is `markup`.
    pub fn with_markup(markup: &str) -> Result<Self, RenderError> {
        Ok(Self {
            document: Document::from_markup(markup)?.into_shared(),
        })
    }

    /// The document as a shareable render target.
    pub fn target(&self) -> SharedTarget {
        self.document.clone()
    }

    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    /// Mount `component` at [`Harness::ROOT`] and clear the journal.
    pub fn mount(&self, component: &Component) -> Result<(), ComponentError> {
        self.mount_at(component, Self::ROOT)
    }

    /// Mount `component` at `location` and clear the journal.
    pub fn mount_at(&self, component: &Component, location: &str) -> Result<(), ComponentError> {
        component.place_at(&self.target(), location)?;
        self.clear_journal();
        Ok(())
    }

    /// Markup of the whole body.
    pub fn markup(&self) -> String {
        self.document.borrow().markup()
    }

    /// Rendered markup of `component`, if mounted.
    pub fn markup_of(&self, component: &Component) -> Option<String> {
        self.document.borrow().markup_of(&component.id())
    }

    /// Inner markup of one of `component`'s anchors.
    pub fn anchor_markup(&self, component: &Component, anchor: &str) -> Option<String> {
        self.document.borrow().anchor_markup(&component.id(), anchor)
    }

    /// Mutations applied since the last mount or clear.
    pub fn journal(&self) -> Vec<Mutation> {
        self.document.borrow().journal().entries().to_vec()
    }

    /// Number of whole-subtree replacements of `component`.
    pub fn replacements(&self, component: &Component) -> usize {
        self.document.borrow().journal().replacements_of(&component.id())
    }

    pub fn clear_journal(&self) {
        self.document.borrow_mut().journal_mut().clear();
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
