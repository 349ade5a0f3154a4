//! View trait: the per-type part of a component.
//!
//! A [`View`] declares its descriptor, optionally registers custom accessors
//! and an initialization hook, and renders markup from a [`RenderContext`].
//! Views hold no mutable state; everything that changes lives in the
//! component's model and is read back through the context.

use super::accessor::AccessorTable;
use super::error::ComponentError;
use super::handle::Component;
use crate::descriptor::DescriptorBuilder;
use crate::identity::IdentityToken;
use crate::markup::{escape_attr, escape_text};
use crate::value::Value;

// ---------------------------------------------------------------------------
// View trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every component type.
///
/// Object-safe: components store their view as `Box<dyn View>`.
pub trait View: 'static {
    /// The declared schema. Defaults to the empty descriptor.
    fn descriptor(&self) -> DescriptorBuilder {
        DescriptorBuilder::new()
    }

    /// Register custom accessors. Runs before accessor generation, so
    /// entries registered here take precedence over generated ones.
    fn accessors(&self, _table: &mut AccessorTable) {}

    /// Initialization hook, run once after the descriptor and the
    /// construction parameters have been applied.
    fn init(&self, _component: &Component) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Markup for the current state. Defaults to empty content.
    ///
    /// The root element should carry `id="{cx.id()}"` so the component can
    /// be located for re-rendering, and anchors should carry `ref` attributes.
    /// Any other `id` inside the markup must be one of `cx.ref_id(..)`: a
    /// foreign id marks the root of a nested component, and ref lookups do
    /// not look past it.
    ///
    /// A member that renders no root element cannot be located, so patches
    /// addressed to it are no-ops.
    fn render(&self, _cx: &RenderContext<'_>) -> String {
        String::new()
    }

    /// Type name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

/// Read access to a component's state while its view renders.
pub struct RenderContext<'a> {
    component: &'a Component,
    id: IdentityToken,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(component: &'a Component) -> Self {
        Self {
            id: component.id(),
            component,
        }
    }

    /// The identity token, to be emitted as the root element's `id`.
    pub fn id(&self) -> &IdentityToken {
        &self.id
    }

    /// Conventional id of a named sub-element.
    pub fn ref_id(&self, name: &str) -> String {
        self.id.ref_id(name)
    }

    /// A property value, `Null` if undeclared.
    pub fn prop(&self, name: &str) -> Value {
        self.component.property(name).unwrap_or_default()
    }

    /// A property formatted and escaped for element content.
    pub fn text(&self, name: &str) -> String {
        escape_text(&self.prop(name).to_string())
    }

    /// A property formatted and escaped for a quoted attribute value.
    pub fn attr(&self, name: &str) -> String {
        escape_attr(&self.prop(name).to_string())
    }

    /// Whether a property is truthy.
    pub fn flag(&self, name: &str) -> bool {
        self.prop(name).is_truthy()
    }

    /// Members of an aggregation, empty if undeclared.
    pub fn children(&self, name: &str) -> Vec<Component> {
        self.component.aggregation(name).unwrap_or_default()
    }

    /// Concatenated markup of an aggregation's members, in order.
    pub fn render_children(&self, name: &str) -> String {
        self.children(name).iter().map(Component::to_string).collect()
    }

    /// The component being rendered.
    pub fn component(&self) -> &Component {
        self.component
    }
}
