//! # trellis
//!
//! A descriptor-driven component model for markup-rendered user interfaces.
//!
//! Components declare their properties, aggregations (ordered child
//! collections) and events in a descriptor. From it, every instance gets a
//! generated accessor surface (`getTitle`/`setTitle`, `addCard`,
//! `insertCardAt`, ...), an event registry, and a render lifecycle that
//! either replaces the component's rendered subtree or patches one anchor in
//! place, depending on what changed.
//!
//! ## Core Systems
//!
//! - **[`descriptor`]**: Declared schema, validation, accessor naming
//! - **[`component`]**: `View` trait, `Component` handle, accessor table, custody
//! - **[`event`]**: Listener registry with ordered synchronous dispatch
//! - **[`render`]**: `RenderTarget` capability, in-memory `Document`, mutation journal
//! - **[`dom`]**: Slotmap-backed node arena with queries and serialization
//! - **[`markup`]**: Logos tokenizer and fragment parser
//! - **[`components`]**: Card, CardList, card data sources
//! - **[`app`]**: Application root and configuration
//! - **[`testing`]**: Headless harness and snapshot helpers

extern crate self as trellis;

// Foundation
pub mod identity;
pub mod value;

// Markup and tree
pub mod dom;
pub mod markup;

// Component model
pub mod component;
pub mod descriptor;
pub mod event;

// Rendering
pub mod render;

// Collaborators
pub mod app;
pub mod components;

// Test support
pub mod testing;

pub use component::{Component, ComponentError, Params, RenderContext, View};
pub use identity::IdentityToken;
pub use value::Value;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use trellis_macros::descriptor;
