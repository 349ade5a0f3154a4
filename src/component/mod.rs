//! The component model: descriptor-driven state, generated accessors,
//! aggregation patching, events and the render lifecycle.
//!
//! - [`View`]: the per-type part: descriptor, render, init hook, custom accessors
//! - [`ComponentModel`]: per-instance state built by the descriptor processor
//! - [`Component`]: the shared handle every operation goes through
//! - [`AccessorTable`]: generated and custom accessors, dispatched by name
//! - [`Params`]: construction parameters

pub mod accessor;
pub mod error;
pub mod handle;
pub mod model;
pub mod params;
pub mod store;
pub mod view;

pub use accessor::{Accessor, AccessorTable, Arg, CustomAccessor, Returned};
pub use error::ComponentError;
pub use handle::{Component, WeakComponent};
pub use model::{ComponentModel, ID_PROPERTY};
pub use params::{Param, Params};
pub use view::{RenderContext, View};
