//! DOM arena: slotmap-backed node tree with id/class/ref queries and serialization.

pub mod node;
pub mod query;
pub mod serialize;
pub mod tree;

pub use node::{Attribute, ElementData, NodeData, NodeId};
pub use tree::{Dom, Fragment};
