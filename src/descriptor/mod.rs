//! Descriptors: the declared schema of a component type.

pub mod model;
pub mod naming;

pub use model::{
    AggregationSpec, Descriptor, DescriptorBuilder, DescriptorError, EventSpec, Member,
    MemberKind, PropertySpec,
};
pub use naming::{AggregationAccessors, PropertyAccessors};
