//! Component errors.

use crate::descriptor::{DescriptorError, MemberKind};
use crate::event::ListenerError;
use crate::render::RenderError;

/// Errors raised while constructing, mutating or rendering a component.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComponentError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error("unknown construction parameter `{0}`")]
    UnknownParameter(String),
    #[error("parameter `{name}` must be given as a {expected} value")]
    ParameterMismatch { name: String, expected: MemberKind },
    #[error("property `{0}` is read-only")]
    ReadOnlyProperty(String),
    #[error("undeclared property `{0}`")]
    UndeclaredProperty(String),
    #[error("undeclared aggregation `{0}`")]
    UndeclaredAggregation(String),
    #[error("undeclared event `{0}`")]
    UndeclaredEvent(String),
    #[error("no accessor named `{0}`")]
    UnknownAccessor(String),
    #[error("accessor `{accessor}` expects {expected}")]
    InvalidArgument { accessor: String, expected: &'static str },
    #[error("accessor `{0}` returned an unexpected result")]
    UnexpectedReturn(String),
    #[error("aggregating `{child}` would make it its own ancestor")]
    CyclicAggregation { child: String },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("listener failed: {0}")]
    Listener(#[from] ListenerError),
}
