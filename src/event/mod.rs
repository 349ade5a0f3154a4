//! Component events: declared names, listeners, synchronous dispatch.

pub mod registry;

pub use registry::{dispatch, listener, EventRegistry, Listener, ListenerError};
