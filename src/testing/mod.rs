//! Headless testing: the document harness and markup snapshot helpers.
//!
//! Use the [`Harness`] to mount components into an in-memory document and
//! inspect the markup and the mutation journal. Use [`render_to_string`] and
//! [`pretty_markup`] to capture component output for snapshot assertions.

pub mod harness;
pub mod snapshot;

pub use harness::Harness;
pub use snapshot::{normalize_markup, pretty_markup, render_to_string};
