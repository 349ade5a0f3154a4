//! Rendering: the render-target capability, the in-memory document, the mutation journal.

pub mod document;
pub mod journal;
pub mod target;

pub use document::Document;
pub use journal::{Journal, Mutation};
pub use target::{ElementSnapshot, RenderError, RenderTarget, SharedTarget};
