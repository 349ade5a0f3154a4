//! Mutation journal: the ordered record of changes applied to a document.
//!
//! A [`Document`](crate::render::Document) appends one [`Mutation`] per
//! successful mount or patch. Tests read it to assert how many subtree
//! replacements a setter caused, or that a patch stayed localized.

use crate::identity::IdentityToken;

/// One applied change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Markup written into a mount location.
    Mount { location: String },
    /// A component's subtree was replaced wholesale.
    Replace { id: IdentityToken },
    /// An anchor's content was replaced.
    FillAnchor { id: IdentityToken, anchor: String },
    /// Markup appended to an anchor.
    Append { id: IdentityToken, anchor: String },
    /// Markup inserted before a sibling inside an anchor.
    InsertBefore {
        id: IdentityToken,
        anchor: String,
        sibling: IdentityToken,
    },
    /// A child node removed from an anchor.
    Remove {
        id: IdentityToken,
        anchor: String,
        child: IdentityToken,
    },
    /// A class toggled on a sub-element.
    ClassChange {
        id: IdentityToken,
        name: String,
        class: String,
        enabled: bool,
    },
}

impl Mutation {
    /// The component the mutation was addressed to, if any.
    pub fn target_id(&self) -> Option<&IdentityToken> {
        match self {
            Mutation::Mount { .. } => None,
            Mutation::Replace { id }
            | Mutation::FillAnchor { id, .. }
            | Mutation::Append { id, .. }
            | Mutation::InsertBefore { id, .. }
            | Mutation::Remove { id, .. }
            | Mutation::ClassChange { id, .. } => Some(id),
        }
    }
}

/// Ordered list of applied mutations.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<Mutation>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mutation.
    pub fn record(&mut self, mutation: Mutation) {
        tracing::trace!(?mutation, "document mutated");
        self.entries.push(mutation);
    }

    /// All mutations so far, oldest first.
    pub fn entries(&self) -> &[Mutation] {
        &self.entries
    }

    /// Drain and return all recorded mutations.
    pub fn drain(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.entries)
    }

    /// Number of whole-subtree replacements of component `id`.
    pub fn replacements_of(&self, id: &IdentityToken) -> usize {
        self.entries
            .iter()
            .filter(|m| matches!(m, Mutation::Replace { id: replaced } if replaced == id))
            .count()
    }

    /// Mutations addressed to component `id`.
    pub fn for_component<'a>(&'a self, id: &'a IdentityToken) -> impl Iterator<Item = &'a Mutation> + 'a {
        self.entries.iter().filter(move |m| m.target_id() == Some(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
