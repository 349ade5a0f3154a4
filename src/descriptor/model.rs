//! Descriptor types: declared properties, aggregations and events.

use std::fmt;

use crate::value::Value;

/// Errors from descriptor validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("invalid {kind} name `{name}`: expected [A-Za-z][A-Za-z0-9_]*")]
    InvalidName { kind: MemberKind, name: String },
    #[error("`{name}` declared as {second} but already declared as {first}")]
    DuplicateName {
        name: String,
        first: MemberKind,
        second: MemberKind,
    },
    #[error("aggregation `{0}` is not a regular plural (must end in `s`)")]
    IrregularPlural(String),
    #[error("aggregation `{0}` has an empty anchor name")]
    EmptyAnchor(String),
    #[error("`id` property default must be non-empty text or null")]
    InvalidIdentityDefault,
}

/// Which table a declared name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Aggregation,
    Event,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemberKind::Property => "property",
            MemberKind::Aggregation => "aggregation",
            MemberKind::Event => "event",
        })
    }
}

/// Declaration of one property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySpec {
    /// Initial value (`Null` when none is declared).
    pub default_value: Value,
    /// When set, the generated setter stores the value without re-rendering.
    pub prevent_rerendering_on_change: bool,
}

impl PropertySpec {
    /// A property with a `Null` default that re-renders on change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default value (builder).
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Opt out of re-rendering on change (builder).
    pub fn prevent_rerendering(mut self) -> Self {
        self.prevent_rerendering_on_change = true;
        self
    }
}

/// Declaration of one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSpec {
    /// Ref name of the element, inside the owner's subtree, that holds the
    /// members' markup.
    pub dom_anchor_name: String,
}

/// Declaration of one event. Events carry no options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSpec;

/// A declared member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property(PropertySpec),
    Aggregation(AggregationSpec),
    Event(EventSpec),
}

impl Member {
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Property(_) => MemberKind::Property,
            Member::Aggregation(_) => MemberKind::Aggregation,
            Member::Event(_) => MemberKind::Event,
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// A validated component schema, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    members: Vec<(String, Member)>,
}

impl Descriptor {
    /// The empty descriptor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start declaring a descriptor.
    pub fn builder() -> DescriptorBuilder {
        DescriptorBuilder::new()
    }

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        match self.member(name) {
            Some(Member::Property(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn aggregation(&self, name: &str) -> Option<&AggregationSpec> {
        match self.member(name) {
            Some(Member::Aggregation(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn has_event(&self, name: &str) -> bool {
        matches!(self.member(name), Some(Member::Event(_)))
    }

    /// All members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(n, m)| (n.as_str(), m))
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertySpec)> {
        self.members().filter_map(|(n, m)| match m {
            Member::Property(spec) => Some((n, spec)),
            _ => None,
        })
    }

    pub fn aggregations(&self) -> impl Iterator<Item = (&str, &AggregationSpec)> {
        self.members().filter_map(|(n, m)| match m {
            Member::Aggregation(spec) => Some((n, spec)),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.members().filter_map(|(n, m)| match m {
            Member::Event(_) => Some(n),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DescriptorBuilder
// ---------------------------------------------------------------------------

/// Collects declarations; [`build`](DescriptorBuilder::build) validates them.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    members: Vec<(String, Member)>,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.members.push((name.into(), Member::Property(spec)));
        self
    }

    /// Declare an aggregation rendered into the element whose ref is `anchor`.
    pub fn aggregation(mut self, name: impl Into<String>, anchor: impl Into<String>) -> Self {
        self.members.push((
            name.into(),
            Member::Aggregation(AggregationSpec {
                dom_anchor_name: anchor.into(),
            }),
        ));
        self
    }

    /// Declare an event.
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.members.push((name.into(), Member::Event(EventSpec)));
        self
    }

    /// Validate and freeze the declarations.
    pub fn build(self) -> Result<Descriptor, DescriptorError> {
        let mut seen: Vec<(&str, MemberKind)> = Vec::with_capacity(self.members.len());
        for (name, member) in &self.members {
            let kind = member.kind();
            if !is_identifier(name) {
                return Err(DescriptorError::InvalidName {
                    kind,
                    name: name.clone(),
                });
            }
            if let Some((_, first)) = seen.iter().find(|(n, _)| n == name) {
                return Err(DescriptorError::DuplicateName {
                    name: name.clone(),
                    first: *first,
                    second: kind,
                });
            }
            match member {
                Member::Aggregation(spec) => {
                    if name.len() < 2 || !name.ends_with('s') {
                        return Err(DescriptorError::IrregularPlural(name.clone()));
                    }
                    if spec.dom_anchor_name.trim().is_empty() {
                        return Err(DescriptorError::EmptyAnchor(name.clone()));
                    }
                }
                Member::Property(spec) if name == "id" => match &spec.default_value {
                    Value::Null => {}
                    Value::Text(s) if !s.trim().is_empty() => {}
                    _ => return Err(DescriptorError::InvalidIdentityDefault),
                },
                _ => {}
            }
            seen.push((name, kind));
        }
        Ok(Descriptor {
            members: self.members,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
