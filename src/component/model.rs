//! The component model: identity, declared state and accessor table of one instance.
//!
//! [`ComponentModel::apply_descriptor`] is the descriptor processor. It runs
//! once per instance, assigns the identity token before anything else, and
//! creates one table entry plus the generated accessors for every declared
//! member.

use std::fmt;
use std::rc::Weak;

use super::accessor::{Accessor, AccessorTable};
use super::error::ComponentError;
use super::handle::{Component, Inner};
use super::store::{AggregationStore, PropertyStore};
use crate::descriptor::{
    AggregationAccessors, AggregationSpec, Descriptor, Member, MemberKind, PropertyAccessors, PropertySpec,
};
use crate::event::EventRegistry;
use crate::identity::IdentityToken;
use crate::render::SharedTarget;
use crate::value::Value;

/// Name of the identity property every component carries.
pub const ID_PROPERTY: &str = "id";

/// Custody link from a child to the aggregation holding it.
#[derive(Debug, Clone)]
pub(crate) struct ParentLink {
    pub(crate) owner: Weak<Inner>,
    pub(crate) aggregation: String,
}

/// Mutable state of one component instance.
pub struct ComponentModel {
    pub(crate) id: IdentityToken,
    pub(crate) descriptor: Descriptor,
    pub(crate) properties: PropertyStore,
    pub(crate) aggregations: AggregationStore,
    pub(crate) events: EventRegistry,
    pub(crate) accessors: AccessorTable,
    pub(crate) target: Option<SharedTarget>,
    pub(crate) parent: Option<ParentLink>,
}

impl ComponentModel {
    /// Build the model for `descriptor`, keeping any view-registered entries
    /// already in `accessors`.
    pub fn apply_descriptor(descriptor: Descriptor, accessors: AccessorTable) -> Self {
        let id = explicit_identity(&descriptor).unwrap_or_else(IdentityToken::generate);
        let mut model = Self {
            id,
            descriptor: Descriptor::empty(),
            properties: PropertyStore::default(),
            aggregations: AggregationStore::default(),
            events: EventRegistry::new(),
            accessors,
            target: None,
            parent: None,
        };

        for (name, member) in descriptor.members() {
            match member {
                Member::Property(spec) => model.create_property(name, spec),
                Member::Aggregation(spec) => model.create_aggregation(name, spec),
                Member::Event(_) => model.create_event(name),
            }
        }
        if !model.properties.contains(ID_PROPERTY) {
            model.create_property(ID_PROPERTY, &PropertySpec::new());
        }
        model.descriptor = descriptor;

        tracing::debug!(
            id = %model.id,
            properties = model.properties.len(),
            accessors = model.accessors.len(),
            "descriptor applied"
        );
        model
    }

    fn create_property(&mut self, name: &str, spec: &PropertySpec) {
        let initial = if name == ID_PROPERTY {
            Value::Text(self.id.as_str().to_owned())
        } else {
            spec.default_value.clone()
        };
        self.properties.create(name, initial);

        let names = PropertyAccessors::for_property(name);
        self.accessors.define(&names.getter, Accessor::GetProperty(name.to_owned()));
        self.accessors.define(&names.setter, Accessor::SetProperty(name.to_owned()));
    }

    fn create_aggregation(&mut self, name: &str, _spec: &AggregationSpec) {
        self.aggregations.create(name);

        let names = AggregationAccessors::for_aggregation(name);
        let member = || name.to_owned();
        self.accessors.define(&names.getter, Accessor::GetAggregation(member()));
        self.accessors.define(&names.setter, Accessor::SetAggregation(member()));
        self.accessors.define(&names.add, Accessor::AddChild(member()));
        self.accessors.define(&names.remove, Accessor::RemoveChild(member()));
        self.accessors.define(&names.insert_at, Accessor::InsertChildAt(member()));
        self.accessors.define(&names.remove_at, Accessor::RemoveChildAt(member()));
    }

    fn create_event(&mut self, name: &str) {
        self.events.declare(name);
    }

    pub fn id(&self) -> &IdentityToken {
        &self.id
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn accessors(&self) -> &AccessorTable {
        &self.accessors
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Which table `name` lives in. The synthesized `id` counts as a property.
    pub fn member_kind(&self, name: &str) -> Option<MemberKind> {
        if self.properties.contains(name) {
            return Some(MemberKind::Property);
        }
        self.descriptor.member(name).map(Member::kind)
    }

    pub(crate) fn property(&self, name: &str) -> Result<Value, ComponentError> {
        self.properties
            .get(name)
            .cloned()
            .ok_or_else(|| ComponentError::UndeclaredProperty(name.to_owned()))
    }

    /// Whether the generated setter for `name` re-renders.
    pub(crate) fn rerenders_on_change(&self, name: &str) -> bool {
        self.descriptor
            .property(name)
            .map_or(true, |spec| !spec.prevent_rerendering_on_change)
    }

    pub(crate) fn anchor_of(&self, aggregation: &str) -> Result<String, ComponentError> {
        self.descriptor
            .aggregation(aggregation)
            .map(|spec| spec.dom_anchor_name.clone())
            .ok_or_else(|| ComponentError::UndeclaredAggregation(aggregation.to_owned()))
    }

    pub(crate) fn members(&self, aggregation: &str) -> Result<Vec<Component>, ComponentError> {
        self.aggregations
            .get(aggregation)
            .map(<[_]>::to_vec)
            .ok_or_else(|| ComponentError::UndeclaredAggregation(aggregation.to_owned()))
    }
}

impl fmt::Debug for ComponentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentModel")
            .field("id", &self.id)
            .field("properties", &self.properties)
            .field("events", &self.events)
            .field("accessors", &self.accessors)
            .field("mounted", &self.target.is_some())
            .field("parent", &self.parent.as_ref().map(|link| &link.aggregation))
            .finish_non_exhaustive()
    }
}

/// An explicit `id` property with non-empty text default becomes the token.
fn explicit_identity(descriptor: &Descriptor) -> Option<IdentityToken> {
    match descriptor.property(ID_PROPERTY) {
        Some(PropertySpec {
            default_value: Value::Text(text),
            ..
        }) => IdentityToken::from_string(text.clone()),
        _ => None,
    }
}
