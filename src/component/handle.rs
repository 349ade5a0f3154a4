//! The `Component` handle: construction, accessors, aggregation patching,
//! events and the render lifecycle.
//!
//! A [`Component`] is a cheap `Rc` handle around a [`ComponentModel`] (in a
//! `RefCell`) and an immutable [`View`]. Cloning the handle never copies the
//! component; equality is reference identity.
//!
//! No model or target borrow is held across a call into a view, a listener or
//! another component. Every method below copies what it needs out of the
//! model, releases the borrow, and only then renders, dispatches or patches.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::accessor::{Accessor, Arg, Returned};
use super::error::ComponentError;
use super::model::{ComponentModel, ParentLink, ID_PROPERTY};
use super::params::{Param, Params};
use super::view::{RenderContext, View};
use crate::descriptor::{MemberKind, PropertyAccessors};
use crate::event::{dispatch, Listener};
use crate::identity::IdentityToken;
use crate::markup::parse_fragment;
use crate::render::{ElementSnapshot, RenderError, RenderTarget, SharedTarget};
use crate::value::Value;

pub(crate) struct Inner {
    model: RefCell<ComponentModel>,
    view: Box<dyn View>,
}

/// Handle to a component instance.
#[derive(Clone)]
pub struct Component {
    inner: Rc<Inner>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Component {
    /// Construct with no parameters.
    pub fn new(view: impl View) -> Result<Self, ComponentError> {
        Self::with_params(view, Params::new())
    }

    /// Construct: descriptor, then parameters, then the view's init hook.
    pub fn with_params(view: impl View, params: Params) -> Result<Self, ComponentError> {
        let descriptor = view.descriptor().build()?;
        let mut accessors = super::AccessorTable::new();
        view.accessors(&mut accessors);
        let model = ComponentModel::apply_descriptor(descriptor, accessors);

        let component = Self {
            inner: Rc::new(Inner {
                model: RefCell::new(model),
                view: Box::new(view),
            }),
        };
        component.apply_parameters(params)?;
        component.inner.view.init(&component)?;
        tracing::debug!(id = %component.id(), view = component.view_name(), "component constructed");
        Ok(component)
    }

    /// Merge construction parameters. Values and child lists are stored
    /// directly without rendering; listeners are appended.
    fn apply_parameters(&self, params: Params) -> Result<(), ComponentError> {
        for (name, param) in params {
            let kind = self.inner.model.borrow().member_kind(&name);
            match (kind, param) {
                (None, _) => return Err(ComponentError::UnknownParameter(name)),
                (Some(MemberKind::Property), _) if name == ID_PROPERTY => {
                    return Err(ComponentError::ReadOnlyProperty(name));
                }
                (Some(MemberKind::Property), Param::Value(value)) => {
                    self.inner.model.borrow_mut().properties.set(&name, value);
                }
                (Some(MemberKind::Aggregation), Param::Children(children)) => {
                    let children = dedupe(children);
                    for child in &children {
                        self.ensure_acyclic(child)?;
                        child.release()?;
                    }
                    self.inner.model.borrow_mut().aggregations.replace(&name, children.clone());
                    for child in &children {
                        self.adopt(&name, child);
                    }
                }
                (Some(MemberKind::Event), Param::Listener(listener)) => {
                    self.inner.model.borrow_mut().events.subscribe(&name, listener);
                }
                (Some(expected), _) => return Err(ComponentError::ParameterMismatch { name, expected }),
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Identity & introspection
// ---------------------------------------------------------------------------

impl Component {
    /// The identity token.
    pub fn id(&self) -> IdentityToken {
        self.inner.model.borrow().id.clone()
    }

    /// Conventional id of a named sub-element: `"<token>-<name>"`.
    pub fn ref_id(&self, name: &str) -> String {
        self.inner.model.borrow().id.ref_id(name)
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn view_name(&self) -> &'static str {
        self.inner.view.name()
    }

    /// Run `f` with read access to the model.
    pub fn with_model<R>(&self, f: impl FnOnce(&ComponentModel) -> R) -> R {
        f(&self.inner.model.borrow())
    }

    /// The component whose aggregation holds this one.
    pub fn parent(&self) -> Option<Component> {
        let model = self.inner.model.borrow();
        let link = model.parent.as_ref()?;
        link.owner.upgrade().map(|inner| Component { inner })
    }

    /// Name of the aggregation holding this component.
    pub fn parent_aggregation(&self) -> Option<String> {
        let model = self.inner.model.borrow();
        model.parent.as_ref().map(|link| link.aggregation.clone())
    }
}

// ---------------------------------------------------------------------------
// Accessor dispatch
// ---------------------------------------------------------------------------

impl Component {
    /// Call accessor `name` (generated or custom).
    pub fn invoke(&self, name: &str, arg: impl Into<Arg>) -> Result<Returned, ComponentError> {
        let accessor = self
            .inner
            .model
            .borrow()
            .accessors
            .get(name)
            .cloned()
            .ok_or_else(|| ComponentError::UnknownAccessor(name.to_owned()))?;
        let arg = arg.into();
        let invalid = |expected: &'static str| ComponentError::InvalidArgument {
            accessor: name.to_owned(),
            expected,
        };

        match (accessor, arg) {
            (Accessor::Custom(body), arg) => body(self, arg),
            (Accessor::GetProperty(p), Arg::None) => self.property(&p).map(Returned::Value),
            (Accessor::GetProperty(_), _) => Err(invalid("no argument")),
            (Accessor::SetProperty(p), Arg::Value(value)) => {
                self.store_property(&p, value)?;
                Ok(Returned::Component(self.clone()))
            }
            (Accessor::SetProperty(_), _) => Err(invalid("a value")),
            (Accessor::GetAggregation(a), Arg::None) => self.aggregation(&a).map(Returned::Children),
            (Accessor::GetAggregation(_), _) => Err(invalid("no argument")),
            (Accessor::SetAggregation(a), Arg::Children(children)) => {
                self.set_aggregation(&a, children)?;
                Ok(Returned::Component(self.clone()))
            }
            (Accessor::SetAggregation(_), _) => Err(invalid("a list of child components")),
            (Accessor::AddChild(a), Arg::Child(child)) => {
                self.add_child(&a, child)?;
                Ok(Returned::Component(self.clone()))
            }
            (Accessor::AddChild(_), _) => Err(invalid("a child component")),
            (Accessor::RemoveChild(a), Arg::Child(child)) => {
                self.remove_child(&a, &child)?;
                Ok(Returned::Component(self.clone()))
            }
            (Accessor::RemoveChild(_), _) => Err(invalid("a child component")),
            (Accessor::InsertChildAt(a), Arg::At(index, child)) => {
                self.insert_child_at(&a, index, child)?;
                Ok(Returned::Component(self.clone()))
            }
            (Accessor::InsertChildAt(_), _) => Err(invalid("an index and a child component")),
            (Accessor::RemoveChildAt(a), Arg::Index(index)) => {
                self.remove_child_at(&a, index)?;
                Ok(Returned::Component(self.clone()))
            }
            (Accessor::RemoveChildAt(_), _) => Err(invalid("an index")),
        }
    }

    /// Read a property through its getter, so view overrides apply.
    pub fn get(&self, property: &str) -> Result<Value, ComponentError> {
        let getter = PropertyAccessors::for_property(property).getter;
        match self.invoke(&getter, Arg::None) {
            Ok(returned) => returned
                .into_value()
                .ok_or(ComponentError::UnexpectedReturn(getter)),
            Err(ComponentError::UnknownAccessor(_)) => Err(ComponentError::UndeclaredProperty(property.to_owned())),
            Err(err) => Err(err),
        }
    }

    /// Write a property through its setter, so view overrides apply.
    pub fn set(&self, property: &str, value: impl Into<Value>) -> Result<(), ComponentError> {
        let setter = PropertyAccessors::for_property(property).setter;
        match self.invoke(&setter, Arg::Value(value.into())) {
            Ok(_) => Ok(()),
            Err(ComponentError::UnknownAccessor(_)) => Err(ComponentError::UndeclaredProperty(property.to_owned())),
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

impl Component {
    /// The stored value of a property (the generated getter body).
    pub fn property(&self, name: &str) -> Result<Value, ComponentError> {
        self.inner.model.borrow().property(name)
    }

    /// Overwrite a property without any render effect.
    pub fn write_property(&self, name: &str, value: impl Into<Value>) -> Result<(), ComponentError> {
        if name == ID_PROPERTY {
            return Err(ComponentError::ReadOnlyProperty(name.to_owned()));
        }
        if self.inner.model.borrow_mut().properties.set(name, value.into()) {
            Ok(())
        } else {
            Err(ComponentError::UndeclaredProperty(name.to_owned()))
        }
    }

    /// The generated setter body: store, then re-render unless the property
    /// opted out. If the re-render fails the previous value is restored, so
    /// the stored state always matches what is rendered.
    pub fn store_property(&self, name: &str, value: impl Into<Value>) -> Result<(), ComponentError> {
        let previous = self.property(name)?;
        self.write_property(name, value)?;
        let rerender = self.inner.model.borrow().rerenders_on_change(name);
        if !rerender {
            tracing::trace!(id = %self.id(), property = name, "stored without re-render");
            return Ok(());
        }
        if let Err(err) = self.re_render() {
            self.inner.model.borrow_mut().properties.set(name, previous);
            tracing::debug!(id = %self.id(), property = name, %err, "re-render failed, value restored");
            return Err(err);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

impl Component {
    /// Current members of an aggregation.
    pub fn aggregation(&self, name: &str) -> Result<Vec<Component>, ComponentError> {
        self.inner.model.borrow().members(name)
    }

    /// Replace all members and re-render the anchor in one bulk fill.
    pub fn set_aggregation(&self, name: &str, children: Vec<Component>) -> Result<(), ComponentError> {
        let anchor = self.inner.model.borrow().anchor_of(name)?;
        let children = dedupe(children);
        for child in &children {
            self.ensure_acyclic(child)?;
        }
        let markup: String = children.iter().map(Component::to_string).collect();
        self.check_markup(&markup)?;

        let previous = self.inner.model.borrow_mut().aggregations.replace(name, Vec::new());
        for old in &previous {
            old.detach();
        }
        for child in &children {
            child.release()?;
        }
        self.inner.model.borrow_mut().aggregations.replace(name, children.clone());
        for child in &children {
            self.adopt(name, child);
        }

        let filled = self.patch(|target, id| target.fill_anchor(id, &anchor, &markup))?;
        tracing::debug!(id = %self.id(), aggregation = name, members = children.len(), filled, "aggregation replaced");
        Ok(())
    }

    /// Append `child` and its markup at the end of the anchor.
    pub fn add_child(&self, name: &str, child: Component) -> Result<(), ComponentError> {
        let anchor = self.inner.model.borrow().anchor_of(name)?;
        self.ensure_acyclic(&child)?;
        let markup = child.to_string();
        self.check_markup(&markup)?;
        child.release()?;

        self.inner.model.borrow_mut().aggregations.push(name, child.clone());
        self.adopt(name, &child);

        let appended = self.patch(|target, id| target.append_to_anchor(id, &anchor, &markup))?;
        tracing::debug!(id = %self.id(), aggregation = name, child = %child.id(), appended, "child added");
        Ok(())
    }

    /// Insert `child` at `index`; an index at or past the end appends.
    ///
    /// The markup goes before the first following member that is rendered,
    /// or at the end of the anchor when none is.
    pub fn insert_child_at(&self, name: &str, index: usize, child: Component) -> Result<(), ComponentError> {
        let anchor = self.inner.model.borrow().anchor_of(name)?;
        self.ensure_acyclic(&child)?;
        let markup = child.to_string();
        self.check_markup(&markup)?;
        child.release()?;

        let in_range = self.inner.model.borrow().aggregations.member_at(name, index).is_some();
        if !in_range {
            return self.add_child(name, child);
        }

        self.inner.model.borrow_mut().aggregations.insert(name, index, child.clone());
        self.adopt(name, &child);

        let following: Vec<IdentityToken> = {
            let model = self.inner.model.borrow();
            let members = model.aggregations.get(name).unwrap_or_default();
            let following = members.get(index + 1..).unwrap_or_default();
            following.iter().map(Component::id).collect()
        };
        let mut inserted = false;
        for sibling in &following {
            inserted = self.patch(|target, id| target.insert_before(id, &anchor, sibling, &markup))?;
            if inserted {
                break;
            }
        }
        if !inserted {
            inserted = self.patch(|target, id| target.append_to_anchor(id, &anchor, &markup))?;
        }
        tracing::debug!(id = %self.id(), aggregation = name, index, inserted, "child inserted");
        Ok(())
    }

    /// Remove the first member identical to `child` and its rendered node.
    /// Returns `false` (a no-op) if `child` is not a member.
    pub fn remove_child(&self, name: &str, child: &Component) -> Result<bool, ComponentError> {
        let (anchor, removed) = {
            let mut model = self.inner.model.borrow_mut();
            let anchor = model.anchor_of(name)?;
            (anchor, model.aggregations.remove(name, child))
        };
        let Some(index) = removed else {
            tracing::debug!(id = %self.id(), aggregation = name, "remove of non-member ignored");
            return Ok(false);
        };

        let child_id = child.id();
        let dropped = self.patch(|target, id| Ok(target.remove_from_anchor(id, &anchor, &child_id)))?;
        child.detach();
        tracing::debug!(id = %self.id(), aggregation = name, index, dropped, "child removed");
        Ok(true)
    }

    /// Remove the member at `index`. Out of range is a no-op returning `None`.
    pub fn remove_child_at(&self, name: &str, index: usize) -> Result<Option<Component>, ComponentError> {
        let member = {
            let model = self.inner.model.borrow();
            model.anchor_of(name)?;
            model.aggregations.member_at(name, index).cloned()
        };
        match member {
            Some(child) => {
                self.remove_child(name, &child)?;
                Ok(Some(child))
            }
            None => {
                tracing::debug!(id = %self.id(), aggregation = name, index, "remove index out of range");
                Ok(None)
            }
        }
    }

    /// Parse `markup` up front when a target is attached, so a malformed
    /// render fails before any state changes.
    fn check_markup(&self, markup: &str) -> Result<(), RenderError> {
        if self.inner.model.borrow().target.is_some() {
            parse_fragment(markup)?;
        }
        Ok(())
    }

    /// Reject aggregating `child` into itself or into one of its descendants.
    fn ensure_acyclic(&self, child: &Component) -> Result<(), ComponentError> {
        let mut cursor = Some(self.clone());
        while let Some(current) = cursor {
            if current.ptr_eq(child) {
                return Err(ComponentError::CyclicAggregation {
                    child: child.id().to_string(),
                });
            }
            cursor = current.parent();
        }
        Ok(())
    }

    /// Take this component out of whatever aggregation currently holds it.
    fn release(&self) -> Result<(), ComponentError> {
        let link = self.inner.model.borrow().parent.clone();
        let Some(link) = link else {
            return Ok(());
        };
        match link.owner.upgrade() {
            Some(inner) => {
                Component { inner }.remove_child(&link.aggregation, self)?;
            }
            None => self.detach(),
        }
        Ok(())
    }

    /// Record custody and share this component's target with `child`.
    fn adopt(&self, aggregation: &str, child: &Component) {
        child.inner.model.borrow_mut().parent = Some(ParentLink {
            owner: Rc::downgrade(&self.inner),
            aggregation: aggregation.to_owned(),
        });
        let target = self.inner.model.borrow().target.clone();
        match target {
            Some(target) => child.attach(&target),
            None => child.forget_target(),
        }
    }

    /// Drop the parent link and the render target.
    fn detach(&self) {
        self.inner.model.borrow_mut().parent = None;
        self.forget_target();
    }

    fn forget_target(&self) {
        let members = {
            let mut model = self.inner.model.borrow_mut();
            model.target = None;
            model.aggregations.all_members()
        };
        for member in members {
            member.forget_target();
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

impl Component {
    /// Register a listener on a declared event.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<(), ComponentError>
    where
        F: Fn(&Value) -> Result<(), crate::event::ListenerError> + 'static,
    {
        self.subscribe(event, crate::event::listener(listener))
    }

    /// Register an already-wrapped [`Listener`].
    pub fn subscribe(&self, event: &str, listener: Listener) -> Result<(), ComponentError> {
        if self.inner.model.borrow_mut().events.subscribe(event, listener) {
            Ok(())
        } else {
            Err(ComponentError::UndeclaredEvent(event.to_owned()))
        }
    }

    /// Invoke every listener of `event` in registration order. Undeclared
    /// events are a no-op.
    pub fn fire_event(&self, event: &str, payload: impl Into<Value>) -> Result<(), ComponentError> {
        let listeners = self.inner.model.borrow().events.listeners(event);
        let Some(listeners) = listeners else {
            tracing::trace!(id = %self.id(), event, "fired undeclared event");
            return Ok(());
        };
        tracing::debug!(id = %self.id(), event, listeners = listeners.len(), "firing event");
        dispatch(&listeners, &payload.into())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Render lifecycle
// ---------------------------------------------------------------------------

impl Component {
    /// Trimmed markup of the current state.
    pub fn render_markup(&self) -> String {
        let cx = RenderContext::new(self);
        self.inner.view.render(&cx).trim().to_owned()
    }

    /// Mount into `location` of `target` and attach the target to this
    /// component and its aggregated children.
    pub fn place_at(&self, target: &SharedTarget, location: &str) -> Result<(), ComponentError> {
        let markup = self.render_markup();
        target.borrow_mut().mount(location, &markup)?;
        self.attach(target);
        tracing::debug!(id = %self.id(), location, "placed");
        Ok(())
    }

    /// Attach `target` without mounting, recursively.
    pub fn attach(&self, target: &SharedTarget) {
        let members = {
            let mut model = self.inner.model.borrow_mut();
            model.target = Some(Rc::clone(target));
            model.aggregations.all_members()
        };
        for member in members {
            member.attach(target);
        }
    }

    /// Replace the rendered subtree with fresh markup. Returns whether a
    /// replacement happened (`false` when not mounted).
    pub fn re_render(&self) -> Result<bool, ComponentError> {
        let markup = self.render_markup();
        let replaced = self.patch(|target, id| target.replace(id, &markup))?;
        tracing::debug!(id = %self.id(), replaced, "re-render");
        Ok(replaced)
    }

    /// Whether this component's root element is present in its target.
    pub fn is_mounted(&self) -> bool {
        self.inspect(|target, id| target.is_mounted(id)).unwrap_or(false)
    }

    /// The rendered root element.
    pub fn dom_ref(&self) -> Option<ElementSnapshot> {
        self.inspect(|target, id| target.element(id)).flatten()
    }

    /// A named sub-element inside this component's rendered subtree.
    pub fn get_ref(&self, name: &str) -> Option<ElementSnapshot> {
        self.inspect(|target, id| target.element_ref(id, name)).flatten()
    }

    /// Add or remove `class` on sub-element `name` in place.
    pub fn set_ref_class(&self, name: &str, class: &str, enabled: bool) -> bool {
        self.patch(|target, id| Ok(target.set_ref_class(id, name, class, enabled)))
            .unwrap_or(false)
    }

    /// The attached target, if any.
    pub fn target(&self) -> Option<SharedTarget> {
        self.inner.model.borrow().target.clone()
    }

    fn patch<F>(&self, op: F) -> Result<bool, RenderError>
    where
        F: FnOnce(&mut dyn RenderTarget, &IdentityToken) -> Result<bool, RenderError>,
    {
        let (target, id) = {
            let model = self.inner.model.borrow();
            (model.target.clone(), model.id.clone())
        };
        match target {
            Some(target) => op(&mut *target.borrow_mut(), &id),
            None => {
                tracing::debug!(%id, "no render target attached");
                Ok(false)
            }
        }
    }

    fn inspect<R>(&self, op: impl FnOnce(&dyn RenderTarget, &IdentityToken) -> R) -> Option<R> {
        let (target, id) = {
            let model = self.inner.model.borrow();
            (model.target.clone()?, model.id.clone())
        };
        let target = target.borrow();
        Some(op(&*target, &id))
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_markup())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id())
            .field("view", &self.view_name())
            .finish()
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Component {}

/// Weak handle, for views that need to refer back to a component.
#[derive(Clone)]
pub struct WeakComponent {
    inner: Weak<Inner>,
}

impl WeakComponent {
    pub fn upgrade(&self) -> Option<Component> {
        self.inner.upgrade().map(|inner| Component { inner })
    }
}

impl Component {
    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Keep the first occurrence of each instance.
fn dedupe(children: Vec<Component>) -> Vec<Component> {
    let mut out: Vec<Component> = Vec::with_capacity(children.len());
    for child in children {
        if !out.iter().any(|seen| seen.ptr_eq(&child)) {
            out.push(child);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::component::AccessorTable;
    use crate::descriptor::{DescriptorBuilder, PropertySpec};
    use crate::render::Document;

    /// A list with a `loading` flag, an `items` aggregation and an event.
    struct List;

    impl View for List {
        fn descriptor(&self) -> DescriptorBuilder {
            DescriptorBuilder::new()
                .property("loading", PropertySpec::new().with_default(true))
                .property("note", PropertySpec::new().prevent_rerendering())
                .aggregation("items", "items")
                .event("changed")
        }

        fn render(&self, cx: &RenderContext<'_>) -> String {
            let loader = if cx.flag("loading") { "loader loading" } else { "loader" };
            format!(
                r#"<div id="{}"><div ref="loader" class="{loader}">Loading</div><ul ref="items">{}</ul></div>"#,
                cx.id(),
                cx.render_children("items")
            )
        }
    }

    /// A leaf with a `label` property.
    struct Item;

    impl View for Item {
        fn descriptor(&self) -> DescriptorBuilder {
            DescriptorBuilder::new().property("label", PropertySpec::new())
        }

        fn render(&self, cx: &RenderContext<'_>) -> String {
            format!(r#"<li id="{}">{}</li>"#, cx.id(), cx.text("label"))
        }
    }

    fn item(label: &str) -> Component {
        Component::with_params(Item, Params::new().with("label", label)).unwrap()
    }

    fn mounted(view: impl View) -> (Component, Rc<RefCell<Document>>) {
        let doc = Document::from_markup(r#"<div id="app"></div>"#).unwrap().into_shared();
        let component = Component::new(view).unwrap();
        let target: SharedTarget = doc.clone();
        component.place_at(&target, "app").unwrap();
        doc.borrow_mut().journal_mut().clear();
        (component, doc)
    }

    fn labels(list: &Component) -> Vec<String> {
        list.aggregation("items")
            .unwrap()
            .iter()
            .map(|c| c.property("label").unwrap().to_string())
            .collect()
    }

    fn rendered_labels(list: &Component, doc: &Rc<RefCell<Document>>) -> String {
        doc.borrow().anchor_markup(&list.id(), "items").unwrap()
    }

    #[test]
    fn tokens_are_unique() {
        let a = Component::new(Item).unwrap();
        let b = Component::new(Item).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.property("id").unwrap(), Value::Text(a.id().to_string()));
    }

    #[test]
    fn parameters_apply_without_rendering() {
        let a = item("a");
        let list = Component::with_params(List, Params::new().with("loading", false).with_children("items", vec![a.clone()]))
            .unwrap();
        assert_eq!(list.get("loading").unwrap(), Value::Bool(false));
        assert!(a.parent().is_some_and(|p| p == list));
        assert_eq!(a.parent_aggregation().as_deref(), Some("items"));
    }

    #[test]
    fn parameter_errors() {
        let err = Component::with_params(Item, Params::new().with("nope", 1i64)).unwrap_err();
        assert_eq!(err, ComponentError::UnknownParameter("nope".into()));

        let err = Component::with_params(List, Params::new().with("items", 1i64)).unwrap_err();
        assert_eq!(
            err,
            ComponentError::ParameterMismatch {
                name: "items".into(),
                expected: MemberKind::Aggregation
            }
        );

        let err = Component::with_params(Item, Params::new().with("id", "x")).unwrap_err();
        assert_eq!(err, ComponentError::ReadOnlyProperty("id".into()));
    }

    #[test]
    fn listener_parameter_is_registered() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let list = Component::with_params(
            List,
            Params::new().with_listener("changed", move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            }),
        )
        .unwrap();
        list.fire_event("changed", Value::Null).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn setter_rerenders_once() {
        let (list, doc) = mounted(List);
        list.set("loading", false).unwrap();
        assert_eq!(doc.borrow().journal().replacements_of(&list.id()), 1);
        assert!(!list.get_ref("loader").unwrap().has_class("loading"));
    }

    #[test]
    fn opted_out_setter_does_not_rerender() {
        let (list, doc) = mounted(List);
        list.set("note", "x").unwrap();
        assert_eq!(list.get("note").unwrap(), Value::from("x"));
        assert!(doc.borrow().journal().is_empty());
    }

    #[test]
    fn id_is_read_only() {
        let list = Component::new(List).unwrap();
        assert_eq!(
            list.set("id", "other").unwrap_err(),
            ComponentError::ReadOnlyProperty("id".into())
        );
    }

    #[test]
    fn undeclared_property_access() {
        let list = Component::new(List).unwrap();
        assert_eq!(
            list.get("title").unwrap_err(),
            ComponentError::UndeclaredProperty("title".into())
        );
        assert_eq!(
            list.set("title", "x").unwrap_err(),
            ComponentError::UndeclaredProperty("title".into())
        );
    }

    #[test]
    fn invoke_checks_argument_shape() {
        let list = Component::new(List).unwrap();
        let err = list.invoke("addItem", Value::Int(1)).unwrap_err();
        assert_eq!(
            err,
            ComponentError::InvalidArgument {
                accessor: "addItem".into(),
                expected: "a child component"
            }
        );
        assert_eq!(
            list.invoke("fly", Arg::None).unwrap_err(),
            ComponentError::UnknownAccessor("fly".into())
        );
    }

    #[test]
    fn setter_returns_receiver() {
        let list = Component::new(List).unwrap();
        let returned = list.invoke("setLoading", Value::Bool(false)).unwrap();
        assert!(returned.into_component().is_some_and(|c| c == list));
    }

    #[test]
    fn add_appends_in_memory_and_rendered() {
        let (list, doc) = mounted(List);
        let (a, b) = (item("a"), item("b"));
        list.invoke("addItem", a.clone()).unwrap();
        list.invoke("addItem", b.clone()).unwrap();
        assert_eq!(labels(&list), vec!["a", "b"]);
        assert_eq!(
            rendered_labels(&list, &doc),
            format!(r#"<li id="{}">a</li><li id="{}">b</li>"#, a.id(), b.id())
        );
        assert_eq!(doc.borrow().journal().replacements_of(&list.id()), 0);
        assert!(a.is_mounted());
    }

    #[test]
    fn insert_at_front_and_past_end() {
        let (list, doc) = mounted(List);
        list.add_child("items", item("b")).unwrap();
        list.invoke("insertItemAt", Arg::At(0, item("a"))).unwrap();
        list.invoke("insertItemAt", Arg::At(10, item("c"))).unwrap();
        assert_eq!(labels(&list), vec!["a", "b", "c"]);
        let markup = rendered_labels(&list, &doc);
        let positions: Vec<usize> = [">a<", ">b<", ">c<"]
            .iter()
            .map(|needle| markup.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn remove_by_reference() {
        let (list, doc) = mounted(List);
        let (a, b, c) = (item("a"), item("b"), item("c"));
        list.set_aggregation("items", vec![a.clone(), b.clone(), c.clone()]).unwrap();
        list.invoke("removeItem", b.clone()).unwrap();
        assert_eq!(labels(&list), vec!["a", "c"]);
        assert!(!rendered_labels(&list, &doc).contains(">b<"));
        assert!(b.parent().is_none());
        assert!(b.target().is_none());

        assert!(!list.remove_child("items", &item("a")).unwrap());
        assert_eq!(labels(&list), vec!["a", "c"]);
    }

    #[test]
    fn remove_at_out_of_range_is_noop() {
        let (list, doc) = mounted(List);
        list.add_child("items", item("a")).unwrap();
        doc.borrow_mut().journal_mut().clear();
        assert!(list.remove_child_at("items", 5).unwrap().is_none());
        list.invoke("removeItemAt", Arg::Index(1)).unwrap();
        assert_eq!(labels(&list), vec!["a"]);
        assert!(doc.borrow().journal().is_empty());

        let removed = list.remove_child_at("items", 0).unwrap();
        assert!(removed.is_some());
        assert!(labels(&list).is_empty());
    }

    #[test]
    fn set_aggregation_fills_anchor_once() {
        let (list, doc) = mounted(List);
        let old = item("old");
        list.add_child("items", old.clone()).unwrap();
        list.invoke("setItems", vec![item("x"), item("y")]).unwrap();
        assert_eq!(labels(&list), vec!["x", "y"]);
        assert!(old.parent().is_none());
        let markup = rendered_labels(&list, &doc);
        assert!(markup.contains(">x<") && markup.contains(">y<") && !markup.contains(">old<"));
    }

    #[test]
    fn custody_moves_between_parents() {
        let doc = Document::from_markup(r#"<div id="p"></div><div id="q"></div>"#)
            .unwrap()
            .into_shared();
        let target: SharedTarget = doc.clone();
        let (p, q) = (Component::new(List).unwrap(), Component::new(List).unwrap());
        p.place_at(&target, "p").unwrap();
        q.place_at(&target, "q").unwrap();

        let child = item("moving");
        p.add_child("items", child.clone()).unwrap();
        q.add_child("items", child.clone()).unwrap();

        assert!(p.aggregation("items").unwrap().is_empty());
        assert_eq!(q.aggregation("items").unwrap(), vec![child.clone()]);
        assert_eq!(doc.borrow().anchor_markup(&p.id(), "items").unwrap(), "");
        assert!(child.parent().is_some_and(|parent| parent == q));
    }

    #[test]
    fn cycles_are_rejected() {
        let outer = Component::new(List).unwrap();
        let inner = Component::new(List).unwrap();
        outer.add_child("items", inner.clone()).unwrap();

        assert!(matches!(
            inner.add_child("items", outer.clone()),
            Err(ComponentError::CyclicAggregation { .. })
        ));
        assert!(matches!(
            outer.add_child("items", outer.clone()),
            Err(ComponentError::CyclicAggregation { .. })
        ));
        assert_eq!(outer.aggregation("items").unwrap(), vec![inner]);
    }

    #[test]
    fn undeclared_aggregation() {
        let list = Component::new(List).unwrap();
        assert_eq!(
            list.add_child("cards", item("a")).unwrap_err(),
            ComponentError::UndeclaredAggregation("cards".into())
        );
        assert!(list.remove_child_at("cards", 0).is_err());
    }

    #[test]
    fn unmounted_mutations_stay_in_memory() {
        let list = Component::new(List).unwrap();
        list.add_child("items", item("a")).unwrap();
        assert!(!list.re_render().unwrap());
        assert!(list.dom_ref().is_none());
        assert!(list.get_ref("loader").is_none());
        assert_eq!(labels(&list), vec!["a"]);
        assert!(list.to_string().contains(">a<"));
    }

    #[test]
    fn children_added_before_mount_share_target() {
        let doc = Document::from_markup(r#"<div id="app"></div>"#).unwrap().into_shared();
        let target: SharedTarget = doc.clone();
        let list = Component::new(List).unwrap();
        let a = item("a");
        list.add_child("items", a.clone()).unwrap();
        list.place_at(&target, "app").unwrap();
        assert!(a.is_mounted());
        a.set("label", "A").unwrap();
        assert!(rendered_labels(&list, &doc).contains(">A<"));
    }

    #[test]
    fn place_at_missing_location() {
        let doc: SharedTarget = Document::new().into_shared();
        let list = Component::new(List).unwrap();
        assert_eq!(
            list.place_at(&doc, "nowhere").unwrap_err(),
            ComponentError::Render(RenderError::MissingLocation("nowhere".into()))
        );
        assert!(list.target().is_none());
    }

    #[test]
    fn dom_ref_and_get_ref() {
        let (list, _doc) = mounted(List);
        assert_eq!(list.dom_ref().unwrap().attr("id"), Some(list.id().as_str()));
        assert!(list.get_ref("loader").unwrap().has_class("loading"));
        assert!(list.get_ref("missing").is_none());
        assert_eq!(list.ref_id("loader"), format!("{}-loader", list.id()));
    }

    #[test]
    fn events_in_order_and_undeclared_noop() {
        let list = Component::new(List).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            list.on("changed", move |payload| {
                log.borrow_mut().push(format!("{tag}:{payload}"));
                Ok(())
            })
            .unwrap();
        }
        list.fire_event("changed", 7i64).unwrap();
        list.fire_event("unknown", 7i64).unwrap();
        assert_eq!(*log.borrow(), vec!["first:7", "second:7"]);
        assert_eq!(
            list.on("unknown", |_| Ok(())).unwrap_err(),
            ComponentError::UndeclaredEvent("unknown".into())
        );
    }

    #[test]
    fn listener_error_aborts() {
        let list = Component::new(List).unwrap();
        let reached = Rc::new(Cell::new(false));
        list.on("changed", |_| Err("stop".into())).unwrap();
        let flag = Rc::clone(&reached);
        list.on("changed", move |_| {
            flag.set(true);
            Ok(())
        })
        .unwrap();
        assert!(matches!(
            list.fire_event("changed", Value::Null),
            Err(ComponentError::Listener(_))
        ));
        assert!(!reached.get());
    }

    #[test]
    fn listener_may_mutate_component() {
        let (list, doc) = mounted(List);
        let weak = list.downgrade();
        list.on("changed", move |_| {
            if let Some(list) = weak.upgrade() {
                list.set("loading", false).map_err(|e| e.to_string())?;
            }
            Ok(())
        })
        .unwrap();
        list.fire_event("changed", Value::Null).unwrap();
        assert_eq!(list.get("loading").unwrap(), Value::Bool(false));
        assert_eq!(doc.borrow().journal().replacements_of(&list.id()), 1);
    }

    /// A member that renders nothing.
    struct Ghost;

    impl View for Ghost {}

    #[test]
    fn insert_before_unrendered_member_still_renders() {
        let (list, doc) = mounted(List);
        let (a, c) = (item("a"), item("c"));
        list.add_child("items", a.clone()).unwrap();
        list.add_child("items", Component::new(Ghost).unwrap()).unwrap();
        list.add_child("items", c.clone()).unwrap();

        let b = item("b");
        list.insert_child_at("items", 1, b.clone()).unwrap();
        assert_eq!(
            rendered_labels(&list, &doc),
            format!(r#"<li id="{}">a</li><li id="{}">b</li><li id="{}">c</li>"#, a.id(), b.id(), c.id())
        );

        // Nothing rendered after the slot: the markup goes at the end.
        let (list, doc) = mounted(List);
        list.add_child("items", a.clone()).unwrap();
        list.add_child("items", Component::new(Ghost).unwrap()).unwrap();
        list.insert_child_at("items", 1, b.clone()).unwrap();
        assert_eq!(
            rendered_labels(&list, &doc),
            format!(r#"<li id="{}">a</li><li id="{}">b</li>"#, a.id(), b.id())
        );
        assert!(b.is_mounted());
    }

    /// Renders an unclosed element once `broken` is set.
    struct Fragile;

    impl View for Fragile {
        fn descriptor(&self) -> DescriptorBuilder {
            DescriptorBuilder::new().property("broken", PropertySpec::new().with_default(false))
        }

        fn render(&self, cx: &RenderContext<'_>) -> String {
            if cx.flag("broken") {
                format!(r#"<li id="{}"><b>oops</li>"#, cx.id())
            } else {
                format!(r#"<li id="{}">ok</li>"#, cx.id())
            }
        }
    }

    fn broken_fragile() -> Component {
        Component::with_params(Fragile, Params::new().with("broken", true)).unwrap()
    }

    #[test]
    fn failed_rerender_restores_value() {
        let (fragile, doc) = mounted(Fragile);
        let before = doc.borrow().markup();

        let err = fragile.set("broken", true).unwrap_err();
        assert!(matches!(err, ComponentError::Render(RenderError::Markup(_))));
        assert_eq!(fragile.get("broken").unwrap(), Value::Bool(false));
        assert_eq!(doc.borrow().markup(), before);
        assert!(doc.borrow().journal().is_empty());
    }

    #[test]
    fn malformed_child_leaves_aggregation_untouched() {
        let (list, doc) = mounted(List);
        let a = item("a");
        list.add_child("items", a.clone()).unwrap();
        let before = rendered_labels(&list, &doc);

        let bad = broken_fragile();
        assert!(list.set_aggregation("items", vec![item("x"), bad.clone()]).is_err());
        assert!(list.add_child("items", bad.clone()).is_err());
        assert!(list.insert_child_at("items", 0, bad.clone()).is_err());

        assert_eq!(list.aggregation("items").unwrap(), vec![a.clone()]);
        assert!(a.parent().is_some_and(|p| p == list));
        assert!(bad.parent().is_none());
        assert_eq!(rendered_labels(&list, &doc), before);

        // Unmounted, nothing is rendered, so nothing can fail.
        let detached = Component::new(List).unwrap();
        detached.add_child("items", broken_fragile()).unwrap();
    }

    struct Quiet;

    impl View for Quiet {
        fn descriptor(&self) -> DescriptorBuilder {
            DescriptorBuilder::new().property("loading", PropertySpec::new().with_default(true))
        }

        fn accessors(&self, table: &mut AccessorTable) {
            table.custom("setLoading", |component, arg| {
                let Arg::Value(value) = arg else {
                    return Err(ComponentError::InvalidArgument {
                        accessor: "setLoading".into(),
                        expected: "a value",
                    });
                };
                component.write_property("loading", value)?;
                Ok(Returned::Component(component.clone()))
            });
        }

        fn render(&self, cx: &RenderContext<'_>) -> String {
            format!(r#"<p id="{}">{}</p>"#, cx.id(), cx.text("loading"))
        }
    }

    #[test]
    fn custom_accessor_overrides_generated() {
        let (quiet, doc) = mounted(Quiet);
        quiet.set("loading", false).unwrap();
        assert_eq!(quiet.get("loading").unwrap(), Value::Bool(false));
        assert!(doc.borrow().journal().is_empty());
    }

    struct Seeded;

    impl View for Seeded {
        fn descriptor(&self) -> DescriptorBuilder {
            DescriptorBuilder::new().property("count", PropertySpec::new().with_default(0i64))
        }

        fn init(&self, component: &Component) -> Result<(), ComponentError> {
            component.set("count", 3i64)
        }
    }

    #[test]
    fn init_hook_runs_after_parameters() {
        let seeded = Component::with_params(Seeded, Params::new().with("count", 1i64)).unwrap();
        assert_eq!(seeded.get("count").unwrap(), Value::Int(3));
    }
}
