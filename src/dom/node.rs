//! Node types: NodeId, NodeData, ElementData, Attribute.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Tags that never have children or a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Whether `tag` is a void element.
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// One attribute. `value` is `None` for bare flags like `<input disabled>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// An element: tag name plus attributes in source order.
///
/// `id`, `ref` and `class` are ordinary attributes; the helpers below read and
/// edit them in place so serialization keeps the original attribute order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    /// Written as `<tag .../>` when serialized.
    pub self_closing: bool,
}

impl ElementData {
    /// Create an element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let self_closing = is_void_tag(&tag);
        Self {
            tag,
            attributes: Vec::new(),
            self_closing,
        }
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the `id` attribute (builder).
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Add a CSS class (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Value of an attribute. Flags read as `""`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Set an attribute, replacing its value in place if it already exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = Some(value),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Remove an attribute. No-op if absent.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|a| a.name != name);
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// The `ref` attribute.
    pub fn ref_name(&self) -> Option<&str> {
        self.attr("ref")
    }

    /// Iterate the classes listed in the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Check whether this element has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut list: Vec<String> = self.classes().map(str::to_owned).collect();
        list.push(class.to_owned());
        self.set_attr("class", list.join(" "));
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let list: Vec<String> = self
            .classes()
            .filter(|c| *c != class)
            .map(str::to_owned)
            .collect();
        self.set_attr("class", list.join(" "));
    }

    /// Add or remove a CSS class.
    pub fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Toggle a CSS class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        let enabled = !self.has_class(class);
        self.set_class(class, enabled);
    }
}

/// Data associated with a single DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

impl NodeData {
    /// An element node with no attributes.
    pub fn element(tag: impl Into<String>) -> Self {
        NodeData::Element(ElementData::new(tag))
    }

    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        NodeData::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NodeData::Text(_))
    }

    /// The element's `id` attribute; `None` for text nodes.
    pub fn id(&self) -> Option<&str> {
        self.as_element().and_then(ElementData::id)
    }
}

impl From<ElementData> for NodeData {
    fn from(el: ElementData) -> Self {
        NodeData::Element(el)
    }
}
