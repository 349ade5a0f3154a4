//! Markup serialization of DOM subtrees.

use super::node::{ElementData, NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Markup of `id` including the node itself. Empty if `id` is absent.
    pub fn outer_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Markup of `id`'s children only.
    pub fn inner_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.get(id) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element(el)) => {
                write_open_tag(el, out);
                if el.self_closing && self.children(id).is_empty() {
                    return;
                }
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
            None => {}
        }
    }
}

fn write_open_tag(el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for attr in &el.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            let quote = if value.contains('"') { '\'' } else { '"' };
            out.push('=');
            out.push(quote);
            out.push_str(value);
            out.push(quote);
        }
    }
    if el.self_closing {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}
