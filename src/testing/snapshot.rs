//! Snapshot helpers.
//!
//! Views render with whatever whitespace their templates contain. These
//! helpers normalize markup by parsing and re-serializing it, and can lay it
//! out one element per line for readable snapshot assertions.

use crate::component::Component;
use crate::dom::node::NodeData;
use crate::dom::tree::Dom;
use crate::dom::NodeId;
use crate::markup::{parse_fragment, MarkupError};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse and re-serialize `markup`, dropping whitespace-only text.
pub fn normalize_markup(markup: &str) -> Result<String, MarkupError> {
    let (dom, root) = parse_into_dom(markup)?;
    Ok(dom.inner_markup(root))
}

/// Normalized markup of a component. Falls back to the raw render if the
/// view produced malformed markup.
pub fn render_to_string(component: &Component) -> String {
    let raw = component.to_string();
    normalize_markup(&raw).unwrap_or(raw)
}

/// Lay markup out one node per line, indented two spaces per level.
///
/// Elements with a single text child stay on one line.
pub fn pretty_markup(markup: &str) -> Result<String, MarkupError> {
    let (dom, root) = parse_into_dom(markup)?;
    let mut lines = Vec::new();
    for &child in dom.children(root) {
        write_pretty(&dom, child, 0, &mut lines);
    }
    Ok(lines.join("\n"))
}

fn parse_into_dom(markup: &str) -> Result<(Dom, NodeId), MarkupError> {
    let fragments = parse_fragment(markup)?;
    let mut dom = Dom::new();
    let root = dom.insert(NodeData::element("root"));
    dom.graft(root, None, fragments);
    Ok((dom, root))
}

fn write_pretty(dom: &Dom, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let children = dom.children(node);
    let inline = children.is_empty()
        || (children.len() == 1 && dom.get(children[0]).is_some_and(NodeData::is_text));
    if inline {
        lines.push(format!("{indent}{}", dom.outer_markup(node)));
        return;
    }

    let Some(element) = dom.get(node).and_then(NodeData::as_element) else {
        return;
    };
    let outer = dom.outer_markup(node);
    let open_len = outer.find('>').map_or(outer.len(), |i| i + 1);
    lines.push(format!("{indent}{}", &outer[..open_len]));
    for &child in children {
        write_pretty(dom, child, depth + 1, lines);
    }
    lines.push(format!("{indent}</{}>", element.tag));
}
