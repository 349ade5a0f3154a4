//! Markup parser.
//!
//! Parses markup text into detached [`Fragment`]s using the modal lexer from
//! [`crate::markup::tokenizer`]. Parsing is all-or-nothing: callers graft the
//! fragments into a [`Dom`](crate::dom::Dom) only after the whole input parsed.

use logos::{Lexer, Logos};

use crate::dom::node::{is_void_tag, Attribute, ElementData, NodeData};
use crate::dom::tree::Fragment;
use crate::markup::tokenizer::{ContentToken, TagToken};

/// Errors from markup parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("mismatched closing tag at byte {position}: expected `</{expected}>`, found `</{found}>`")]
    MismatchedClose {
        position: usize,
        expected: String,
        found: String,
    },
}

/// Parse a markup fragment (any number of top-level nodes).
///
/// Whitespace-only text between tags is dropped; other text is kept verbatim.
pub fn parse_fragment(input: &str) -> Result<Vec<Fragment>, MarkupError> {
    let mut builder = TreeBuilder::default();
    let mut lex = ContentToken::lexer(input);

    while let Some(token) = lex.next() {
        let span = lex.span();
        match token {
            Ok(ContentToken::Text) => builder.text.push_str(lex.slice()),
            Ok(ContentToken::Lt) => builder.text.push('<'),
            Ok(ContentToken::Comment) => {}
            Ok(ContentToken::CloseTag) => {
                let name = close_tag_name(lex.slice());
                builder.close(&name, span.start)?;
            }
            Ok(ContentToken::OpenTag) => {
                let tag = lex.slice()[1..].to_ascii_lowercase();
                let mut tag_lex = lex.morph::<TagToken>();
                let (element, self_closing) = parse_tag(&mut tag_lex, tag)?;
                builder.open(element, self_closing, span.start);
                lex = tag_lex.morph();
            }
            Err(()) => {
                return Err(MarkupError::UnexpectedToken {
                    position: span.start,
                    message: format!("unrecognized input `{}`", lex.slice()),
                })
            }
        }
    }

    builder.finish()
}

fn close_tag_name(slice: &str) -> String {
    slice
        .trim_start_matches("</")
        .trim_end_matches('>')
        .trim()
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Attribute list
// ---------------------------------------------------------------------------

enum AttrState {
    Idle,
    Named(String),
    AwaitingValue(String),
}

impl AttrState {
    /// Commit a pending attribute that never received a value.
    fn finish(self, element: &mut ElementData) {
        match self {
            AttrState::Idle => {}
            AttrState::Named(name) => {
                if element.attr(&name).is_none() {
                    element.attributes.push(Attribute::flag(name));
                }
            }
            AttrState::AwaitingValue(name) => element.set_attr(&name, ""),
        }
    }
}

/// Consume the attribute list of `<tag` through its closing `>` or `/>`.
///
/// Returns the element and whether it was written self-closing.
fn parse_tag(lex: &mut Lexer<'_, TagToken>, tag: String) -> Result<(ElementData, bool), MarkupError> {
    let mut element = ElementData::new(tag);
    let mut state = AttrState::Idle;
    let mut self_closing = false;

    loop {
        let Some(token) = lex.next() else {
            return Err(MarkupError::UnexpectedEof(format!(
                "unterminated <{}> tag",
                element.tag
            )));
        };
        let position = lex.span().start;
        let token = token.map_err(|()| MarkupError::UnexpectedToken {
            position,
            message: format!("unrecognized input `{}` in <{}> tag", lex.slice(), element.tag),
        })?;

        match (token, std::mem::replace(&mut state, AttrState::Idle)) {
            (TagToken::End, pending) => {
                pending.finish(&mut element);
                return Ok((element, self_closing));
            }
            (TagToken::SelfClose, pending) => {
                pending.finish(&mut element);
                return Ok((element, true));
            }
            (TagToken::Equals, AttrState::Named(name)) => {
                state = AttrState::AwaitingValue(name);
            }
            (TagToken::DoubleQuoted | TagToken::SingleQuoted, AttrState::AwaitingValue(name)) => {
                let raw = lex.slice();
                element.set_attr(&name, &raw[1..raw.len() - 1]);
            }
            (TagToken::Word, pending) => {
                let (word, closes) = split_self_close(lex.slice(), lex.remainder());
                self_closing |= closes;
                match pending {
                    AttrState::AwaitingValue(name) => element.set_attr(&name, word),
                    other => {
                        other.finish(&mut element);
                        if !word.is_empty() {
                            state = AttrState::Named(word.to_owned());
                        }
                    }
                }
            }
            (other, _) => {
                return Err(MarkupError::UnexpectedToken {
                    position,
                    message: format!("unexpected {other:?} in <{}> tag", element.tag),
                })
            }
        }
    }
}

/// `a.png/` directly before `>` is the value `a.png` plus a self-closing slash.
fn split_self_close<'a>(word: &'a str, remainder: &str) -> (&'a str, bool) {
    match word.strip_suffix('/') {
        Some(stripped) if remainder.starts_with('>') => (stripped, true),
        _ => (word, false),
    }
}

// ---------------------------------------------------------------------------
// Tree building
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Fragment>,
    /// Open elements with the byte offset of their opening tag.
    open: Vec<(Fragment, usize)>,
    text: String,
}

impl TreeBuilder {
    fn push(&mut self, fragment: Fragment) {
        match self.open.last_mut() {
            Some((parent, _)) => parent.children.push(fragment),
            None => self.roots.push(fragment),
        }
    }

    fn flush_text(&mut self) {
        let text = std::mem::take(&mut self.text);
        if !text.trim().is_empty() {
            self.push(Fragment::new(NodeData::Text(text)));
        }
    }

    fn open(&mut self, mut element: ElementData, self_closing: bool, position: usize) {
        self.flush_text();
        if self_closing || element.self_closing {
            element.self_closing = true;
            self.push(Fragment::new(element.into()));
        } else {
            self.open.push((Fragment::new(element.into()), position));
        }
    }

    fn close(&mut self, name: &str, position: usize) -> Result<(), MarkupError> {
        self.flush_text();
        let Some((fragment, _)) = self.open.pop() else {
            if is_void_tag(name) {
                return Ok(());
            }
            return Err(MarkupError::UnexpectedToken {
                position,
                message: format!("`</{name}>` closes no open element"),
            });
        };
        let expected = fragment
            .data
            .as_element()
            .map(|el| el.tag.clone())
            .unwrap_or_default();
        if expected != name {
            if is_void_tag(name) {
                self.open.push((fragment, position));
                return Ok(());
            }
            return Err(MarkupError::MismatchedClose {
                position,
                expected,
                found: name.to_owned(),
            });
        }
        self.push(fragment);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Fragment>, MarkupError> {
        self.flush_text();
        if let Some((fragment, position)) = self.open.last() {
            let tag = fragment
                .data
                .as_element()
                .map(|el| el.tag.as_str())
                .unwrap_or_default();
            return Err(MarkupError::UnexpectedEof(format!(
                "<{tag}> opened at byte {position} is never closed"
            )));
        }
        Ok(self.roots)
    }
}
