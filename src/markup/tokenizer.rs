//! logos-based markup tokenizer.
//!
//! Markup lexing is modal: between tags the lexer produces [`ContentToken`]s;
//! after an opening `<tag` the parser morphs it into a [`TagToken`] lexer for
//! the attribute list, then morphs back once the tag is closed by `>` or `/>`.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `<!--` as Comment beats `<` as Lt)
//! 2. For equal length matches, earlier-defined variants win

use logos::{Lexer, Logos};

/// Token produced between tags.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentToken {
    /// `<!-- ... -->`; the callback consumes through the terminator (or EOF).
    #[token("<!--", skip_comment)]
    Comment,

    /// Closing tag: `</li>`, `</ul >`.
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\r\n\f]*>")]
    CloseTag,

    /// Start of an opening tag: `<li`. Attributes follow in tag mode.
    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*")]
    OpenTag,

    /// A `<` that starts no tag. Treated as text.
    #[token("<")]
    Lt,

    /// Run of text up to the next `<`.
    #[regex(r"[^<]+")]
    Text,
}

fn skip_comment(lex: &mut Lexer<'_, ContentToken>) -> bool {
    let rest = lex.remainder();
    let consumed = rest.find("-->").map_or(rest.len(), |end| end + 3);
    lex.bump(consumed);
    true
}

/// Token produced inside an opening tag.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TagToken {
    /// `>`
    #[token(">")]
    End,

    /// `/>`
    #[token("/>")]
    SelfClose,

    /// `=`
    #[token("=")]
    Equals,

    /// Double-quoted attribute value.
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// Single-quoted attribute value.
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Attribute name or unquoted attribute value.
    #[regex(r#"[^ \t\r\n\f"'=<>`]+"#)]
    Word,
}

/// Tokenize content-mode input into `(ContentToken, text)` pairs.
///
/// Tags are reported as single `OpenTag` tokens; attributes are not lexed.
/// Mostly useful for inspecting how the lexer splits a document.
pub fn tokenize_content(input: &str) -> Vec<(ContentToken, String)> {
    ContentToken::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

/// Tokenize the inside of a tag (everything after `<tag`).
pub fn tokenize_tag(input: &str) -> Vec<(TagToken, String)> {
    TagToken::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_kinds(input: &str) -> Vec<ContentToken> {
        tokenize_content(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn content_tokens() {
        let tokens = tokenize_content("<li>Hi</li>");
        assert_eq!(
            tokens,
            vec![
                (ContentToken::OpenTag, "<li".to_string()),
                (ContentToken::Text, ">Hi".to_string()),
                (ContentToken::CloseTag, "</li>".to_string()),
            ]
        );
    }

    #[test]
    fn comment_is_one_token() {
        let tokens = tokenize_content("a<!-- <b> -->c");
        assert_eq!(
            tokens,
            vec![
                (ContentToken::Text, "a".to_string()),
                (ContentToken::Comment, "<!-- <b> -->".to_string()),
                (ContentToken::Text, "c".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        assert_eq!(content_kinds("<!-- open"), vec![ContentToken::Comment]);
    }

    #[test]
    fn stray_lt_is_not_a_tag() {
        assert_eq!(
            content_kinds("1 < 2"),
            vec![ContentToken::Text, ContentToken::Lt, ContentToken::Text]
        );
    }

    #[test]
    fn close_tag_allows_trailing_space() {
        assert_eq!(content_kinds("</ul  >"), vec![ContentToken::CloseTag]);
    }

    #[test]
    fn tag_tokens() {
        let tokens: Vec<TagToken> = tokenize_tag(r#" id="a" class='b c' width=100 hidden />"#)
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                TagToken::Word,
                TagToken::Equals,
                TagToken::DoubleQuoted,
                TagToken::Word,
                TagToken::Equals,
                TagToken::SingleQuoted,
                TagToken::Word,
                TagToken::Equals,
                TagToken::Word,
                TagToken::Word,
                TagToken::SelfClose,
            ]
        );
    }

    #[test]
    fn unquoted_value_may_contain_slashes() {
        let tokens = tokenize_tag("src=img/a.png>");
        assert_eq!(tokens[2], (TagToken::Word, "img/a.png".to_string()));
        assert_eq!(tokens[3].0, TagToken::End);
    }
}
