//! Lenient HTML parser producing a headless document tree.

mod lexer;

use crate::dom::{Element, Node, RAW_TEXT_ELEMENTS};
use crate::error::{ParseError, Result};
use lexer::{token, Token};

/// Parse HTML markup into a fragment root.
///
/// The parser is forgiving in the way browsers are: unknown end tags are
/// dropped, unclosed elements are closed at end of input, and a `<` that does
/// not start a tag is kept as text. Only an unterminated comment or a raw-text
/// element (`script`, `style`) without its closing tag is an error.
pub fn parse_html(input: &str) -> Result<Element> {
    let mut root = Element::fragment(Vec::new());
    let mut open: Vec<Element> = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() {
        let offset = input.len() - remaining.len();

        if remaining.starts_with("<!--") {
            match lexer::comment(remaining) {
                Ok((rest, _)) => {
                    remaining = rest;
                    continue;
                }
                Err(_) => return Err(ParseError::UnterminatedComment { offset }.into()),
            }
        }

        match token(remaining) {
            Ok((rest, Token::StartTag { name, attributes, self_closing })) => {
                let mut el = Element::new(name);
                for (attr, value) in attributes {
                    let value = value.map(decode_entities).unwrap_or_default();
                    el.attributes.push((attr.to_ascii_lowercase(), value));
                }
                remaining = rest;

                if RAW_TEXT_ELEMENTS.iter().any(|t| el.is(t)) && !self_closing {
                    let (content, rest) = split_raw_text(remaining, &el.tag).ok_or_else(|| {
                        ParseError::UnterminatedRawText {
                            tag: el.tag.clone(),
                        }
                    })?;
                    if !content.is_empty() {
                        el.children.push(Node::Text(content.to_string()));
                    }
                    current(&mut root, &mut open).children.push(el.into());
                    remaining = rest;
                } else if el.is_void() || self_closing {
                    current(&mut root, &mut open).children.push(el.into());
                } else {
                    open.push(el);
                }
            }
            Ok((rest, Token::EndTag(name))) => {
                close(&mut root, &mut open, name);
                remaining = rest;
            }
            Ok((rest, Token::Comment(_))) | Ok((rest, Token::Doctype(_))) => {
                remaining = rest;
            }
            Ok((rest, Token::Text(text))) => {
                push_text(current(&mut root, &mut open), &decode_entities(text));
                remaining = rest;
            }
            Err(_) => {
                // A `<` that starts nothing is literal text.
                push_text(current(&mut root, &mut open), "<");
                remaining = &remaining[1..];
            }
        }
    }

    while let Some(el) = open.pop() {
        current(&mut root, &mut open).children.push(el.into());
    }

    Ok(root)
}

fn current<'a>(root: &'a mut Element, open: &'a mut [Element]) -> &'a mut Element {
    match open.last_mut() {
        Some(el) => el,
        None => root,
    }
}

/// Close the innermost open element named `name`, closing anything opened after it.
fn close(root: &mut Element, open: &mut Vec<Element>, name: &str) {
    let Some(pos) = open.iter().rposition(|el| el.is(name)) else {
        return;
    };
    while open.len() > pos {
        if let Some(el) = open.pop() {
            current(root, open).children.push(el.into());
        }
    }
}

/// Append text, merging with a preceding text node.
fn push_text(parent: &mut Element, text: &str) {
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

/// Split raw element content at its closing tag, returning (content, rest after `>`).
///
/// The tag name matches case-insensitively and must be followed by `>` or
/// whitespace, so `</scripts>` does not close a `script`.
fn split_raw_text<'a>(input: &'a str, tag: &str) -> Option<(&'a str, &'a str)> {
    let bytes = input.as_bytes();
    let mut from = 0;

    while let Some(pos) = input[from..].find("</") {
        let start = from + pos;
        let name_end = start + 2 + tag.len();
        let is_close = bytes
            .get(start + 2..name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag.as_bytes()))
            && bytes
                .get(name_end)
                .is_some_and(|&b| b == b'>' || b.is_ascii_whitespace());

        if is_close {
            let close = input[name_end..].find('>')?;
            return Some((&input[..start], &input[name_end + close + 1..]));
        }
        from = start + 2;
    }

    None
}

/// Decode the character references a documentation page actually uses.
///
/// Unknown or malformed references are kept verbatim. Numeric references to
/// NUL, surrogates or values past U+10FFFF decode to U+FFFD.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            let c = char::from_u32(code).filter(|&c| c != '\0');
            Some(c.unwrap_or(char::REPLACEMENT_CHARACTER))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested() {
        let root = parse_html(r#"<div id="doc-content"><p>Hello <b>world</b></p></div>"#).unwrap();
        let expected = Element::fragment(vec![Element::new("div")
            .with_attr("id", "doc-content")
            .with_child(
                Element::new("p")
                    .with_text("Hello ")
                    .with_child(Element::new("b").with_text("world")),
            )
            .into()]);
        assert_eq!(root, expected);
    }

    #[test]
    fn test_void_and_unclosed() {
        let root = parse_html("<ul><li>One<br>two<li>Three</ul>").unwrap();
        let ul = root.children[0].as_element().unwrap();
        assert_eq!(ul.tag, "ul");
        // `<li>` does not auto-close its sibling; the second is nested in the first.
        let li = ul.children[0].as_element().unwrap();
        assert_eq!(li.children[1].as_element().unwrap().tag, "br");
        assert_eq!(root.text_content(), "OnetwoThree");
    }

    #[test]
    fn test_script_is_raw_text() {
        let root = parse_html("<script>if (a < b && c) {}</script><p>x</p>").unwrap();
        let script = root.children[0].as_element().unwrap();
        assert_eq!(script.children, vec![Node::text("if (a < b && c) {}")]);
        assert_eq!(root.children[1].as_element().unwrap().tag, "p");
    }

    #[test]
    fn test_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt; &#65;&#x42;"), "a & b <c> AB");
        assert_eq!(decode_entities("fish & chips &bogus;"), "fish & chips &bogus;");
    }

    #[test]
    fn test_invalid_numeric_references_become_replacement() {
        assert_eq!(decode_entities("a&#0;b"), "a\u{fffd}b");
        assert_eq!(decode_entities("&#x0;&#xD800;&#x110000;"), "\u{fffd}\u{fffd}\u{fffd}");
        let root = parse_html("<p>quick &#0; fox</p>").unwrap();
        assert!(!root.text_content().contains('\0'));
    }

    #[test]
    fn test_raw_text_close_tag_matching() {
        let root = parse_html("<script>a</scripts>b</SCRIPT >after").unwrap();
        let script = root.children[0].as_element().unwrap();
        assert_eq!(script.children, vec![Node::text("a</scripts>b")]);
        assert_eq!(root.children[1], Node::text("after"));
    }

    #[test]
    fn test_many_raw_text_elements() {
        let input = "<style>p{}</style><script>x()</script>".repeat(200);
        let root = parse_html(&input).unwrap();
        assert_eq!(root.children.len(), 400);
        assert!(root.children.iter().all(|n| n.as_element().is_some()));
    }

    #[test]
    fn test_stray_lt_and_end_tag() {
        let root = parse_html("<p>1 < 2</span></p>").unwrap();
        let p = root.children[0].as_element().unwrap();
        assert_eq!(p.children, vec![Node::text("1 < 2")]);
    }

    #[test]
    fn test_comments_and_doctype_dropped() {
        let root = parse_html("<!DOCTYPE html><!-- note --><p>x</p>").unwrap();
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = parse_html("<p>x</p><!-- never closed").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::UnterminatedComment { offset: 8 })
        ));
    }

    #[test]
    fn test_unterminated_script() {
        let err = parse_html("<script>let x = 1;").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnterminatedRawText { .. })));
    }
}
