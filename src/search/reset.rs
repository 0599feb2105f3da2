//! Removal of highlight wrappers.

use crate::config::SearchConfig;
use crate::dom::{Element, Node};

/// Collapse every highlight wrapper under `document` back into plain text.
///
/// A wrapper is an element with the configured highlight tag and class. Its
/// children take its place and the text runs around it are merged again, so
/// a highlight pass followed by a reset leaves the text content unchanged.
/// Returns the number of wrappers removed; calling it again returns 0.
pub fn clear_highlights(document: &mut Element, config: &SearchConfig) -> usize {
    let is_wrapper =
        |el: &Element| el.is(&config.highlight_tag) && el.has_class(&config.highlight_class);
    clear_in(document, &is_wrapper)
}

fn clear_in(el: &mut Element, is_wrapper: &dyn Fn(&Element) -> bool) -> usize {
    if !contains_wrapper(el, is_wrapper) {
        return 0;
    }

    let mut removed = 0;
    let mut flattened = false;

    for child in std::mem::take(&mut el.children) {
        match child {
            Node::Element(mut child_el) => {
                removed += clear_in(&mut child_el, is_wrapper);
                if is_wrapper(&child_el) {
                    removed += 1;
                    flattened = true;
                    el.children.extend(child_el.children);
                } else {
                    el.children.push(Node::Element(child_el));
                }
            }
            text => el.children.push(text),
        }
    }

    if flattened {
        merge_adjacent_text(&mut el.children);
    }

    removed
}

fn contains_wrapper(el: &Element, is_wrapper: &dyn Fn(&Element) -> bool) -> bool {
    el.children.iter().any(|child| match child {
        Node::Element(child_el) => is_wrapper(child_el) || contains_wrapper(child_el, is_wrapper),
        Node::Text(_) => false,
    })
}

fn merge_adjacent_text(children: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        if let Node::Text(text) = &child {
            if let Some(Node::Text(prev)) = merged.last_mut() {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(child);
    }
    *children = merged;
}
