//! Page enhancements: copy buttons, print view button and external links.

use crate::config::PageConfig;
use crate::dom::{Element, NodePath};
use tracing::debug;

/// Class of the injected copy buttons.
pub const COPY_BUTTON_CLASS: &str = "copy-button";
/// Class of the print view link.
pub const PRINT_BUTTON_CLASS: &str = "print-button";
/// Class of the container holding page actions.
pub const ACTION_BUTTONS_CLASS: &str = "action-buttons";

/// Summary of what `enhance` changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnhanceReport {
    pub copy_buttons: usize,
    pub print_button: bool,
    pub external_links: usize,
}

/// Run every enabled enhancement.
///
/// `page_path` is the path of the current page, used for the print view link.
pub fn enhance(document: &mut Element, config: &PageConfig, page_path: &str) -> EnhanceReport {
    let mut report = EnhanceReport::default();
    let content_root_id = &config.search.content_root_id;

    if config.enhance.copy_buttons {
        report.copy_buttons = add_copy_buttons(document, &config.enhance.copy_label);
    }
    if config.enhance.print_button {
        report.print_button =
            add_print_button(document, content_root_id, page_path, &config.enhance.print_label);
    }
    if config.enhance.external_links {
        report.external_links = open_external_links(document, content_root_id);
    }

    debug!(
        copy_buttons = report.copy_buttons,
        print_button = report.print_button,
        external_links = report.external_links,
        "page enhanced"
    );
    report
}

/// Append a copy button to the parent of every `code` inside a `pre`.
///
/// Returns the number of buttons added; containers that already have one are
/// skipped.
pub fn add_copy_buttons(document: &mut Element, label: &str) -> usize {
    let mut containers: Vec<NodePath> = Vec::new();
    for path in document.find_all(|el| el.is("code")) {
        if !has_ancestor(document, &path, "pre") {
            continue;
        }
        if let Some((parent, _)) = path.parent() {
            if !containers.contains(&parent) {
                containers.push(parent);
            }
        }
    }

    let mut added = 0;
    for path in containers {
        let Some(container) = document.element_at_mut(&path) else {
            continue;
        };
        let has_button = container
            .children
            .iter()
            .filter_map(|c| c.as_element())
            .any(|el| el.has_class(COPY_BUTTON_CLASS));
        if has_button {
            continue;
        }

        set_style(container, "position", "relative");
        container.children.push(
            Element::new("button")
                .with_attr("class", COPY_BUTTON_CLASS)
                .with_attr("style", "position: absolute; top: 5px; right: 5px")
                .with_text(label)
                .into(),
        );
        added += 1;
    }

    added
}

/// Text a copy button in `container` puts on the clipboard.
pub fn copy_payload(container: &Element) -> Option<String> {
    let path = container.find_first(|el| el.is("code"))?;
    container.element_at(&path).map(Element::text_content)
}

/// Insert a print view link next to the page's first heading.
///
/// Nothing happens when the page has no content root or already has a print
/// link. An existing action container receives the link; otherwise a new
/// one is inserted right after the first `h1`.
pub fn add_print_button(
    document: &mut Element,
    content_root_id: &str,
    page_path: &str,
    label: &str,
) -> bool {
    if document.find_by_id(content_root_id).is_none()
        || document.find_first(|el| el.has_class(PRINT_BUTTON_CLASS)).is_some()
    {
        return false;
    }

    let button = Element::new("a")
        .with_attr("class", PRINT_BUTTON_CLASS)
        .with_attr("href", &format!("{}?print=1", page_path))
        .with_text(label);

    if let Some(path) = document.find_first(|el| el.has_class(ACTION_BUTTONS_CLASS)) {
        if let Some(actions) = document.element_at_mut(&path) {
            actions.children.push(button.into());
            return true;
        }
    }

    let Some((parent_path, index)) = document
        .find_first(|el| el.is("h1"))
        .and_then(|p| p.parent())
    else {
        return false;
    };
    let Some(parent) = document.element_at_mut(&parent_path) else {
        return false;
    };

    let actions = Element::new("div")
        .with_attr("class", ACTION_BUTTONS_CLASS)
        .with_child(button);
    parent.children.insert(index + 1, actions.into());
    true
}

/// Make absolute links inside the content root open in a new tab.
///
/// Links that already declare a `target` are left alone.
pub fn open_external_links(document: &mut Element, content_root_id: &str) -> usize {
    let Some(root_path) = document.find_by_id(content_root_id) else {
        return 0;
    };
    let Some(root) = document.element_at_mut(&root_path) else {
        return 0;
    };

    let links = root.find_all(|el| {
        el.is("a")
            && el.attr("href").is_some_and(|href| href.starts_with("http"))
            && !el.has_attr("target")
    });

    for path in &links {
        if let Some(link) = root.element_at_mut(path) {
            link.set_attr("target", "_blank");
            link.set_attr("rel", "noopener noreferrer");
        }
    }

    links.len()
}

fn has_ancestor(document: &Element, path: &NodePath, tag: &str) -> bool {
    let mut current = path.parent();
    while let Some((ancestor, _)) = current {
        if ancestor.is_root() {
            return false;
        }
        if document.element_at(&ancestor).is_some_and(|el| el.is(tag)) {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

/// Set one declaration of an inline `style` attribute.
fn set_style(el: &mut Element, property: &str, value: &str) {
    let mut declarations: Vec<String> = el
        .attr("style")
        .unwrap_or("")
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| {
            d.split(':')
                .next()
                .map(|name| !name.trim().eq_ignore_ascii_case(property))
                .unwrap_or(true)
        })
        .map(String::from)
        .collect();
    declarations.push(format!("{}: {}", property, value));
    el.set_attr("style", &declarations.join("; "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;
    use crate::render::render_html;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_copy_buttons() {
        let mut doc = parse_html(
            r#"<pre style="margin: 0"><code>fn main() {}</code></pre><p><code>inline</code></p>"#,
        )
        .unwrap();

        assert_eq!(add_copy_buttons(&mut doc, "Copy"), 1);
        assert_eq!(
            render_html(&doc),
            r#"<pre style="margin: 0; position: relative"><code>fn main() {}</code><button class="copy-button" style="position: absolute; top: 5px; right: 5px">Copy</button></pre><p><code>inline</code></p>"#
        );

        // A second run does not add another button.
        assert_eq!(add_copy_buttons(&mut doc, "Copy"), 0);

        let pre = doc.children[0].as_element().unwrap();
        assert_eq!(copy_payload(pre), Some("fn main() {}".to_string()));
    }

    #[test]
    fn test_print_button_after_h1() {
        let mut doc = parse_html(
            r#"<main><h1>Title</h1><div id="doc-content"><p>x</p></div></main>"#,
        )
        .unwrap();

        assert!(add_print_button(&mut doc, "doc-content", "/docs/guide", "Print View"));
        assert_eq!(
            render_html(&doc),
            r#"<main><h1>Title</h1><div class="action-buttons"><a class="print-button" href="/docs/guide?print=1">Print View</a></div><div id="doc-content"><p>x</p></div></main>"#
        );
        assert!(!add_print_button(&mut doc, "doc-content", "/docs/guide", "Print View"));
    }

    #[test]
    fn test_print_button_into_existing_actions() {
        let mut doc = parse_html(
            r#"<div class="action-buttons"><a href="/edit">Edit</a></div><div id="doc-content"></div>"#,
        )
        .unwrap();

        assert!(add_print_button(&mut doc, "doc-content", "/p", "Print View"));
        let actions = doc.children[0].as_element().unwrap();
        assert_eq!(actions.children.len(), 2);
    }

    #[test]
    fn test_print_button_needs_content_root_and_heading() {
        let mut no_root = parse_html("<h1>Title</h1>").unwrap();
        assert!(!add_print_button(&mut no_root, "doc-content", "/p", "Print View"));

        let mut no_heading = parse_html(r#"<div id="doc-content"></div>"#).unwrap();
        assert!(!add_print_button(&mut no_heading, "doc-content", "/p", "Print View"));
    }

    #[test]
    fn test_external_links() {
        let mut doc = parse_html(
            r#"<a href="https://nav.example">nav</a><div id="doc-content"><a href="https://example.com">ext</a><a href="/local">local</a><a href="http://x.org" target="_self">kept</a></div>"#,
        )
        .unwrap();

        assert_eq!(open_external_links(&mut doc, "doc-content"), 1);
        assert_eq!(
            render_html(&doc),
            r#"<a href="https://nav.example">nav</a><div id="doc-content"><a href="https://example.com" target="_blank" rel="noopener noreferrer">ext</a><a href="/local">local</a><a href="http://x.org" target="_self">kept</a></div>"#
        );
    }

    #[test]
    fn test_enhance_respects_config() {
        let mut doc = parse_html(
            r#"<h1>T</h1><div id="doc-content"><pre><code>x</code></pre><a href="https://e.com">e</a></div>"#,
        )
        .unwrap();
        let mut config = PageConfig::default();
        config.enhance.print_button = false;

        let report = enhance(&mut doc, &config, "/p");
        assert_eq!(
            report,
            EnhanceReport {
                copy_buttons: 1,
                print_button: false,
                external_links: 1,
            }
        );
    }
}
