//! HTML serializer for document trees.

use crate::dom::{Element, Node, RAW_TEXT_ELEMENTS};

/// Render an element to HTML. A fragment root renders only its children.
pub fn render_html(root: &Element) -> String {
    let mut renderer = HtmlRenderer::default();
    if root.is_fragment() {
        renderer.render_children(root);
    } else {
        renderer.render_element(root);
    }
    renderer.output
}

#[derive(Default)]
struct HtmlRenderer {
    output: String,
}

impl HtmlRenderer {
    fn render_node(&mut self, node: &Node, raw: bool) {
        match node {
            Node::Text(text) if raw => self.output.push_str(text),
            Node::Text(text) => self.output.push_str(&escape_text(text)),
            Node::Element(el) => self.render_element(el),
        }
    }

    fn render_element(&mut self, el: &Element) {
        self.output.push('<');
        self.output.push_str(&el.tag);
        for (name, value) in &el.attributes {
            self.output.push(' ');
            self.output.push_str(name);
            if !value.is_empty() {
                self.output.push_str(&format!(r#"="{}""#, escape_attr(value)));
            }
        }
        self.output.push('>');

        if el.is_void() {
            return;
        }

        self.render_children(el);

        self.output.push_str("</");
        self.output.push_str(&el.tag);
        self.output.push('>');
    }

    fn render_children(&mut self, el: &Element) {
        let raw = RAW_TEXT_ELEMENTS.iter().any(|t| el.is(t));
        for child in &el.children {
            self.render_node(child, raw);
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
