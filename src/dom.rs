//! Headless document tree that search and enhancements operate on.

/// Tag used for the synthetic root that holds a parsed fragment.
pub const FRAGMENT_TAG: &str = "#fragment";

/// Elements that never have children or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is raw text rather than markup.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A run of character data
    Text(String),
    /// An element with its attributes and children
    Element(Element),
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    /// Concatenated character data of this node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Lower-cased tag name
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a synthetic root holding `children`.
    pub fn fragment(children: Vec<Node>) -> Self {
        Self {
            tag: FRAGMENT_TAG.to_string(),
            attributes: Vec::new(),
            children,
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Case-insensitive tag comparison.
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn is_fragment(&self) -> bool {
        self.tag == FRAGMENT_TAG
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.iter().any(|t| self.is(t))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(pos) => self.attributes[pos].1 = value.to_string(),
            None => self
                .attributes
                .push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let value = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim_end(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", &value);
        true
    }

    /// Remove a class. Returns `false` if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let value = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &value);
        true
    }

    /// Concatenated character data of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Resolve a path to an element. The empty path is `self`.
    pub fn element_at(&self, path: &NodePath) -> Option<&Element> {
        let mut current = self;
        for &index in path.indices() {
            current = current.children.get(index)?.as_element()?;
        }
        Some(current)
    }

    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut current = self;
        for &index in path.indices() {
            current = current.children.get_mut(index)?.as_element_mut()?;
        }
        Some(current)
    }

    /// Resolve a non-empty path to a node.
    pub fn node_at(&self, path: &NodePath) -> Option<&Node> {
        let (parent, index) = path.parent()?;
        self.element_at(&parent)?.children.get(index)
    }

    /// Path of the first descendant element with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<NodePath> {
        self.find_first(|el| el.id() == Some(id))
    }

    /// Path of the first descendant element matching `pred`, in document order.
    pub fn find_first(&self, pred: impl Fn(&Element) -> bool) -> Option<NodePath> {
        let mut found = None;
        walk_elements(self, &mut Vec::new(), &mut |path: &[usize], el: &Element| {
            if found.is_none() && pred(el) {
                found = Some(NodePath::from(path.to_vec()));
            }
        });
        found
    }

    /// Paths of every descendant element matching `pred`, in document order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<NodePath> {
        let mut found = Vec::new();
        walk_elements(self, &mut Vec::new(), &mut |path: &[usize], el: &Element| {
            if pred(el) {
                found.push(NodePath::from(path.to_vec()));
            }
        });
        found
    }
}

fn walk_elements<F>(el: &Element, path: &mut Vec<usize>, f: &mut F)
where
    F: FnMut(&[usize], &Element),
{
    for (i, child) in el.children.iter().enumerate() {
        if let Node::Element(child_el) = child {
            path.push(i);
            f(path, child_el);
            walk_elements(child_el, path, f);
            path.pop();
        }
    }
}

/// Route from a root element to a node, as child indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The path addressing the root itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Split into the parent's path and this node's index within it.
    pub fn parent(&self) -> Option<(NodePath, usize)> {
        let (&last, rest) = self.0.split_last()?;
        Some((Self(rest.to_vec()), last))
    }

    /// Append `other`, interpreting it relative to `self`.
    pub fn join(&self, other: &NodePath) -> Self {
        let mut indices = self.0.clone();
        indices.extend_from_slice(&other.0);
        Self(indices)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Element {
        Element::fragment(vec![Element::new("div")
            .with_attr("id", "doc-content")
            .with_child(Element::new("p").with_text("Hello "))
            .with_child(
                Element::new("ul")
                    .with_attr("id", "doc-list")
                    .with_child(Element::new("li").with_text("One"))
                    .with_child(Element::new("li").with_text("Two")),
            )
            .into()])
    }

    #[test]
    fn test_find_by_id() {
        let doc = sample();
        assert_eq!(doc.find_by_id("doc-list"), Some(NodePath::from(vec![0, 1])));
        assert_eq!(doc.find_by_id("missing"), None);
    }

    #[test]
    fn test_find_all_document_order() {
        let doc = sample();
        let items = doc.find_all(|el| el.is("li"));
        assert_eq!(
            items,
            vec![NodePath::from(vec![0, 1, 0]), NodePath::from(vec![0, 1, 1])]
        );
    }

    #[test]
    fn test_text_content() {
        let doc = sample();
        assert_eq!(doc.text_content(), "Hello OneTwo");
    }

    #[test]
    fn test_class_editing() {
        let mut el = Element::new("li").with_attr("class", "entry");
        assert!(el.add_class("hidden"));
        assert!(!el.add_class("hidden"));
        assert_eq!(el.attr("class"), Some("entry hidden"));
        assert!(el.remove_class("hidden"));
        assert!(!el.remove_class("hidden"));
        assert_eq!(el.attr("class"), Some("entry"));
    }

    #[test]
    fn test_node_at_and_parent() {
        let doc = sample();
        let path = NodePath::from(vec![0, 0, 0]);
        assert_eq!(doc.node_at(&path).and_then(Node::as_text), Some("Hello "));
        let (parent, index) = path.parent().unwrap();
        assert_eq!(parent, NodePath::from(vec![0, 0]));
        assert_eq!(index, 0);
        assert!(NodePath::root().parent().is_none());
    }

    #[test]
    fn test_set_attr_is_case_insensitive() {
        let mut el = Element::new("A").with_attr("HREF", "/a");
        el.set_attr("href", "/b");
        assert_eq!(el.tag, "a");
        assert_eq!(el.attributes.len(), 1);
        assert_eq!(el.attr("Href"), Some("/b"));
    }
}
