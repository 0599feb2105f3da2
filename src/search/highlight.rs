//! Highlighting of literal matches inside a document subtree.

use crate::config::SearchConfig;
use crate::dom::{Element, Node, NodePath};
use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Case-insensitive pattern matching a query literally.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
}

impl SearchPattern {
    /// Build a pattern from raw user input. Regex metacharacters are escaped,
    /// so `a.b` only matches the text `a.b`.
    pub fn literal(query: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// A run of text within a highlighted text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any match
    Plain(&'a str),
    /// A matched occurrence
    Marked(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Self::Plain(s) | Self::Marked(s) => s,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Self::Marked(_))
    }
}

/// Split `text` into plain and marked runs at every non-overlapping match.
///
/// Returns `None` when nothing matches. Concatenating the segments always
/// reproduces `text`.
pub fn tokenize<'a>(text: &'a str, pattern: &SearchPattern) -> Option<Vec<Segment<'a>>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in pattern.regex.find_iter(text) {
        if m.is_empty() {
            continue;
        }
        if m.start() > last {
            segments.push(Segment::Plain(&text[last..m.start()]));
        }
        segments.push(Segment::Marked(m.as_str()));
        last = m.end();
    }

    if segments.is_empty() {
        return None;
    }
    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }

    Some(segments)
}

/// Result of a highlight pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    /// Total number of matched occurrences
    pub count: usize,
    /// Inserted wrappers in document order, relative to the highlighted root
    pub wrappers: Vec<NodePath>,
}

impl Highlights {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The wrapper closest to the start of the document.
    pub fn first(&self) -> Option<&NodePath> {
        self.wrappers.first()
    }

    /// Re-anchor wrapper paths under `base`.
    pub fn relative_to(self, base: &NodePath) -> Self {
        Self {
            count: self.count,
            wrappers: self.wrappers.iter().map(|p| base.join(p)).collect(),
        }
    }
}

/// Rewrites matching text nodes into wrapped runs.
#[derive(Debug, Clone)]
pub struct Highlighter {
    tag: String,
    class: String,
}

impl Highlighter {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            tag: config.highlight_tag.clone(),
            class: config.highlight_class.clone(),
        }
    }

    /// Highlight every occurrence of `pattern` in `root`'s text.
    ///
    /// `script` elements are skipped. Text nodes without a match are left as
    /// they are; matching ones are replaced in their parent by the segment
    /// sequence, so handles to them do not survive a pass.
    pub fn highlight(&self, root: &mut Element, pattern: &SearchPattern) -> Highlights {
        let mut out = Highlights::default();
        self.walk(root, &mut Vec::new(), pattern, &mut out);
        out
    }

    fn walk(
        &self,
        el: &mut Element,
        path: &mut Vec<usize>,
        pattern: &SearchPattern,
        out: &mut Highlights,
    ) {
        if el.is("script") {
            return;
        }

        let mut i = 0;
        while i < el.children.len() {
            let rewritten = match &mut el.children[i] {
                Node::Element(child) => {
                    path.push(i);
                    self.walk(child, path, pattern, out);
                    path.pop();
                    None
                }
                Node::Text(text) => tokenize(text, pattern).map(|segments| self.render(&segments)),
            };

            let Some(nodes) = rewritten else {
                i += 1;
                continue;
            };

            for (offset, node) in nodes.iter().enumerate() {
                if matches!(node, Node::Element(_)) {
                    out.count += 1;
                    let mut wrapper = path.clone();
                    wrapper.push(i + offset);
                    out.wrappers.push(NodePath::from(wrapper));
                }
            }

            let len = nodes.len();
            el.children.splice(i..=i, nodes);
            i += len;
        }
    }

    fn render(&self, segments: &[Segment]) -> Vec<Node> {
        segments
            .iter()
            .map(|segment| {
                if segment.is_marked() {
                    Element::new(self.tag.as_str())
                        .with_attr("class", &self.class)
                        .with_text(segment.as_str())
                        .into()
                } else {
                    Node::text(segment.as_str())
                }
            })
            .collect()
    }
}
