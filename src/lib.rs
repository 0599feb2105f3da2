//! # docsite-search
//!
//! In-page search for rendered documentation: a fuzzy list filter, literal
//! content highlighting with exact reversal, and the small UI enhancements
//! documentation pages carry (copy buttons, print link, external links).
//!
//! Everything operates on a headless document tree ([`dom::Element`]), so the
//! same logic runs in a browser through WebAssembly, behind a C ABI, or in
//! tests without a DOM.
//!
//! ## Quick Start
//!
//! ```rust
//! use docsite_search::{highlight_html, SearchConfig};
//!
//! let html = r#"<div id="doc-content"><p>The quick brown fox</p></div>"#;
//! let summary = highlight_html(html, "quick", &SearchConfig::default()).unwrap();
//!
//! assert_eq!(summary.matches, 1);
//! assert!(summary.html.contains(r#"<span class="highlight">quick</span>"#));
//! ```
//!
//! ## Page Conventions
//!
//! The defaults match the site templates and can be changed through
//! [`PageConfig`]:
//!
//! - `#search-input` filters the `li` items of `#doc-list`
//! - `#content-search` highlights text inside `#doc-content`
//! - matches are wrapped in `<span class="highlight">`
//! - filtered-out items get the `hidden` class
//!
//! ## Matching
//!
//! The list filter accepts a substring or any in-order subsequence, so `gsg`
//! finds "Getting Started Guide". Content search is a literal,
//! case-insensitive match and ignores queries shorter than two characters.
//!
//! ## Features
//!
//! - `wasm`: Enable WebAssembly bindings (requires `wasm-bindgen`)

pub mod config;
pub mod dom;
pub mod enhance;
pub mod error;
pub mod parser;
pub mod render;
pub mod search;

// FFI module (always compiled for cdylib)
pub mod ffi;

// WASM module (only with feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Convenience re-exports
pub use config::{EnhanceConfig, PageConfig, SearchConfig};
pub use dom::{Element, Node, NodePath};
pub use enhance::{enhance, EnhanceReport};
pub use error::{ConfigError, Error, ParseError, Result};
pub use parser::parse_html;
pub use render::render_html;
pub use search::{
    clear_highlights, filter_list, matches, Highlighter, Highlights, SearchController,
    SearchOutcome, SearchPattern, Viewport,
};

use serde::Serialize;

/// Highlighted markup and the number of matches in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSummary {
    pub html: String,
    pub matches: usize,
}

/// Highlight `query` in HTML markup in one step.
///
/// Existing highlights are always removed first. The pass covers only the
/// content root, following the same rules as a content-search keystroke: a
/// query shorter than `min_query_len` characters or a page without a content
/// root leaves the markup with no highlights and zero matches.
pub fn highlight_html(html: &str, query: &str, config: &SearchConfig) -> Result<HighlightSummary> {
    let mut doc = parse_html(html)?;
    clear_highlights(&mut doc, config);

    let query = query.to_lowercase();
    let mut matches = 0;
    if query.chars().count() >= config.min_query_len {
        if let Some(root_path) = doc.find_by_id(&config.content_root_id) {
            let pattern = SearchPattern::literal(&query)?;
            if let Some(root) = doc.element_at_mut(&root_path) {
                matches = Highlighter::new(config).highlight(root, &pattern).count;
            }
        }
    }

    Ok(HighlightSummary {
        html: render_html(&doc),
        matches,
    })
}

/// Remove every highlight wrapper from HTML markup.
pub fn clear_highlights_html(html: &str, config: &SearchConfig) -> Result<String> {
    let mut doc = parse_html(html)?;
    clear_highlights(&mut doc, config);
    Ok(render_html(&doc))
}

/// Apply the list filter for `query` to HTML markup.
pub fn filter_list_html(html: &str, query: &str, config: &SearchConfig) -> Result<String> {
    let mut doc = parse_html(html)?;
    filter_list(&mut doc, query, config);
    Ok(render_html(&doc))
}

/// Apply the page enhancements to HTML markup.
pub fn enhance_html(html: &str, config: &PageConfig, page_path: &str) -> Result<String> {
    let mut doc = parse_html(html)?;
    enhance(&mut doc, config, page_path);
    Ok(render_html(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<nav>quick links</nav><div id="doc-content"><p>The quick brown fox</p></div>"#;

    #[test]
    fn test_highlight_html_scoped_to_content_root() {
        let summary = highlight_html(PAGE, "QUICK", &SearchConfig::default()).unwrap();
        assert_eq!(summary.matches, 1);
        assert_eq!(
            summary.html,
            r#"<nav>quick links</nav><div id="doc-content"><p>The <span class="highlight">quick</span> brown fox</p></div>"#
        );
    }

    #[test]
    fn test_highlight_html_without_content_root() {
        let summary = highlight_html("<nav>quick</nav>", "quick", &SearchConfig::default()).unwrap();
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.html, "<nav>quick</nav>");
    }

    #[test]
    fn test_highlight_html_without_content_root_clears_stale_wrappers() {
        let html = r#"<p>The <span class="highlight">quick</span> fox</p>"#;
        let summary = highlight_html(html, "fox", &SearchConfig::default()).unwrap();
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.html, "<p>The quick fox</p>");
    }

    #[test]
    fn test_highlight_html_short_query_only_clears() {
        let config = SearchConfig::default();
        let html = r#"<div id="doc-content"><p>a cat</p></div>"#;
        let summary = highlight_html(html, "a", &config).unwrap();
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.html, html);

        let highlighted = highlight_html(html, "cat", &config).unwrap();
        assert_eq!(highlighted.matches, 1);
        let cleared = highlight_html(&highlighted.html, "c", &config).unwrap();
        assert_eq!(cleared.matches, 0);
        assert_eq!(cleared.html, html);
    }

    #[test]
    fn test_highlight_html_threshold_is_configurable() {
        let config = SearchConfig {
            min_query_len: 1,
            ..SearchConfig::default()
        };
        let html = r#"<div id="doc-content"><p>a cat</p></div>"#;
        assert_eq!(highlight_html(html, "a", &config).unwrap().matches, 2);
    }

    #[test]
    fn test_highlight_then_clear_round_trip() {
        let config = SearchConfig::default();
        let summary = highlight_html(PAGE, "ro", &config).unwrap();
        assert_eq!(summary.matches, 1);
        assert_eq!(clear_highlights_html(&summary.html, &config).unwrap(), PAGE);
    }

    #[test]
    fn test_rehighlight_replaces_previous() {
        let config = SearchConfig::default();
        let first = highlight_html(PAGE, "quick", &config).unwrap();
        let second = highlight_html(&first.html, "fox", &config).unwrap();
        assert_eq!(second.matches, 1);
        assert!(!second.html.contains(">quick</span>"));
        assert!(second.html.contains(r#"<span class="highlight">fox</span>"#));
    }

    #[test]
    fn test_filter_list_html() {
        let html = r#"<ul id="doc-list"><li>Alpha Guide</li><li>Beta Tutorial</li><li>Gamma FAQ</li></ul>"#;
        let out = filter_list_html(html, "ta", &SearchConfig::default()).unwrap();
        assert_eq!(
            out,
            r#"<ul id="doc-list"><li class="hidden">Alpha Guide</li><li>Beta Tutorial</li><li class="hidden">Gamma FAQ</li></ul>"#
        );
    }

    #[test]
    fn test_enhance_html() {
        let html = r#"<h1>Guide</h1><div id="doc-content"><a href="https://example.com">x</a></div>"#;
        let out = enhance_html(html, &PageConfig::default(), "/docs/guide").unwrap();
        assert!(out.contains(r#"href="/docs/guide?print=1""#));
        assert!(out.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = highlight_html("<!-- open", "quick", &SearchConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
