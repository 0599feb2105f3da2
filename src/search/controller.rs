//! Keystroke handling for the list filter and the content search.

use crate::config::SearchConfig;
use crate::dom::{Element, NodePath};
use crate::error::Result;
use crate::search::highlight::{Highlighter, Highlights, SearchPattern};
use crate::search::matcher::matches;
use crate::search::reset::clear_highlights;
use tracing::{debug, trace};

/// How a scroll should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Vertical alignment of the scrolled-to element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// The host's scrollable view of the document.
pub trait Viewport {
    /// Bring the element at `target` into view.
    fn scroll_into_view(&mut self, document: &Element, target: &NodePath, options: ScrollOptions);
}

/// What a list-filter keystroke did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    pub visible: usize,
    pub hidden: usize,
}

/// What a content-search keystroke did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The page has no content-search input.
    Disabled,
    /// Query below the length threshold; existing highlights were removed.
    Cleared { removed: usize },
    /// The page has no content root.
    NoContentRoot,
    /// A highlight pass ran.
    Highlighted { matches: usize, scrolled: bool },
}

/// Search bindings for one page.
#[derive(Debug, Clone)]
pub struct SearchController {
    config: SearchConfig,
    highlighter: Highlighter,
    list_filter: bool,
    content_search: bool,
    active: Option<Highlights>,
}

impl SearchController {
    /// Bind to the inputs present in `document`. A missing input disables
    /// only its own path.
    pub fn bind(document: &Element, config: SearchConfig) -> Self {
        let list_filter = document.find_by_id(&config.list_input_id).is_some();
        let content_search = document.find_by_id(&config.content_input_id).is_some();
        debug!(list_filter, content_search, "search controller bound");

        Self {
            highlighter: Highlighter::new(&config),
            config,
            list_filter,
            content_search,
            active: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn has_list_filter(&self) -> bool {
        self.list_filter
    }

    pub fn has_content_search(&self) -> bool {
        self.content_search
    }

    /// Highlights from the last content search, with paths from the document root.
    pub fn active_highlights(&self) -> Option<&Highlights> {
        self.active.as_ref()
    }

    /// Handle a keystroke in the list-filter input. Returns `None` when the
    /// page has no such input.
    pub fn on_list_filter_input(&self, document: &mut Element, value: &str) -> Option<FilterOutcome> {
        if !self.list_filter {
            return None;
        }
        Some(filter_list(document, value, &self.config))
    }

    /// Handle a keystroke in the content-search input.
    pub fn on_content_search_input(
        &mut self,
        document: &mut Element,
        value: &str,
        viewport: &mut dyn Viewport,
    ) -> Result<SearchOutcome> {
        if !self.content_search {
            return Ok(SearchOutcome::Disabled);
        }

        let query = value.to_lowercase();
        if query.chars().count() < self.config.min_query_len {
            let removed = self.reset(document);
            trace!(removed, "query below threshold");
            return Ok(SearchOutcome::Cleared { removed });
        }

        if document.find_by_id(&self.config.content_root_id).is_none() {
            return Ok(SearchOutcome::NoContentRoot);
        }

        self.reset(document);

        // Unwrapping may shift sibling indices, so resolve the root afterwards.
        let Some(root_path) = document.find_by_id(&self.config.content_root_id) else {
            return Ok(SearchOutcome::NoContentRoot);
        };
        let Some(root) = document.element_at_mut(&root_path) else {
            return Ok(SearchOutcome::NoContentRoot);
        };

        let pattern = SearchPattern::literal(&query)?;
        trace!(pattern = pattern.as_str(), "content pattern");
        let highlights = self.highlighter.highlight(root, &pattern).relative_to(&root_path);
        let matches = highlights.count;

        let scrolled = match highlights.first() {
            Some(first) => {
                viewport.scroll_into_view(
                    document,
                    first,
                    ScrollOptions {
                        behavior: ScrollBehavior::Smooth,
                        block: ScrollBlock::Center,
                    },
                );
                true
            }
            None => false,
        };

        debug!(query = %query, matches, "content search");
        self.active = Some(highlights);

        Ok(SearchOutcome::Highlighted { matches, scrolled })
    }

    fn reset(&mut self, document: &mut Element) -> usize {
        self.active = None;
        clear_highlights(document, &self.config)
    }
}

/// Show or hide every candidate item according to `value`.
///
/// An empty query shows everything without consulting the matcher.
pub fn filter_list(document: &mut Element, value: &str, config: &SearchConfig) -> FilterOutcome {
    let query = value.to_lowercase();
    let mut outcome = FilterOutcome::default();

    let Some(container_path) = document.find_by_id(&config.list_container_id) else {
        return outcome;
    };
    let Some(container) = document.element_at_mut(&container_path) else {
        return outcome;
    };

    for path in container.find_all(|el| el.is(&config.list_item_tag)) {
        let Some(item) = container.element_at_mut(&path) else {
            continue;
        };

        let visible = query.is_empty() || matches(&item.text_content().to_lowercase(), &query);
        if visible {
            item.remove_class(&config.hidden_class);
            outcome.visible += 1;
        } else {
            item.add_class(&config.hidden_class);
            outcome.hidden += 1;
        }
    }

    debug!(query = %query, visible = outcome.visible, hidden = outcome.hidden, "list filter");
    outcome
}
