//! Page configuration: element ids, class names and thresholds.
//!
//! Every field has a default matching the documentation site's templates, so
//! an empty TOML document is a valid configuration:
//!
//! ```text
//! [search]
//! content_root_id = "doc-content"
//! min_query_len = 2
//!
//! [enhance]
//! print_button = false
//! ```

use crate::error::{ConfigError, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub search: SearchConfig,
    pub enhance: EnhanceConfig,
}

impl PageConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: PageConfig =
            toml::from_str(input).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate()
    }
}

/// Where the search feature finds its elements and how it marks them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Id of the list-filter input
    pub list_input_id: String,
    /// Id of the element holding the candidate items
    pub list_container_id: String,
    /// Tag of the candidate items inside the container
    pub list_item_tag: String,
    /// Id of the content-search input
    pub content_input_id: String,
    /// Id of the rendered document body
    pub content_root_id: String,
    /// Tag of the inserted highlight wrappers
    pub highlight_tag: String,
    /// Class shared by the highlighter and the reset step
    pub highlight_class: String,
    /// Class marking a filtered-out candidate item
    pub hidden_class: String,
    /// Content queries shorter than this (in characters) only clear highlights
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            list_input_id: "search-input".to_string(),
            list_container_id: "doc-list".to_string(),
            list_item_tag: "li".to_string(),
            content_input_id: "content-search".to_string(),
            content_root_id: "doc-content".to_string(),
            highlight_tag: "span".to_string(),
            highlight_class: "highlight".to_string(),
            hidden_class: "hidden".to_string(),
            min_query_len: 2,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_query_len == 0 {
            return Err(ConfigError::InvalidThreshold(self.min_query_len).into());
        }

        let names = [
            ("list_input_id", &self.list_input_id),
            ("list_container_id", &self.list_container_id),
            ("list_item_tag", &self.list_item_tag),
            ("content_input_id", &self.content_input_id),
            ("content_root_id", &self.content_root_id),
            ("highlight_tag", &self.highlight_tag),
            ("highlight_class", &self.highlight_class),
            ("hidden_class", &self.hidden_class),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyName(field).into());
            }
        }

        Ok(())
    }
}

/// Which page enhancements run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub copy_buttons: bool,
    pub print_button: bool,
    pub external_links: bool,
    pub copy_label: String,
    pub print_label: String,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            copy_buttons: true,
            print_button: true,
            external_links: true,
            copy_label: "Copy".to_string(),
            print_label: "Print View".to_string(),
        }
    }
}
