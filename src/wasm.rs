//! WebAssembly bindings for JavaScript/TypeScript.

#![cfg(feature = "wasm")]

use crate::config::{PageConfig, SearchConfig};
use crate::search::matches;
use wasm_bindgen::prelude::*;

/// Install a panic hook that forwards panics to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Configuration handle shared by the bindings.
#[wasm_bindgen]
pub struct SearchOptions {
    config: PageConfig,
}

#[wasm_bindgen]
impl SearchOptions {
    /// Create a new options object with the site defaults.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: PageConfig::default(),
        }
    }

    /// Load options from a TOML document.
    #[wasm_bindgen(js_name = fromToml)]
    pub fn from_toml(input: &str) -> Result<SearchOptions, JsError> {
        let config = PageConfig::from_toml(input).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { config })
    }

    /// Set the id of the content root. Empty ids are rejected.
    #[wasm_bindgen(js_name = setContentRootId)]
    pub fn set_content_root_id(&mut self, id: &str) -> Result<(), JsError> {
        self.update(|search| search.content_root_id = id.to_string())
    }

    /// Set the class applied to highlight wrappers. Empty classes are rejected.
    #[wasm_bindgen(js_name = setHighlightClass)]
    pub fn set_highlight_class(&mut self, class: &str) -> Result<(), JsError> {
        self.update(|search| search.highlight_class = class.to_string())
    }
}

impl SearchOptions {
    /// Apply `edit` only if the result still validates.
    fn update(&mut self, edit: impl FnOnce(&mut SearchConfig)) -> Result<(), JsError> {
        let mut search = self.config.search.clone();
        edit(&mut search);
        search.validate().map_err(|e| JsError::new(&e.to_string()))?;
        self.config.search = search;
        Ok(())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn page_config(options: Option<SearchOptions>) -> PageConfig {
    options.map(|o| o.config).unwrap_or_default()
}

/// Check whether `query` fuzzy-matches `text`.
#[wasm_bindgen(js_name = fuzzyMatch)]
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    matches(&text.to_lowercase(), &query.to_lowercase())
}

/// Highlight `query` in HTML markup.
///
/// Returns `{ html: string, matches: number }`.
#[wasm_bindgen(js_name = highlightHtml)]
pub fn highlight_html(
    html: &str,
    query: &str,
    options: Option<SearchOptions>,
) -> Result<JsValue, JsError> {
    let config = page_config(options);
    let summary = crate::highlight_html(html, query, &config.search)
        .map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&summary).map_err(|e| JsError::new(&e.to_string()))
}

/// Remove every highlight wrapper from HTML markup.
#[wasm_bindgen(js_name = clearHighlightsHtml)]
pub fn clear_highlights_html(html: &str, options: Option<SearchOptions>) -> Result<String, JsError> {
    let config = page_config(options);
    crate::clear_highlights_html(html, &config.search).map_err(|e| JsError::new(&e.to_string()))
}

/// Apply the list filter to HTML markup.
#[wasm_bindgen(js_name = filterListHtml)]
pub fn filter_list_html(
    html: &str,
    query: &str,
    options: Option<SearchOptions>,
) -> Result<String, JsError> {
    let config = page_config(options);
    crate::filter_list_html(html, query, &config.search).map_err(|e| JsError::new(&e.to_string()))
}

/// Apply the page enhancements to HTML markup.
#[wasm_bindgen(js_name = enhanceHtml)]
pub fn enhance_html(
    html: &str,
    page_path: &str,
    options: Option<SearchOptions>,
) -> Result<String, JsError> {
    let config = page_config(options);
    crate::enhance_html(html, &config, page_path).map_err(|e| JsError::new(&e.to_string()))
}

/// Names of the inputs this library binds to, as a JS array.
#[wasm_bindgen(js_name = boundInputIds)]
pub fn bound_input_ids(options: Option<SearchOptions>) -> js_sys::Array {
    let config = page_config(options);
    let ids = js_sys::Array::new();
    ids.push(&JsValue::from_str(&config.search.list_input_id));
    ids.push(&JsValue::from_str(&config.search.content_input_id));
    ids
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// TypeScript type definitions for documentation
/// ```typescript
/// // docsite_search.d.ts
///
/// export function fuzzyMatch(text: string, query: string): boolean;
/// export function highlightHtml(html: string, query: string, options?: SearchOptions): { html: string; matches: number };
/// export function clearHighlightsHtml(html: string, options?: SearchOptions): string;
/// export function filterListHtml(html: string, query: string, options?: SearchOptions): string;
/// export function enhanceHtml(html: string, pagePath: string, options?: SearchOptions): string;
/// export function boundInputIds(options?: SearchOptions): string[];
/// export function getVersion(): string;
///
/// export class SearchOptions {
///     constructor();
///     static fromToml(input: string): SearchOptions;
///     setContentRootId(id: string): void; // throws on an empty id
///     setHighlightClass(class: string): void; // throws on an empty class
/// }
/// ```
const _: () = ();
