//! In-page search: list filtering, content highlighting and highlight reset.

pub mod controller;
pub mod highlight;
pub mod matcher;
mod reset;

pub use controller::{
    filter_list, FilterOutcome, ScrollBehavior, ScrollBlock, ScrollOptions, SearchController,
    SearchOutcome, Viewport,
};
pub use highlight::{tokenize, Highlighter, Highlights, SearchPattern, Segment};
pub use matcher::matches;
pub use reset::clear_highlights;
