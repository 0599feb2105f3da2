//! Rendering layer for turning document trees back into markup.

pub mod html;

pub use html::render_html;
