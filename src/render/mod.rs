//! Rendering of outlines and analyses for output.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{analysis_to_text, outline_to_text};
