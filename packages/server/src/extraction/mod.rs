mod client;
mod prompts;
mod scan;

pub use client::{ExtractionError, GeminiClient};
pub use scan::first_json_object;
