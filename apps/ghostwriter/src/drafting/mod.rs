// Draft generation: product info → Markdown technical document via the LLM client.
// The active style guide is appended to the system prompt when present.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod style_guide;
