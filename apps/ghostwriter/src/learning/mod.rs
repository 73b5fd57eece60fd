// Style learning and review engine.
// Ingests reference documents, decides when to (re)build the style model,
// and scores new text against it. Everything here is synchronous and infallible;
// the HTTP layer in handlers.rs owns locking and input validation.

pub mod document;
pub mod handlers;
pub mod reviewer;
pub mod style_model;
pub mod text;
pub mod trigger;
pub mod workspace;

pub use reviewer::{Feedback, ReviewSettings};
pub use trigger::TriggerPolicy;
pub use workspace::Workspace;
