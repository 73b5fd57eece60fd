// Saved-draft library on the local filesystem.

pub mod handlers;
pub mod store;

pub use store::LibraryStore;
