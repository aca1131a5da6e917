pub mod document;
pub mod state;

pub use document::{DocumentStore, StorageError};
pub use state::AppState;
