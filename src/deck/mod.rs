//! Flashcard document model and the one-shot startup loader.

mod loader;
pub mod types;

pub use loader::{load, try_load};
pub use types::{Flashcard, FlashcardDocument, LoadError, Metadata};
