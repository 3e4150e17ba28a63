//! Read-only query service over the loaded flashcard document.

pub mod filter;
pub mod params;
mod service;

pub use filter::{FlashcardFilter, FlashcardList};
pub use params::{DEFAULT_SAMPLE_SIZE, parse_int_prefix, sample_len};
pub use service::{DeckService, FlashcardQueries, shuffled_sample};
