//! Query service answering every read the HTTP surface exposes.

use crate::deck::{Flashcard, FlashcardDocument, Metadata};
use crate::query::filter::{FlashcardFilter, FlashcardList};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Value;

/// Owns the loaded deck and answers queries against it.
///
/// Construct the service once near process start and share it through an `Arc`; it is never
/// mutated afterwards, so handlers read it without locking.
#[derive(Debug, Clone)]
pub struct DeckService {
    document: FlashcardDocument,
}

/// Abstraction over the deck queries used by the HTTP surface.
pub trait FlashcardQueries: Send + Sync {
    /// Cards matching `filter`, in file order, with their count.
    fn list(&self, filter: &FlashcardFilter) -> FlashcardList;

    /// Document metadata, verbatim.
    fn metadata(&self) -> &Metadata;

    /// The first card whose id equals `id`.
    fn get(&self, id: i64) -> Option<Flashcard>;

    /// Up to `count` distinct cards in random order.
    fn random_sample(&self, count: usize) -> Vec<Flashcard>;

    /// The `categories` value declared in the metadata, or an empty array when absent.
    fn categories(&self) -> Value;

    /// Number of cards in the deck.
    fn flashcard_count(&self) -> usize;
}

impl DeckService {
    /// Wrap a loaded document.
    pub fn new(document: FlashcardDocument) -> Self {
        Self { document }
    }
}

impl FlashcardQueries for DeckService {
    fn list(&self, filter: &FlashcardFilter) -> FlashcardList {
        let flashcards = filter.apply(&self.document.flashcards);
        tracing::debug!(
            category = ?filter.category,
            difficulty = ?filter.difficulty,
            search = ?filter.search,
            matched = flashcards.len(),
            "Filtered flashcards"
        );
        FlashcardList {
            total: flashcards.len(),
            flashcards,
        }
    }

    fn metadata(&self) -> &Metadata {
        &self.document.metadata
    }

    fn get(&self, id: i64) -> Option<Flashcard> {
        self.document
            .flashcards
            .iter()
            .find(|card| card.id() == Some(id))
            .cloned()
    }

    fn random_sample(&self, count: usize) -> Vec<Flashcard> {
        shuffled_sample(&self.document.flashcards, count, &mut rand::thread_rng())
    }

    fn categories(&self) -> Value {
        self.document.metadata.categories()
    }

    fn flashcard_count(&self) -> usize {
        self.document.flashcards.len()
    }
}

/// Shuffle a copy of `cards` with `rng` and keep the first `count`.
///
/// Each card appears at most once; asking for more than exist returns all of them.
pub fn shuffled_sample<R>(cards: &[Flashcard], count: usize, rng: &mut R) -> Vec<Flashcard>
where
    R: Rng + ?Sized,
{
    let mut shuffled = cards.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}
