//! Filter helpers for the flashcard listing endpoint.

use crate::deck::Flashcard;
use serde::Serialize;

/// Filter value meaning "no filtering on this dimension".
pub const ALL: &str = "all";

/// Optional constraints accepted by `GET /api/flashcards`.
///
/// Every constraint that is present narrows the result; constraints combine with AND.
#[derive(Debug, Clone, Default)]
pub struct FlashcardFilter {
    /// Exact, case-sensitive category match unless empty or `"all"`.
    pub category: Option<String>,
    /// Exact, case-sensitive difficulty match unless empty or `"all"`.
    pub difficulty: Option<String>,
    /// Case-insensitive substring search over question, answer and tags.
    pub search: Option<String>,
}

/// Build a filter from decoded query-string pairs.
///
/// When a key repeats, its first value is used; unknown keys are ignored.
impl FromIterator<(String, String)> for FlashcardFilter {
    fn from_iter<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut filter.category,
                "difficulty" => &mut filter.difficulty,
                "search" => &mut filter.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        filter
    }
}

/// Response body for the listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct FlashcardList {
    /// Number of cards that passed the filter.
    pub total: usize,
    /// Matching cards in their original order.
    pub flashcards: Vec<Flashcard>,
}

impl FlashcardFilter {
    /// Keep the cards in `cards` that satisfy every active constraint, preserving order.
    pub fn apply<'a, I>(&self, cards: I) -> Vec<Flashcard>
    where
        I: IntoIterator<Item = &'a Flashcard>,
    {
        let category = exact_constraint(self.category.as_deref());
        let difficulty = exact_constraint(self.difficulty.as_deref());
        let needle = self
            .search
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);

        cards
            .into_iter()
            .filter(|card| category.is_none_or(|wanted| card.category() == Some(wanted)))
            .filter(|card| difficulty.is_none_or(|wanted| card.difficulty() == Some(wanted)))
            .filter(|card| {
                needle
                    .as_deref()
                    .is_none_or(|needle| mentions(card, needle))
            })
            .cloned()
            .collect()
    }
}

fn exact_constraint(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty() && *value != ALL)
}

/// Whether the lowercased `needle` occurs in the card's question, answer, or any tag.
///
/// Non-string fields never match.
fn mentions(card: &Flashcard, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    card.question().is_some_and(contains)
        || card.answer().is_some_and(contains)
        || card.tags().any(contains)
}
