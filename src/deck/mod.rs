pub mod io;

use std::sync::Arc;

use crate::core::Flashcard;

/// Transition applied to a single card by the generation orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationState {
    /// A generation request was dispatched for the card.
    Started,
    /// The collaborator returned an image reference.
    Completed(String),
    /// The collaborator failed; loading is rolled back.
    Failed,
}

/// In-memory ordered flashcard collection.
///
/// Mutations are copy-on-write: each one builds a fresh collection in which
/// exactly the targeted card differs, then swaps it in wholesale. Readers
/// holding an old snapshot are never affected. Only the app controller and
/// import logic write; that convention is what stands in for locking.
#[derive(Debug, Clone, Default)]
pub struct DeckStore {
    cards: Arc<Vec<Flashcard>>,
}

impl DeckStore {
    pub fn new() -> Self {
        DeckStore { cards: Arc::new(Vec::new()) }
    }

    pub fn from_cards(cards: Vec<Flashcard>) -> Self {
        DeckStore { cards: Arc::new(cards) }
    }

    /// Seed a deck from a static audio-URL list, deriving id and display
    /// text from each filename.
    pub fn seed_from_audio_urls(urls: &[String]) -> Self {
        let cards = urls.iter().map(|url| Flashcard::from_audio_url(url)).collect();
        DeckStore { cards: Arc::new(cards) }
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    /// Cheap whole-collection snapshot for handing to worker tasks.
    pub fn snapshot(&self) -> Arc<Vec<Flashcard>> {
        Arc::clone(&self.cards)
    }

    pub fn get(&self, id: &str) -> Option<&Flashcard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Atomically replace the whole collection (import path).
    pub fn replace_all(&mut self, cards: Vec<Flashcard>) {
        self.cards = Arc::new(cards);
    }

    /// Apply one generation-state transition to the card with `id`.
    /// Returns false when no card matches; every other card is unchanged
    /// by value either way.
    pub fn set_generation_state(&mut self, id: &str, state: GenerationState) -> bool {
        if self.get(id).is_none() {
            return false;
        }

        let next: Vec<Flashcard> = self
            .cards
            .iter()
            .map(|card| {
                if card.id != id {
                    return card.clone();
                }
                let mut updated = card.clone();
                match &state {
                    GenerationState::Started => updated.is_loading = true,
                    GenerationState::Completed(url) => {
                        updated.image_url = Some(url.clone());
                        updated.is_loading = false;
                    }
                    GenerationState::Failed => updated.is_loading = false,
                }
                updated
            })
            .collect();

        self.cards = Arc::new(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deck() -> DeckStore {
        DeckStore::seed_from_audio_urls(&[
            "audio/hello_world.mp3".to_string(),
            "audio/good_morning.mp3".to_string(),
        ])
    }

    #[test]
    fn test_seeding() {
        let deck = sample_deck();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards()[0].text, "Hello World");
        assert_eq!(deck.cards()[1].id, "good-morning");
    }

    #[test]
    fn test_generation_state_transitions() {
        let mut deck = sample_deck();

        assert!(deck.set_generation_state("hello-world", GenerationState::Started));
        assert!(deck.get("hello-world").unwrap().is_loading);

        let state = GenerationState::Completed("img/1.png".to_string());
        assert!(deck.set_generation_state("hello-world", state));
        let card = deck.get("hello-world").unwrap();
        assert!(!card.is_loading);
        assert_eq!(card.image_url.as_deref(), Some("img/1.png"));

        assert!(deck.set_generation_state("good-morning", GenerationState::Started));
        assert!(deck.set_generation_state("good-morning", GenerationState::Failed));
        let card = deck.get("good-morning").unwrap();
        assert!(!card.is_loading);
        assert!(card.image_url.is_none());
    }

    #[test]
    fn test_unknown_id_is_a_noop() {
        let mut deck = sample_deck();
        let before = deck.snapshot();
        assert!(!deck.set_generation_state("nope", GenerationState::Started));
        assert_eq!(*before, *deck.snapshot());
    }

    #[test]
    fn test_mutation_leaves_old_snapshots_alone() {
        let mut deck = sample_deck();
        let before = deck.snapshot();

        deck.set_generation_state("hello-world", GenerationState::Started);

        // Old snapshot still sees the pre-mutation card
        assert!(!before[0].is_loading);
        assert!(deck.cards()[0].is_loading);
        // Untargeted card unchanged by value
        assert_eq!(before[1], deck.cards()[1]);
    }
}
