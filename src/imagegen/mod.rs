pub mod api;

pub use api::HttpImageService;

use crate::{
    core::HanasuError,
    deck::{
        DeckStore,
        GenerationState,
    },
};

/// Streamed observation of a bulk sweep: progress text plus the per-card
/// state transitions, so an owner holding the real deck can mirror each
/// one instead of taking a wholesale copy at the end.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkUpdate {
    Message(String),
    State { id: String, state: GenerationState },
}

/// External image-generation collaborator: free-text prompt in, opaque
/// image reference out. All failures look the same to the orchestrator.
#[allow(async_fn_in_trait)]
pub trait ImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, HanasuError>;
}

/// Fixed template wrapping the card text.
pub fn build_prompt(text: &str) -> String {
    format!(
        "A simple, friendly illustration of \"{text}\" for a language-learning \
         flashcard. Flat colors, no text in the image."
    )
}

/// Outcome of a bulk generation sweep.
#[derive(Debug, Clone, Default)]
pub struct BulkReport {
    pub requested: usize,
    pub generated: usize,
    pub failures: Vec<String>,
}

/// Generate an image for one card: mark it loading, call the collaborator,
/// then either store the reference or roll the loading flag back. Returns
/// the stored image reference on success. No retry; a dispatched call is
/// always awaited to resolution.
pub async fn generate_for_card<G: ImageGenerator>(
    store: &mut DeckStore,
    generator: &G,
    id: &str,
) -> Result<String, HanasuError> {
    let card =
        store.get(id).cloned().ok_or_else(|| HanasuError::CardNotFound(id.to_string()))?;

    store.set_generation_state(id, GenerationState::Started);

    match generator.generate(&build_prompt(&card.text)).await {
        Ok(image_url) => {
            store.set_generation_state(id, GenerationState::Completed(image_url.clone()));
            Ok(image_url)
        }
        Err(e) => {
            store.set_generation_state(id, GenerationState::Failed);
            Err(HanasuError::ImageGeneration { card: card.text, reason: e.to_string() })
        }
    }
}

/// Generate images for every card lacking one, in deck order, one at a
/// time. Each call is awaited before the next starts so the collaborator
/// never sees more than one request from us at once. Individual failures
/// are collected, never fatal, and leave their card not-loading. Every
/// transition is also pushed through `observer` so a deck held elsewhere
/// can apply the same mutations as they happen.
pub async fn generate_missing<G, F>(
    store: &mut DeckStore,
    generator: &G,
    mut observer: F,
) -> BulkReport
where
    G: ImageGenerator,
    F: FnMut(BulkUpdate),
{
    let pending: Vec<(String, String)> = store
        .cards()
        .iter()
        .filter(|c| !c.has_image() && !c.is_loading)
        .map(|c| (c.id.clone(), c.text.clone()))
        .collect();

    let mut report = BulkReport { requested: pending.len(), ..Default::default() };

    for (id, text) in pending {
        // The card may have gained an image since the sweep started
        if store.get(&id).map(|c| c.has_image()).unwrap_or(true) {
            report.requested -= 1;
            continue;
        }

        observer(BulkUpdate::Message(format!("Generating image for \"{text}\"...")));
        observer(BulkUpdate::State { id: id.clone(), state: GenerationState::Started });

        match generate_for_card(store, generator, &id).await {
            Ok(image_url) => {
                observer(BulkUpdate::State {
                    id: id.clone(),
                    state: GenerationState::Completed(image_url),
                });
                report.generated += 1;
            }
            Err(e) => {
                observer(BulkUpdate::State { id: id.clone(), state: GenerationState::Failed });
                eprintln!("{e}");
                report.failures.push(e.to_string());
            }
        }
    }

    report
}
