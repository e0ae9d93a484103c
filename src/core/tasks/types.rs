use crate::{
    core::Flashcard,
    deck::GenerationState,
    imagegen::BulkReport,
};

/// Results flowing back from worker tasks to the owner thread. The owner
/// applies deck mutations itself so the store stays single-writer.
#[derive(Debug)]
pub enum TaskResult {
    ImageServiceStatus(bool),

    DeckImported(Result<Vec<Flashcard>, String>),
    DeckExported(Result<String, String>),

    /// Outcome of a single card's generation request. `Ok` carries the
    /// image reference; `Err` the user-facing failure message.
    CardImage { id: String, result: Result<String, String> },
    /// One per-card transition streamed from a bulk sweep. The owner
    /// mirrors each onto its deck, so an in-flight per-card result is
    /// never clobbered by a sweep-end copy.
    GenerationUpdate { id: String, state: GenerationState },
    /// Final report of a sequential "generate all missing" sweep; the
    /// deck changes themselves arrived as `GenerationUpdate`s.
    BulkGeneration(Result<BulkReport, String>),

    LoadingMessage(String),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::ImageServiceStatus(_) => "image_service_status",
            TaskResult::DeckImported(_) => "deck_imported",
            TaskResult::DeckExported(_) => "deck_exported",
            TaskResult::CardImage { .. } => "card_image",
            TaskResult::GenerationUpdate { .. } => "generation_update",
            TaskResult::BulkGeneration(_) => "bulk_generation",
            TaskResult::LoadingMessage(_) => "loading_message",
        }
    }
}
