use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

use super::filename_parser::{
    card_id,
    card_text,
};

/// One flashcard in the deck. `id` is stable and derived from the source
/// audio URL; `text` is the display label derived from the filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub image_url: Option<String>, // None until a generation completes
    #[serde(default)]
    pub is_loading: bool,
    // Fields from imported decks we don't model are kept as-is so a
    // round-trip through import/export never drops them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Flashcard {
    pub fn from_audio_url(url: &str) -> Self {
        Flashcard {
            id: card_id(url),
            text: card_text(url),
            audio_url: url.to_string(),
            image_url: None,
            is_loading: false,
            extra: Map::new(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// Per-word outcome of a pronunciation attempt, aligned to the reference
/// text's word order. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordResult {
    pub word: String,
    pub is_correct: bool,
}
