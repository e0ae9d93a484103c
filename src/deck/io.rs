use std::{
    fs,
    path::Path,
};

use reqwest::Client;
use serde_json::Value;

use crate::core::{
    http::fetch_text,
    Flashcard,
    HanasuError,
};

/// Serialize the full collection as a pretty JSON array. Exporting an
/// empty deck is an error so the user never downloads `[]` by accident.
pub fn export_json(cards: &[Flashcard]) -> Result<String, HanasuError> {
    if cards.is_empty() {
        return Err(HanasuError::EmptyDeck);
    }
    Ok(serde_json::to_string_pretty(cards)?)
}

pub fn export_to_file(cards: &[Flashcard], path: &Path) -> Result<(), HanasuError> {
    let json = export_json(cards)?;
    fs::write(path, json)?;
    println!("Deck exported to: {}", path.display());
    Ok(())
}

/// Parse and validate a deck document. The document must be a JSON array
/// and every element must carry defined string `id` and `text` fields;
/// all other fields are trusted as-is. Callers only replace their deck
/// when this returns Ok, so a bad document never clobbers existing state.
pub fn parse_deck(json: &str) -> Result<Vec<Flashcard>, HanasuError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| HanasuError::InvalidDeck(format!("not valid JSON: {e}")))?;

    let items = value
        .as_array()
        .ok_or_else(|| HanasuError::InvalidDeck("expected a JSON array of flashcards".into()))?;

    for (index, item) in items.iter().enumerate() {
        for field in ["id", "text"] {
            match item.get(field) {
                Some(Value::String(_)) => {}
                _ => {
                    return Err(HanasuError::InvalidDeck(format!(
                        "item {index} is missing required string field \"{field}\""
                    )));
                }
            }
        }
    }

    let cards: Vec<Flashcard> = serde_json::from_value(value)?;
    Ok(cards)
}

pub fn import_from_file(path: &Path) -> Result<Vec<Flashcard>, HanasuError> {
    let json = fs::read_to_string(path)?;
    parse_deck(&json)
}

pub async fn import_from_url(client: &Client, url: &str) -> Result<Vec<Flashcard>, HanasuError> {
    let json = fetch_text(client, url).await?;
    parse_deck(&json)
}
