use thiserror::Error;

#[derive(Error, Debug)]
pub enum HanasuError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    Http { status: String, url: String },

    #[error("Deck is empty, nothing to export")]
    EmptyDeck,

    #[error("Invalid deck data: {0}")]
    InvalidDeck(String),

    #[error("No flashcard with id: {0}")]
    CardNotFound(String),

    #[error("Image generation failed for \"{card}\": {reason}")]
    ImageGeneration { card: String, reason: String },

    #[error("HanasuError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for HanasuError {
    fn from(error: std::io::Error) -> Self {
        HanasuError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for HanasuError {
    fn from(error: reqwest::Error) -> Self {
        HanasuError::Reqwest(Box::new(error))
    }
}
