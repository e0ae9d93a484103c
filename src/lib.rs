pub mod app;
pub mod core;
pub mod deck;
pub mod imagegen;
pub mod persistence;
pub mod speech;

pub use app::{
    HanasuApp,
    SettingsData,
};
pub use crate::core::{
    Flashcard,
    HanasuError,
    WordResult,
};
pub use deck::DeckStore;
pub use speech::compare_pronunciation;
