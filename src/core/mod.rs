pub mod errors;
pub mod filename_parser;
pub mod http;
pub mod models;
pub mod tasks;

pub use errors::HanasuError;
pub use models::{
    Flashcard,
    WordResult,
};
