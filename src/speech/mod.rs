pub mod comparator;
pub mod session;


pub use comparator::compare_pronunciation;
pub use session::{
    PracticeController,
    SessionEvent,
    SessionPhase,
    SpeechRecognizer,
    UnsupportedRecognizer,
};
