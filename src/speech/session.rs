use std::sync::mpsc::{
    channel,
    Receiver,
    Sender,
};

use super::comparator::compare_pronunciation;
use crate::core::WordResult;

pub const NOT_SUPPORTED_MESSAGE: &str =
    "Speech recognition is not supported on this platform.";

/// Observable lifecycle of a capture session. Terminal state is always
/// `Idle`; errors leave no persisted failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Recording,
}

/// Events a recognizer pushes during one single-shot session. `Ended`
/// always fires last, after either a result or an error.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Started,
    /// First transcript alternative of the first (and only) result.
    Result(String),
    /// Raw platform error code, e.g. "not-allowed" or "no-speech".
    Error(String),
    Ended,
}

/// Platform speech-recognition collaborator. Single-shot mode only: after
/// `start`, the recognizer pushes `Started`, then at most one `Result` or
/// `Error`, then `Ended`. `stop` requests an early end; the session still
/// closes through the normal `Ended` event.
pub trait SpeechRecognizer {
    fn is_supported(&self) -> bool;
    fn start(&mut self, events: Sender<SessionEvent>);
    fn stop(&mut self);
}

impl SpeechRecognizer for Box<dyn SpeechRecognizer> {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn start(&mut self, events: Sender<SessionEvent>) {
        (**self).start(events)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Capability-absent stub for platforms without a speech backend.
/// `PracticeController` surfaces the not-supported message instead of
/// ever starting a session.
#[derive(Debug, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _events: Sender<SessionEvent>) {}

    fn stop(&mut self) {}
}

/// Map a raw recognizer error code onto one of the user-facing categories.
pub fn describe_recognition_error(code: &str) -> String {
    match code {
        "not-allowed" | "permission-denied" => {
            "Microphone access was denied. Allow microphone access to practice pronunciation."
                .to_string()
        }
        "no-speech" => "No speech was detected. Please try again.".to_string(),
        other => format!("Speech recognition error: {other}"),
    }
}

/// Drives one card's pronunciation practice: an explicit idle/recording
/// state machine fed by recognizer events, holding the transcript,
/// comparison result, and error message for that card.
pub struct PracticeController<R: SpeechRecognizer> {
    recognizer: R,
    reference: String,
    phase: SessionPhase,
    session_active: bool,
    transcript: Option<String>,
    comparison: Option<Vec<WordResult>>,
    error_message: Option<String>,
    sender: Sender<SessionEvent>,
    receiver: Receiver<SessionEvent>,
}

impl<R: SpeechRecognizer> PracticeController<R> {
    pub fn new(reference: String, recognizer: R) -> Self {
        let (sender, receiver) = channel();
        PracticeController {
            recognizer,
            reference,
            phase: SessionPhase::Idle,
            session_active: false,
            transcript: None,
            comparison: None,
            error_message: None,
            sender,
            receiver,
        }
    }

    /// Whether the practice control should be enabled at all.
    pub fn can_practice(&self) -> bool {
        self.recognizer.is_supported()
    }

    /// Start a session, or request a stop if one is already active. At most
    /// one session is ever active; toggling during one never starts another.
    pub fn toggle(&mut self) {
        if !self.recognizer.is_supported() {
            self.error_message = Some(NOT_SUPPORTED_MESSAGE.to_string());
            return;
        }

        if self.session_active {
            self.recognizer.stop();
            return;
        }

        // A new attempt starts from a clean slate
        self.transcript = None;
        self.comparison = None;
        self.error_message = None;

        self.session_active = true;
        self.recognizer.start(self.sender.clone());
    }

    /// Drain pending recognizer events and advance the state machine.
    pub fn poll(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started => {
                self.phase = SessionPhase::Recording;
            }
            SessionEvent::Result(text) => {
                // Single-shot: only the first result of a session counts
                if self.transcript.is_none() {
                    self.comparison = Some(compare_pronunciation(&self.reference, &text));
                    self.transcript = Some(text);
                }
            }
            SessionEvent::Error(code) => {
                self.error_message = Some(describe_recognition_error(&code));
            }
            SessionEvent::Ended => {
                self.phase = SessionPhase::Idle;
                self.session_active = false;
            }
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        self.phase == SessionPhase::Recording
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn comparison(&self) -> Option<&[WordResult]> {
        self.comparison.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
