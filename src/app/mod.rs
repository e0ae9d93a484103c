pub mod settings;

pub use settings::SettingsData;

use std::path::PathBuf;

use crate::{
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        HanasuError,
    },
    deck::{
        DeckStore,
        GenerationState,
    },
    speech::{
        session::SpeechRecognizer,
        PracticeController,
    },
};

struct ActivePractice {
    card_id: String,
    controller: PracticeController<Box<dyn SpeechRecognizer>>,
}

/// Owner of all application state. Background work runs through the
/// `TaskManager`; every result is applied here, on the owner thread, so
/// the deck has exactly one writer. The original UI thread played this
/// role; a frontend would call the action methods and render the fields.
pub struct HanasuApp {
    pub deck: DeckStore,
    pub settings_data: SettingsData,

    pub image_service_online: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,

    practice: Option<ActivePractice>,

    bulk_in_progress: bool,
    import_in_progress: bool,
    pending_tasks: usize,
    task_manager: TaskManager,
}

impl HanasuApp {
    pub fn new(settings_data: SettingsData) -> Self {
        let deck = DeckStore::seed_from_audio_urls(&settings_data.audio_sources);
        let task_manager = TaskManager::new();

        let mut app = HanasuApp {
            deck,
            settings_data,
            image_service_online: false,
            status_message: None,
            error_message: None,
            practice: None,
            bulk_in_progress: false,
            import_in_progress: false,
            pending_tasks: 0,
            task_manager,
        };

        app.task_manager.check_image_service(app.settings_data.image_service_url.clone());
        app.pending_tasks += 1;
        app
    }

    /// True while any background task has not reported back yet.
    pub fn is_busy(&self) -> bool {
        self.pending_tasks > 0
    }

    // ----- actions -------------------------------------------------------

    /// Shared guard for actions that touch the whole deck. Surfaces a
    /// status line instead of dropping the request silently.
    fn busy_with_deck_task(&mut self) -> bool {
        if self.bulk_in_progress || self.import_in_progress {
            self.status_message =
                Some("A deck task is already running; action ignored.".to_string());
            return true;
        }
        false
    }

    /// Dispatch a generation request for one card. The caller-side
    /// invariant lives here: nothing is dispatched for a card that is
    /// loading or already has an image, and nothing while a bulk sweep or
    /// import could race the deck. Returns whether a request went out.
    pub fn generate_card(&mut self, id: &str) -> bool {
        if self.busy_with_deck_task() {
            return false;
        }

        let Some(card) = self.deck.get(id) else {
            self.error_message = Some(HanasuError::CardNotFound(id.to_string()).to_string());
            return false;
        };
        if card.is_loading || card.has_image() {
            return false;
        }

        let text = card.text.clone();
        self.deck.set_generation_state(id, GenerationState::Started);
        self.task_manager.generate_card_image(
            id.to_string(),
            text,
            self.settings_data.image_service_url.clone(),
        );
        self.pending_tasks += 1;
        true
    }

    /// Kick off a sequential sweep over every card lacking an image.
    pub fn generate_all_missing(&mut self) -> bool {
        if self.busy_with_deck_task() {
            return false;
        }

        self.bulk_in_progress = true;
        self.task_manager.generate_missing_images(
            self.deck.cards().to_vec(),
            self.settings_data.image_service_url.clone(),
        );
        self.pending_tasks += 1;
        true
    }

    pub fn import_from_file(&mut self, path: PathBuf) -> bool {
        if self.busy_with_deck_task() {
            return false;
        }
        self.import_in_progress = true;
        self.task_manager.import_deck_from_file(path);
        self.pending_tasks += 1;
        true
    }

    pub fn import_from_url(&mut self, url: String) -> bool {
        if self.busy_with_deck_task() {
            return false;
        }
        self.import_in_progress = true;
        self.task_manager.import_deck_from_url(url);
        self.pending_tasks += 1;
        true
    }

    pub fn export_to(&mut self, path: PathBuf) -> bool {
        if self.deck.is_empty() {
            self.error_message = Some(HanasuError::EmptyDeck.to_string());
            return false;
        }
        self.task_manager.export_deck(self.deck.cards().to_vec(), path);
        self.pending_tasks += 1;
        true
    }

    /// Start or stop pronunciation practice for a card. At most one
    /// session is active across the app; toggling the same card routes to
    /// its controller, and other cards are ignored while one is recording.
    pub fn practice_card(&mut self, id: &str, recognizer: Box<dyn SpeechRecognizer>) {
        if let Some(active) = &mut self.practice {
            if active.card_id == id {
                active.controller.toggle();
                return;
            }
            if active.controller.is_recording() {
                return;
            }
        }

        let Some(card) = self.deck.get(id) else {
            self.error_message = Some(HanasuError::CardNotFound(id.to_string()).to_string());
            return;
        };

        let mut controller = PracticeController::new(card.text.clone(), recognizer);
        controller.toggle();
        self.practice = Some(ActivePractice { card_id: id.to_string(), controller });
    }

    pub fn practice(&self) -> Option<(&str, &PracticeController<Box<dyn SpeechRecognizer>>)> {
        self.practice.as_ref().map(|p| (p.card_id.as_str(), &p.controller))
    }

    // ----- event loop ----------------------------------------------------

    /// Drain and apply background results; called once per loop iteration
    /// by whatever is driving the app.
    pub fn poll_tasks(&mut self) {
        for result in self.task_manager.poll_results() {
            self.apply_result(result);
        }

        if let Some(active) = &mut self.practice {
            active.controller.poll();
        }
    }

    fn apply_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::ImageServiceStatus(online) => {
                self.pending_tasks = self.pending_tasks.saturating_sub(1);
                self.image_service_online = online;
                if !online {
                    println!("Image service is offline; generation requests will fail.");
                }
            }

            TaskResult::DeckImported(result) => {
                self.pending_tasks = self.pending_tasks.saturating_sub(1);
                self.import_in_progress = false;
                match result {
                    Ok(cards) => {
                        self.status_message = Some(format!("Imported {} flashcards", cards.len()));
                        self.deck.replace_all(cards);
                    }
                    // Prior deck stays untouched on any import failure
                    Err(e) => self.error_message = Some(e),
                }
            }

            TaskResult::DeckExported(result) => {
                self.pending_tasks = self.pending_tasks.saturating_sub(1);
                match result {
                    Ok(path) => self.status_message = Some(format!("Deck exported to {path}")),
                    Err(e) => self.error_message = Some(e),
                }
            }

            TaskResult::CardImage { id, result } => {
                self.pending_tasks = self.pending_tasks.saturating_sub(1);
                match result {
                    Ok(image_url) => {
                        self.deck.set_generation_state(&id, GenerationState::Completed(image_url));
                    }
                    Err(reason) => {
                        self.deck.set_generation_state(&id, GenerationState::Failed);
                        let card = self.deck.get(&id).map(|c| c.text.clone()).unwrap_or(id);
                        self.error_message =
                            Some(HanasuError::ImageGeneration { card, reason }.to_string());
                    }
                }
            }

            // Per-card transition from a bulk sweep; mirrored onto the
            // owner's deck as it happens. A result that landed here for
            // the same card in the meantime is never overwritten with a
            // stale copy, because the sweep skips cards that already
            // gained an image.
            TaskResult::GenerationUpdate { id, state } => {
                self.deck.set_generation_state(&id, state);
            }

            TaskResult::BulkGeneration(result) => {
                self.pending_tasks = self.pending_tasks.saturating_sub(1);
                self.bulk_in_progress = false;
                match result {
                    Ok(report) => {
                        self.status_message = Some(format!(
                            "Generated {} of {} images",
                            report.generated, report.requested
                        ));
                        if !report.failures.is_empty() {
                            self.error_message = Some(report.failures.join("\n"));
                        }
                    }
                    Err(e) => self.error_message = Some(e),
                }
            }

            TaskResult::LoadingMessage(message) => {
                self.status_message = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagegen::BulkReport;

    fn test_app() -> HanasuApp {
        let settings = SettingsData {
            image_service_url: "http://localhost:7861".to_string(),
            audio_sources: vec![
                "audio/hello_world.mp3".to_string(),
                "audio/cat.mp3".to_string(),
            ],
        };
        let mut app = HanasuApp::new(settings);
        // The constructor's service probe is not part of these tests
        app.apply_result(TaskResult::ImageServiceStatus(true));
        app
    }

    #[test]
    fn test_generate_card_guards() {
        let mut app = test_app();

        app.deck
            .set_generation_state("cat", GenerationState::Completed("img/cat.png".to_string()));
        assert!(!app.generate_card("cat"), "card with an image must not be redispatched");

        assert!(app.generate_card("hello-world"));
        assert!(app.deck.get("hello-world").unwrap().is_loading);
        assert!(!app.generate_card("hello-world"), "loading card must not be redispatched");

        assert!(!app.generate_card("missing"));
        assert!(app.error_message.take().unwrap().contains("missing"));
    }

    #[test]
    fn test_card_image_results_applied_to_store() {
        let mut app = test_app();

        app.deck.set_generation_state("cat", GenerationState::Started);
        app.apply_result(TaskResult::CardImage {
            id: "cat".to_string(),
            result: Ok("img/cat.png".to_string()),
        });
        let card = app.deck.get("cat").unwrap();
        assert_eq!(card.image_url.as_deref(), Some("img/cat.png"));
        assert!(!card.is_loading);

        app.deck.set_generation_state("hello-world", GenerationState::Started);
        app.apply_result(TaskResult::CardImage {
            id: "hello-world".to_string(),
            result: Err("quota exceeded".to_string()),
        });
        let card = app.deck.get("hello-world").unwrap();
        assert!(!card.is_loading);
        assert!(card.image_url.is_none());
        let message = app.error_message.take().unwrap();
        assert!(message.contains("Hello World"));
        assert!(message.contains("quota exceeded"));
    }

    #[test]
    fn test_failed_import_keeps_deck() {
        let mut app = test_app();
        let before = app.deck.snapshot();

        app.apply_result(TaskResult::DeckImported(Err("item 0 is missing required string field \"text\"".to_string())));

        assert_eq!(*before, *app.deck.snapshot());
        assert!(app.error_message.take().unwrap().contains("text"));
    }

    #[test]
    fn test_successful_import_replaces_deck() {
        let mut app = test_app();
        let cards = vec![crate::core::Flashcard::from_audio_url("audio/dog.mp3")];

        app.apply_result(TaskResult::DeckImported(Ok(cards)));

        assert_eq!(app.deck.len(), 1);
        assert_eq!(app.deck.cards()[0].id, "dog");
    }

    #[test]
    fn test_export_empty_deck_is_rejected_up_front() {
        let mut app = test_app();
        app.deck.replace_all(Vec::new());

        assert!(!app.export_to(PathBuf::from("deck.json")));
        assert!(app.error_message.take().unwrap().contains("empty"));
    }

    #[test]
    fn test_bulk_updates_applied_as_they_stream() {
        let mut app = test_app();
        assert!(app.generate_all_missing());

        for id in ["hello-world", "cat"] {
            app.apply_result(TaskResult::GenerationUpdate {
                id: id.to_string(),
                state: GenerationState::Started,
            });
            assert!(app.deck.get(id).unwrap().is_loading);
            app.apply_result(TaskResult::GenerationUpdate {
                id: id.to_string(),
                state: GenerationState::Completed(format!("img/{id}.png")),
            });
        }
        let report = BulkReport { requested: 2, generated: 2, failures: Vec::new() };
        app.apply_result(TaskResult::BulkGeneration(Ok(report)));

        assert!(app.deck.cards().iter().all(|c| c.has_image() && !c.is_loading));
        assert!(app.status_message.take().unwrap().contains("2 of 2"));
        assert!(app.error_message.is_none());
        assert!(!app.is_busy());
    }

    // A single-card result that lands while a sweep is running must stick:
    // the sweep end only delivers a report, never a deck copy that could
    // roll the card back to loading.
    #[test]
    fn test_per_card_result_survives_bulk_sweep() {
        let mut app = test_app();

        assert!(app.generate_card("hello-world"));
        assert!(app.generate_all_missing());

        // Sweep reaches "cat" first, then the single-card result lands,
        // then the sweep wraps up.
        app.apply_result(TaskResult::GenerationUpdate {
            id: "cat".to_string(),
            state: GenerationState::Started,
        });
        app.apply_result(TaskResult::CardImage {
            id: "hello-world".to_string(),
            result: Ok("img/hello.png".to_string()),
        });
        app.apply_result(TaskResult::GenerationUpdate {
            id: "cat".to_string(),
            state: GenerationState::Completed("img/cat.png".to_string()),
        });
        let report = BulkReport { requested: 1, generated: 1, failures: Vec::new() };
        app.apply_result(TaskResult::BulkGeneration(Ok(report)));

        let card = app.deck.get("hello-world").unwrap();
        assert_eq!(card.image_url.as_deref(), Some("img/hello.png"));
        assert!(!card.is_loading);
        assert!(app.deck.cards().iter().all(|c| !c.is_loading));
    }

    #[test]
    fn test_blocked_actions_surface_a_message() {
        let mut app = test_app();
        assert!(app.generate_all_missing());

        assert!(!app.generate_card("cat"));
        assert!(app.status_message.take().unwrap().contains("already running"));

        assert!(!app.import_from_file(PathBuf::from("deck.json")));
        assert!(app.status_message.take().unwrap().contains("already running"));
    }
}
