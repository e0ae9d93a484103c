use std::{
    path::PathBuf,
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    core::{
        http::http_client,
        Flashcard,
    },
    deck::{
        io,
        DeckStore,
    },
    imagegen::{
        build_prompt,
        generate_missing,
        BulkUpdate,
        HttpImageService,
        ImageGenerator,
    },
};

/// Runs background work on worker threads over a shared tokio runtime and
/// feeds results back through an mpsc channel. The owner thread drains
/// `poll_results` and applies them, which keeps every deck mutation on
/// one thread.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn check_image_service(&self, endpoint: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let online = runtime.block_on(async {
                match HttpImageService::new(endpoint) {
                    Ok(service) => service.is_online().await,
                    Err(_) => false,
                }
            });

            let _ = sender.send(TaskResult::ImageServiceStatus(online));
        });
    }

    pub fn import_deck_from_file(&self, path: PathBuf) {
        let (sender, _) = self.task_context();

        thread::spawn(move || {
            let result = io::import_from_file(&path).map_err(|e| e.to_string());
            let _ = sender.send(TaskResult::DeckImported(result));
        });
    }

    pub fn import_deck_from_url(&self, url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let client = http_client().map_err(|e| e.to_string())?;
                io::import_from_url(&client, &url).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::DeckImported(result));
        });
    }

    pub fn export_deck(&self, cards: Vec<Flashcard>, path: PathBuf) {
        let (sender, _) = self.task_context();

        thread::spawn(move || {
            let result = io::export_to_file(&cards, &path)
                .map(|_| path.display().to_string())
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::DeckExported(result));
        });
    }

    /// One card's generation request. The caller has already flagged the
    /// card as loading; the store transition is applied by the owner when
    /// the result comes back.
    pub fn generate_card_image(&self, id: String, text: String, endpoint: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let service = HttpImageService::new(endpoint).map_err(|e| e.to_string())?;
                service.generate(&build_prompt(&text)).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::CardImage { id, result });
        });
    }

    /// Sequential sweep over a deck snapshot: one collaborator call at a
    /// time. Per-card transitions and progress are streamed back as they
    /// happen and the owner applies them to its own deck, so the sweep
    /// never has to hand back a whole-deck copy that could overwrite a
    /// result that landed while it ran.
    pub fn generate_missing_images(&self, cards: Vec<Flashcard>, endpoint: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let service = HttpImageService::new(endpoint).map_err(|e| e.to_string())?;

                let sender_updates = sender.clone();
                let mut store = DeckStore::from_cards(cards);
                let report = generate_missing(&mut store, &service, |update| {
                    let result = match update {
                        BulkUpdate::Message(message) => TaskResult::LoadingMessage(message),
                        BulkUpdate::State { id, state } => {
                            TaskResult::GenerationUpdate { id, state }
                        }
                    };
                    let _ = sender_updates.send(result);
                })
                .await;

                Ok::<_, String>(report)
            });

            let _ = sender.send(TaskResult::BulkGeneration(result));
        });
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
