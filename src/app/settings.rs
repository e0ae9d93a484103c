use serde::{
    Deserialize,
    Serialize,
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Serialize, Deserialize)]
pub struct SettingsData {
    pub image_service_url: String,
    /// Audio clips the startup deck is derived from.
    pub audio_sources: Vec<String>,
}

impl Default for SettingsData {
    fn default() -> Self {
        SettingsData {
            image_service_url: "http://localhost:7861".to_string(),
            audio_sources: default_audio_sources(),
        }
    }
}

pub fn default_audio_sources() -> Vec<String> {
    [
        "audio/01_hello.mp3",
        "audio/02_good_morning.mp3",
        "audio/03_thank_you_very_much.mp3",
        "audio/04_see_you_later.mp3",
        "audio/05_how_are_you.mp3",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
