use serde::{Deserialize, Serialize};

/// How cards are answered. Only `Flashcard` has a dedicated view today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    #[default]
    Flashcard,
    Quiz,
    Typing,
}

/// Learner preferences stored under `app_settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    #[serde(alias = "showTurkishFirst")]
    pub show_target_first: bool,
    pub auto_flip: bool,
    pub study_mode: StudyMode,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            show_target_first: false,
            auto_flip: true,
            study_mode: StudyMode::Flashcard,
        }
    }
}
