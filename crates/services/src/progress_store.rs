use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use storage::repository::{KeyValueStore, StorageKey};
use vocab_core::model::{Answer, AppSettings, MasteryMap, MasteryScore, StudySession, WordId};

/// Mastery scores, the current session and settings over a key-value store.
///
/// Every operation degrades to a safe default instead of failing: missing or
/// corrupt records read as empty, and write failures are logged and dropped.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn get_mastery(&self) -> MasteryMap {
        self.read_json(StorageKey::StudyProgress)
            .await
            .unwrap_or_default()
    }

    pub async fn set_mastery(&self, mastery: &MasteryMap) {
        self.write_json(StorageKey::StudyProgress, mastery).await;
    }

    /// Apply an answer to one word's score, persist the map, and return the new score.
    pub async fn record_answer(&self, word_id: WordId, answer: Answer) -> MasteryScore {
        let mut mastery = self.get_mastery().await;
        let score = mastery.record(word_id, answer);
        self.set_mastery(&mastery).await;
        tracing::debug!(%word_id, score = score.value(), correct = answer.is_correct(), "recorded answer");
        score
    }

    pub async fn reset_mastery(&self) {
        self.set_mastery(&MasteryMap::new()).await;
        tracing::info!("mastery scores reset");
    }

    pub async fn get_session(&self) -> Option<StudySession> {
        self.read_json(StorageKey::CurrentSession).await
    }

    pub async fn set_session(&self, session: &StudySession) {
        self.write_json(StorageKey::CurrentSession, session).await;
    }

    pub async fn clear_session(&self) {
        if let Err(err) = self.kv.remove(StorageKey::CurrentSession).await {
            tracing::warn!(error = %err, key = %StorageKey::CurrentSession, "failed to clear record");
        }
    }

    pub async fn get_settings(&self) -> AppSettings {
        self.read_json(StorageKey::AppSettings)
            .await
            .unwrap_or_default()
    }

    pub async fn set_settings(&self, settings: &AppSettings) {
        self.write_json(StorageKey::AppSettings, settings).await;
    }

    async fn read_json<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = match self.kv.get(key).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, %key, "failed to read record");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(error = %err, %key, "ignoring corrupt record");
                None
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, %key, "failed to encode record");
                return;
            }
        };
        if let Err(err) = self.kv.set(key, &raw).await {
            tracing::warn!(error = %err, %key, "failed to save record");
        }
    }
}
