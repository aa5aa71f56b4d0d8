use std::sync::Arc;

use storage::repository::Storage;

use crate::dashboard::DashboardService;
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;
use crate::study::StudyService;
use crate::word_source::{HttpWordSource, WordSource};
use crate::Clock;

/// Assembles the app-facing services over one storage backend and word source.
#[derive(Clone)]
pub struct AppServices {
    progress: ProgressStore,
    study: Arc<StudyService>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, storage: &Storage, words: Arc<dyn WordSource>) -> Self {
        let progress = ProgressStore::new(Arc::clone(&storage.kv));
        let study = Arc::new(StudyService::new(
            clock,
            Arc::clone(&words),
            progress.clone(),
        ));
        let dashboard = Arc::new(DashboardService::new(words, progress.clone()));
        Self {
            progress,
            study,
            dashboard,
        }
    }

    /// Build services backed by `SQLite` storage and the remote word list.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage cannot be opened or the word list
    /// URL is invalid.
    pub async fn new_sqlite(
        db_url: &str,
        api_base_url: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let words: Arc<dyn WordSource> = Arc::new(HttpWordSource::new(api_base_url)?);
        Ok(Self::new(clock, &storage, words))
    }

    #[must_use]
    pub fn progress(&self) -> ProgressStore {
        self.progress.clone()
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }
}
