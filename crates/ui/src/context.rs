use std::sync::Arc;

use services::{AppServices, DashboardService, ProgressStore, StudyService};

pub trait UiApp: Send + Sync {
    fn study(&self) -> Arc<StudyService>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn progress(&self) -> ProgressStore;
}

impl UiApp for AppServices {
    fn study(&self) -> Arc<StudyService> {
        AppServices::study(self)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        AppServices::dashboard(self)
    }

    fn progress(&self) -> ProgressStore {
        AppServices::progress(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    study: Arc<StudyService>,
    dashboard: Arc<DashboardService>,
    progress: ProgressStore,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            study: app.study(),
            dashboard: app.dashboard(),
            progress: app.progress(),
        }
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn progress(&self) -> ProgressStore {
        self.progress.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
///
/// The binary calls this once and hands the result to the root component.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
