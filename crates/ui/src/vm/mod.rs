mod dashboard_vm;
mod study_vm;
mod time_fmt;

pub use dashboard_vm::{
    DashboardVm, LastSessionVm, PREVIEW_LIMIT, WordRowVm, map_dashboard, tier_class,
};
pub use study_vm::{
    FlashcardFace, StudyIntent, StudyOutcome, StudyVm, completion_message, start_study,
};
pub use time_fmt::{format_clock, format_datetime, format_percent};
