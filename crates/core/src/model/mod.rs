mod app_settings;
mod ids;
mod mastery;
mod session;
mod word;

pub use ids::{ParseIdError, WordId};

pub use app_settings::{AppSettings, StudyMode};
pub use mastery::{Answer, MasteryMap, MasteryScore, MasteryScoreError, MasteryTier};
pub use session::{StudyPhase, StudySession, StudySessionError};
pub use word::{Word, WordError};
