use services::{DashboardStats, WordProgress};
use vocab_core::model::{MasteryTier, StudySession};

use super::time_fmt::{format_clock, format_datetime, format_percent};

/// Words listed on the dashboard before the "and N more" line.
pub const PREVIEW_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardVm {
    pub total_words: usize,
    pub mastered_words: usize,
    pub remaining_words: usize,
    pub progress_percent: f64,
    pub progress_label: String,
    pub last_session: Option<LastSessionVm>,
    pub words: Vec<WordRowVm>,
    pub more_label: Option<String>,
}

impl DashboardVm {
    #[must_use]
    pub fn has_words(&self) -> bool {
        self.total_words > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastSessionVm {
    pub correct: u32,
    pub wrong: u32,
    pub time_label: String,
    pub completed_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordRowVm {
    pub id: u64,
    pub source: String,
    pub target: String,
    pub score_label: String,
    pub tier_class: &'static str,
}

#[must_use]
pub fn tier_class(tier: MasteryTier) -> &'static str {
    match tier {
        MasteryTier::Mastered => "tier tier--mastered",
        MasteryTier::Learning => "tier tier--learning",
        MasteryTier::Weak => "tier tier--weak",
    }
}

#[must_use]
pub fn map_dashboard(stats: &DashboardStats) -> DashboardVm {
    let progress_percent = stats.overall_progress();
    let hidden = stats.hidden_count(PREVIEW_LIMIT);
    DashboardVm {
        total_words: stats.total_words(),
        mastered_words: stats.mastered_words(),
        remaining_words: stats.remaining_words(),
        progress_percent,
        progress_label: format_percent(progress_percent),
        last_session: stats.last_session().map(map_last_session),
        words: stats
            .preview(PREVIEW_LIMIT)
            .iter()
            .map(map_word_row)
            .collect(),
        more_label: (hidden > 0).then(|| format!("and {hidden} more words...")),
    }
}

fn map_last_session(session: &StudySession) -> LastSessionVm {
    LastSessionVm {
        correct: session.correct_answers(),
        wrong: session.wrong_answers(),
        time_label: format_clock(session.session_time_seconds()),
        completed_label: session.completed_at().map(format_datetime),
    }
}

fn map_word_row(item: &WordProgress) -> WordRowVm {
    WordRowVm {
        id: item.word.id.value(),
        source: item.word.source_text.clone(),
        target: item.word.target_text.clone(),
        score_label: item.score.to_string(),
        tier_class: tier_class(item.score.tier()),
    }
}
