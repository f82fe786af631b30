use mcq_core::model::HistoryEntry;
use services::HistoryStats;

/// One row of the attempts table; the backend pre-formats the strings.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRowVm {
    pub id: i64,
    pub test_no: usize,
    pub date: String,
    pub time: String,
    pub subject: String,
    pub score: String,
}

/// Header stats over the listed attempts.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryStatsVm {
    pub attempts: usize,
    pub average_text: String,
    pub best_text: String,
}

#[must_use]
pub fn map_history_rows(entries: &[HistoryEntry]) -> Vec<HistoryRowVm> {
    entries
        .iter()
        .map(|entry| HistoryRowVm {
            id: entry.id,
            test_no: entry.test_no,
            date: entry.date.clone(),
            time: entry.time.clone(),
            subject: entry.subject.clone(),
            score: entry.score.clone(),
        })
        .collect()
}

#[must_use]
pub fn map_history_stats(entries: &[HistoryEntry]) -> Option<HistoryStatsVm> {
    HistoryStats::from_entries(entries).map(|stats| HistoryStatsVm {
        attempts: stats.attempts,
        average_text: format!("{:.1}%", stats.average_percent),
        best_text: format!("{:.1}%", stats.best_percent),
    })
}
