use serde::{Deserialize, Serialize};

/// One past attempt as the history endpoint reports it.
///
/// Dates, times, and the score string arrive pre-formatted; the client
/// renders them as-is and only aggregates over the numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub test_no: usize,
    pub id: i64,
    pub subject: String,
    pub date: String,
    pub time: String,
    pub score: String,
    pub total_questions: usize,
    pub correct_answers: usize,
}

impl HistoryEntry {
    /// Score as a fraction of answered-correctly, for aggregate stats.
    #[must_use]
    pub fn score_percent(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let percent = self.correct_answers as f64 / self.total_questions as f64 * 100.0;
        percent
    }
}
