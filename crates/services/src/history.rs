use serde::Deserialize;
use tracing::info;

use mcq_core::model::HistoryEntry;

use crate::api::ApiClient;
use crate::error::HistoryError;

/// Aggregate stats for the history screen header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryStats {
    pub attempts: usize,
    pub average_percent: f64,
    pub best_percent: f64,
}

impl HistoryStats {
    /// Compute header stats from the listed attempts.
    #[must_use]
    pub fn from_entries(entries: &[HistoryEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let percents: Vec<f64> = entries.iter().map(HistoryEntry::score_percent).collect();
        let total: f64 = percents.iter().sum();
        let best = percents.iter().copied().fold(0.0_f64, f64::max);
        #[allow(clippy::cast_precision_loss)]
        let average = total / entries.len() as f64;
        Some(Self {
            attempts: entries.len(),
            average_percent: average,
            best_percent: best,
        })
    }
}

/// Per-question row of a single past attempt, as stored by the grader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttemptQuestion {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Header info of a single past attempt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttemptInfo {
    pub subject: String,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub score: f64,
    pub timestamp: String,
}

/// Full detail of one past attempt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttemptDetail {
    pub test_info: AttemptInfo,
    pub questions: Vec<AttemptQuestion>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Vec<HistoryEntry>,
    #[serde(default)]
    error: Option<String>,
}

/// Read-only gateway to the attempt history the backend keeps per user.
#[derive(Clone)]
pub struct HistoryService {
    api: ApiClient,
}

impl HistoryService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List the user's past attempts, newest first (backend ordering).
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` on transport or backend failure.
    pub async fn list(&self, user_id: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let url = self.api.endpoint("history");
        let response = self
            .api
            .http()
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HistoryError::HttpStatus { status });
        }

        let body: HistoryResponse = response.json().await?;
        if let Some(message) = body.error {
            return Err(HistoryError::Backend { message });
        }
        info!(attempts = body.history.len(), "history loaded");
        Ok(body.history)
    }

    /// Fetch one attempt's per-question breakdown.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` on transport or backend failure.
    pub async fn attempt_detail(&self, test_id: i64) -> Result<AttemptDetail, HistoryError> {
        let url = self.api.endpoint(&format!("history/{test_id}"));
        let response = self.api.http().get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HistoryError::HttpStatus { status });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(correct: usize, total: usize) -> HistoryEntry {
        HistoryEntry {
            test_no: 1,
            id: 1,
            subject: "Maths".into(),
            date: "01-Aug-2026".into(),
            time: "09:00 AM".into(),
            score: "0%".into(),
            total_questions: total,
            correct_answers: correct,
        }
    }

    #[test]
    fn stats_average_and_best_come_from_counts() {
        let entries = vec![entry(5, 10), entry(9, 10), entry(7, 10)];
        let stats = HistoryStats::from_entries(&entries).unwrap();
        assert_eq!(stats.attempts, 3);
        assert!((stats.average_percent - 70.0).abs() < 1e-9);
        assert!((stats.best_percent - 90.0).abs() < 1e-9);
    }

    #[test]
    fn no_entries_means_no_stats() {
        assert!(HistoryStats::from_entries(&[]).is_none());
    }
}
