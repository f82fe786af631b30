use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use mcq_core::model::{
    AnswerSheet, ChosenAnswer, Question, Subject, SubmissionReport, UserProfile,
};

use crate::api::ApiClient;
use crate::error::SubmissionError;

/// Per-question slice of a submission, echoing the question data back so the
/// grader can score generated questions it has never stored.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedAnswer {
    pub question: String,
    pub question_type: String,
    pub user_answer: ChosenAnswer,
    pub correct_answer: String,
    pub question_data: QuestionData,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionData {
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<String>,
}

/// The full grading request for one finished test.
#[derive(Debug, Clone, Serialize)]
pub struct TestSubmission {
    pub subject: String,
    pub answers: Vec<SubmittedAnswer>,
    pub user_id: String,
    pub user_name: String,
    pub duration_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TestSubmission {
    /// Package a session for grading. Unanswered slots become the
    /// `"Not Answered"` sentinel, never null.
    #[must_use]
    pub fn build(
        subject: &Subject,
        questions: &[Question],
        sheet: &AnswerSheet,
        profile: &UserProfile,
        duration_seconds: i64,
        source: Option<String>,
    ) -> Self {
        let answers = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let chosen = ChosenAnswer::from_selection(sheet.get(index));
                // Mirror of the original fallback: a bank question always has
                // its answer text, a malformed one degrades to option A.
                let correct_answer = question
                    .correct_option_text()
                    .unwrap_or(&question.options()[0])
                    .to_string();
                SubmittedAnswer {
                    question: question.text().to_string(),
                    question_type: question.question_type().to_string(),
                    user_answer: chosen,
                    correct_answer,
                    question_data: QuestionData {
                        options: question.options().to_vec(),
                        correct_option: question
                            .correct_option()
                            .map(|letter| letter.as_str().to_string()),
                    },
                }
            })
            .collect();

        Self {
            subject: subject.name().to_string(),
            answers,
            user_id: profile.user_id().to_string(),
            user_name: profile.user_name().to_string(),
            duration_seconds,
            source,
        }
    }
}

/// Gateway to the grading endpoint.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Submit a finished test and return the graded report.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError` on transport or HTTP failure; callers keep
    /// the session intact and may retry.
    async fn submit(
        &self,
        submission: &TestSubmission,
    ) -> Result<SubmissionReport, SubmissionError>;
}

#[async_trait]
impl SubmissionGateway for ApiClient {
    async fn submit(
        &self,
        submission: &TestSubmission,
    ) -> Result<SubmissionReport, SubmissionError> {
        let url = self.endpoint("submit");
        info!(
            %url,
            subject = submission.subject,
            answers = submission.answers.len(),
            duration_seconds = submission.duration_seconds,
            "submitting test"
        );

        let response = self.http().post(&url).json(submission).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(Value::as_str)
                        .map(ToOwned::to_owned)
                })
                .unwrap_or_default();
            warn!(%url, %status, "submission failed");
            return Err(SubmissionError::HttpStatus { status, detail });
        }

        let report = response.json::<SubmissionReport>().await?;
        info!(score = report.score, "test graded");
        Ok(report)
    }
}
