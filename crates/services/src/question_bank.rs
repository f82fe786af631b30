use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, info, warn};

use mcq_core::model::{OptionLetter, Question, QuestionSource, Subject};

use crate::api::ApiClient;
use crate::error::QuestionBankError;

/// Message fragment the generation backend uses for daily-limit failures.
const QUOTA_MARKER: &str = "Quota Exceeded";

/// Gateway to the question endpoints.
///
/// Both sources come back as the canonical [`Question`] shape; callers never
/// see the wire differences between the bank and the generation service.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Fetch the questions for one test.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` for transport failures, backend-reported
    /// errors, quota exhaustion, and empty question lists.
    async fn fetch(
        &self,
        subject: &Subject,
        source: QuestionSource,
    ) -> Result<Vec<Question>, QuestionBankError>;

    /// List the subjects the bank can serve, for the home screen cards.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` on transport failure.
    async fn list_subjects(&self) -> Result<Vec<Subject>, QuestionBankError>;
}

/// One question as either endpoint serializes it.
///
/// The bank sends `options` plus `correct_answer`/`correct_answer_letter`;
/// the generation endpoint sends `options`, `option_a..option_d`, and
/// `correct_option`. Everything funnels through [`RawQuestion::normalize`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub option_a: Option<String>,
    #[serde(default)]
    pub option_b: Option<String>,
    #[serde(default)]
    pub option_c: Option<String>,
    #[serde(default)]
    pub option_d: Option<String>,
    #[serde(default)]
    pub correct_option: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub correct_answer_letter: Option<String>,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default, rename = "type")]
    pub type_tag: Option<String>,
}

impl RawQuestion {
    /// Collapse the wire shape into the canonical question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Malformed` when the question text is
    /// blank after normalization.
    pub fn normalize(self) -> Result<Question, QuestionBankError> {
        let options = self.collect_options();
        let correct = self.resolve_correct_letter(&options);
        let question_type = self
            .question_type
            .or(self.type_tag)
            .unwrap_or_else(|| Question::STANDARD_TYPE.to_string());

        Ok(Question::new(self.question, options, correct, question_type)?)
    }

    /// Prefer the options array; fall back to the lettered fields with the
    /// original's placeholder texts so a partial record still renders.
    fn collect_options(&self) -> [String; 4] {
        if let Some(options) = &self.options
            && options.len() == 4
        {
            return [
                options[0].clone(),
                options[1].clone(),
                options[2].clone(),
                options[3].clone(),
            ];
        }

        let fallback = |field: &Option<String>, placeholder: &str| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map_or_else(|| placeholder.to_string(), ToOwned::to_owned)
        };
        [
            fallback(&self.option_a, "Option A"),
            fallback(&self.option_b, "Option B"),
            fallback(&self.option_c, "Option C"),
            fallback(&self.option_d, "Option D"),
        ]
    }

    /// The endpoints disagree on how they state the answer key, so try the
    /// letter fields first and then match the answer text to an option.
    fn resolve_correct_letter(&self, options: &[String; 4]) -> Option<OptionLetter> {
        if let Some(letter) = self.correct_option.as_deref().and_then(OptionLetter::parse) {
            return Some(letter);
        }
        if let Some(letter) = self
            .correct_answer_letter
            .as_deref()
            .and_then(OptionLetter::parse)
        {
            return Some(letter);
        }

        let answer = self.correct_answer.as_deref().map(str::trim)?;
        if let Some(letter) = OptionLetter::parse(answer) {
            return Some(letter);
        }
        OptionLetter::ALL
            .into_iter()
            .find(|letter| options[letter.index()].trim().eq_ignore_ascii_case(answer))
    }
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    questions: Option<Vec<RawQuestion>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubjectsResponse {
    #[serde(default)]
    subjects: Vec<String>,
}

/// Classify a backend-supplied message, routing quota exhaustion to its own
/// variant so the UI can explain the fallback.
fn backend_error(message: String) -> QuestionBankError {
    if message.contains(QUOTA_MARKER) {
        QuestionBankError::QuotaExceeded { message }
    } else {
        QuestionBankError::Backend { message }
    }
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"))
        || head.starts_with("<html")
}

fn snippet(body: &str) -> String {
    const LIMIT: usize = 200;
    let mut end = body.len().min(LIMIT);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[async_trait]
impl QuestionBank for ApiClient {
    async fn fetch(
        &self,
        subject: &Subject,
        source: QuestionSource,
    ) -> Result<Vec<Question>, QuestionBankError> {
        let path = match source {
            QuestionSource::Database => format!("questions/{subject}"),
            QuestionSource::Generated => format!("questions/ai-live/{subject}"),
        };
        let url = self.endpoint(&path);
        info!(%url, source = source.storage_key(), "fetching questions");

        let response = self.http().get(&url).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .unwrap_or_else(|| body.clone());
            warn!(%url, %status, "question request failed");
            if looks_like_html(&detail) || looks_like_html(&body) {
                return Err(QuestionBankError::BackendUnreachable { url });
            }
            if detail.contains(QUOTA_MARKER) {
                return Err(QuestionBankError::QuotaExceeded { message: detail });
            }
            return Err(QuestionBankError::HttpStatus { status, detail });
        }

        if !content_type.contains("application/json") {
            warn!(%url, %content_type, "expected JSON from question endpoint");
            if looks_like_html(&body) {
                return Err(QuestionBankError::BackendUnreachable { url });
            }
            return Err(QuestionBankError::NotJson {
                snippet: snippet(&body),
            });
        }

        let parsed: QuestionsResponse = serde_json::from_str(&body).map_err(|_| {
            QuestionBankError::NotJson {
                snippet: snippet(&body),
            }
        })?;

        if let Some(message) = parsed.error {
            return Err(backend_error(message));
        }

        let raw = parsed.questions.unwrap_or_default();
        if raw.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        let questions = raw
            .into_iter()
            .map(RawQuestion::normalize)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = questions.len(), "questions normalized");
        Ok(questions)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, QuestionBankError> {
        let url = self.endpoint("subjects");
        let response = self.http().get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuestionBankError::HttpStatus {
                status,
                detail: String::new(),
            });
        }

        let body: SubjectsResponse = response.json().await?;
        Ok(body
            .subjects
            .into_iter()
            .filter_map(|name| Subject::new(name).ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawQuestion {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bank_shape_normalizes_with_answer_text_match() {
        let question = raw(
            r#"{
                "question": "Which gas do plants absorb?",
                "options": ["Oxygen", "Carbon dioxide", "Nitrogen", "Helium"],
                "correct_answer": "carbon dioxide",
                "question_type": "Standard"
            }"#,
        )
        .normalize()
        .unwrap();

        assert_eq!(question.correct_option(), Some(OptionLetter::B));
        assert_eq!(question.question_type(), "Standard");
    }

    #[test]
    fn generated_shape_normalizes_from_lettered_fields() {
        let question = raw(
            r#"{
                "question": "2 + 2 = ?",
                "option_a": "3",
                "option_b": "4",
                "option_c": "5",
                "option_d": "6",
                "correct_option": "b",
                "type": "Numerical"
            }"#,
        )
        .normalize()
        .unwrap();

        assert_eq!(question.options()[1], "4");
        assert_eq!(question.correct_option(), Some(OptionLetter::B));
        assert_eq!(question.question_type(), "Numerical");
    }

    #[test]
    fn missing_options_fall_back_to_placeholders() {
        let question = raw(r#"{ "question": "Orphan question?", "correct_answer": "A" }"#)
            .normalize()
            .unwrap();
        assert_eq!(question.options()[3], "Option D");
        assert_eq!(question.correct_option(), Some(OptionLetter::A));
    }

    #[test]
    fn blank_question_text_is_rejected() {
        let err = raw(r#"{ "question": "  " }"#).normalize().unwrap_err();
        assert!(matches!(err, QuestionBankError::Malformed(_)));
    }

    #[test]
    fn quota_messages_get_their_own_variant() {
        let err = backend_error("AI Daily Quota Exceeded. Try again tomorrow.".into());
        assert!(err.is_quota());
        let err = backend_error("something else broke".into());
        assert!(!err.is_quota());
    }

    #[test]
    fn html_bodies_are_detected() {
        assert!(looks_like_html("<!DOCTYPE html><html>..."));
        assert!(looks_like_html("<!doctype html>"));
        assert!(looks_like_html("<html lang=\"en\">"));
        assert!(!looks_like_html("{\"questions\": []}"));
    }
}
