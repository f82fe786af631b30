use std::fmt;

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::model::OptionLetter;

/// What the user picked for one question, as grading reports it back.
///
/// Serializes to the bare letter or the literal `"Not Answered"`; the wire
/// never carries a null answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChosenAnswer {
    Letter(OptionLetter),
    NotAnswered,
}

impl ChosenAnswer {
    pub const NOT_ANSWERED: &'static str = "Not Answered";

    #[must_use]
    pub fn from_selection(selection: Option<OptionLetter>) -> Self {
        selection.map_or(Self::NotAnswered, Self::Letter)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Letter(letter) => letter.as_str(),
            Self::NotAnswered => Self::NOT_ANSWERED,
        }
    }

    #[must_use]
    pub fn is_answered(self) -> bool {
        matches!(self, Self::Letter(_))
    }
}

impl fmt::Display for ChosenAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChosenAnswer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChosenAnswer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == Self::NOT_ANSWERED {
            return Ok(Self::NotAnswered);
        }
        OptionLetter::parse(&raw)
            .map(Self::Letter)
            .ok_or_else(|| D::Error::custom(format!("unrecognized answer letter: {raw}")))
    }
}

/// Graded outcome for a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerReview {
    pub question: String,
    pub user_answer_letter: ChosenAnswer,
    pub user_answer_text: String,
    /// Letter as the grader resolved it; `"?"` when it could not map the
    /// correct text back onto an option.
    pub correct_answer_letter: String,
    pub correct_answer_text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub all_options: Vec<String>,
}

/// The grading service's response to one submission. Owned by the session
/// for the results screen and discarded when the user navigates home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReport {
    #[serde(default)]
    pub test_id: Option<i64>,
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Percentage in `[0, 100]`, computed server-side.
    pub score: f64,
    pub results: Vec<AnswerReview>,
    #[serde(default)]
    pub source: Option<String>,
}

impl SubmissionReport {
    /// Score formatted the way every screen shows it, e.g. `"70.0%"`.
    #[must_use]
    pub fn score_display(&self) -> String {
        format!("{:.1}%", self.score)
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> usize {
        self.total_questions.saturating_sub(self.correct_answers)
    }

    pub fn correct(&self) -> impl Iterator<Item = &AnswerReview> {
        self.results.iter().filter(|review| review.is_correct)
    }

    pub fn incorrect(&self) -> impl Iterator<Item = &AnswerReview> {
        self.results.iter().filter(|review| !review.is_correct)
    }

    /// Whether this test came from the generation service.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.source.as_deref() == Some("ai_live_generation")
    }
}
