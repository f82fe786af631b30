use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label for one of the four answer slots on a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Position of this letter within a question's option list.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Parse a backend-provided letter, tolerating case and surrounding space.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a test's questions come from.
///
/// Both sources yield the same canonical [`Question`] shape after fetch;
/// nothing downstream of the fetch boundary branches on the source again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionSource {
    /// The curated question bank.
    #[default]
    Database,
    /// Questions produced on demand by the generation service.
    Generated,
}

impl QuestionSource {
    /// Key used when the source choice is parked between screens.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Generated => "genai",
        }
    }

    /// Tag reported with a submission so grading and history know the origin.
    #[must_use]
    pub fn submission_tag(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Generated => "ai_live_generation",
        }
    }

    #[must_use]
    pub fn from_storage_key(key: &str) -> Option<Self> {
        match key {
            "database" => Some(Self::Database),
            "genai" => Some(Self::Generated),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_generated(self) -> bool {
        matches!(self, Self::Generated)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("option {letter} is empty")]
    EmptyOption { letter: OptionLetter },
}

/// A single multiple-choice question, immutable once loaded for a session.
///
/// `correct_option` is authoritative only on the server; it is carried here
/// so generated questions can be echoed back for grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    options: [String; 4],
    correct_option: Option<OptionLetter>,
    question_type: String,
}

impl Question {
    /// Default tag for questions that do not declare a type.
    pub const STANDARD_TYPE: &'static str = "Standard";

    /// Validate and build a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the prompt is blank and
    /// `QuestionError::EmptyOption` for the first blank option slot.
    pub fn new(
        text: impl Into<String>,
        options: [String; 4],
        correct_option: Option<OptionLetter>,
        question_type: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        for letter in OptionLetter::ALL {
            if options[letter.index()].trim().is_empty() {
                return Err(QuestionError::EmptyOption { letter });
            }
        }
        let question_type = question_type.into();
        let question_type = if question_type.trim().is_empty() {
            Self::STANDARD_TYPE.to_string()
        } else {
            question_type
        };

        Ok(Self {
            text,
            options,
            correct_option,
            question_type,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    #[must_use]
    pub fn option_text(&self, letter: OptionLetter) -> &str {
        &self.options[letter.index()]
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<OptionLetter> {
        self.correct_option
    }

    /// Full text of the correct option, when the letter is known client-side.
    #[must_use]
    pub fn correct_option_text(&self) -> Option<&str> {
        self.correct_option.map(|letter| self.option_text(letter))
    }

    #[must_use]
    pub fn question_type(&self) -> &str {
        &self.question_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; 4] {
        ["1".into(), "2".into(), "3".into(), "4".into()]
    }

    #[test]
    fn builds_a_valid_question() {
        let q = Question::new("2 + 2 = ?", options(), Some(OptionLetter::D), "Numerical").unwrap();
        assert_eq!(q.option_text(OptionLetter::D), "4");
        assert_eq!(q.correct_option_text(), Some("4"));
        assert_eq!(q.question_type(), "Numerical");
    }

    #[test]
    fn blank_type_falls_back_to_standard() {
        let q = Question::new("2 + 2 = ?", options(), None, "  ").unwrap();
        assert_eq!(q.question_type(), Question::STANDARD_TYPE);
    }

    #[test]
    fn rejects_empty_text_and_options() {
        assert_eq!(
            Question::new("   ", options(), None, "Standard").unwrap_err(),
            QuestionError::EmptyText
        );

        let mut opts = options();
        opts[2] = String::new();
        assert_eq!(
            Question::new("2 + 2 = ?", opts, None, "Standard").unwrap_err(),
            QuestionError::EmptyOption {
                letter: OptionLetter::C
            }
        );
    }

    #[test]
    fn source_keys_round_trip() {
        for source in [QuestionSource::Database, QuestionSource::Generated] {
            assert_eq!(
                QuestionSource::from_storage_key(source.storage_key()),
                Some(source)
            );
        }
        assert_eq!(QuestionSource::from_storage_key("csv"), None);
    }
}
