use thiserror::Error;

use crate::model::OptionLetter;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerSheetError {
    #[error("question index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The user's selections for one test, indexed by question position.
///
/// One slot per question for the whole session; slots start unanswered and
/// the last selection for a slot wins. Page navigation never touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    slots: Vec<Option<OptionLetter>>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record a selection. Re-selecting the same letter is a no-op in effect.
    ///
    /// # Errors
    ///
    /// Returns `AnswerSheetError::IndexOutOfRange` for an index past the end.
    pub fn select(&mut self, index: usize, letter: OptionLetter) -> Result<(), AnswerSheetError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(AnswerSheetError::IndexOutOfRange { index, len })?;
        *slot = Some(letter);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<OptionLetter> {
        self.slots.get(index).copied().flatten()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unanswered_count() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<OptionLetter>> + '_ {
        self.slots.iter().copied()
    }
}
