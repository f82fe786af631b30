use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject name is empty")]
    Empty,
}

/// A topic category scoping which questions are eligible for a test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject(String);

impl Subject {
    /// # Errors
    ///
    /// Returns `SubjectError::Empty` for a blank name.
    pub fn new(name: impl Into<String>) -> Result<Self, SubjectError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SubjectError::Empty);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_the_name() {
        let subject = Subject::new("  Physics ").unwrap();
        assert_eq!(subject.name(), "Physics");
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(Subject::new("   ").unwrap_err(), SubjectError::Empty);
    }
}
