//! Shared error types for the services crate.

use thiserror::Error;

use mcq_core::model::QuestionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors from fetching and normalizing questions.
///
/// Every variant carries enough context for the UI to show an actionable
/// message; none of these are retried silently.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    /// The response body was an HTML page where JSON was expected, the
    /// classic symptom of hitting a web server instead of the API.
    #[error(
        "the server at {url} returned an HTML page instead of questions; \
         the backend is probably not running there"
    )]
    BackendUnreachable { url: String },

    /// A 2xx response that was not JSON at all.
    #[error("server returned a non-JSON response: {snippet}")]
    NotJson { snippet: String },

    /// An HTTP error status, with whatever message the backend included.
    #[error("question request failed with status {status}: {detail}")]
    HttpStatus {
        status: reqwest::StatusCode,
        detail: String,
    },

    /// A well-formed response that carries a backend error message.
    #[error("{message}")]
    Backend { message: String },

    /// The generation service's daily allowance ran out. The UI explains
    /// this and falls back to the question bank.
    #[error("{message}")]
    QuotaExceeded { message: String },

    /// A well-formed response with no questions in it.
    #[error("no questions available for this subject")]
    Empty,

    /// A question in the response failed canonical validation.
    #[error("malformed question in response: {0}")]
    Malformed(#[from] QuestionError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl QuestionBankError {
    #[must_use]
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

/// Errors from submitting a finished test for grading.
///
/// All of these are recoverable: the session stays intact and the user may
/// retry the submission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("submission failed with status {status}: {detail}")]
    HttpStatus {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors from the test-session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// Startup precondition: no subject was selected on the home screen.
    #[error("no subject selected")]
    SubjectNotSelected,

    /// Startup precondition: the user has not onboarded.
    #[error("user is not identified")]
    IdentityMissing,

    #[error("question index {index} is out of range")]
    QuestionOutOfRange { index: usize },

    /// The session was already graded; a new one must be started.
    #[error("test already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Load(#[from] QuestionBankError),

    #[error(transparent)]
    Pager(#[from] mcq_core::pagination::PagerError),

    /// Recoverable: the answers are preserved for a retry.
    #[error(transparent)]
    Submit(#[from] SubmissionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from the history service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("history request failed with status {status}")]
    HttpStatus { status: reqwest::StatusCode },

    #[error("{message}")]
    Backend { message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors from identity onboarding and lookup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error(transparent)]
    Profile(#[from] mcq_core::model::UserProfileError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
