use dioxus::prelude::*;

use services::error::{QuestionBankError, SessionError};

/// Why a view could not load, with enough detail to act on.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewError {
    /// No subject selected or no identity onboarded; start over at Home.
    Preconditions,
    /// The generation service's daily allowance ran out.
    Quota { message: String },
    /// The backend answered but had nothing to ask.
    NoQuestions,
    /// Loading failed; the user stays on the page to inspect and retry.
    Load { message: String },
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn from_session_error(err: &SessionError) -> Self {
        match err {
            SessionError::SubjectNotSelected | SessionError::IdentityMissing => {
                Self::Preconditions
            }
            SessionError::Load(QuestionBankError::Empty) => Self::NoQuestions,
            SessionError::Load(load) if load.is_quota() => Self::Quota {
                message: load.to_string(),
            },
            SessionError::Load(load) => Self::Load {
                message: load.to_string(),
            },
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Preconditions => {
                "No subject selected or user not identified. Please start from the home page."
                    .to_string()
            }
            Self::Quota { message } => format!(
                "AI service limit reached. {message} Standard questions from the \
                 question bank will be used instead."
            ),
            Self::NoQuestions => "No questions available for this subject.".to_string(),
            Self::Load { message } => format!(
                "Error loading questions: {message}. Check that the backend is running \
                 and reachable, then retry."
            ),
            Self::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Whether the only sensible next step is the home screen.
    #[must_use]
    pub fn goes_home(&self) -> bool {
        matches!(
            self,
            Self::Preconditions | Self::Quota { .. } | Self::NoQuestions
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
