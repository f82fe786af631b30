#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod error;
pub mod history;
pub mod identity;
pub mod question_bank;
pub mod session;
pub mod submission;
pub mod tracking;

pub use mcq_core::Clock;

pub use api::{ApiClient, ApiConfig};
pub use app_services::AppServices;
pub use error::{
    AppServicesError, HistoryError, IdentityError, QuestionBankError, SessionError,
    SubmissionError,
};
pub use history::{AttemptDetail, AttemptInfo, AttemptQuestion, HistoryService, HistoryStats};
pub use identity::IdentityService;
pub use question_bank::{QuestionBank, RawQuestion};
pub use session::{SessionPhase, SubmitReadiness, TestSession, TestSessionService};
pub use submission::{QuestionData, SubmissionGateway, SubmittedAnswer, TestSubmission};
pub use tracking::TrackingService;
