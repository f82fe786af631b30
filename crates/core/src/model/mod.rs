mod answer_sheet;
mod history;
mod question;
mod report;
mod subject;
mod user;

pub use answer_sheet::{AnswerSheet, AnswerSheetError};
pub use history::HistoryEntry;
pub use question::{OptionLetter, Question, QuestionError, QuestionSource};
pub use report::{AnswerReview, ChosenAnswer, SubmissionReport};
pub use subject::{Subject, SubjectError};
pub use user::{UserProfile, UserProfileError};
