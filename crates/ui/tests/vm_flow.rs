//! Drives the test-screen view model against fake gateways, end to end
//! from startup preconditions to the parked results report.

use std::sync::Arc;

use async_trait::async_trait;

use mcq_core::model::{
    AnswerReview, ChosenAnswer, OptionLetter, Question, QuestionSource, Subject, SubmissionReport,
    UserProfile,
};
use mcq_core::time::{fixed_clock, fixed_now};
use services::TestSessionService;
use services::error::{QuestionBankError, SubmissionError};
use services::question_bank::QuestionBank;
use services::submission::{SubmissionGateway, TestSubmission};
use storage::repository::{IdentityRepository, MemoryIdentityStore, ProfileRecord};
use storage::session_scope::SessionScope;
use ui::views::ViewError;
use ui::vm::{ResultsFilter, filter_reviews, map_results, start_test};

struct FakeBank {
    count: usize,
}

#[async_trait]
impl QuestionBank for FakeBank {
    async fn fetch(
        &self,
        _subject: &Subject,
        _source: QuestionSource,
    ) -> Result<Vec<Question>, QuestionBankError> {
        if self.count == 0 {
            return Err(QuestionBankError::Empty);
        }
        Ok((0..self.count)
            .map(|i| {
                Question::new(
                    format!("Q{i}"),
                    ["1".into(), "2".into(), "3".into(), "4".into()],
                    Some(OptionLetter::B),
                    Question::STANDARD_TYPE,
                )
                .unwrap()
            })
            .collect())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, QuestionBankError> {
        Ok(Vec::new())
    }
}

/// Marks an answer correct when it matches the echoed answer key.
struct EchoGrader;

#[async_trait]
impl SubmissionGateway for EchoGrader {
    async fn submit(
        &self,
        submission: &TestSubmission,
    ) -> Result<SubmissionReport, SubmissionError> {
        let results: Vec<AnswerReview> = submission
            .answers
            .iter()
            .map(|answer| {
                let correct_letter = answer
                    .question_data
                    .correct_option
                    .clone()
                    .unwrap_or_else(|| "A".into());
                let is_correct = matches!(
                    answer.user_answer,
                    ChosenAnswer::Letter(letter) if letter.as_str() == correct_letter
                );
                AnswerReview {
                    question: answer.question.clone(),
                    user_answer_letter: answer.user_answer,
                    user_answer_text: answer.user_answer.to_string(),
                    correct_answer_letter: correct_letter,
                    correct_answer_text: answer.correct_answer.clone(),
                    is_correct,
                    all_options: answer.question_data.options.clone(),
                }
            })
            .collect();
        let correct_answers = results.iter().filter(|review| review.is_correct).count();
        let total_questions = results.len();
        #[allow(clippy::cast_precision_loss)]
        let score = correct_answers as f64 / total_questions as f64 * 100.0;
        Ok(SubmissionReport {
            test_id: Some(1),
            total_questions,
            correct_answers,
            score,
            results,
            source: submission.source.clone(),
        })
    }
}

async fn service_with(count: usize, scope: &SessionScope) -> TestSessionService {
    let identity = Arc::new(MemoryIdentityStore::new());
    let profile = UserProfile::onboard("Asha", "asha@example.com").unwrap();
    identity
        .save_profile(ProfileRecord::from_profile(&profile, fixed_now()))
        .await
        .unwrap();
    TestSessionService::new(
        fixed_clock(),
        identity,
        scope.clone(),
        Arc::new(FakeBank { count }),
        Arc::new(EchoGrader),
    )
}

#[tokio::test]
async fn missing_subject_sends_the_user_home() {
    let scope = SessionScope::new();
    let service = service_with(5, &scope).await;

    let err = start_test(&service).await.unwrap_err();
    assert_eq!(err, ViewError::Preconditions);
    assert!(err.goes_home());
}

#[tokio::test]
async fn empty_banks_never_render_a_test() {
    let scope = SessionScope::new();
    scope.set_subject(Subject::new("Maths").unwrap());
    let service = service_with(0, &scope).await;

    let err = start_test(&service).await.unwrap_err();
    assert_eq!(err, ViewError::NoQuestions);
    assert!(err.goes_home());
}

#[tokio::test]
async fn answer_submit_and_review_round_trip() {
    let scope = SessionScope::new();
    scope.set_subject(Subject::new("Physics").unwrap());
    let service = service_with(12, &scope).await;

    let mut vm = start_test(&service).await.unwrap();
    assert_eq!(vm.page().counter, "Questions 1-5 of 12");

    // Answer ten of twelve: eight right, two wrong, two gaps.
    for index in 0..8 {
        vm.select(index, OptionLetter::B);
    }
    vm.select(8, OptionLetter::A);
    vm.select(9, OptionLetter::C);

    vm.submit(&service).await.expect("grading succeeds");

    let report = scope.report().expect("report parked for results screen");
    assert_eq!(report.correct_answers, 8);
    assert_eq!(report.total_questions, 12);

    let results = map_results(&report);
    assert_eq!(results.scoreboard.score_text, "66.7%");
    assert_eq!(results.scoreboard.score_class, "score-mid");

    let incorrect = filter_reviews(&report, ResultsFilter::Incorrect);
    assert_eq!(incorrect.len(), 4);
    let gaps = incorrect.iter().filter(|card| card.not_answered).count();
    assert_eq!(gaps, 2);

    scope.clear_report();
    assert!(scope.report().is_none());
}
