use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use mcq_core::model::{
    AnswerReview, ChosenAnswer, OptionLetter, Question, QuestionSource, Subject, SubmissionReport,
};
use mcq_core::time::fixed_clock;
use services::error::{QuestionBankError, SessionError, SubmissionError};
use services::question_bank::QuestionBank;
use services::session::{SessionPhase, SubmitReadiness, TestSessionService};
use services::submission::{SubmissionGateway, TestSubmission};
use storage::repository::{IdentityRepository, MemoryIdentityStore, ProfileRecord};
use storage::session_scope::SessionScope;

fn build_question(index: usize, correct: OptionLetter) -> Question {
    Question::new(
        format!("Question {index}"),
        [
            format!("{index}-a"),
            format!("{index}-b"),
            format!("{index}-c"),
            format!("{index}-d"),
        ],
        Some(correct),
        Question::STANDARD_TYPE,
    )
    .unwrap()
}

struct FixedBank {
    questions: Vec<Question>,
}

#[async_trait]
impl QuestionBank for FixedBank {
    async fn fetch(
        &self,
        _subject: &Subject,
        _source: QuestionSource,
    ) -> Result<Vec<Question>, QuestionBankError> {
        if self.questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        Ok(self.questions.clone())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, QuestionBankError> {
        Ok(vec![Subject::new("Maths").unwrap()])
    }
}

struct QuotaBank;

#[async_trait]
impl QuestionBank for QuotaBank {
    async fn fetch(
        &self,
        _subject: &Subject,
        _source: QuestionSource,
    ) -> Result<Vec<Question>, QuestionBankError> {
        Err(QuestionBankError::QuotaExceeded {
            message: "AI Daily Quota Exceeded.".into(),
        })
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, QuestionBankError> {
        Ok(Vec::new())
    }
}

/// Grades like the backend: compares the chosen letter with the echoed
/// `correct_option`, failing the first `fail_times` calls with a 500.
struct FlakyGrader {
    fail_times: AtomicUsize,
    received: Mutex<Vec<TestSubmission>>,
}

impl FlakyGrader {
    fn new(fail_times: usize) -> Self {
        Self {
            fail_times: AtomicUsize::new(fail_times),
            received: Mutex::new(Vec::new()),
        }
    }

    fn grade(submission: &TestSubmission) -> SubmissionReport {
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
        SubmissionReport {
            test_id: Some(1),
            total_questions,
            correct_answers,
            score,
            results,
            source: submission.source.clone(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for FlakyGrader {
    async fn submit(
        &self,
        submission: &TestSubmission,
    ) -> Result<SubmissionReport, SubmissionError> {
        self.received.lock().unwrap().push(submission.clone());
        let remaining = self.fail_times.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_times.store(remaining - 1, Ordering::SeqCst);
            return Err(SubmissionError::HttpStatus {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                detail: "boom".into(),
            });
        }
        Ok(Self::grade(submission))
    }
}

struct Harness {
    scope: SessionScope,
    identity: Arc<MemoryIdentityStore>,
    service: TestSessionService,
    grader: Arc<FlakyGrader>,
}

fn harness(questions: Vec<Question>, grader_failures: usize) -> Harness {
    let scope = SessionScope::new();
    let identity = Arc::new(MemoryIdentityStore::new());
    let grader = Arc::new(FlakyGrader::new(grader_failures));
    let service = TestSessionService::new(
        fixed_clock(),
        identity.clone(),
        scope.clone(),
        Arc::new(FixedBank { questions }),
        grader.clone(),
    );
    Harness {
        scope,
        identity,
        service,
        grader,
    }
}

async fn onboard(identity: &MemoryIdentityStore) {
    let profile = mcq_core::model::UserProfile::onboard("Asha", "asha@example.com").unwrap();
    identity
        .save_profile(ProfileRecord::from_profile(
            &profile,
            mcq_core::time::fixed_now(),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn start_requires_a_subject_and_an_identity() {
    let h = harness(vec![build_question(0, OptionLetter::A)], 0);

    let err = h.service.start().await.unwrap_err();
    assert!(matches!(err, SessionError::SubjectNotSelected));

    h.scope.set_subject(Subject::new("Maths").unwrap());
    let err = h.service.start().await.unwrap_err();
    assert!(matches!(err, SessionError::IdentityMissing));
}

#[tokio::test]
async fn empty_question_lists_notify_instead_of_rendering() {
    let h = harness(Vec::new(), 0);
    h.scope.set_subject(Subject::new("Maths").unwrap());
    onboard(&h.identity).await;

    let err = h.service.start().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Load(QuestionBankError::Empty)
    ));
}

#[tokio::test]
async fn quota_exhaustion_surfaces_as_its_own_error() {
    let scope = SessionScope::new();
    let identity = Arc::new(MemoryIdentityStore::new());
    let service = TestSessionService::new(
        fixed_clock(),
        identity.clone(),
        scope.clone(),
        Arc::new(QuotaBank),
        Arc::new(FlakyGrader::new(0)),
    );
    scope.set_subject(Subject::new("Physics").unwrap());
    scope.set_question_source(QuestionSource::Generated);
    onboard(&identity).await;

    let err = service.start().await.unwrap_err();
    match err {
        SessionError::Load(load) => assert!(load.is_quota()),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn full_flow_parks_the_report_for_the_results_screen() {
    let questions: Vec<Question> = (0..7).map(|i| build_question(i, OptionLetter::B)).collect();
    let h = harness(questions, 0);
    h.scope.set_subject(Subject::new("Chemistry").unwrap());
    onboard(&h.identity).await;

    let mut session = h.service.start().await.unwrap();
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(h.scope.submission_tag(), Some("database"));

    // Answer five of seven, two of them correctly.
    for index in 0..5 {
        let letter = if index < 2 { OptionLetter::B } else { OptionLetter::C };
        session.select_option(index, letter).unwrap();
    }
    assert_eq!(session.submit_readiness(), SubmitReadiness::Unanswered(2));

    let report = h.service.submit(&mut session).await.unwrap();
    assert!(session.is_completed());
    assert_eq!(report.total_questions, 7);
    assert_eq!(report.correct_answers, 2);

    // Gaps travel as the sentinel, never null.
    let sent = h.grader.received.lock().unwrap();
    let gaps = sent[0]
        .answers
        .iter()
        .filter(|answer| !answer.user_answer.is_answered())
        .count();
    assert_eq!(gaps, 2);

    let parked = h.scope.report().expect("report parked for results screen");
    assert_eq!(parked, report);
}

#[tokio::test]
async fn failed_submission_keeps_the_sheet_for_a_retry() {
    let questions: Vec<Question> = (0..3).map(|i| build_question(i, OptionLetter::A)).collect();
    let h = harness(questions, 1);
    h.scope.set_subject(Subject::new("Biology").unwrap());
    onboard(&h.identity).await;

    let mut session = h.service.start().await.unwrap();
    session.select_option(0, OptionLetter::A).unwrap();
    session.select_option(1, OptionLetter::D).unwrap();
    session.select_option(2, OptionLetter::A).unwrap();

    let err = h.service.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::Submit(_)));
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.sheet().get(1), Some(OptionLetter::D));
    assert!(h.scope.report().is_none());

    // The backend recovered; the same sheet goes through unchanged.
    let report = h.service.submit(&mut session).await.unwrap();
    assert_eq!(report.correct_answers, 2);

    let sent = h.grader.received.lock().unwrap();
    assert_eq!(sent.len(), 2);
    let letters = |submission: &TestSubmission| {
        submission
            .answers
            .iter()
            .map(|answer| answer.user_answer.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(letters(&sent[0]), letters(&sent[1]));
}
