use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use mcq_core::Clock;
use mcq_core::model::{
    AnswerSheet, OptionLetter, Question, QuestionSource, Subject, SubmissionReport,
};
use mcq_core::pagination::{PageBounds, Pager, QUESTIONS_PER_PAGE};
use storage::repository::IdentityRepository;
use storage::session_scope::SessionScope;

use crate::error::{QuestionBankError, SessionError};
use crate::question_bank::QuestionBank;
use crate::submission::{SubmissionGateway, TestSubmission};

/// Lifecycle of one test-taking session.
///
/// Construction covers loading; a session object always starts in `Ready`.
/// `Submitting` is only held across the grading call. `Completed` is
/// terminal: a finished session cannot be answered or resubmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Ready,
    Submitting,
    Completed,
}

/// Whether a submit attempt needs the gap confirmation first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitReadiness {
    AllAnswered,
    /// The user may still proceed; gaps are scored as incorrect.
    Unanswered(usize),
}

/// One in-progress test: the loaded questions, the user's answers, and the
/// page cursor.
#[derive(Debug, Clone)]
pub struct TestSession {
    subject: Subject,
    source: QuestionSource,
    questions: Vec<Question>,
    sheet: AnswerSheet,
    pager: Pager,
    started_at: DateTime<Utc>,
    phase: SessionPhase,
}

impl TestSession {
    /// Enter `Ready` with a freshly loaded question list.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` with an empty-list error when there is
    /// nothing to ask; an empty test must never render.
    pub fn begin(
        subject: Subject,
        source: QuestionSource,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Load(QuestionBankError::Empty));
        }
        let pager = Pager::new(questions.len(), QUESTIONS_PER_PAGE)?;
        let sheet = AnswerSheet::new(questions.len());

        Ok(Self {
            subject,
            source,
            questions,
            sheet,
            pager,
            started_at,
            phase: SessionPhase::Ready,
        })
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub fn source(&self) -> QuestionSource {
        self.source
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    #[must_use]
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// Index bounds of the questions visible on the current page.
    #[must_use]
    pub fn page_bounds(&self) -> PageBounds {
        self.pager.bounds()
    }

    /// The current page's slice of questions.
    #[must_use]
    pub fn page_questions(&self) -> &[Question] {
        let bounds = self.page_bounds();
        &self.questions[bounds.start..bounds.end]
    }

    /// Record an answer. Last write wins; the page does not change.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` after completion and
    /// `SessionError::QuestionOutOfRange` for a bad index.
    pub fn select_option(
        &mut self,
        index: usize,
        letter: OptionLetter,
    ) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Ready {
            return Err(SessionError::AlreadySubmitted);
        }
        self.sheet
            .select(index, letter)
            .map_err(|_| SessionError::QuestionOutOfRange { index })
    }

    /// Move to the next page; clamped at the last. Answers are untouched.
    pub fn advance_page(&mut self) -> bool {
        self.pager.advance()
    }

    /// Move to the previous page; clamped at the first.
    pub fn retreat_page(&mut self) -> bool {
        self.pager.retreat()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.sheet.unanswered_count()
    }

    /// Gate for the submit action: gaps need explicit user confirmation.
    #[must_use]
    pub fn submit_readiness(&self) -> SubmitReadiness {
        match self.unanswered_count() {
            0 => SubmitReadiness::AllAnswered,
            gaps => SubmitReadiness::Unanswered(gaps),
        }
    }

    fn begin_submit(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Ready {
            return Err(SessionError::AlreadySubmitted);
        }
        self.phase = SessionPhase::Submitting;
        Ok(())
    }

    fn complete(&mut self) {
        self.phase = SessionPhase::Completed;
    }

    /// Submission failed; the sheet is intact and the user may retry.
    fn reopen(&mut self) {
        self.phase = SessionPhase::Ready;
    }
}

/// Drives the test-session lifecycle against the backend gateways.
#[derive(Clone)]
pub struct TestSessionService {
    clock: Clock,
    identity: Arc<dyn IdentityRepository>,
    scope: SessionScope,
    questions: Arc<dyn QuestionBank>,
    grader: Arc<dyn SubmissionGateway>,
}

impl TestSessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        identity: Arc<dyn IdentityRepository>,
        scope: SessionScope,
        questions: Arc<dyn QuestionBank>,
        grader: Arc<dyn SubmissionGateway>,
    ) -> Self {
        Self {
            clock,
            identity,
            scope,
            questions,
            grader,
        }
    }

    /// Load questions and open a session.
    ///
    /// Preconditions come first: a subject must be parked in the scope and
    /// an identity must exist in storage, otherwise nothing is fetched and
    /// the caller redirects to the entry screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubjectNotSelected`/`IdentityMissing` for
    /// failed preconditions and `SessionError::Load` for fetch failures,
    /// including the empty-list case.
    pub async fn start(&self) -> Result<TestSession, SessionError> {
        let Some(subject) = self.scope.subject() else {
            return Err(SessionError::SubjectNotSelected);
        };
        if self.identity.load_profile().await?.is_none() {
            return Err(SessionError::IdentityMissing);
        }

        let source = self.scope.question_source();
        self.scope.reset_for_new_test();
        self.scope.mark_test_source(source);

        let questions = self.questions.fetch(&subject, source).await?;
        let started_at = self.clock.now();
        self.scope.set_test_started_at(started_at);
        info!(
            subject = subject.name(),
            source = source.storage_key(),
            count = questions.len(),
            "test session ready"
        );

        TestSession::begin(subject, source, questions, started_at)
    }

    /// Package the sheet and send it for grading.
    ///
    /// On success the session completes and the report is parked for the
    /// results screen. On failure the session returns to `Ready` with every
    /// answer intact, and a retry with the same sheet is valid.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` for a finished session,
    /// `SessionError::IdentityMissing` if the profile vanished, and
    /// `SessionError::Submit` (recoverable) for gateway failures.
    pub async fn submit(
        &self,
        session: &mut TestSession,
    ) -> Result<SubmissionReport, SessionError> {
        let Some(profile) = self.identity.load_profile().await? else {
            return Err(SessionError::IdentityMissing);
        };
        session.begin_submit()?;

        // The load-complete stamp lives in the scope for the other screens;
        // fall back to the session's own copy if it was never parked.
        let started_at = self
            .scope
            .test_started_at()
            .unwrap_or_else(|| session.started_at());
        let duration_seconds = (self.clock.now() - started_at).num_seconds().max(0);
        let submission = TestSubmission::build(
            session.subject(),
            session.questions(),
            session.sheet(),
            &profile,
            duration_seconds,
            self.scope.submission_tag().map(ToOwned::to_owned),
        );

        match self.grader.submit(&submission).await {
            Ok(report) => {
                session.complete();
                self.scope.park_report(report.clone());
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "submission failed; session stays open for retry");
                session.reopen();
                Err(err.into())
            }
        }
    }
}
