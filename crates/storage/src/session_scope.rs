use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use mcq_core::model::{QuestionSource, Subject, SubmissionReport};

#[derive(Debug, Default)]
struct ScopeInner {
    subject: Option<Subject>,
    question_source: QuestionSource,
    test_started_at: Option<DateTime<Utc>>,
    submission_tag: Option<&'static str>,
    pending_report: Option<SubmissionReport>,
}

/// Hand-off state shared between screens for the lifetime of one app run.
///
/// This replaces the original's ambient session-scoped key-value storage:
/// the home screen parks the subject and source choice here, the test screen
/// parks the graded report, and the results screen takes it. Nothing in this
/// scope survives a restart.
#[derive(Clone, Default)]
pub struct SessionScope {
    inner: Arc<Mutex<ScopeInner>>,
}

impl SessionScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScopeInner> {
        // A poisoned scope means a panic mid-update; the stored values are
        // all plain data, so continuing with them is safe.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn set_subject(&self, subject: Subject) {
        self.lock().subject = Some(subject);
    }

    #[must_use]
    pub fn subject(&self) -> Option<Subject> {
        self.lock().subject.clone()
    }

    pub fn set_question_source(&self, source: QuestionSource) {
        self.lock().question_source = source;
    }

    #[must_use]
    pub fn question_source(&self) -> QuestionSource {
        self.lock().question_source
    }

    /// Record which origin a submission should be tagged with, so the
    /// results screen knows where the questions came from.
    pub fn mark_test_source(&self, source: QuestionSource) {
        self.lock().submission_tag = Some(source.submission_tag());
    }

    #[must_use]
    pub fn submission_tag(&self) -> Option<&'static str> {
        self.lock().submission_tag
    }

    pub fn set_test_started_at(&self, at: DateTime<Utc>) {
        self.lock().test_started_at = Some(at);
    }

    #[must_use]
    pub fn test_started_at(&self) -> Option<DateTime<Utc>> {
        self.lock().test_started_at
    }

    /// Park a graded report for the results screen.
    pub fn park_report(&self, report: SubmissionReport) {
        self.lock().pending_report = Some(report);
    }

    /// Read the parked report without consuming it.
    #[must_use]
    pub fn report(&self) -> Option<SubmissionReport> {
        self.lock().pending_report.clone()
    }

    /// Discard the parked report; called when the user navigates home.
    pub fn clear_report(&self) {
        self.lock().pending_report = None;
    }

    /// Reset everything a new test run should not inherit. The question
    /// source is a sticky preference and survives.
    pub fn reset_for_new_test(&self) {
        let mut inner = self.lock();
        inner.test_started_at = None;
        inner.submission_tag = None;
        inner.pending_report = None;
    }
}
