use mcq_core::model::OptionLetter;
use mcq_core::normalize_display_text;
use services::{SubmitReadiness, TestSession, TestSessionService};

use crate::views::ViewError;

/// One selectable option row.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionVm {
    pub letter: OptionLetter,
    pub text: String,
    pub selected: bool,
}

/// One question card on the current page.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionCardVm {
    /// Index into the full question list; selection events carry this.
    pub index: usize,
    /// 1-based number shown to the user.
    pub number: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
}

/// Render data for the test screen: only the current page is materialized,
/// and it is rebuilt whenever the page or a selection changes.
#[derive(Clone, Debug, PartialEq)]
pub struct TestPageVm {
    pub subject: String,
    /// e.g. `"Questions 1-5 of 20"`.
    pub counter: String,
    pub progress_percent: f64,
    pub prev_enabled: bool,
    /// Exactly one of `show_next`/`show_submit` is true.
    pub show_next: bool,
    pub show_submit: bool,
    pub generated: bool,
    pub cards: Vec<QuestionCardVm>,
}

/// View model owning the live session for the test screen.
#[derive(Debug)]
pub struct TestVm {
    session: TestSession,
}

impl TestVm {
    #[must_use]
    pub fn new(session: TestSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn page(&self) -> TestPageVm {
        let session = &self.session;
        let pager = session.pager();
        let bounds = session.page_bounds();

        let cards = bounds
            .indices()
            .map(|index| {
                let question = &session.questions()[index];
                let selected = session.sheet().get(index);
                let options = OptionLetter::ALL
                    .into_iter()
                    .map(|letter| OptionVm {
                        letter,
                        text: normalize_display_text(question.option_text(letter)).into_owned(),
                        selected: selected == Some(letter),
                    })
                    .collect();
                QuestionCardVm {
                    index,
                    number: index + 1,
                    text: normalize_display_text(question.text()).into_owned(),
                    options,
                }
            })
            .collect();

        TestPageVm {
            subject: session.subject().name().to_string(),
            counter: format!(
                "Questions {}-{} of {}",
                bounds.start + 1,
                bounds.end,
                pager.total()
            ),
            progress_percent: pager.progress_percent(),
            prev_enabled: !pager.is_first(),
            show_next: !pager.is_last(),
            show_submit: pager.is_last(),
            generated: session.source().is_generated(),
            cards,
        }
    }

    /// Record a selection; the caller re-renders the page afterwards.
    pub fn select(&mut self, index: usize, letter: OptionLetter) {
        // Out-of-range indexes cannot come from rendered cards; ignore them.
        let _ = self.session.select_option(index, letter);
    }

    pub fn next_page(&mut self) -> bool {
        self.session.advance_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.session.retreat_page()
    }

    #[must_use]
    pub fn readiness(&self) -> SubmitReadiness {
        self.session.submit_readiness()
    }

    /// Send the sheet for grading. On failure the session stays open and the
    /// returned message is shown in a retryable banner.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message.
    pub async fn submit(&mut self, service: &TestSessionService) -> Result<(), String> {
        service
            .submit(&mut self.session)
            .await
            .map(|_report| ())
            .map_err(|err| format!("Error submitting test: {err}. Please try again."))
    }
}

/// Start a session for the test screen.
///
/// # Errors
///
/// Returns a `ViewError` describing the startup failure; see
/// [`ViewError::goes_home`] for which of them end at the home screen.
pub async fn start_test(service: &TestSessionService) -> Result<TestVm, ViewError> {
    match service.start().await {
        Ok(session) => Ok(TestVm::new(session)),
        Err(err) => Err(ViewError::from_session_error(&err)),
    }
}
