use std::sync::Arc;

use services::question_bank::QuestionBank;
use services::{HistoryService, IdentityService, TestSessionService, TrackingService};
use storage::session_scope::SessionScope;

/// What the composition root must provide for the views to run.
pub trait UiApp: Send + Sync {
    fn scope(&self) -> SessionScope;
    fn identity(&self) -> Arc<IdentityService>;
    fn sessions(&self) -> Arc<TestSessionService>;
    fn history(&self) -> Arc<HistoryService>;
    fn tracking(&self) -> Arc<TrackingService>;
    fn question_bank(&self) -> Arc<dyn QuestionBank>;
}

/// Snapshot of the app services, cloned into every view via Dioxus context.
#[derive(Clone)]
pub struct AppContext {
    scope: SessionScope,
    identity: Arc<IdentityService>,
    sessions: Arc<TestSessionService>,
    history: Arc<HistoryService>,
    tracking: Arc<TrackingService>,
    question_bank: Arc<dyn QuestionBank>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            scope: app.scope(),
            identity: app.identity(),
            sessions: app.sessions(),
            history: app.history(),
            tracking: app.tracking(),
            question_bank: app.question_bank(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> SessionScope {
        self.scope.clone()
    }

    #[must_use]
    pub fn identity(&self) -> Arc<IdentityService> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<TestSessionService> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn tracking(&self) -> Arc<TrackingService> {
        Arc::clone(&self.tracking)
    }

    #[must_use]
    pub fn question_bank(&self) -> Arc<dyn QuestionBank> {
        Arc::clone(&self.question_bank)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
