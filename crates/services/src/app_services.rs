use std::sync::Arc;

use storage::repository::Storage;
use storage::session_scope::SessionScope;

use crate::api::{ApiClient, ApiConfig};
use crate::error::AppServicesError;
use crate::history::HistoryService;
use crate::identity::IdentityService;
use crate::question_bank::QuestionBank;
use crate::session::TestSessionService;
use crate::submission::SubmissionGateway;
use crate::tracking::TrackingService;
use crate::Clock;

/// Assembles the app-facing services around one storage backend and one
/// API client.
#[derive(Clone)]
pub struct AppServices {
    scope: SessionScope,
    identity: Arc<IdentityService>,
    sessions: Arc<TestSessionService>,
    history: Arc<HistoryService>,
    tracking: Arc<TrackingService>,
    question_bank: Arc<dyn QuestionBank>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        api: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::assemble(storage, api, clock))
    }

    /// Build services on in-memory storage, for tests and prototyping.
    #[must_use]
    pub fn new_in_memory(api: ApiConfig, clock: Clock) -> Self {
        Self::assemble(Storage::in_memory(), api, clock)
    }

    fn assemble(storage: Storage, api: ApiConfig, clock: Clock) -> Self {
        let scope = SessionScope::new();
        let client = ApiClient::new(api);
        let question_bank: Arc<dyn QuestionBank> = Arc::new(client.clone());
        let grader: Arc<dyn SubmissionGateway> = Arc::new(client.clone());

        let identity = Arc::new(IdentityService::new(clock, Arc::clone(&storage.identity)));
        let sessions = Arc::new(TestSessionService::new(
            clock,
            Arc::clone(&storage.identity),
            scope.clone(),
            Arc::clone(&question_bank),
            grader,
        ));
        let history = Arc::new(HistoryService::new(client.clone()));
        let tracking = Arc::new(TrackingService::new(client));

        Self {
            scope,
            identity,
            sessions,
            history,
            tracking,
            question_bank,
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
