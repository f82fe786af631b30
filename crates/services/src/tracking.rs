use serde::Serialize;
use tracing::{debug, warn};

use mcq_core::model::{Subject, UserProfile};

use crate::api::ApiClient;

#[derive(Debug, Serialize)]
struct VisitEvent<'a> {
    user_id: &'a str,
    user_name: &'a str,
    page: &'a str,
}

#[derive(Debug, Serialize)]
struct TestStartEvent<'a> {
    user_id: &'a str,
    user_name: &'a str,
    subject: &'a str,
}

/// Fire-and-forget usage events for the analytics backend.
///
/// Tracking must never get in the user's way: failures are logged and
/// swallowed, and callers do not await anything beyond the request itself.
#[derive(Clone)]
pub struct TrackingService {
    api: ApiClient,
}

impl TrackingService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Record a screen visit.
    pub async fn page_visit(&self, profile: &UserProfile, page: &str) {
        let event = VisitEvent {
            user_id: profile.user_id(),
            user_name: profile.user_name(),
            page,
        };
        self.post("track/visit", &event).await;
    }

    /// Record that a test is about to start.
    pub async fn test_start(&self, profile: &UserProfile, subject: &Subject) {
        let event = TestStartEvent {
            user_id: profile.user_id(),
            user_name: profile.user_name(),
            subject: subject.name(),
        };
        self.post("track/test-start", &event).await;
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, event: &T) {
        let url = self.api.endpoint(path);
        match self.api.http().post(&url).json(event).send().await {
            Ok(response) => debug!(%url, status = %response.status(), "tracking event sent"),
            Err(err) => warn!(%url, error = %err, "tracking event dropped"),
        }
    }
}
