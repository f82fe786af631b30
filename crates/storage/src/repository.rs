use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use mcq_core::model::UserProfile;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the local profile row.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub onboarded_at: DateTime<Utc>,
}

impl ProfileRecord {
    #[must_use]
    pub fn from_profile(profile: &UserProfile, onboarded_at: DateTime<Utc>) -> Self {
        Self {
            user_id: profile.user_id().to_owned(),
            user_name: profile.user_name().to_owned(),
            user_email: profile.user_email().to_owned(),
            onboarded_at,
        }
    }

    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        UserProfile::from_persisted(self.user_id, self.user_name, self.user_email)
    }
}

/// Repository contract for the locally persisted identity.
///
/// The profile survives across app launches until explicitly cleared; it is
/// written once at onboarding and read at every startup.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Fetch the stored profile, if the user has onboarded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures; a missing profile is
    /// `Ok(None)`, not an error.
    async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError>;

    /// Persist or replace the profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn save_profile(&self, record: ProfileRecord) -> Result<(), StorageError>;

    /// Forget the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn clear_profile(&self) -> Result<(), StorageError>;
}

/// In-memory identity store for tests and prototyping.
#[derive(Clone, Default)]
pub struct MemoryIdentityStore {
    profile: Arc<Mutex<Option<ProfileRecord>>>,
}

impl MemoryIdentityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for MemoryIdentityStore {
    async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        let guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone().map(ProfileRecord::into_profile))
    }

    async fn save_profile(&self, record: ProfileRecord) -> Result<(), StorageError> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(record);
        Ok(())
    }

    async fn clear_profile(&self) -> Result<(), StorageError> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates storage adapters behind trait objects for backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub identity: Arc<dyn IdentityRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            identity: Arc::new(MemoryIdentityStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_core::time::fixed_now;

    #[tokio::test]
    async fn memory_store_round_trips_and_clears() {
        let store = MemoryIdentityStore::new();
        assert!(store.load_profile().await.unwrap().is_none());

        let profile = UserProfile::onboard("Asha", "asha@example.com").unwrap();
        store
            .save_profile(ProfileRecord::from_profile(&profile, fixed_now()))
            .await
            .unwrap();

        let loaded = store.load_profile().await.unwrap().unwrap();
        assert_eq!(loaded, profile);

        store.clear_profile().await.unwrap();
        assert!(store.load_profile().await.unwrap().is_none());
    }
}
