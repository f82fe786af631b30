use std::sync::Arc;

use tracing::info;

use mcq_core::Clock;
use mcq_core::model::UserProfile;
use storage::repository::{IdentityRepository, ProfileRecord};

use crate::error::IdentityError;

/// Onboarding and lookup for the locally stored identity.
#[derive(Clone)]
pub struct IdentityService {
    clock: Clock,
    repository: Arc<dyn IdentityRepository>,
}

impl IdentityService {
    #[must_use]
    pub fn new(clock: Clock, repository: Arc<dyn IdentityRepository>) -> Self {
        Self { clock, repository }
    }

    /// The stored profile, if the user has onboarded.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` on storage failures.
    pub async fn current(&self) -> Result<Option<UserProfile>, IdentityError> {
        Ok(self.repository.load_profile().await?)
    }

    /// Validate the onboarding form and persist the derived profile.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Profile` for blank fields and
    /// `IdentityError::Storage` if persisting fails.
    pub async fn onboard(&self, name: &str, email: &str) -> Result<UserProfile, IdentityError> {
        let profile = UserProfile::onboard(name, email)?;
        self.repository
            .save_profile(ProfileRecord::from_profile(&profile, self.clock.now()))
            .await?;
        info!(user_id = profile.user_id(), "user onboarded");
        Ok(profile)
    }

    /// Forget the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` on storage failures.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        Ok(self.repository.clear_profile().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_core::time::fixed_clock;
    use storage::repository::MemoryIdentityStore;

    #[tokio::test]
    async fn onboarding_persists_the_derived_profile() {
        let service = IdentityService::new(fixed_clock(), Arc::new(MemoryIdentityStore::new()));
        assert!(service.current().await.unwrap().is_none());

        let profile = service.onboard("Asha K", "Asha.K@Example.com ").await.unwrap();
        assert_eq!(profile.user_id(), "asha.k@example.com");

        let stored = service.current().await.unwrap().unwrap();
        assert_eq!(stored, profile);

        service.sign_out().await.unwrap();
        assert!(service.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_fields_never_reach_storage() {
        let service = IdentityService::new(fixed_clock(), Arc::new(MemoryIdentityStore::new()));
        assert!(service.onboard("", "a@b.c").await.is_err());
        assert!(service.current().await.unwrap().is_none());
    }
}
