use async_trait::async_trait;
use sqlx::Row;

use mcq_core::model::UserProfile;

use crate::repository::{IdentityRepository, ProfileRecord, StorageError};

use super::SqliteStore;

#[async_trait]
impl IdentityRepository for SqliteStore {
    async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, user_name, user_email
            FROM profile
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id: String = row
            .try_get("user_id")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let user_name: String = row
            .try_get("user_name")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let user_email: String = row
            .try_get("user_email")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(UserProfile::from_persisted(
            user_id, user_name, user_email,
        )))
    }

    async fn save_profile(&self, record: ProfileRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO profile (id, user_id, user_name, user_email, onboarded_at)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                user_name = excluded.user_name,
                user_email = excluded.user_email,
                onboarded_at = excluded.onboarded_at
            ",
        )
        .bind(&record.user_id)
        .bind(&record.user_name)
        .bind(&record.user_email)
        .bind(record.onboarded_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_profile(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM profile WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
