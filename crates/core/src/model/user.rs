use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserProfileError {
    #[error("name is empty")]
    EmptyName,

    #[error("email or roll number is empty")]
    EmptyEmail,
}

/// The locally stored identity, written once at onboarding.
///
/// The id is derived from the email/roll-number so repeat visits by the same
/// user map to the same history on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: String,
    user_name: String,
    user_email: String,
}

impl UserProfile {
    /// Build a profile from the onboarding form fields.
    ///
    /// # Errors
    ///
    /// Returns `UserProfileError` when either field is blank.
    pub fn onboard(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserProfileError> {
        let user_name = name.into().trim().to_string();
        if user_name.is_empty() {
            return Err(UserProfileError::EmptyName);
        }
        let user_email = email.into().trim().to_string();
        if user_email.is_empty() {
            return Err(UserProfileError::EmptyEmail);
        }

        let user_id = derive_user_id(&user_email);
        Ok(Self {
            user_id,
            user_name,
            user_email,
        })
    }

    /// Rehydrate a profile from persisted storage, trusting the stored id.
    #[must_use]
    pub fn from_persisted(user_id: String, user_name: String, user_email: String) -> Self {
        Self {
            user_id,
            user_name,
            user_email,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn user_email(&self) -> &str {
        &self.user_email
    }
}

/// Lowercase the email and collapse whitespace runs into underscores.
fn derive_user_id(email: &str) -> String {
    let mut id = String::with_capacity(email.len());
    let mut in_whitespace = false;
    for ch in email.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                id.push('_');
                in_whitespace = true;
            }
        } else {
            id.push(ch);
            in_whitespace = false;
        }
    }
    id
}
