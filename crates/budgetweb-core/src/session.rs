//! Session context passed explicitly to whatever needs the signed-in user

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::models::{UserId, UserProfile};

/// Opaque credential proving an authenticated session.
///
/// Debug output is redacted so tokens never reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token, rejecting values that cannot travel in a header
    pub fn new(raw: impl Into<String>) -> CoreResult<Self> {
        let raw = raw.into();
        let token = raw.trim();
        if token.is_empty() {
            return Err(CoreError::EmptyToken);
        }
        if token.chars().any(|c| c.is_whitespace() || c.is_control() || !c.is_ascii()) {
            return Err(CoreError::InvalidToken);
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BearerToken(***)")
    }
}

impl std::str::FromStr for BearerToken {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BearerToken::new(s)
    }
}

/// A token that `/profile` resolved to an identifiable user
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(skip)]
    token: BearerToken,
    user_id: UserId,
    profile: UserProfile,
}

impl Session {
    /// Build a session, or `None` when the profile has no usable id
    pub fn establish(token: BearerToken, profile: UserProfile) -> Option<Self> {
        let user_id = profile.user_id()?.clone();
        Some(Self {
            token,
            user_id,
            profile,
        })
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}
