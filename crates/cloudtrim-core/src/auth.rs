//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(alias = "companyName", default)]
    pub company_name: String,
    #[serde(default)]
    pub plan: String,
}

impl User {
    /// The user every demo login resolves to.
    pub fn demo() -> Self {
        Self {
            email: "test@example.com".to_string(),
            company_name: "Test Company".to_string(),
            plan: "Free".to_string(),
        }
    }
}

/// Client-side authenticated-user context.
///
/// Authentication is derived from the presence of a user, so a session can
/// never claim to be authenticated without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// The signed-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Login form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Signup form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupCredentials {
    pub email: String,
    pub password: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
}

/// Successful login/signup response.
///
/// The backend either wraps the user (`{"token": .., "user": {..}}`) or
/// returns the user fields at the top level; both decode here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub user: UserEnvelope,
}

/// Either `{"user": {..}}` or the bare user fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl SessionPayload {
    pub fn new(token: Option<String>, user: User) -> Self {
        Self {
            token,
            user: UserEnvelope::Wrapped { user },
        }
    }

    pub fn into_user(self) -> User {
        match self.user {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        }
    }
}
