//! Login, signup and logout against the store.

use crate::tracking::{reject, track};
use cloudtrim_core::api::CloudTrimApi;
use cloudtrim_core::auth::{Credentials, SignupCredentials, User};
use cloudtrim_core::config::AuthMode;
use cloudtrim_core::error::{ApiError, Result};
use cloudtrim_core::store::{Action, Operation, Store};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Drives the authentication slice of the store.
///
/// In [`AuthMode::Demo`] nothing is sent: any login resolves locally to
/// [`User::demo`] and no token is stored.
pub struct AuthService {
    store: Arc<Store>,
    api: Arc<dyn CloudTrimApi>,
    mode: AuthMode,
}

impl AuthService {
    pub fn new(store: Arc<Store>, api: Arc<dyn CloudTrimApi>, mode: AuthMode) -> Self {
        Self { store, api, mode }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub async fn login(&self, cancel: &CancellationToken, credentials: &Credentials) -> Result<User> {
        if credentials.email.trim().is_empty() {
            return Err(ApiError::invalid_input("email must not be empty"));
        }

        let result = match self.mode {
            AuthMode::Demo => track(&self.store, cancel, Operation::Authenticate, async {
                Ok(User::demo())
            })
            .await,
            AuthMode::Remote => track(&self.store, cancel, Operation::Authenticate, async {
                self.api
                    .login(cancel, credentials)
                    .await
                    .map(|payload| payload.into_user())
            })
            .await,
        };

        self.settle(result)
    }

    pub async fn signup(
        &self,
        cancel: &CancellationToken,
        credentials: &SignupCredentials,
    ) -> Result<User> {
        if credentials.email.trim().is_empty() {
            return Err(ApiError::invalid_input("email must not be empty"));
        }

        let result = match self.mode {
            AuthMode::Demo => {
                let user = User {
                    email: credentials.email.clone(),
                    company_name: credentials.company_name.clone(),
                    plan: User::demo().plan,
                };
                track(&self.store, cancel, Operation::Authenticate, async { Ok(user) }).await
            }
            AuthMode::Remote => track(&self.store, cancel, Operation::Authenticate, async {
                self.api
                    .signup(cancel, credentials)
                    .await
                    .map(|payload| payload.into_user())
            })
            .await,
        };

        self.settle(result)
    }

    /// Ends the session.
    ///
    /// The local session is always cleared. A failed server call is returned
    /// so the caller can report it, but it does not keep the user signed in.
    pub async fn logout(&self, cancel: &CancellationToken) -> Result<()> {
        let outcome = match self.mode {
            AuthMode::Demo => Ok(()),
            AuthMode::Remote => self.api.logout(cancel).await,
        };

        self.store.dispatch(Action::LoggedOut);
        tracing::info!("[AuthService] Logged out");

        if let Err(err) = &outcome {
            tracing::warn!("[AuthService] Server logout failed: {}", err);
        }
        outcome
    }

    /// The signed-in user in the current snapshot, if any.
    pub fn current_user(&self) -> Option<User> {
        self.store.snapshot().auth.session.user().cloned()
    }

    fn settle(&self, result: Result<User>) -> Result<User> {
        match result {
            Ok(user) => {
                tracing::info!("[AuthService] Signed in as {} ({})", user.email, self.mode);
                self.store.dispatch(Action::LoginSucceeded { user: user.clone() });
                Ok(user)
            }
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(err) => Err(reject(&self.store, Operation::Authenticate, err)),
        }
    }
}
