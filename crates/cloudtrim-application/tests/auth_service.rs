mod common;

use cloudtrim_application::AuthService;
use cloudtrim_core::auth::{Credentials, SignupCredentials, User};
use cloudtrim_core::config::AuthMode;
use cloudtrim_core::error::ApiError;
use cloudtrim_core::store::{FetchStatus, Store};
use common::FakeApi;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn credentials() -> Credentials {
    Credentials::new("ops@acme.io", "secret")
}

#[tokio::test]
async fn test_remote_login_sets_session() {
    let store = Arc::new(Store::new());
    let auth = AuthService::new(store.clone(), Arc::new(FakeApi::default()), AuthMode::Remote);

    let user = auth
        .login(&CancellationToken::new(), &credentials())
        .await
        .unwrap();
    assert_eq!(user.company_name, "Acme");

    let state = store.snapshot();
    assert!(state.auth.session.is_authenticated());
    assert_eq!(state.auth.fetch.status, FetchStatus::Fulfilled);
    assert_eq!(auth.current_user(), Some(user));
}

#[tokio::test]
async fn test_rejected_login_records_message() {
    let store = Arc::new(Store::new());
    let api = FakeApi {
        session: Err(ApiError::request(401, "Invalid credentials")),
        ..Default::default()
    };
    let auth = AuthService::new(store.clone(), Arc::new(api), AuthMode::Remote);

    let err = auth
        .login(&CancellationToken::new(), &credentials())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let state = store.snapshot();
    assert!(!state.auth.session.is_authenticated());
    assert_eq!(state.auth.fetch.error.as_deref(), Some("Invalid credentials"));
}

#[tokio::test]
async fn test_demo_login_sends_nothing() {
    let store = Arc::new(Store::new());
    let api = Arc::new(FakeApi::default());
    let auth = AuthService::new(store.clone(), api.clone(), AuthMode::Demo);

    let user = auth
        .login(&CancellationToken::new(), &Credentials::new("anyone@x.io", "x"))
        .await
        .unwrap();
    assert_eq!(user, User::demo());
    assert_eq!(api.call_count(), 0);
    assert!(store.snapshot().auth.session.is_authenticated());
}

#[tokio::test]
async fn test_demo_signup_keeps_given_identity() {
    let store = Arc::new(Store::new());
    let auth = AuthService::new(store.clone(), Arc::new(FakeApi::default()), AuthMode::Demo);

    let user = auth
        .signup(
            &CancellationToken::new(),
            &SignupCredentials {
                email: "cfo@globex.io".to_string(),
                password: "pw".to_string(),
                company_name: "Globex".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(user.company_name, "Globex");
    assert_eq!(user.plan, "Free");
}

#[tokio::test]
async fn test_empty_email_refused_locally() {
    let store = Arc::new(Store::new());
    let api = Arc::new(FakeApi::default());
    let auth = AuthService::new(store.clone(), api.clone(), AuthMode::Remote);

    let result = auth
        .login(&CancellationToken::new(), &Credentials::new("  ", "pw"))
        .await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let store = Arc::new(Store::new());
    let api = FakeApi {
        logout: Err(ApiError::network("connection reset")),
        ..Default::default()
    };
    let auth = AuthService::new(store.clone(), Arc::new(api), AuthMode::Remote);
    let cancel = CancellationToken::new();

    auth.login(&cancel, &credentials()).await.unwrap();
    assert!(auth.logout(&cancel).await.is_err());

    let state = store.snapshot();
    assert!(!state.auth.session.is_authenticated());
    assert_eq!(state.auth.fetch.status, FetchStatus::Idle);
}
