//! Who is signed in.
//!
//! The session is an explicit value owned by the application root. A stored
//! bearer token is the only credential; its presence means authenticated.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{AuthToken, LoginCredentials};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Covers every failed sign-in: blank fields, rejected credentials,
    /// transport and decode failures alike.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("could not store the session token: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token storage failed: {0}")]
pub struct TokenStoreError(pub String);

/// Persistence for the bearer token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError>;

    fn clear(&mut self);
}

/// Token store kept in memory. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(token.into());
        store
    }

    pub fn stored(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.stored()
    }

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) {
        self.slot.borrow_mut().take();
    }
}

#[derive(Debug)]
pub struct Session<S> {
    store: S,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    /// Picks up a token left by an earlier visit.
    pub fn restore(store: S) -> Self {
        let token = store.load().filter(|token| !token.is_empty());
        debug!(authenticated = token.is_some(), "session restored");
        Self { store, token }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Rejects credentials that cannot possibly succeed, before any request.
    pub fn check_credentials(credentials: &LoginCredentials) -> Result<(), AuthError> {
        if credentials.is_complete() {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Records the outcome of a token request. Nothing is persisted unless
    /// the request succeeded with a non-empty token.
    pub fn complete_login(&mut self, result: ApiResult<AuthToken>) -> Result<(), AuthError> {
        let token = match result {
            Ok(token) if !token.access_token.is_empty() => token,
            Ok(_) => {
                warn!("token response carried no access token");
                return Err(AuthError::InvalidCredentials);
            }
            Err(error) => {
                warn!(code = %error.code(), "sign-in failed: {}", error);
                return Err(AuthError::InvalidCredentials);
            }
        };

        self.store
            .save(&token.access_token)
            .map_err(|error| AuthError::Storage(error.to_string()))?;
        self.token = Some(token.access_token);
        info!("signed in");
        Ok(())
    }

    pub async fn login<A>(&mut self, api: &A, credentials: &LoginCredentials) -> Result<(), AuthError>
    where
        A: AuthApi + ?Sized,
    {
        Self::check_credentials(credentials)?;
        let result = api.request_token(credentials).await;
        self.complete_login(result)
    }

    /// Forgets the token. Safe to call when already signed out.
    pub fn logout(&mut self) {
        self.store.clear();
        if self.token.take().is_some() {
            info!("signed out");
        }
    }

    /// Ends the session when `error` says the token was rejected. Returns
    /// whether it did.
    pub fn expire_on(&mut self, error: &ApiError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        warn!("session token rejected, signing out");
        self.logout();
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::Cell;

    struct FakeAuth {
        calls: Cell<usize>,
    }

    impl FakeAuth {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuth {
        async fn request_token(&self, credentials: &LoginCredentials) -> ApiResult<AuthToken> {
            self.calls.set(self.calls.get() + 1);
            if credentials.username == "operator" && credentials.password == "hunter2" {
                Ok(AuthToken {
                    access_token: "tok-123".to_string(),
                    token_type: "bearer".to_string(),
                })
            } else {
                Err(ApiError::status(401, "Incorrect username or password"))
            }
        }
    }

    #[tokio::test]
    async fn test_login_persists_the_token() {
        let store = MemoryTokenStore::new();
        let mut session = Session::restore(store.clone());
        let api = FakeAuth::new();

        session
            .login(&api, &LoginCredentials::new("operator", "hunter2"))
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-123"));
        assert_eq!(store.stored().as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_wrong_credentials_leave_the_session_signed_out() {
        let store = MemoryTokenStore::new();
        let mut session = Session::restore(store.clone());
        let api = FakeAuth::new();

        let result = session
            .login(&api, &LoginCredentials::new("operator", "wrong"))
            .await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());
        assert_eq!(store.stored(), None);
    }

    #[tokio::test]
    async fn test_blank_credentials_issue_no_request() {
        let mut session = Session::restore(MemoryTokenStore::new());
        let api = FakeAuth::new();

        let result = session.login(&api, &LoginCredentials::new("", "hunter2")).await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(api.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_logout_after_login_clears_the_token() {
        let store = MemoryTokenStore::new();
        let mut session = Session::restore(store.clone());
        session
            .login(&FakeAuth::new(), &LoginCredentials::new("operator", "hunter2"))
            .await
            .unwrap();

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(store.stored(), None);

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_restore_reads_an_existing_token() {
        assert!(Session::restore(MemoryTokenStore::with_token("abc")).is_authenticated());
        assert!(!Session::restore(MemoryTokenStore::with_token("")).is_authenticated());
        assert!(!Session::restore(MemoryTokenStore::new()).is_authenticated());
    }

    #[test]
    fn test_only_unauthorized_errors_expire_the_session() {
        let store = MemoryTokenStore::with_token("abc");
        let mut session = Session::restore(store.clone());

        assert!(!session.expire_on(&ApiError::status(500, "boom")));
        assert!(session.is_authenticated());

        assert!(session.expire_on(&ApiError::status(401, "expired")));
        assert!(!session.is_authenticated());
        assert_eq!(store.stored(), None);
    }

    #[test]
    fn test_empty_token_response_is_a_failed_login() {
        let mut session = Session::restore(MemoryTokenStore::new());
        let result = session.complete_login(Ok(AuthToken {
            access_token: String::new(),
            token_type: "bearer".to_string(),
        }));
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());
    }
}
