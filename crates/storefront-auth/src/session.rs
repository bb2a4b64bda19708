//! Session lifecycle.

use std::sync::Arc;

use storefront_cache::{Cache, StorageKey};
use storefront_commerce::ids::UserId;
use storefront_data::SessionContext;

use crate::client::{AuthClient, AuthResponse};
use crate::user::{Credentials, SignupRequest, User};
use crate::AuthError;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    /// Reading persisted credentials at startup.
    Restoring,
    Authenticated,
}

/// The signed-in user and their token.
///
/// Owns the user record for the lifetime of the session. The token is
/// mirrored into the shared [`SessionContext`] so every resource client
/// sends it, and persisted so the session survives a restart.
#[derive(Debug)]
pub struct AuthSession {
    client: AuthClient,
    cache: Cache,
    context: Arc<SessionContext>,
    state: AuthState,
    user: Option<User>,
    token: Option<String>,
    is_loading: bool,
    error: Option<String>,
}

impl AuthSession {
    /// Create an unauthenticated session. The context should be the one the
    /// client's `HttpClient` was built with.
    pub fn new(client: AuthClient, cache: Cache) -> Self {
        let context = client.http().session().clone();
        Self {
            client,
            cache,
            context,
            state: AuthState::Unauthenticated,
            user: None,
            token: None,
            is_loading: false,
            error: None,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Canonical identifier of the signed-in user.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last failure message, if the last action failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    /// Load persisted credentials. Never touches the network.
    ///
    /// Returns whether the session is now authenticated. A missing or
    /// unreadable token or user leaves the session unauthenticated.
    pub async fn restore(&mut self) -> bool {
        self.state = AuthState::Restoring;

        let token = match self.cache.get_string(StorageKey::AuthToken).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted token");
                None
            }
        };
        let user = match self.cache.get::<User>(StorageKey::User).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted user");
                None
            }
        };

        match (token, user) {
            (Some(token), Some(user)) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.context.set_token(token.clone());
                self.token = Some(token);
                self.user = Some(user);
                self.state = AuthState::Authenticated;
                true
            }
            _ => {
                tracing::debug!("no persisted session");
                self.state = AuthState::Unauthenticated;
                false
            }
        }
    }

    /// Sign in with email and password.
    pub async fn login(&mut self, credentials: Credentials) -> Result<&User, AuthError> {
        self.error = None;
        if let Err(e) = credentials.validate() {
            self.error = Some(e.user_message());
            return Err(e);
        }

        self.is_loading = true;
        let result = self.client.login(&credentials).await;
        self.is_loading = false;

        match result {
            Ok(response) => Ok(self.establish(response, "login").await),
            Err(e) => {
                tracing::info!(error = %e, "login rejected");
                let e = AuthError::from(e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Create an account and sign in.
    pub async fn signup(&mut self, signup: SignupRequest) -> Result<&User, AuthError> {
        self.error = None;
        if let Err(e) = signup.validate() {
            self.error = Some(e.user_message());
            return Err(e);
        }

        self.is_loading = true;
        let result = self.client.register(&signup).await;
        self.is_loading = false;

        match result {
            Ok(response) => Ok(self.establish(response, "signup").await),
            Err(e) => {
                tracing::info!(error = %e, "signup rejected");
                let e = AuthError::from(e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Sign out. Always ends unauthenticated.
    ///
    /// The server-side invalidation is best-effort; its failure is logged
    /// and otherwise ignored.
    pub async fn logout(&mut self) {
        if self.context.has_token() {
            if let Err(e) = self.client.logout().await {
                tracing::warn!(error = %e, "logout request failed, clearing local session anyway");
            }
        }
        self.teardown().await;
        tracing::info!("logged out");
    }

    /// Replace the cached user record after a profile change.
    pub async fn update_user(&mut self, user: User) {
        if let Err(e) = self.cache.set(StorageKey::User, &user).await {
            tracing::warn!(error = %e, "failed to persist user");
        }
        self.user = Some(user);
    }

    /// Catch up with a teardown done by the transport (a 401 clears the
    /// shared token). Returns whether the session was torn down.
    pub async fn sync_with_context(&mut self) -> bool {
        if self.state == AuthState::Authenticated && !self.context.has_token() {
            tracing::warn!("token revoked by server, ending session");
            self.teardown().await;
            return true;
        }
        false
    }

    async fn establish(&mut self, response: AuthResponse, action: &'static str) -> &User {
        let AuthResponse { token, user } = response;
        if let Err(e) = self.cache.set_string(StorageKey::AuthToken, token.clone()).await {
            tracing::warn!(error = %e, "failed to persist token");
        }
        if let Err(e) = self.cache.set(StorageKey::User, &user).await {
            tracing::warn!(error = %e, "failed to persist user");
        }
        self.context.set_token(token.clone());
        tracing::info!(user_id = %user.id, action, "authenticated");
        self.token = Some(token);
        self.state = AuthState::Authenticated;
        self.user.insert(user)
    }

    async fn teardown(&mut self) {
        self.context.clear();
        if let Err(e) = self.cache.clear_session().await {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        self.token = None;
        self.user = None;
        self.error = None;
        self.state = AuthState::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cache::MemoryStore;
    use storefront_data::{ApiConfig, HttpClient, RetryPolicy};

    fn session_with(cache: Cache) -> AuthSession {
        let config = ApiConfig::new("http://127.0.0.1:1/api")
            .unwrap()
            .with_retry(RetryPolicy::none());
        let http = HttpClient::new(&config, Arc::new(SessionContext::new())).unwrap();
        AuthSession::new(AuthClient::new(http), cache)
    }

    #[tokio::test]
    async fn test_restore_with_token_and_user() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_string(StorageKey::AuthToken, "tok").await.unwrap();
        cache
            .set_string(StorageKey::User, r#"{"_id":"u9","name":"N","email":"n@x.in"}"#)
            .await
            .unwrap();

        let mut session = session_with(cache);
        assert!(session.restore().await);
        assert!(session.is_authenticated());
        assert_eq!(session.user_id().map(|id| id.as_str()), Some("u9"));
        assert_eq!(session.context().token().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_restore_requires_both_values() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_string(StorageKey::AuthToken, "tok").await.unwrap();
        let mut session = session_with(cache);
        assert!(!session.restore().await);
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(!session.context().has_token());
    }

    #[tokio::test]
    async fn test_validation_fails_before_network() {
        let mut session = session_with(Cache::new(MemoryStore::new()));
        let err = session
            .signup(SignupRequest::new("A", "a@x.in", "123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(
            session.error(),
            Some("Password must be at least 6 characters")
        );
    }

    #[tokio::test]
    async fn test_logout_when_server_unreachable() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_string(StorageKey::AuthToken, "tok").await.unwrap();
        cache
            .set_string(StorageKey::User, r#"{"id":"u1","name":"N","email":"n@x.in"}"#)
            .await
            .unwrap();
        let mut session = session_with(cache.clone());
        session.restore().await;

        session.logout().await;
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert!(session.user().is_none());
        assert!(!session.context().has_token());
        assert_eq!(cache.get_string(StorageKey::AuthToken).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sync_with_context_after_revocation() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_string(StorageKey::AuthToken, "tok").await.unwrap();
        cache
            .set_string(StorageKey::User, r#"{"id":"u1","name":"N","email":"n@x.in"}"#)
            .await
            .unwrap();
        let mut session = session_with(cache);
        session.restore().await;

        assert!(!session.sync_with_context().await);
        session.context().clear();
        assert!(session.sync_with_context().await);
        assert!(session.user().is_none());
    }
}
