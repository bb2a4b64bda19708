//! Bearer token shared between resource clients.

use tokio::sync::watch;

/// Holds the bearer token for the current process session.
///
/// One context is created per application (or per test) and handed to every
/// client by `Arc`. Login and restore set the token; logout and any 401
/// response clear it. Observers can [`subscribe`](Self::subscribe) to react
/// to changes, which is how the auth session notices a transport-side
/// teardown.
#[derive(Debug)]
pub struct SessionContext {
    token: watch::Sender<Option<String>>,
}

impl SessionContext {
    /// Create an empty session.
    pub fn new() -> Self {
        let (token, _) = watch::channel(None);
        Self { token }
    }

    /// Create a session that already carries a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Attach a token to every client sharing this context.
    pub fn set_token(&self, token: impl Into<String>) {
        self.token.send_replace(Some(token.into()));
    }

    /// Detach the token. Returns whether one was present.
    pub fn clear(&self) -> bool {
        self.token.send_replace(None).is_some()
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn has_token(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Watch token changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let session = SessionContext::new();
        assert!(!session.has_token());
        assert!(!session.clear());

        session.set_token("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert!(session.clear());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let a = SessionContext::with_token("a");
        let b = SessionContext::new();
        assert!(a.has_token());
        assert!(!b.has_token());
    }

    #[tokio::test]
    async fn test_subscriber_sees_clear() {
        let session = SessionContext::with_token("abc");
        let mut rx = session.subscribe();
        session.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
