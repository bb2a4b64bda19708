//! Persisted keys.

/// Every value the client persists between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Bearer token of the signed-in user.
    AuthToken,
    /// Serialized user record.
    User,
    /// Last known cart lines. Best-effort; may be stale.
    CartSnapshot,
    /// `light`, `dark` or `system`.
    ThemeMode,
    /// Whether onboarding has been completed.
    OnboardingComplete,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::AuthToken,
        StorageKey::User,
        StorageKey::CartSnapshot,
        StorageKey::ThemeMode,
        StorageKey::OnboardingComplete,
    ];

    /// Key string in the backing store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AuthToken => "auth_token",
            StorageKey::User => "user",
            StorageKey::CartSnapshot => "cart_snapshot",
            StorageKey::ThemeMode => "theme_mode",
            StorageKey::OnboardingComplete => "onboarding_complete",
        }
    }

    /// Keys cleared on logout.
    pub fn is_session_scoped(&self) -> bool {
        matches!(
            self,
            StorageKey::AuthToken | StorageKey::User | StorageKey::CartSnapshot
        )
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let keys: HashSet<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), StorageKey::ALL.len());
    }

    #[test]
    fn test_session_scope() {
        assert!(StorageKey::AuthToken.is_session_scoped());
        assert!(!StorageKey::ThemeMode.is_session_scoped());
        assert!(!StorageKey::OnboardingComplete.is_session_scoped());
    }
}
