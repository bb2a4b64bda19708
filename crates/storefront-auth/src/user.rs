//! User types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use storefront_commerce::ids::UserId;

use crate::AuthError;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    #[serde(rename = "user")]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// The signed-in user.
///
/// The backend has used both `id` and `_id` for the identifier. Both are
/// accepted on the way in (`id` wins when both are present) and only `id`
/// is written back out, so the rest of the client sees one canonical field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawUser")]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

impl TryFrom<RawUser> for User {
    type Error = AuthError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .or(raw.legacy_id.filter(|id| !id.is_empty()))
            .ok_or(AuthError::MissingUserId)?;
        let role = raw
            .role
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default();
        Ok(User {
            id: UserId::new(id),
            name: raw.name,
            email: raw.email,
            role,
            phone: raw.phone.filter(|p| !p.is_empty()),
            avatar: raw.avatar.filter(|a| !a.is_empty()),
        })
    }
}

impl User {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// Initials for an avatar placeholder.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Login form.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation("Please fill in all fields".to_string()));
        }
        Ok(())
    }
}

/// Signup form.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Every field non-empty and a password of at least
    /// [`MIN_PASSWORD_LEN`] characters.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation("Please fill in all fields".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prefers_id() {
        let user: User = serde_json::from_str(
            r#"{"id":"a1","_id":"legacy","name":"Asha","email":"a@x.in","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(user.id.as_str(), "a1");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_user_falls_back_to_legacy_id() {
        let user: User =
            serde_json::from_str(r#"{"_id":"m42","name":"Ravi","email":"r@x.in"}"#).unwrap();
        assert_eq!(user.id.as_str(), "m42");
        assert_eq!(user.role, Role::Customer);

        let written = serde_json::to_value(&user).unwrap();
        assert_eq!(written["id"], "m42");
        assert!(written.get("_id").is_none());
        assert_eq!(written["role"], "user");
    }

    #[test]
    fn test_user_without_id_is_rejected() {
        assert!(serde_json::from_str::<User>(r#"{"name":"x","email":"y"}"#).is_err());
        assert!(serde_json::from_str::<User>(r#"{"id":"","name":"x","email":"y"}"#).is_err());
    }

    #[test]
    fn test_user_round_trips_through_cache_form() {
        let user: User =
            serde_json::from_str(r#"{"_id":"m42","name":"Ravi Kumar","email":"r@x.in"}"#)
                .unwrap();
        let again: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(again, user);
        assert_eq!(again.initials(), "RK");
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("a@x.in", "secret").validate().is_ok());
        assert!(Credentials::new("  ", "secret").validate().is_err());
        assert!(Credentials::new("a@x.in", "").validate().is_err());
    }

    #[test]
    fn test_signup_password_length() {
        let err = SignupRequest::new("A", "a@x.in", "12345").validate().unwrap_err();
        assert_eq!(err.user_message(), "Password must be at least 6 characters");
        assert!(SignupRequest::new("A", "a@x.in", "123456").validate().is_ok());
        assert!(SignupRequest::new("", "a@x.in", "123456").validate().is_err());
    }
}
