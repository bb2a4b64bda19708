use serde::Serialize;
use storefront_auth::User;
use storefront_commerce::checkout::{Address, AddressDraft};
use storefront_commerce::ids::AddressId;
use storefront_commerce::validation;
use storefront_commerce::CommerceError;
use storefront_data::{path_segment, ApiError, HttpClient};

/// Body of `PUT /users/profile`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn new(name: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            phone: phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        }
    }

    /// Name required; phone, when given, must be 10 digits.
    pub fn validate(&self) -> Result<(), CommerceError> {
        validation::require(&self.name, "Name")?;
        if let Some(phone) = &self.phone {
            validation::require_phone(phone, "Phone number")?;
        }
        Ok(())
    }
}

/// `/users`: profile, avatar and address book.
#[derive(Debug, Clone)]
pub struct UsersApi {
    http: HttpClient,
}

impl UsersApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.http.get("/users/profile").send().await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.http.put("/users/profile").json(update)?.send().await
    }

    pub async fn upload_avatar(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        mime: &str,
    ) -> Result<User, ApiError> {
        self.http
            .post("/users/profile/avatar")
            .file("avatar", bytes, file_name, mime)
            .send()
            .await
    }

    pub async fn delete_avatar(&self) -> Result<User, ApiError> {
        self.http.delete("/users/profile/avatar").send().await
    }

    pub async fn addresses(&self) -> Result<Vec<Address>, ApiError> {
        self.http.get("/users/addresses").send().await
    }

    pub async fn add_address(&self, draft: &AddressDraft) -> Result<Vec<Address>, ApiError> {
        self.http.post("/users/addresses").json(draft)?.send().await
    }

    pub async fn update_address(
        &self,
        id: &AddressId,
        draft: &AddressDraft,
    ) -> Result<Vec<Address>, ApiError> {
        self.http
            .put(format!("/users/addresses/{}", path_segment(id.as_str())))
            .json(draft)?
            .send()
            .await
    }

    pub async fn delete_address(&self, id: &AddressId) -> Result<Vec<Address>, ApiError> {
        self.http
            .delete(format!("/users/addresses/{}", path_segment(id.as_str())))
            .send()
            .await
    }

    pub async fn set_default_address(&self, id: &AddressId) -> Result<Vec<Address>, ApiError> {
        self.http
            .put(format!("/users/addresses/{}/default", path_segment(id.as_str())))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_validation() {
        assert!(ProfileUpdate::new("Asha", None).validate().is_ok());
        assert!(ProfileUpdate::new("Asha", Some("9876543210".into()))
            .validate()
            .is_ok());
        assert!(ProfileUpdate::new(" ", None).validate().is_err());
        let err = ProfileUpdate::new("Asha", Some("98765".into()))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Phone number must be 10 digits");
        assert_eq!(ProfileUpdate::new("Asha", Some("  ".into())).phone, None);
    }
}
