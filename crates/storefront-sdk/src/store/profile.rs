//! Profile and address book slice.

use storefront_auth::User;
use storefront_commerce::checkout::{mark_default, Address, AddressDraft};
use storefront_commerce::ids::AddressId;
use storefront_data::ApiError;

use super::SliceStatus;
use crate::api::{ProfileUpdate, UsersApi};
use crate::StoreError;

/// Profile record and saved addresses.
#[derive(Debug)]
pub struct ProfileStore {
    api: UsersApi,
    profile: Option<User>,
    addresses: Vec<Address>,
    status: SliceStatus,
}

impl ProfileStore {
    pub fn new(api: UsersApi) -> Self {
        Self {
            api,
            profile: None,
            addresses: Vec::new(),
            status: SliceStatus::default(),
        }
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn address(&self, id: &AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| &a.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    pub fn status(&self) -> &SliceStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub async fn fetch_profile(&mut self) -> Result<&User, StoreError> {
        self.status.begin();
        let result = self.api.profile().await;
        self.settle_profile("fetch_profile", result)
    }

    /// Validated before sending: name required, phone 10 digits if given.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<&User, StoreError> {
        self.status.begin();
        if let Err(e) = update.validate() {
            return Err(self.status.fail("profile", "update_profile", e));
        }
        let result = self.api.update_profile(&update).await;
        self.settle_profile("update_profile", result)
    }

    pub async fn upload_avatar(
        &mut self,
        bytes: Vec<u8>,
        file_name: &str,
        mime: &str,
    ) -> Result<&User, StoreError> {
        self.status.begin();
        let result = self.api.upload_avatar(bytes, file_name, mime).await;
        self.settle_profile("upload_avatar", result)
    }

    pub async fn delete_avatar(&mut self) -> Result<&User, StoreError> {
        self.status.begin();
        let result = self.api.delete_avatar().await;
        self.settle_profile("delete_avatar", result)
    }

    pub async fn fetch_addresses(&mut self) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.addresses().await;
        self.settle_addresses("fetch_addresses", result)
    }

    /// Validated before sending.
    pub async fn add_address(&mut self, draft: AddressDraft) -> Result<(), StoreError> {
        self.status.begin();
        if let Err(e) = draft.validate() {
            return Err(self.status.fail("profile", "add_address", e));
        }
        let result = self.api.add_address(&draft).await;
        self.settle_addresses("add_address", result)
    }

    /// Validated before sending.
    pub async fn update_address(
        &mut self,
        id: &AddressId,
        draft: AddressDraft,
    ) -> Result<(), StoreError> {
        self.status.begin();
        if let Err(e) = draft.validate() {
            return Err(self.status.fail("profile", "update_address", e));
        }
        let result = self.api.update_address(id, &draft).await;
        self.settle_addresses("update_address", result)
    }

    pub async fn delete_address(&mut self, id: &AddressId) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.delete_address(id).await;
        self.settle_addresses("delete_address", result)
    }

    /// Make `id` the default address.
    ///
    /// Afterwards exactly one address is flagged default and it is `id`,
    /// whatever flags the server's list carried.
    pub async fn set_default(&mut self, id: &AddressId) -> Result<(), StoreError> {
        self.status.begin();
        let mut addresses = match self.api.set_default_address(id).await {
            Ok(addresses) => addresses,
            Err(e) => return Err(self.status.fail("profile", "set_default", e)),
        };
        if !mark_default(&mut addresses, id) {
            let err = StoreError::NotFound(format!("Address {}", id));
            return Err(self.status.fail("profile", "set_default", err));
        }
        tracing::info!(address_id = %id, "default address changed");
        self.addresses = addresses;
        self.status.succeed();
        Ok(())
    }

    /// Drop local state (sign-out).
    pub fn reset(&mut self) {
        self.profile = None;
        self.addresses.clear();
        self.status = SliceStatus::default();
    }

    fn settle_profile(
        &mut self,
        action: &'static str,
        result: Result<User, ApiError>,
    ) -> Result<&User, StoreError> {
        match result {
            Ok(user) => {
                tracing::debug!(action, user_id = %user.id, "profile updated");
                self.status.succeed();
                Ok(self.profile.insert(user))
            }
            Err(e) => Err(self.status.fail("profile", action, e)),
        }
    }

    fn settle_addresses(
        &mut self,
        action: &'static str,
        result: Result<Vec<Address>, ApiError>,
    ) -> Result<(), StoreError> {
        match result {
            Ok(addresses) => {
                tracing::debug!(action, count = addresses.len(), "addresses updated");
                self.addresses = addresses;
                self.status.succeed();
                Ok(())
            }
            Err(e) => Err(self.status.fail("profile", action, e)),
        }
    }
}
