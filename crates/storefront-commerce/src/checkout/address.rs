//! Address types.

use crate::error::CommerceError;
use crate::ids::AddressId;
use crate::validation;
use serde::{Deserialize, Serialize};

/// Kind of saved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    Home,
    Work,
    Other,
}

impl AddressType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AddressType::Home => "Home",
            AddressType::Work => "Work",
            AddressType::Other => "Other",
        }
    }
}

/// A saved delivery address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Address {
    /// Address ID.
    pub id: AddressId,
    /// Address kind.
    #[serde(rename = "type", default)]
    pub address_type: AddressType,
    /// Custom label (e.g., "Mom's place").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Recipient name.
    pub name: String,
    /// Recipient phone.
    pub phone: String,
    /// Second phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    /// House/flat and street.
    pub address_line1: String,
    /// Area or locality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    /// Nearby landmark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal index number.
    pub pincode: String,
    /// Country name.
    #[serde(default = "default_country")]
    pub country: String,
    /// Whether this is the user's default address.
    #[serde(default)]
    pub is_default: bool,
}

keyed_record!(Address);

fn default_country() -> String {
    "India".to_string()
}

impl Address {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address_line1.clone()];
        if let Some(ref line2) = self.address_line2 {
            parts.push(line2.clone());
        }
        if let Some(ref landmark) = self.landmark {
            parts.push(format!("Near {}", landmark));
        }
        parts.push(self.city.clone());
        parts.push(format!("{} - {}", self.state, self.pincode));
        parts.join(", ")
    }

    /// Heading shown on the address card.
    pub fn title(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.address_type.display_name())
    }

    /// Editable copy of this address.
    pub fn to_draft(&self) -> AddressDraft {
        AddressDraft {
            address_type: self.address_type,
            label: self.label.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            alternate_phone: self.alternate_phone.clone(),
            address_line1: self.address_line1.clone(),
            address_line2: self.address_line2.clone(),
            landmark: self.landmark.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode.clone(),
            country: self.country.clone(),
            is_default: self.is_default,
        }
    }
}

/// Address form contents, the body of address create/update calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    #[serde(rename = "type")]
    pub address_type: AddressType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub is_default: bool,
}

impl Default for AddressDraft {
    fn default() -> Self {
        Self {
            address_type: AddressType::Home,
            label: None,
            name: String::new(),
            phone: String::new(),
            alternate_phone: None,
            address_line1: String::new(),
            address_line2: None,
            landmark: None,
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            country: default_country(),
            is_default: false,
        }
    }
}

impl AddressDraft {
    /// Check required fields and digit formats before saving.
    pub fn validate(&self) -> Result<(), CommerceError> {
        validation::require(&self.name, "Name")?;
        validation::require_phone(&self.phone, "Phone number")?;
        if let Some(ref alternate) = self.alternate_phone {
            if !alternate.trim().is_empty() {
                validation::require_phone(alternate, "Alternate phone number")?;
            }
        }
        validation::require(&self.address_line1, "Address line 1")?;
        validation::require(&self.city, "City")?;
        validation::require(&self.state, "State")?;
        validation::require_pincode(&self.pincode)?;
        Ok(())
    }
}

/// The address checkout picks when the user has not chosen one: the first
/// default-flagged address, or failing that the first address.
pub fn preferred_address(addresses: &[Address]) -> Option<&Address> {
    addresses
        .iter()
        .find(|a| a.is_default)
        .or_else(|| addresses.first())
}

/// Flag `id` as the only default address.
///
/// Returns false, leaving the list untouched, when `id` is not in it.
pub fn mark_default(addresses: &mut [Address], id: &AddressId) -> bool {
    if !addresses.iter().any(|a| &a.id == id) {
        return false;
    }
    for address in addresses.iter_mut() {
        address.is_default = &address.id == id;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: &str, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            address_type: AddressType::Home,
            label: None,
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            alternate_phone: None,
            address_line1: "12 MG Road".to_string(),
            address_line2: None,
            landmark: Some("Metro station".to_string()),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            country: "India".to_string(),
            is_default,
        }
    }

    #[test]
    fn test_address_deserializes() {
        let json = r#"{
            "_id": "a1",
            "type": "work",
            "name": "Asha",
            "phone": "9876543210",
            "addressLine1": "1 Main St",
            "city": "Pune",
            "state": "MH",
            "pincode": "411001",
            "isDefault": true
        }"#;
        let addr: Address = serde_json::from_str(json).unwrap();
        assert_eq!(addr.address_type, AddressType::Work);
        assert_eq!(addr.country, "India");
        assert!(addr.is_default);
        assert_eq!(addr.title(), "Work");
    }

    #[test]
    fn test_address_with_both_id_keys() {
        let json = r#"{
            "_id": "legacy",
            "id": "a1",
            "name": "Asha",
            "phone": "9876543210",
            "addressLine1": "1 Main St",
            "city": "Pune",
            "state": "MH",
            "pincode": "411001"
        }"#;
        let addr: Address = serde_json::from_str(json).unwrap();
        assert_eq!(addr.id.as_str(), "a1");
    }

    #[test]
    fn test_one_line() {
        let line = address("a1", false).one_line();
        assert_eq!(
            line,
            "12 MG Road, Near Metro station, Bengaluru, Karnataka - 560001"
        );
    }

    #[test]
    fn test_preferred_address() {
        let list = vec![address("a1", false), address("a2", true)];
        assert_eq!(preferred_address(&list).unwrap().id.as_str(), "a2");

        let no_default = vec![address("a1", false), address("a2", false)];
        assert_eq!(preferred_address(&no_default).unwrap().id.as_str(), "a1");

        assert!(preferred_address(&[]).is_none());
    }

    #[test]
    fn test_mark_default_leaves_exactly_one() {
        let mut list = vec![address("a1", true), address("a2", false), address("a3", true)];
        assert!(mark_default(&mut list, &AddressId::new("a2")));
        let defaults: Vec<&str> = list
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(defaults, vec!["a2"]);
    }

    #[test]
    fn test_mark_default_unknown_id() {
        let mut list = vec![address("a1", true)];
        assert!(!mark_default(&mut list, &AddressId::new("zz")));
        assert!(list[0].is_default);
    }

    #[test]
    fn test_draft_validation() {
        let draft = address("a1", false).to_draft();
        assert!(draft.validate().is_ok());

        let mut bad_phone = draft.clone();
        bad_phone.phone = "98765".to_string();
        assert!(bad_phone.validate().is_err());

        let mut bad_alt = draft.clone();
        bad_alt.alternate_phone = Some("12".to_string());
        assert!(bad_alt.validate().is_err());

        let mut blank_alt = draft.clone();
        blank_alt.alternate_phone = Some(String::new());
        assert!(blank_alt.validate().is_ok());

        let mut bad_pin = draft.clone();
        bad_pin.pincode = "5600".to_string();
        assert!(bad_pin.validate().is_err());

        let mut no_city = draft;
        no_city.city = " ".to_string();
        assert!(no_city.validate().is_err());
    }
}
