//! # User & Profile
//!
//! The current shopper as held by the store.
//!
//! ## Shape
//! ```text
//! User
//! ├── id, name, email, avatar?, role
//! └── profile: Option<Profile>      ← None until the shopper saves anything
//!     ├── address?                   (billing)
//!     ├── payment_methods[]          (at most one is_default)
//!     ├── preferences?
//!     └── delivery_addresses[]       (at most one is_default)
//! ```
//!
//! The authentication collaborator supplies the `User`. The store only
//! replaces it (`set_user`) or applies a [`ProfileEdit`] to it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Role
// =============================================================================

/// What the account is allowed to do in the marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    User,
    Admin,
    Seller,
}

// =============================================================================
// User
// =============================================================================

/// The signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub role: Role,
    /// Saved addresses, cards and preferences. `None` until first saved.
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl User {
    /// Creates a user with no profile yet.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            role,
            profile: None,
        }
    }

    /// Applies a profile edit, creating an empty profile first if needed.
    pub fn apply(&mut self, edit: ProfileEdit) {
        self.profile.get_or_insert_with(Profile::default).apply(edit);
    }
}

// =============================================================================
// Profile
// =============================================================================

/// Optional extension record carrying everything a shopper saves over time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Profile {
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub delivery_addresses: Vec<Address>,
}

impl Profile {
    /// Returns the delivery address marked as default, if any.
    pub fn default_delivery_address(&self) -> Option<&Address> {
        self.delivery_addresses.iter().find(|a| a.is_default)
    }

    /// Returns the payment method marked as default, if any.
    pub fn default_payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.is_default)
    }

    /// Applies one edit.
    ///
    /// ## Default Invariant
    /// At most one delivery address and at most one payment method carry
    /// `is_default`. Adding a default record (or selecting a default
    /// address) clears the flag on the others of its kind.
    pub fn apply(&mut self, edit: ProfileEdit) {
        match edit {
            ProfileEdit::AddDeliveryAddress(address) => {
                if address.is_default {
                    for existing in &mut self.delivery_addresses {
                        existing.is_default = false;
                    }
                }
                self.delivery_addresses.push(address);
            }
            ProfileEdit::RemoveDeliveryAddress(id) => {
                self.delivery_addresses.retain(|a| a.id != id);
            }
            ProfileEdit::SetDefaultDeliveryAddress(id) => {
                for address in &mut self.delivery_addresses {
                    address.is_default = address.id == id;
                }
            }
            ProfileEdit::AddPaymentMethod(method) => {
                if method.is_default {
                    for existing in &mut self.payment_methods {
                        existing.is_default = false;
                    }
                }
                self.payment_methods.push(method);
            }
            ProfileEdit::RemovePaymentMethod(id) => {
                self.payment_methods.retain(|m| m.id != id);
            }
            ProfileEdit::SetPreferences(preferences) => {
                self.preferences = Some(preferences);
            }
        }
    }
}

/// A single change to the current user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
#[ts(export)]
pub enum ProfileEdit {
    AddDeliveryAddress(Address),
    RemoveDeliveryAddress(String),
    SetDefaultDeliveryAddress(String),
    AddPaymentMethod(PaymentMethod),
    RemovePaymentMethod(String),
    SetPreferences(Preferences),
}

// =============================================================================
// Address
// =============================================================================

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Address {
    pub id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    #[serde(default)]
    pub is_default: bool,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a saved payment method charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentKind {
    Card,
    Paypal,
}

/// A saved payment method. Only display data is kept (brand, last four
/// digits, expiry); card numbers never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    #[serde(default)]
    pub last4: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub expiry_month: Option<u8>,
    #[serde(default)]
    pub expiry_year: Option<u16>,
    #[serde(default)]
    pub is_default: bool,
}

// =============================================================================
// Preferences
// =============================================================================

/// Communication and account preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Preferences {
    pub newsletter: bool,
    pub marketing_emails: bool,
    pub two_factor_auth: bool,
    /// ISO 4217 code, e.g. "USD".
    pub default_currency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            newsletter: false,
            marketing_emails: false,
            two_factor_auth: false,
            default_currency: "USD".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: &str, is_default: bool) -> Address {
        Address {
            id: id.to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            zip_code: "62701".to_string(),
            is_default,
        }
    }

    fn card(id: &str) -> PaymentMethod {
        PaymentMethod {
            id: id.to_string(),
            kind: PaymentKind::Card,
            last4: Some("4242".to_string()),
            brand: Some("visa".to_string()),
            expiry_month: Some(12),
            expiry_year: Some(2030),
            is_default: false,
        }
    }

    #[test]
    fn test_edit_creates_profile_on_first_use() {
        let mut user = User::new("u1", "Ada", "ada@example.com", Role::User);
        assert!(user.profile.is_none());

        user.apply(ProfileEdit::AddPaymentMethod(card("pm_1")));

        let profile = user.profile.as_ref().unwrap();
        assert_eq!(profile.payment_methods.len(), 1);
        assert!(profile.delivery_addresses.is_empty());
    }

    #[test]
    fn test_adding_default_address_clears_previous_default() {
        let mut profile = Profile::default();
        profile.apply(ProfileEdit::AddDeliveryAddress(address("a1", true)));
        profile.apply(ProfileEdit::AddDeliveryAddress(address("a2", false)));
        profile.apply(ProfileEdit::AddDeliveryAddress(address("a3", true)));

        let defaults: Vec<_> = profile
            .delivery_addresses
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(defaults, vec!["a3"]);
    }

    #[test]
    fn test_set_default_address() {
        let mut profile = Profile::default();
        profile.apply(ProfileEdit::AddDeliveryAddress(address("a1", true)));
        profile.apply(ProfileEdit::AddDeliveryAddress(address("a2", false)));

        profile.apply(ProfileEdit::SetDefaultDeliveryAddress("a2".to_string()));

        assert_eq!(profile.default_delivery_address().unwrap().id, "a2");
        assert!(!profile.delivery_addresses[0].is_default);
    }

    #[test]
    fn test_remove_unknown_ids_are_noops() {
        let mut profile = Profile::default();
        profile.apply(ProfileEdit::AddDeliveryAddress(address("a1", false)));
        profile.apply(ProfileEdit::AddPaymentMethod(card("pm_1")));
        let before = profile.clone();

        profile.apply(ProfileEdit::RemoveDeliveryAddress("missing".to_string()));
        profile.apply(ProfileEdit::RemovePaymentMethod("missing".to_string()));

        assert_eq!(profile, before);
    }

    #[test]
    fn test_adding_default_payment_method_clears_previous_default() {
        let mut profile = Profile::default();
        let mut first = card("pm_1");
        first.is_default = true;
        let mut second = card("pm_2");
        second.is_default = true;

        profile.apply(ProfileEdit::AddPaymentMethod(first));
        profile.apply(ProfileEdit::AddPaymentMethod(card("pm_3")));
        assert_eq!(profile.default_payment_method().unwrap().id, "pm_1");

        profile.apply(ProfileEdit::AddPaymentMethod(second));

        let defaults: Vec<_> = profile
            .payment_methods
            .iter()
            .filter(|m| m.is_default)
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(defaults, vec!["pm_2"]);
    }

    #[test]
    fn test_remove_payment_method() {
        let mut profile = Profile::default();
        profile.apply(ProfileEdit::AddPaymentMethod(card("pm_1")));
        profile.apply(ProfileEdit::AddPaymentMethod(card("pm_2")));

        profile.apply(ProfileEdit::RemovePaymentMethod("pm_1".to_string()));

        assert_eq!(profile.payment_methods.len(), 1);
        assert_eq!(profile.payment_methods[0].id, "pm_2");
        assert!(profile.default_payment_method().is_none());
    }

    #[test]
    fn test_payment_kind_serializes_as_type_field() {
        let json = serde_json::to_value(card("pm_1")).unwrap();
        assert_eq!(json["type"], "card");
        assert_eq!(json["last4"], "4242");
    }
}
