//! # Profile Commands
//!
//! Edits to the signed-in user's saved addresses, payment methods and
//! preferences. Every command here answers `NOT_SIGNED_IN` when nobody is
//! signed in.
//!
//! ## Form Flow
//! ```text
//! AddressForm ──validate──► Address { id: uuid v4, .. } ──► ProfileEdit
//! ```
//! The front end never chooses ids for new records.

use market_core::validation::{validate_address, validate_payment_method};
use market_core::{
    Address, PaymentKind, PaymentMethod, Preferences, Profile, ProfileEdit, ShoppingStateStore,
    ValidationError,
};
use serde::Deserialize;
use uuid::Uuid;

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::{AppSink, SessionState};

/// New delivery address as entered in the checkout form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    #[serde(default)]
    pub is_default: bool,
}

/// New payment method; only display data (never a full card number).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodForm {
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

pub async fn add_delivery_address(
    session: &SessionState,
    form: AddressForm,
) -> Result<CommandResponse<Profile>, ApiError> {
    let address = Address {
        id: Uuid::new_v4().to_string(),
        street: form.street,
        city: form.city,
        state: form.state,
        country: form.country,
        zip_code: form.zip_code,
        is_default: form.is_default,
    };
    validate_address(&address)?;

    apply(session, ProfileEdit::AddDeliveryAddress(address)).await
}

pub async fn remove_delivery_address(
    session: &SessionState,
    address_id: &str,
) -> Result<CommandResponse<Profile>, ApiError> {
    apply(session, ProfileEdit::RemoveDeliveryAddress(address_id.to_string())).await
}

/// Marks one saved address as the default.
///
/// Unlike removal, selecting an id that is not saved is an error: it would
/// otherwise leave the profile with no default at all. The lookup and the
/// edit run under the same store lock.
pub async fn set_default_delivery_address(
    session: &SessionState,
    address_id: &str,
) -> Result<CommandResponse<Profile>, ApiError> {
    let mut store = session.store().await;

    let user = store.state().user().ok_or_else(ApiError::not_signed_in)?;
    let known = user
        .profile
        .as_ref()
        .is_some_and(|p| p.delivery_addresses.iter().any(|a| a.id == address_id));
    if !known {
        return Err(ApiError::not_found("Delivery address", address_id));
    }

    apply_locked(&mut store, ProfileEdit::SetDefaultDeliveryAddress(address_id.to_string())).await
}

pub async fn add_payment_method(
    session: &SessionState,
    form: PaymentMethodForm,
) -> Result<CommandResponse<Profile>, ApiError> {
    let method = PaymentMethod {
        id: format!("pm_{}", Uuid::new_v4().simple()),
        kind: form.kind,
        last4: form.last4,
        brand: form.brand,
        expiry_month: form.expiry_month,
        expiry_year: form.expiry_year,
        is_default: form.is_default,
    };
    validate_payment_method(&method)?;

    apply(session, ProfileEdit::AddPaymentMethod(method)).await
}

pub async fn remove_payment_method(
    session: &SessionState,
    method_id: &str,
) -> Result<CommandResponse<Profile>, ApiError> {
    apply(session, ProfileEdit::RemovePaymentMethod(method_id.to_string())).await
}

pub async fn set_preferences(
    session: &SessionState,
    preferences: Preferences,
) -> Result<CommandResponse<Profile>, ApiError> {
    let currency = &preferences.default_currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "defaultCurrency".to_string(),
            reason: "must be a three-letter ISO 4217 code".to_string(),
        }
        .into());
    }

    apply(session, ProfileEdit::SetPreferences(preferences)).await
}

async fn apply(session: &SessionState, edit: ProfileEdit) -> Result<CommandResponse<Profile>, ApiError> {
    let mut store = session.store().await;
    apply_locked(&mut store, edit).await
}

async fn apply_locked(
    store: &mut ShoppingStateStore<AppSink>,
    edit: ProfileEdit,
) -> Result<CommandResponse<Profile>, ApiError> {
    if store.state().user().is_none() {
        return Err(ApiError::not_signed_in());
    }

    let (_, persistence) = store.edit_profile(edit).await;
    let profile = store
        .state()
        .user()
        .and_then(|u| u.profile.clone())
        .unwrap_or_default();

    Ok(CommandResponse::written(profile, persistence))
}
