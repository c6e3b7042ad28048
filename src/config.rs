//! Storefront configuration
//!
//! Earlier revisions of this storefront hard-coded several mutually
//! inconsistent backend hosts and a mock user id per view. All of that
//! now comes from one place: the environment, read once at startup.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    /// Base URL of the backend API, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    /// Identity of the signed-in user; normally filled in after login.
    pub user_id: String,
    /// Flat per-order delivery fee.
    pub delivery_fee: Decimal,
    pub currency: String,
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url =
            std::env::var("GREENBASKET_API_URL").context("GREENBASKET_API_URL must be set")?;
        let user_id =
            std::env::var("GREENBASKET_USER_ID").context("GREENBASKET_USER_ID must be set")?;
        let delivery_fee = match std::env::var("GREENBASKET_DELIVERY_FEE") {
            Ok(raw) => raw
                .parse::<Decimal>()
                .context("GREENBASKET_DELIVERY_FEE must be a decimal amount")?,
            Err(_) => dec!(50),
        };
        let currency =
            std::env::var("GREENBASKET_CURRENCY").unwrap_or_else(|_| "INR".to_string());
        Ok(Self {
            api_base_url,
            user_id,
            delivery_fee,
            currency,
        })
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            user_id: String::new(),
            delivery_fee: dec!(50),
            currency: "INR".to_string(),
        }
    }
}
