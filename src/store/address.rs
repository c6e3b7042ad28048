//! Saved delivery addresses
//!
//! Loads the user's address book (preferring the default entry), lets the
//! checkout flow select, add or edit one, and optionally persists the
//! result through the address endpoints.

use std::sync::Arc;
use validator::Validate;

use crate::api::{ApiResult, SavedAddress, StorefrontApi};
use crate::domain::aggregates::order::DeliveryDetails;
use crate::domain::events::{Notice, NoticeLog};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
    Select,
    Add,
    Edit,
}

pub struct AddressBook {
    api: Arc<dyn StorefrontApi>,
    addresses: Vec<SavedAddress>,
    current: DeliveryDetails,
    current_id: Option<String>,
    mode: AddressMode,
    pub save_address: bool,
    notices: NoticeLog,
}

impl AddressBook {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self {
            api,
            addresses: Vec::new(),
            current: DeliveryDetails::default(),
            current_id: None,
            mode: AddressMode::Add,
            save_address: true,
            notices: NoticeLog::default(),
        }
    }

    pub fn mode(&self) -> AddressMode {
        self.mode
    }

    pub fn addresses(&self) -> &[SavedAddress] {
        &self.addresses
    }

    pub fn current(&self) -> &DeliveryDetails {
        &self.current
    }

    /// Fetch saved addresses; the default one (or the first) is selected.
    /// An empty book drops straight into Add mode.
    pub async fn load(&mut self) -> ApiResult<()> {
        match self.api.list_addresses().await {
            Ok(addresses) => {
                self.addresses = addresses;
                if let Some(chosen) = self
                    .addresses
                    .iter()
                    .find(|a| a.is_default)
                    .or_else(|| self.addresses.first())
                {
                    self.current = chosen.details.clone();
                    self.current_id = Some(chosen.id.clone());
                    self.mode = AddressMode::Select;
                } else {
                    self.current = DeliveryDetails::default();
                    self.current_id = None;
                    self.mode = AddressMode::Add;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load saved addresses");
                self.mode = AddressMode::Add;
                self.current = DeliveryDetails::default();
                self.current_id = None;
                Err(err)
            }
        }
    }

    pub fn select(&mut self, id: &str) -> bool {
        if let Some(address) = self.addresses.iter().find(|a| a.id == id) {
            self.current = address.details.clone();
            self.current_id = Some(address.id.clone());
            self.mode = AddressMode::Select;
            true
        } else {
            false
        }
    }

    pub fn start_add(&mut self) {
        self.current = DeliveryDetails::default();
        self.current_id = None;
        self.mode = AddressMode::Add;
    }

    pub fn start_edit(&mut self, id: &str) -> bool {
        if self.select(id) {
            self.mode = AddressMode::Edit;
            true
        } else {
            false
        }
    }

    pub fn set_current(&mut self, details: DeliveryDetails) {
        // Typing over a selected address means editing it.
        if self.mode == AddressMode::Select {
            self.mode = AddressMode::Edit;
        }
        self.current = details;
    }

    /// Validate and return the delivery details for checkout, persisting
    /// new or edited entries when `save_address` is set.
    pub async fn confirm(&mut self) -> ApiResult<DeliveryDetails> {
        self.current.validate()?;

        if self.save_address && self.mode != AddressMode::Select {
            let saved = match (&self.mode, &self.current_id) {
                (AddressMode::Edit, Some(id)) => {
                    self.api.update_address(id, &self.current).await
                }
                _ => self.api.create_address(&self.current).await,
            };
            match saved {
                Ok(address) => {
                    if let Some(existing) =
                        self.addresses.iter_mut().find(|a| a.id == address.id)
                    {
                        *existing = address.clone();
                    } else {
                        self.addresses.push(address.clone());
                    }
                    self.current_id = Some(address.id);
                    self.mode = AddressMode::Select;
                    self.notices.push(Notice::success("Address saved."));
                }
                Err(err) => {
                    self.notices
                        .push(Notice::error(format!("Could not save address: {err}")));
                    return Err(err);
                }
            }
        }
        Ok(self.current.clone())
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }
}
