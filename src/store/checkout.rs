//! Checkout flow
//!
//! A linear stage machine per order attempt:
//!
//! Address → Summary → Payment → Success
//!
//! Backward navigation is allowed only to the immediately preceding
//! stage. Submission is one all-or-nothing POST; its payload always
//! carries status "Pending Verification" no matter what was entered,
//! since verification is a manual back-office step.

use std::sync::Arc;
use validator::Validate;

use crate::api::{ApiError, ApiResult, StorefrontApi};
use crate::domain::aggregates::cart::Cart;
use crate::domain::aggregates::order::{
    DeliveryDetails, Order, PlaceOrderRequest, TransactionDetails,
};
use crate::domain::events::{Notice, NoticeLog};
use crate::domain::value_objects::Money;
use crate::invoice::Invoice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Address,
    Summary,
    Payment,
    Success,
}

pub struct CheckoutFlow {
    api: Arc<dyn StorefrontApi>,
    user_id: String,
    delivery_fee: Money,
    stage: Stage,
    delivery: Option<DeliveryDetails>,
    pub save_address: bool,
    submitting: bool,
    placed: Option<Order>,
    notices: NoticeLog,
}

impl CheckoutFlow {
    pub fn new(api: Arc<dyn StorefrontApi>, user_id: impl Into<String>, delivery_fee: Money) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            delivery_fee,
            stage: Stage::Address,
            delivery: None,
            save_address: false,
            submitting: false,
            placed: None,
            notices: NoticeLog::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn delivery(&self) -> Option<&DeliveryDetails> {
        self.delivery.as_ref()
    }

    pub fn placed_order(&self) -> Option<&Order> {
        self.placed.as_ref()
    }

    /// Address stage: validate the delivery form and move to Summary.
    pub fn confirm_address(&mut self, details: DeliveryDetails, cart: &Cart) -> ApiResult<()> {
        if self.stage != Stage::Address {
            return Err(ApiError::Validation("not at the address stage".into()));
        }
        if cart.is_empty() {
            self.notices.push(Notice::error("Your cart is empty!"));
            return Err(ApiError::Validation("Your cart is empty!".into()));
        }
        details.validate()?;
        self.delivery = Some(details);
        self.stage = Stage::Summary;
        Ok(())
    }

    /// Summary stage: proceed to the payment page.
    pub fn proceed_to_payment(&mut self) -> ApiResult<()> {
        if self.stage != Stage::Summary {
            return Err(ApiError::Validation("not at the summary stage".into()));
        }
        self.stage = Stage::Payment;
        Ok(())
    }

    /// Step back to the immediately preceding stage only.
    pub fn back(&mut self) -> ApiResult<()> {
        self.stage = match self.stage {
            Stage::Summary => Stage::Address,
            Stage::Payment => Stage::Summary,
            Stage::Address | Stage::Success => {
                return Err(ApiError::Validation(
                    "no previous stage to return to".into(),
                ))
            }
        };
        Ok(())
    }

    /// Payment stage: validate the transaction references and submit the
    /// order. Invalid references never reach the network.
    pub async fn submit_payment(
        &mut self,
        cart: &Cart,
        txn: TransactionDetails,
    ) -> ApiResult<&Order> {
        if self.stage != Stage::Payment {
            return Err(ApiError::Validation("not at the payment stage".into()));
        }
        if self.submitting {
            return Err(ApiError::Validation("submission already in progress".into()));
        }
        if let Err(errors) = txn.validate() {
            self.notices.push(Notice::error(
                "Please enter both Transaction ID and UTR ID.",
            ));
            return Err(errors.into());
        }
        let delivery = self
            .delivery
            .clone()
            .ok_or_else(|| ApiError::Validation("delivery details missing".into()))?;

        let request = PlaceOrderRequest::build(
            cart,
            delivery,
            txn,
            self.delivery_fee.clone(),
            self.save_address,
        )?;

        self.submitting = true;
        let result = self.api.place_order(&self.user_id, &request).await;
        self.submitting = false;

        match result {
            Ok(order) => {
                self.stage = Stage::Success;
                self.notices.push(Notice::success(
                    "Order placed and saved! Verification pending.",
                ));
                Ok(self.placed.insert(order))
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Order Failed: {err}")));
                Err(err)
            }
        }
    }

    /// Invoice for the placed order; only available on the success page.
    pub fn invoice(&self) -> Option<Invoice> {
        self.placed
            .as_ref()
            .map(|order| Invoice::for_order(order, self.delivery_fee.amount()))
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }
}
