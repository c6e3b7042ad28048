//! Order aggregate and the payment-status lifecycle
//!
//! An order is created once at checkout and afterwards mutated only by
//! status transitions. The happy path is linear:
//!
//! Pending Verification → Paid → Shipped → Delivered
//!
//! Cancelled is reachable from any non-terminal state; Failed is set by
//! the backend only. Delivered, Cancelled and Failed are terminal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::value_objects::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Pending Verification")]
    PendingVerification,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
    Failed,
}

impl PaymentStatus {
    /// Wire/display label, e.g. "Pending Verification".
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingVerification => "Pending Verification",
            Self::Paid => "Paid",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Failed => "Failed",
        }
    }

    /// Customer-facing description shown next to the active timeline step.
    pub fn description(&self) -> &'static str {
        match self {
            Self::PendingVerification => "Payment processing is currently underway.",
            Self::Paid => "Payment confirmed. We are preparing your items for dispatch.",
            Self::Shipped => "Your package has left the warehouse and is in transit.",
            Self::Delivered => "Order successfully delivered to your address.",
            Self::Cancelled => "This order has been cancelled.",
            Self::Failed => "Payment/Order failed. Please contact support if needed.",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Failed)
    }

    /// Whether a transition to `target` is a defined edge.
    pub fn can_transition_to(&self, target: PaymentStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self, target) {
            (Self::PendingVerification, Self::Paid)
            | (Self::Paid, Self::Shipped)
            | (Self::Shipped, Self::Delivered) => true,
            (_, Self::Cancelled) => true,
            _ => false,
        }
    }

    /// The next happy-path status, i.e. the admin's primary action.
    pub fn next_step(&self) -> Option<PaymentStatus> {
        match self {
            Self::PendingVerification => Some(Self::Paid),
            Self::Paid => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("order is already {0}; no further transitions allowed")]
    Terminal(PaymentStatus),
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error("order total ₹{stated} does not match items plus delivery fee ₹{computed}")]
    TotalMismatch { stated: Decimal, computed: Decimal },
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
}

/// Snapshot of one purchased line. Prices are frozen at order time so
/// later catalog edits never rewrite history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub photo: String,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Delivery form fields; validated client-side before submission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 10, max = 15, message = "phone must be 10-15 digits"))]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 6, max = 6, message = "pincode must be 6 digits"))]
    pub pincode: String,
}

/// UPI reference ids entered on the payment page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    #[validate(length(min = 1, message = "transaction id is required"))]
    pub txn_id: String,
    #[validate(length(min = 1, message = "UTR id is required"))]
    pub utr_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method: String,
    pub txn_id: String,
    pub utr_id: String,
    pub status: PaymentStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub items: Vec<OrderItem>,
    pub delivery_details: DeliveryDetails,
    pub total_amount: Decimal,
    pub payment: Payment,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn status(&self) -> PaymentStatus {
        self.payment.status
    }

    /// Not yet in a terminal status, so the admin queue still owns it.
    pub fn is_actionable(&self) -> bool {
        !self.payment.status.is_terminal()
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Creation-time invariant: total equals items plus the delivery fee.
    pub fn verify_total(&self, delivery_fee: Decimal) -> Result<(), OrderError> {
        let computed = self.subtotal() + delivery_fee;
        if computed != self.total_amount {
            return Err(OrderError::TotalMismatch {
                stated: self.total_amount,
                computed,
            });
        }
        Ok(())
    }

    /// Apply a transition named by its target state.
    ///
    /// Rejected when the order is terminal or the edge is undefined; the
    /// order is left untouched in that case.
    pub fn transition_to(&mut self, target: PaymentStatus) -> Result<(), OrderError> {
        let current = self.payment.status;
        if current.is_terminal() {
            return Err(OrderError::Terminal(current));
        }
        if !current.can_transition_to(target) {
            return Err(OrderError::InvalidTransition {
                from: current,
                to: target,
            });
        }
        self.payment.status = target;
        match target {
            PaymentStatus::Shipped => self.shipped_at = Some(Utc::now()),
            PaymentStatus::Cancelled => self.cancelled_at = Some(Utc::now()),
            _ => {}
        }
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.transition_to(PaymentStatus::Cancelled)
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::for_order(self)
    }
}

/// The ordered happy-path steps rendered by the tracking view.
pub const TIMELINE_STEPS: [(PaymentStatus, &str); 4] = [
    (PaymentStatus::PendingVerification, "Payment Received"),
    (PaymentStatus::Paid, "Order Confirmed"),
    (PaymentStatus::Shipped, "Order Shipped"),
    (PaymentStatus::Delivered, "Delivered"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
    pub status: PaymentStatus,
    pub label: &'static str,
    pub state: StepState,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Tracking view model: either the four-step progression, or a single
/// terminal node when the order was cancelled or failed.
#[derive(Clone, Debug, PartialEq)]
pub enum Timeline {
    Steps(Vec<TimelineStep>),
    Terminal {
        status: PaymentStatus,
        description: &'static str,
        at: DateTime<Utc>,
    },
}

impl Timeline {
    pub fn for_order(order: &Order) -> Self {
        let current = order.payment.status;
        if matches!(current, PaymentStatus::Cancelled | PaymentStatus::Failed) {
            return Timeline::Terminal {
                status: current,
                description: current.description(),
                at: order.cancelled_at.unwrap_or(order.created_at),
            };
        }

        let active_index = TIMELINE_STEPS
            .iter()
            .position(|(s, _)| *s == current)
            .unwrap_or(0);

        let steps = TIMELINE_STEPS
            .iter()
            .enumerate()
            .map(|(i, (status, label))| {
                let state = match i.cmp(&active_index) {
                    std::cmp::Ordering::Less => StepState::Completed,
                    std::cmp::Ordering::Equal => StepState::Active,
                    std::cmp::Ordering::Greater => StepState::Pending,
                };
                let timestamp = match status {
                    PaymentStatus::PendingVerification | PaymentStatus::Paid => {
                        Some(order.created_at)
                    }
                    PaymentStatus::Shipped => order.shipped_at,
                    _ => None,
                };
                TimelineStep {
                    status: *status,
                    label,
                    state,
                    timestamp,
                }
            })
            .collect();
        Timeline::Steps(steps)
    }
}

/// Payload for the all-or-nothing order submission at checkout.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItem>,
    pub delivery_details: DeliveryDetails,
    pub total_amount: Decimal,
    pub payment: Payment,
    pub save_address: bool,
}

impl PlaceOrderRequest {
    /// Build the order record from cart contents, delivery details and
    /// the entered payment references. The initial status is always
    /// Pending Verification; verification is manual and happens later.
    pub fn build(
        cart: &crate::domain::aggregates::cart::Cart,
        delivery: DeliveryDetails,
        txn: TransactionDetails,
        delivery_fee: Money,
        save_address: bool,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let items: Vec<OrderItem> = cart
            .items()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                price: line.product.price,
                quantity: line.quantity,
                photo: line.product.photo.clone(),
            })
            .collect();
        let total_amount = cart.totals(delivery_fee).total.amount();
        Ok(Self {
            items,
            delivery_details: delivery,
            total_amount,
            payment: Payment {
                method: "UPI".to_string(),
                txn_id: txn.txn_id,
                utr_id: txn.utr_id,
                status: PaymentStatus::PendingVerification,
            },
            save_address,
        })
    }
}

/// Test fixture shared by the store and domain tests.
#[cfg(test)]
pub(crate) fn order_with_status(status: PaymentStatus) -> Order {
    use rust_decimal_macros::dec;
    Order {
        id: "ord-1".into(),
        items: vec![
            OrderItem {
                product_id: "p1".into(),
                name: "Organic Compost".into(),
                price: dec!(250),
                quantity: 2,
                photo: String::new(),
            },
            OrderItem {
                product_id: "p2".into(),
                name: "Neem Oil".into(),
                price: dec!(120),
                quantity: 3,
                photo: String::new(),
            },
        ],
        delivery_details: DeliveryDetails {
            name: "Kisan Rao".into(),
            phone: "9876543210".into(),
            email: None,
            address: "Plot 15, Krishi Nagar".into(),
            city: "Bhopal".into(),
            pincode: "462022".into(),
        },
        total_amount: dec!(910),
        payment: Payment {
            method: "UPI".into(),
            txn_id: "UPL123".into(),
            utr_id: "123456789012".into(),
            status,
        },
        created_at: Utc::now(),
        shipped_at: None,
        cancelled_at: None,
    }
}
