//! Order history and tracking view-model
//!
//! History is shown newest first. Selecting an order opens the tracking
//! view, whose timeline is derived by the order aggregate.

use std::sync::Arc;

use crate::api::{ApiResult, StorefrontApi};
use crate::domain::aggregates::order::{Order, Timeline};
use crate::domain::events::{Notice, NoticeLog};

pub struct OrdersStore {
    api: Arc<dyn StorefrontApi>,
    orders: Vec<Order>,
    selected: Option<String>,
    notices: NoticeLog,
}

impl OrdersStore {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self {
            api,
            orders: Vec::new(),
            selected: None,
            notices: NoticeLog::default(),
        }
    }

    pub async fn load(&mut self) -> ApiResult<()> {
        match self.api.order_history().await {
            Ok(mut orders) => {
                orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.orders = orders;
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Failed to fetch orders: {err}")));
                Err(err)
            }
        }
    }

    /// Newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn select(&mut self, order_id: &str) -> bool {
        if self.orders.iter().any(|o| o.id == order_id) {
            self.selected = Some(order_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_order(&self) -> Option<&Order> {
        let id = self.selected.as_deref()?;
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn selected_timeline(&self) -> Option<Timeline> {
        self.selected_order().map(Order::timeline)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }
}
