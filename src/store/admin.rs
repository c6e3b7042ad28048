//! Admin panel view-model
//!
//! Product CRUD plus the order action queues. Orders are fetched oldest
//! first so the actionable queue reads as a work list; transitions are
//! guarded client-side by the domain state machine before any request is
//! sent. Concurrent admin edits are last-write-wins by policy.

use std::sync::Arc;

use crate::api::{ApiError, ApiResult, StorefrontApi};
use crate::domain::aggregates::order::{Order, OrderError, PaymentStatus};
use crate::domain::aggregates::product::{Product, ProductForm};
use crate::domain::events::{Notice, NoticeLog};
use crate::domain::value_objects::Sku;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderQueue {
    /// Non-terminal orders, oldest first.
    Actionable,
    /// Cancelled orders, newest first.
    Cancelled,
    /// Delivered orders, newest first.
    Completed,
    All,
}

pub struct AdminPanel {
    api: Arc<dyn StorefrontApi>,
    products: Vec<Product>,
    orders: Vec<Order>,
    queue: OrderQueue,
    notices: NoticeLog,
}

impl AdminPanel {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self {
            api,
            products: Vec::new(),
            orders: Vec::new(),
            queue: OrderQueue::Actionable,
            notices: NoticeLog::default(),
        }
    }

    // ---- products ----

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub async fn load_products(&mut self) -> ApiResult<()> {
        match self.api.list_products().await {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error("Error fetching data for products"));
                Err(err)
            }
        }
    }

    pub async fn add_product(&mut self, form: &ProductForm) -> ApiResult<()> {
        let form = self.normalized(form)?;
        match self.api.create_product(&form).await {
            Ok(product) => {
                self.notices
                    .push(Notice::success("Product added successfully!"));
                self.products.push(product);
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn update_product(&mut self, id: &str, form: &ProductForm) -> ApiResult<()> {
        let form = self.normalized(form)?;
        match self.api.update_product(id, &form).await {
            Ok(updated) => {
                if let Some(existing) = self.products.iter_mut().find(|p| p.id == id) {
                    *existing = updated;
                }
                self.notices.push(Notice::success("Product updated."));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn delete_product(&mut self, id: &str) -> ApiResult<()> {
        match self.api.delete_product(id).await {
            Ok(()) => {
                self.products.retain(|p| p.id != id);
                self.notices.push(Notice::success("Product deleted."));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Uppercase and trim a non-empty SKU before it reaches the backend.
    fn normalized(&mut self, form: &ProductForm) -> ApiResult<ProductForm> {
        let mut form = form.clone();
        if !form.sku.trim().is_empty() {
            match Sku::new(&form.sku) {
                Ok(sku) => form.sku = sku.as_str().to_string(),
                Err(err) => {
                    let err = ApiError::Validation(err.to_string());
                    self.notices.push(Notice::error(err.to_string()));
                    return Err(err);
                }
            }
        }
        Ok(form)
    }

    // ---- orders ----

    pub fn set_queue(&mut self, queue: OrderQueue) {
        self.queue = queue;
    }

    pub fn queue(&self) -> OrderQueue {
        self.queue
    }

    pub async fn load_orders(&mut self) -> ApiResult<()> {
        match self.api.order_history().await {
            Ok(mut orders) => {
                // Oldest first: the action queue works front to back.
                orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                self.orders = orders;
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error("Error fetching data for orders"));
                Err(err)
            }
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn actionable_count(&self) -> usize {
        self.orders.iter().filter(|o| o.is_actionable()).count()
    }

    pub fn count_with_status(&self, status: PaymentStatus) -> usize {
        self.orders.iter().filter(|o| o.status() == status).count()
    }

    /// The active queue's contents, in its display order.
    pub fn queue_view(&self) -> Vec<&Order> {
        let mut view: Vec<&Order> = match self.queue {
            OrderQueue::Actionable => {
                self.orders.iter().filter(|o| o.is_actionable()).collect()
            }
            OrderQueue::Cancelled => self
                .orders
                .iter()
                .filter(|o| o.status() == PaymentStatus::Cancelled)
                .collect(),
            OrderQueue::Completed => self
                .orders
                .iter()
                .filter(|o| o.status() == PaymentStatus::Delivered)
                .collect(),
            OrderQueue::All => self.orders.iter().collect(),
        };
        // Review queues read newest first; the action queue keeps the
        // oldest-first fetch order.
        if matches!(self.queue, OrderQueue::Cancelled | OrderQueue::Completed) {
            view.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        view
    }

    /// Request a transition to `target` for one order.
    ///
    /// The domain guard runs first: terminal orders and undefined edges
    /// are rejected without touching the network. On success the local
    /// copy is overwritten by the server's answer.
    pub async fn update_order_status(
        &mut self,
        order_id: &str,
        target: PaymentStatus,
    ) -> ApiResult<()> {
        let current = self
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .map(Order::status)
            .ok_or_else(|| ApiError::Validation(format!("unknown order {order_id}")))?;

        if current.is_terminal() {
            let err = ApiError::StateConflict(OrderError::Terminal(current));
            self.notices.push(Notice::error(err.to_string()));
            return Err(err);
        }
        if !current.can_transition_to(target) {
            let err = ApiError::StateConflict(OrderError::InvalidTransition {
                from: current,
                to: target,
            });
            self.notices.push(Notice::error(err.to_string()));
            return Err(err);
        }

        match self.api.update_order_status(order_id, target).await {
            Ok(updated) => {
                if let Some(existing) = self.orders.iter_mut().find(|o| o.id == order_id) {
                    *existing = updated;
                }
                self.notices.push(Notice::success(format!(
                    "Order {} updated to {target}",
                    short_id(order_id)
                )));
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Failed to update status: {err}")));
                Err(err)
            }
        }
    }

    /// Advance one order along the happy path (the primary action button).
    pub async fn advance_order(&mut self, order_id: &str) -> ApiResult<()> {
        let current = self
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .map(Order::status)
            .ok_or_else(|| ApiError::Validation(format!("unknown order {order_id}")))?;
        let target = current
            .next_step()
            .ok_or_else(|| ApiError::StateConflict(OrderError::Terminal(current)))?;
        self.update_order_status(order_id, target).await
    }

    /// Cancel an order. Irreversible.
    pub async fn cancel_order(&mut self, order_id: &str) -> ApiResult<()> {
        self.update_order_status(order_id, PaymentStatus::Cancelled)
            .await
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}
