//! Product catalog view-model
//!
//! Products come from the backend; category and search filtering happen
//! client-side. The search box follows the original storefront's rule:
//! typing alone changes nothing, only a submitted search filters.

use std::sync::Arc;

use crate::api::{ApiResult, StorefrontApi};
use crate::domain::aggregates::product::Product;
use crate::domain::events::{Notice, NoticeLog};

pub struct Catalog {
    api: Arc<dyn StorefrontApi>,
    products: Vec<Product>,
    category: Option<String>,
    search_input: String,
    submitted_search: String,
    notices: NoticeLog,
}

impl Catalog {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self {
            api,
            products: Vec::new(),
            category: None,
            search_input: String::new(),
            submitted_search: String::new(),
            notices: NoticeLog::default(),
        }
    }

    pub async fn load(&mut self) -> ApiResult<()> {
        match self.api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "catalog loaded");
                self.products = products;
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Error fetching products: {err}"
                )));
                Err(err)
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// `None` means "All".
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category.map(str::to_string);
    }

    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    /// Apply the current input to the active filter.
    pub fn submit_search(&mut self) {
        self.submitted_search = self.search_input.clone();
    }

    pub fn filtered(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches_category(self.category.as_deref()))
            .filter(|p| p.matches_search(&self.submitted_search))
            .collect()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }
}
