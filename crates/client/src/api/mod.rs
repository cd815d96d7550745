//! Typed endpoint groups.

pub mod activity;
pub mod auth;
pub mod kiosk;
pub mod periods;
pub mod settings;
pub mod transactions;

use std::fmt::Display;

use pasok_core::domain::{Goods, Kitchen, Period, Supplier, Transaction, User};
use pasok_core::validation::{
    GoodsInput, KitchenInput, PeriodInput, SupplierInput, TransactionInput, UserInput,
    validate_input,
};
use pasok_shared::types::{
    GoodsId, KitchenId, PageRequest, PageResponse, PeriodId, SupplierId, TransactionId, UserId,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Page size used when walking every page of a list.
const WALK_PAGE_SIZE: u32 = 100;

/// A record type with standard list/get/create/update/delete endpoints.
pub trait Resource: DeserializeOwned + Send {
    /// Path below `/api/v1`.
    const PATH: &'static str;
    /// Identifier type.
    type Id: Display + Copy + Send + Sync;
    /// Create/update payload.
    type Input: Serialize + Validate + Sync;
}

impl Resource for Supplier {
    const PATH: &'static str = "suppliers";
    type Id = SupplierId;
    type Input = SupplierInput;
}

impl Resource for Kitchen {
    const PATH: &'static str = "kitchens";
    type Id = KitchenId;
    type Input = KitchenInput;
}

impl Resource for Goods {
    const PATH: &'static str = "goods";
    type Id = GoodsId;
    type Input = GoodsInput;
}

impl Resource for Period {
    const PATH: &'static str = "periods";
    type Id = PeriodId;
    type Input = PeriodInput;
}

impl Resource for Transaction {
    const PATH: &'static str = "transactions";
    type Id = TransactionId;
    type Input = TransactionInput;
}

impl Resource for User {
    const PATH: &'static str = "users";
    type Id = UserId;
    type Input = UserInput;
}

/// Paging, search and filters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Page to fetch.
    pub page: PageRequest,
    /// Free-text search.
    pub search: Option<String>,
    /// Resource-specific filters (`supplier_id`, `status`, ...).
    pub filters: Vec<(&'static str, String)>,
}

impl ListQuery {
    /// Sets the page.
    #[must_use]
    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Adds a filter.
    #[must_use]
    pub fn filter(mut self, key: &'static str, value: impl ToString) -> Self {
        self.filters.push((key, value.to_string()));
        self
    }

    /// Query-string pairs understood by the API.
    #[must_use]
    pub fn as_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.page.as_query();
        if let Some(search) = self.search.as_ref().filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        query.extend(self.filters.iter().cloned());
        query
    }
}

impl ApiClient {
    /// Lists one page of a resource.
    pub async fn list<R: Resource>(&self, query: &ListQuery) -> ClientResult<PageResponse<R>> {
        self.get_page(R::PATH, &query.as_query()).await
    }

    /// Lists every page of a resource.
    pub async fn list_all<R: Resource>(&self, query: &ListQuery) -> ClientResult<Vec<R>> {
        let mut query = query.clone().page(PageRequest::new(1, WALK_PAGE_SIZE));
        let mut items = Vec::new();
        loop {
            let page = self.list::<R>(&query).await?;
            // Walk by the page we asked for; the echoed page number may be stale.
            let has_next = query.page.page < page.meta.total_pages && !page.data.is_empty();
            items.extend(page.data);
            if !has_next {
                break;
            }
            query.page = query.page.next();
        }
        debug!(resource = R::PATH, count = items.len(), "listed all pages");
        Ok(items)
    }

    /// Fetches one record.
    pub async fn fetch<R: Resource>(&self, id: R::Id) -> ClientResult<R> {
        self.get(&format!("{}/{id}", R::PATH), &[]).await
    }

    /// Validates and creates a record.
    pub async fn create<R: Resource>(&self, input: &R::Input) -> ClientResult<R> {
        validate_input(input)?;
        self.post(R::PATH, input).await
    }

    /// Validates and updates a record.
    pub async fn update<R: Resource>(&self, id: R::Id, input: &R::Input) -> ClientResult<R> {
        validate_input(input)?;
        self.put(&format!("{}/{id}", R::PATH), input).await
    }

    /// Deletes a record.
    pub async fn remove<R: Resource>(&self, id: R::Id) -> ClientResult<()> {
        self.delete(&format!("{}/{id}", R::PATH)).await
    }
}

#[cfg(test)]
mod tests;
