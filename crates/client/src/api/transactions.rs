//! Transaction endpoints beyond plain CRUD.

use chrono::NaiveDate;
use pasok_core::domain::{Transaction, TransactionStatus};
use pasok_shared::AppError;
use pasok_shared::types::{KitchenId, PageRequest, PeriodId};
use tracing::info;

use super::ListQuery;
use crate::client::ApiClient;
use crate::error::ClientResult;

/// Filters for the transaction list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Receiving kitchen.
    pub kitchen_id: Option<KitchenId>,
    /// Period.
    pub period_id: Option<PeriodId>,
    /// Status.
    pub status: Option<TransactionStatus>,
    /// Single date.
    pub date: Option<NaiveDate>,
    /// Code search.
    pub search: Option<String>,
    /// Page.
    pub page: PageRequest,
}

impl TransactionQuery {
    /// Converts to a generic list query.
    #[must_use]
    pub fn to_list_query(&self) -> ListQuery {
        let mut query = ListQuery::default().page(self.page.clone());
        if let Some(search) = &self.search {
            query = query.search(search.clone());
        }
        if let Some(kitchen_id) = self.kitchen_id {
            query = query.filter("kitchen_id", kitchen_id);
        }
        if let Some(period_id) = self.period_id {
            query = query.filter("period_id", period_id);
        }
        if let Some(status) = self.status {
            query = query.filter("status", status);
        }
        if let Some(date) = self.date {
            query = query.filter("date", date);
        }
        query
    }
}

impl ApiClient {
    /// Completes a draft transaction.
    pub async fn complete_transaction(&self, transaction: &Transaction) -> ClientResult<Transaction> {
        if !transaction.can_complete() {
            return Err(AppError::BusinessRule(format!(
                "Transaction {} is {} and cannot be completed",
                transaction.code, transaction.status
            ))
            .into());
        }
        let done: Transaction = self
            .post(
                &format!("transactions/{}/complete", transaction.id),
                &serde_json::json!({}),
            )
            .await?;
        info!(code = %done.code, "transaction completed");
        Ok(done)
    }

    /// Cancels a draft transaction.
    pub async fn cancel_transaction(
        &self,
        transaction: &Transaction,
        reason: Option<&str>,
    ) -> ClientResult<Transaction> {
        if !transaction.can_cancel() {
            return Err(AppError::BusinessRule(format!(
                "Transaction {} is {} and cannot be cancelled",
                transaction.code, transaction.status
            ))
            .into());
        }
        let cancelled: Transaction = self
            .post(
                &format!("transactions/{}/cancel", transaction.id),
                &serde_json::json!({ "reason": reason }),
            )
            .await?;
        info!(code = %cancelled.code, "transaction cancelled");
        Ok(cancelled)
    }
}
