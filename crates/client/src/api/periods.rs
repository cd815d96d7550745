//! Period endpoints beyond plain CRUD.

use pasok_core::domain::Period;
use pasok_shared::AppError;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// Returns the active period.
    pub async fn active_period(&self) -> ClientResult<Period> {
        self.get("periods/active", &[]).await
    }

    /// Permanently closes a period.
    pub async fn close_period(&self, period: &Period) -> ClientResult<Period> {
        if !period.can_close() {
            return Err(AppError::BusinessRule(format!(
                "Period {} is already closed",
                period.name
            ))
            .into());
        }
        let closed: Period = self
            .post(&format!("periods/{}/close", period.id), &serde_json::json!({}))
            .await?;
        info!(period = %closed.name, "period closed");
        Ok(closed)
    }
}
