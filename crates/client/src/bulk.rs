//! Row-by-row goods upload.

use pasok_core::bulk::BulkSummary;
use pasok_core::domain::Goods;
use pasok_core::validation::GoodsInput;
use pasok_shared::AppError;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Creates each goods row in order and counts the outcomes.
///
/// Failures never stop the run. A 401 does, since every later row would
/// fail the same way and the session is already gone.
pub async fn upload_goods(client: &ApiClient, rows: &[GoodsInput]) -> Result<BulkSummary, ClientError> {
    let mut summary = BulkSummary::default();
    for (index, row) in rows.iter().enumerate() {
        let number = index + 1;
        match client.create::<Goods>(row).await {
            Ok(goods) => {
                summary.record_success();
                info!(row = number, id = %goods.id, name = %goods.name, "goods created");
            }
            Err(err @ ClientError::Unauthorized(_)) => return Err(err),
            Err(err) => {
                let reason = AppError::from(err).message().to_string();
                warn!(row = number, name = %row.name, %reason, "goods row failed");
                summary.record_failure(number, row.name.clone(), reason);
            }
        }
    }
    info!(summary = %summary.headline(), "bulk upload finished");
    Ok(summary)
}
