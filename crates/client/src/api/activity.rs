//! Activity log endpoint.

use pasok_core::domain::{ActivityFilter, ActivityLog};
use pasok_shared::types::{PageRequest, PageResponse};

use crate::client::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// Lists one page of audit entries.
    pub async fn activity_logs(
        &self,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> ClientResult<PageResponse<ActivityLog>> {
        let mut query = page.as_query();
        query.extend(filter.as_query());
        self.get_page("activity-logs", &query).await
    }
}
