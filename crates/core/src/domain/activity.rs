//! Audit trail entries.

use chrono::{DateTime, NaiveDate, Utc};
use pasok_shared::types::{ActivityLogId, UserId};
use serde::{Deserialize, Serialize};

/// One audit entry recorded by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Unique identifier.
    pub id: ActivityLogId,
    /// Acting user.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Acting user's name.
    #[serde(default, alias = "user")]
    pub user_name: Option<String>,
    /// Action performed (create, update, delete, login, ...).
    pub action: String,
    /// Module the action touched (transactions, goods, ...).
    pub module: String,
    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the action happened.
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Client address.
    #[serde(default, alias = "ip")]
    pub ip_address: Option<String>,
}

/// Filters for the activity log list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    /// Only entries from this module.
    pub module: Option<String>,
    /// Only entries with this action.
    pub action: Option<String>,
    /// Only entries by this user.
    pub user_id: Option<UserId>,
    /// First day, inclusive.
    pub from: Option<NaiveDate>,
    /// Last day, inclusive.
    pub to: Option<NaiveDate>,
}

impl ActivityFilter {
    /// Query-string pairs understood by the API.
    #[must_use]
    pub fn as_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(module) = &self.module {
            query.push(("module", module.clone()));
        }
        if let Some(action) = &self.action {
            query.push(("action", action.clone()));
        }
        if let Some(user_id) = self.user_id {
            query.push(("user_id", user_id.to_string()));
        }
        if let Some(from) = self.from {
            query.push(("start_date", from.to_string()));
        }
        if let Some(to) = self.to {
            query.push(("end_date", to.to_string()));
        }
        query
    }
}
