//! Application settings.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Flat key/value settings as stored by the server.
pub type Settings = BTreeMap<String, Value>;

impl ApiClient {
    /// Reads all settings.
    pub async fn settings(&self) -> ClientResult<Settings> {
        self.get("settings", &[]).await
    }

    /// Writes the given keys; other keys keep their values.
    pub async fn update_settings(&self, changes: &Settings) -> ClientResult<Settings> {
        self.put("settings", changes).await
    }
}
