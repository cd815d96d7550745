//! The `{ success, data, pagination?, message? }` response envelope.

use pasok_shared::types::{PageMeta, PageResponse};
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Every API response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the server handled the request.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Payload.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Present on paginated lists.
    #[serde(default)]
    pub pagination: Option<PageMeta>,
    /// Human readable status.
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    /// Returns the payload or a decode error when it is missing.
    pub fn into_data(self) -> ClientResult<T> {
        self.data
            .ok_or_else(|| ClientError::Decode("response has no data".to_string()))
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Returns the list payload as a page; unpaginated lists become one page.
    pub fn into_page(self) -> ClientResult<PageResponse<T>> {
        let pagination = self.pagination.clone();
        let data = self.into_data()?;
        Ok(match pagination {
            Some(meta) => PageResponse::new(data, meta),
            None => PageResponse::single(data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_envelope() {
        let envelope: ApiEnvelope<Vec<u32>> = serde_json::from_str(
            r#"{"success":true,"data":[1,2],"pagination":{"page":1,"limit":2,"total":5,"total_pages":3}}"#,
        )
        .unwrap();
        let page = envelope.into_page().unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert!(page.meta.has_next());
    }

    #[test]
    fn test_missing_data_is_decode_error() {
        let envelope: ApiEnvelope<u32> =
            serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert!(matches!(envelope.into_data(), Err(ClientError::Decode(_))));
    }
}
