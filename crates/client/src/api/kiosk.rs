//! Kitchen kiosk access.
//!
//! A kitchen's access code unlocks a read-only goods listing without a user
//! login. The verified code lives in its own session file.

use chrono::Utc;
use pasok_core::domain::{Goods, Kitchen};
use pasok_shared::AppError;
use pasok_shared::types::PageRequest;
use serde_json::json;
use tracing::info;

use crate::client::{ApiClient, AuthMode};
use crate::error::ClientResult;
use crate::session::KioskSession;

impl ApiClient {
    /// Verifies an access code and stores the kiosk session.
    pub async fn open_kiosk(&self, code: &str) -> ClientResult<KioskSession> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::Validation("access code must not be blank".into()).into());
        }
        let kitchen: Kitchen = self
            .post_as("kitchen-access/verify", &json!({ "code": code }), AuthMode::Anonymous)
            .await?;

        let session = KioskSession {
            code: code.to_string(),
            kitchen,
            verified_at: Utc::now(),
        };
        self.session().save_kiosk(&session)?;
        info!(kitchen = %session.kitchen.name, "kiosk opened");
        Ok(session)
    }

    /// Lists goods visible to the open kiosk.
    pub async fn kiosk_goods(&self, search: Option<&str>) -> ClientResult<Vec<Goods>> {
        let Some(session) = self.session().load_kiosk()? else {
            return Err(AppError::Unauthorized("no kiosk access code has been verified".into()).into());
        };
        let mut query = PageRequest::new(1, 500).as_query();
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        let page = self
            .get_page_as(
                &format!("kitchen-access/{}/goods", session.code),
                &query,
                AuthMode::Kiosk,
            )
            .await?;
        Ok(page.data)
    }

    /// Forgets the kiosk access code.
    pub fn close_kiosk(&self) -> ClientResult<()> {
        self.session().clear_kiosk()?;
        Ok(())
    }
}
