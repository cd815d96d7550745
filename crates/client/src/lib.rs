//! HTTP client for the Pasok back-office API.
//!
//! Wraps every `/api/v1/...` endpoint the dashboard uses:
//! - `client` - request plumbing, envelope decoding, 401 handling
//! - `session` - the token/user file and the kiosk access-code file
//! - `api` - typed endpoint groups (auth, master data, periods, ...)
//! - `fetcher` - fan-out fetch of report transactions and lookups
//! - `bulk` - row-by-row goods upload with a success/failure summary

pub mod api;
pub mod bulk;
pub mod client;
pub mod envelope;
pub mod error;
pub mod fetcher;
pub mod session;

pub use api::{ListQuery, Resource};
pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use fetcher::{ReportInput, TransactionFetcher};
pub use session::{KioskSession, SessionStore, StoredSession};
