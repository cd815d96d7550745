//! Request plumbing shared by every endpoint group.

use std::time::Duration;

use pasok_shared::AppConfig;
use pasok_shared::types::PageResponse;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::envelope::ApiEnvelope;
use crate::error::{ClientError, ClientResult, extract_message};
use crate::session::SessionStore;

/// Which credential a request carries, and which session a 401 clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// The logged-in user's token.
    User,
    /// No credential (login, kiosk code verification).
    Anonymous,
    /// No token; a 401 invalidates the kiosk access code.
    Kiosk,
}

/// Client for the back-office API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    root: String,
    auth_header: HeaderName,
    auth_scheme: String,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: &AppConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;
        let auth_header = HeaderName::from_bytes(config.api.auth_header.as_bytes())
            .map_err(|e| ClientError::Config(format!("auth_header: {e}")))?;

        Ok(Self {
            http,
            root: config.api_root(),
            auth_header,
            auth_scheme: config.api.auth_scheme.trim().to_string(),
            session: SessionStore::new(config.session.dir.clone()),
        })
    }

    /// The session store this client reads its token from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    fn credential(&self, token: &str) -> ClientResult<HeaderValue> {
        let value = if self.auth_scheme.is_empty() {
            token.to_string()
        } else {
            format!("{} {token}", self.auth_scheme)
        };
        HeaderValue::from_str(&value)
            .map_err(|_| ClientError::Config("stored token is not a valid header value".into()))
    }

    fn request(&self, method: Method, path: &str, auth: AuthMode) -> ClientResult<RequestBuilder> {
        let mut request = self.http.request(method, self.url(path));
        if auth == AuthMode::User {
            if let Some(token) = self.session.token()? {
                request = request.header(self.auth_header.clone(), self.credential(&token)?);
            }
        }
        Ok(request)
    }

    /// Sends a request and decodes the envelope.
    ///
    /// A 401 clears the session that `auth` refers to before returning
    /// [`ClientError::Unauthorized`].
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: AuthMode,
    ) -> ClientResult<ApiEnvelope<T>> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            let message = extract_message(status.as_u16(), &body);
            warn!(%url, %message, "unauthorized, clearing session");
            match auth {
                AuthMode::User => self.session.clear()?,
                AuthMode::Kiosk => self.session.clear_kiosk()?,
                AuthMode::Anonymous => {}
            }
            return Err(ClientError::Unauthorized(message));
        }

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_message(status.as_u16(), &body),
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        if !envelope.success {
            return Err(ClientError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "The server rejected the request".to_string()),
            ));
        }
        Ok(envelope)
    }

    /// `GET` returning the payload.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = self.request(Method::GET, path, AuthMode::User)?.query(query);
        self.send(request, AuthMode::User).await?.into_data()
    }

    /// `GET` returning a page of items.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<PageResponse<T>> {
        self.get_page_as(path, query, AuthMode::User).await
    }

    pub(crate) async fn get_page_as<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: AuthMode,
    ) -> ClientResult<PageResponse<T>> {
        let request = self.request(Method::GET, path, auth)?.query(query);
        self.send::<Vec<T>>(request, auth).await?.into_page()
    }

    /// `POST` with a JSON body, returning the payload.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.post_as(path, body, AuthMode::User).await
    }

    pub(crate) async fn post_as<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth: AuthMode,
    ) -> ClientResult<T> {
        let request = self.request(Method::POST, path, auth)?.json(body);
        self.send(request, auth).await?.into_data()
    }

    /// `POST` without a body, ignoring any payload.
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        let request = self.request(Method::POST, path, AuthMode::User)?;
        self.send::<serde_json::Value>(request, AuthMode::User)
            .await
            .map(|_| ())
    }

    /// `PUT` with a JSON body, returning the payload.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.request(Method::PUT, path, AuthMode::User)?.json(body);
        self.send(request, AuthMode::User).await?.into_data()
    }

    /// `DELETE`, ignoring any payload.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.request(Method::DELETE, path, AuthMode::User)?;
        self.send::<serde_json::Value>(request, AuthMode::User)
            .await
            .map(|_| ())
    }
}
