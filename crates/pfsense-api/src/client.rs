// HTTP client for the appliance's REST API
//
// Wraps `reqwest::Client` with base-URL joining, query parameters, auth
// headers, and status checking. Resource services (interfaces, routing)
// talk to it through the `Transport` trait so tests can substitute the
// HTTP layer.

use std::future::Future;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::interface::InterfaceService;
use crate::routing::RoutingService;
use crate::transport::TransportConfig;

// ── Request ──────────────────────────────────────────────────────────

/// One HTTP exchange against an endpoint path such as `api/v1/interface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: &'static str,
    pub query: Vec<(&'static str, String)>,
    /// Serialized JSON body. `None` sends no body at all.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: &'static str) -> Self {
        Self {
            method,
            endpoint,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: &'static str) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: &'static str) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: &'static str) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: &'static str) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, Error> {
        self.body = Some(serde_json::to_vec(body).map_err(Error::Encode)?);
        Ok(self)
    }
}

// ── Transport seam ───────────────────────────────────────────────────

/// Performs a single HTTP exchange and returns the raw response body.
///
/// Implementations must return `Error::Status` for non-success responses
/// and must not retry.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Bytes, Error>> + Send;
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the appliance REST API.
///
/// Holds only immutable configuration (base URL, credentials, and the
/// underlying `reqwest::Client`), so a single instance can be shared
/// between tasks.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with its own `reqwest::Client` from `transport`.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Ensure the base path ends with `/` so endpoint paths join beneath it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url.set_query(None);
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Interface and VLAN operations.
    pub fn interfaces(&self) -> InterfaceService<'_, Self> {
        InterfaceService::new(self)
    }

    /// Gateway, default gateway and routing apply operations.
    pub fn routing(&self) -> RoutingService<'_, Self> {
        RoutingService::new(self)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint path (e.g. `"api/v1/interface"`) onto the base URL.
    pub fn url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get(
        &self,
        endpoint: &'static str,
        query: &[(&'static str, String)],
    ) -> Result<Bytes, Error> {
        self.execute(ApiRequest {
            query: query.to_vec(),
            ..ApiRequest::get(endpoint)
        })
        .await
    }

    pub async fn post(
        &self,
        endpoint: &'static str,
        query: &[(&'static str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, Error> {
        self.execute(ApiRequest {
            query: query.to_vec(),
            body,
            ..ApiRequest::post(endpoint)
        })
        .await
    }

    pub async fn put(
        &self,
        endpoint: &'static str,
        query: &[(&'static str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, Error> {
        self.execute(ApiRequest {
            query: query.to_vec(),
            body,
            ..ApiRequest::put(endpoint)
        })
        .await
    }

    pub async fn delete(
        &self,
        endpoint: &'static str,
        query: &[(&'static str, String)],
    ) -> Result<Bytes, Error> {
        self.execute(ApiRequest {
            query: query.to_vec(),
            ..ApiRequest::delete(endpoint)
        })
        .await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn execute(&self, request: ApiRequest) -> Result<Bytes, Error> {
        let url = self.url(request.endpoint)?;
        debug!("{} {url} params={:?}", request.method, request.query);

        let mut builder = self.http.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = self.credentials.apply(builder)?;
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?)
    }
}

impl Transport for Client {
    async fn send(&self, request: ApiRequest) -> Result<Bytes, Error> {
        self.execute(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::with_client(reqwest::Client::new(), base, Credentials::None).unwrap()
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let c = client("https://fw.example.net");
        assert_eq!(c.base_url().as_str(), "https://fw.example.net/");
        assert_eq!(
            c.url("api/v1/interface").unwrap().as_str(),
            "https://fw.example.net/api/v1/interface"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let c = client("https://fw.example.net/pfsense/");
        assert_eq!(
            c.url("/api/v1/routing/apply").unwrap().as_str(),
            "https://fw.example.net/pfsense/api/v1/routing/apply"
        );

        let c = client("https://fw.example.net/pfsense");
        assert_eq!(
            c.url("api/v1/routing/gateway").unwrap().as_str(),
            "https://fw.example.net/pfsense/api/v1/routing/gateway"
        );
    }

    #[test]
    fn rejects_relative_base() {
        let result = Client::with_client(reqwest::Client::new(), "fw.local", Credentials::None);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn request_builders() {
        let req = ApiRequest::delete("api/v1/routing/gateway").query("id", 7.to_string());
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.query, vec![("id", "7".to_owned())]);
        assert!(req.body.is_none());

        let req = ApiRequest::post("api/v1/routing/gateway")
            .json(&serde_json::json!({ "apply": true }))
            .unwrap();
        assert_eq!(req.body.as_deref(), Some(br#"{"apply":true}"#.as_slice()));
    }
}
