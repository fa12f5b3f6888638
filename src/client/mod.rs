//! PagerDuty API client implementation.
//!
//! Every call goes through [`PagerDutyClient::new_request`] and
//! [`PagerDutyClient::do_request`]: one request, one response, no retries.

use crate::auth::ApiToken;
use crate::config::{PagerDutyConfig, PagerDutyConfigBuilder, ACCEPT_MEDIA_TYPE};
use crate::errors::{ErrorResponse, PagerDutyError, PagerDutyErrorKind, PagerDutyResult};
use crate::observability::{redact_header, TracingHooks};
use crate::services::*;
use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, Method, Request, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use url::Url;

/// Header gating early-access endpoints.
pub const EARLY_ACCESS_HEADER: &str = "X-EARLY-ACCESS";

/// Per-request modifier applied after the fixed headers are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// Appends a header value.
    Header {
        /// Header name.
        name: String,
        /// Header value.
        value: String,
    },
    /// Appends a query parameter.
    Query {
        /// Parameter name.
        name: String,
        /// Parameter value.
        value: String,
    },
}

impl RequestOption {
    /// Creates a header option.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Header {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a query parameter option.
    pub fn query(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Query {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates the `X-EARLY-ACCESS` header for a gated feature.
    pub fn early_access(feature: impl Into<String>) -> Self {
        Self::header(EARLY_ACCESS_HEADER, feature)
    }

    fn apply(&self, request: &mut Request) -> PagerDutyResult<()> {
        match self {
            Self::Header { name, value } => {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    PagerDutyError::invalid_parameter(format!(
                        "Invalid header name {:?}: {}",
                        name, e
                    ))
                })?;
                let value = HeaderValue::from_str(value).map_err(|e| {
                    PagerDutyError::invalid_parameter(format!(
                        "Invalid header value for {}: {}",
                        name, e
                    ))
                })?;
                request.headers_mut().append(name, value);
            }
            Self::Query { name, value } => {
                request.url_mut().query_pairs_mut().append_pair(name, value);
            }
        }
        Ok(())
    }
}

/// Metadata and buffered body of a successful response.
///
/// The body is read in full before this is returned, so the connection is
/// released whether or not the caller decodes it.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Gets the request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Gets the final request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Gets the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Gets the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets the raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> PagerDutyResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            PagerDutyError::deserialization(format!(
                "Failed to decode response from {} {}: {}",
                self.method, self.url, e
            ))
            .with_status(self.status.as_u16())
            .with_cause(e)
        })
    }
}

/// PagerDuty API client.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PagerDutyClient {
    http: Client,
    base_url: Url,
    config: Arc<PagerDutyConfig>,
}

impl PagerDutyClient {
    /// Creates a new PagerDuty client.
    ///
    /// Falls back to the production base URL when the configured one is
    /// empty, and to a fresh HTTP client when none is supplied.
    pub fn new(config: PagerDutyConfig) -> PagerDutyResult<Self> {
        let base_url = config.parsed_base_url()?;

        let http = match &config.http_client {
            Some(client) => client.clone(),
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = config.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(timeout) = config.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(|e| {
                    PagerDutyError::configuration(format!("Failed to create HTTP client: {}", e))
                        .with_cause(e)
                })?
            }
        };

        debug!(
            base_url = %base_url,
            token = %config.token.masked(),
            "PagerDuty client created"
        );

        Ok(Self {
            http,
            base_url,
            config: Arc::new(config),
        })
    }

    /// Creates a new client builder.
    pub fn builder() -> PagerDutyClientBuilder {
        PagerDutyClientBuilder::new()
    }

    /// Gets the parsed base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Gets the configuration.
    pub fn config(&self) -> &PagerDutyConfig {
        &self.config
    }

    fn token(&self) -> &ApiToken {
        &self.config.token
    }

    // Service accessors

    /// Gets the abilities service.
    pub fn abilities(&self) -> AbilitiesService<'_> {
        AbilitiesService::new(self)
    }

    /// Gets the add-ons service.
    pub fn addons(&self) -> AddonsService<'_> {
        AddonsService::new(self)
    }

    /// Gets the escalation policies service.
    pub fn escalation_policies(&self) -> EscalationPoliciesService<'_> {
        EscalationPoliciesService::new(self)
    }

    /// Gets the schedules service.
    pub fn schedules(&self) -> SchedulesService<'_> {
        SchedulesService::new(self)
    }

    /// Gets the services service.
    pub fn services(&self) -> ServicesService<'_> {
        ServicesService::new(self)
    }

    /// Gets the teams service.
    pub fn teams(&self) -> TeamsService<'_> {
        TeamsService::new(self)
    }

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Gets the vendors service.
    pub fn vendors(&self) -> VendorsService<'_> {
        VendorsService::new(self)
    }

    /// Gets the automation actions runners service.
    pub fn automation_actions_runners(&self) -> AutomationActionsRunnersService<'_> {
        AutomationActionsRunnersService::new(self)
    }

    /// Checks that the configured token is accepted by the API.
    pub async fn validate_auth(&self) -> PagerDutyResult<()> {
        self.abilities().list().await.map(|_| ())
    }

    // HTTP methods

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PagerDutyResult<T> {
        self.new_request_do(Method::GET, path, None::<&()>, None::<&()>)
            .await?
            .json()
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &Q,
    ) -> PagerDutyResult<T> {
        self.new_request_do(Method::GET, path, Some(params), None::<&()>)
            .await?
            .json()
    }

    /// Makes a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> PagerDutyResult<T> {
        self.new_request_do(Method::POST, path, None::<&()>, Some(body))
            .await?
            .json()
    }

    /// Makes a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> PagerDutyResult<T> {
        self.new_request_do(Method::PUT, path, None::<&()>, Some(body))
            .await?
            .json()
    }

    /// Makes a PUT request without a body, ignoring the response body.
    pub async fn put_empty(&self, path: &str) -> PagerDutyResult<ApiResponse> {
        self.new_request_do(Method::PUT, path, None::<&()>, None::<&()>)
            .await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> PagerDutyResult<ApiResponse> {
        self.new_request_do(Method::DELETE, path, None::<&()>, None::<&()>)
            .await
    }

    // Request pipeline

    /// Builds a request against `base_url + path` with the fixed headers.
    ///
    /// `path` may already carry a query string.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> PagerDutyResult<Request> {
        let body_bytes = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| {
                PagerDutyError::encoding(format!("Failed to serialize request body: {}", e))
                    .with_cause(e)
            })?;

        let url = self.build_url(path)?;

        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, ACCEPT_MEDIA_TYPE)
            .header(AUTHORIZATION, self.token().authorization_header())
            .header(CONTENT_TYPE, "application/json");

        if let Some(ua) = &self.config.user_agent {
            request = request.header(USER_AGENT, ua.as_str());
        }

        if let Some(bytes) = body_bytes {
            request = request.body(bytes);
        }

        request.build().map_err(|e| {
            PagerDutyError::new(
                PagerDutyErrorKind::InvalidParameter,
                format!("Failed to build request: {}", e),
            )
            .with_cause(e)
        })
    }

    /// Builds and executes a request, encoding `query` into the URL.
    pub async fn new_request_do<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> PagerDutyResult<ApiResponse>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.new_request_do_options(method, path, query, body, &[])
            .await
    }

    /// Like [`new_request_do`](Self::new_request_do), applying `options` in
    /// order before dispatch.
    pub async fn new_request_do_options<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
        options: &[RequestOption],
    ) -> PagerDutyResult<ApiResponse>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let path = match query {
            Some(query) => {
                let encoded = serde_urlencoded::to_string(query).map_err(|e| {
                    PagerDutyError::invalid_parameter(format!(
                        "Failed to serialize query parameters: {}",
                        e
                    ))
                    .with_cause(e)
                })?;
                if encoded.is_empty() {
                    path.to_string()
                } else {
                    format!("{}?{}", path, encoded)
                }
            }
            None => path.to_string(),
        };

        let mut request = self.new_request(method, &path, body)?;
        for option in options {
            option.apply(&mut request)?;
        }

        self.do_request(request).await
    }

    /// Executes a request once.
    ///
    /// 2xx responses are returned with their body buffered; anything else
    /// becomes an error carrying the decoded API error body when there is one.
    pub async fn do_request(&self, request: Request) -> PagerDutyResult<ApiResponse> {
        let method = request.method().clone();
        let url = request.url().clone();

        TracingHooks::on_request_start(method.as_str(), url.as_str());
        for (name, value) in request.headers() {
            trace!(
                header = %name,
                value = %redact_header(name.as_str(), value.to_str().unwrap_or("<binary>")),
                "request header"
            );
        }

        let started = Instant::now();
        let response = self.http.execute(request).await.map_err(|e| {
            TracingHooks::on_request_error(method.as_str(), url.as_str(), &e.to_string());
            PagerDutyError::from_transport(method.as_str(), url.as_str(), e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            // An unreadable error body still yields the status-line error.
            let body = response.bytes().await.unwrap_or_default();
            TracingHooks::on_api_error(
                method.as_str(),
                url.as_str(),
                status.as_u16(),
                started.elapsed(),
            );
            return Err(Self::decode_error_response(&method, &url, status, &body));
        }

        let body = response.bytes().await.map_err(|e| {
            TracingHooks::on_request_error(method.as_str(), url.as_str(), &e.to_string());
            PagerDutyError::from_transport(method.as_str(), url.as_str(), e)
        })?;

        TracingHooks::on_request_complete(
            method.as_str(),
            url.as_str(),
            status.as_u16(),
            started.elapsed(),
        );

        Ok(ApiResponse {
            method,
            url,
            status,
            headers,
            body,
        })
    }

    fn build_url(&self, path: &str) -> PagerDutyResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let raw = format!("{}/{}", base, path);

        Url::parse(&raw).map_err(|e| {
            PagerDutyError::new(
                PagerDutyErrorKind::InvalidUrl,
                format!("Failed to build request URL {:?}: {}", raw, e),
            )
            .with_cause(e)
        })
    }

    fn decode_error_response(
        method: &Method,
        url: &Url,
        status: StatusCode,
        body: &[u8],
    ) -> PagerDutyError {
        let detail = serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .map(|e| e.error);

        PagerDutyError::from_response(method.as_str(), url.as_str(), status, detail)
    }
}

/// Builder for PagerDutyClient.
pub struct PagerDutyClientBuilder {
    config_builder: PagerDutyConfigBuilder,
}

impl PagerDutyClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: PagerDutyConfig::builder(),
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.token(token);
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.config_builder = self.config_builder.http_client(client);
        self
    }

    /// Builds the client.
    pub fn build(self) -> PagerDutyResult<PagerDutyClient> {
        let config = self.config_builder.build()?;
        PagerDutyClient::new(config)
    }
}

impl Default for PagerDutyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
