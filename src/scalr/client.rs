//! Scalr HTTP client: configuration, transport and the request pipeline

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Request};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::{api, env, retry as retry_config};
use crate::error::{map_status, Result, ScalrError};
use crate::scalr::credentials::TokenResolver;
use crate::scalr::decode::ResponseTarget;
use crate::scalr::retry::{
    backoff, retry_after, Attempt, DefaultRetryPolicy, RetryDecision, RetryLogHook, RetryPolicy,
};
use crate::scalr::{
    ConfigurationVersions, Environments, ProviderConfigurationParameters, ProviderConfigurations,
    RequestBody, Runs, StateVersions, Tags, Teams, Variables, Webhooks, Workspaces,
};

/// Client configuration.
///
/// Empty fields fall back to the environment: `SCALR_ADDRESS`, `SCALR_TOKEN`,
/// then the Terraform CLI credentials file for the token.
#[derive(Clone, Default)]
pub struct Config {
    /// Scalr address, e.g. `https://acme.scalr.io`
    pub address: String,
    /// API base path, `/api/iacp/v3/` when empty
    pub base_path: String,
    /// API token
    pub token: String,
    /// Headers sent with every request
    pub headers: HeaderMap,
    /// Custom HTTP transport
    pub http_client: Option<Client>,
    /// Called before every retry
    pub retry_log_hook: Option<RetryLogHook>,
    /// Retry 5xx responses and transport failures as well as 429
    pub retry_server_errors: bool,
    /// Replaces [`DefaultRetryPolicy`]
    pub retry_policy: Option<Arc<dyn RetryPolicy>>,
    /// Retries after the first attempt, 30 when unset
    pub max_retries: Option<u32>,
    /// Worker count for provider configuration parameter changes
    pub max_parallel_changes: Option<usize>,
}

impl Config {
    /// Defaults read from the environment
    pub fn from_env() -> Self {
        let address = std::env::var(env::ADDRESS)
            .ok()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| api::DEFAULT_ADDRESS.to_string());
        let token = std::env::var(env::TOKEN).unwrap_or_default();
        if !token.is_empty() {
            debug!("Using token from {} environment variable", env::TOKEN);
        }

        let mut headers = HeaderMap::new();
        let agent = format!("scalr-api-rust/{}", env!("CARGO_PKG_VERSION"));
        if let Ok(value) = HeaderValue::from_str(&agent) {
            headers.insert(USER_AGENT, value);
        }

        Self {
            address,
            base_path: api::BASE_PATH.to_string(),
            token,
            headers,
            ..Default::default()
        }
    }
}

/// Scalr API client.
///
/// Default headers and the server-error retry flag can be changed after
/// construction. Configure them before the client is shared across tasks;
/// later changes are safe but apply only to requests built afterwards.
pub struct ScalrClient {
    http: Client,
    base_url: Url,
    token: String,
    headers: Mutex<HeaderMap>,
    retry_server_errors: AtomicBool,
    retry_log_hook: Option<RetryLogHook>,
    retry_policy: Arc<dyn RetryPolicy>,
    max_retries: u32,
    max_parallel_changes: usize,
}

impl std::fmt::Debug for ScalrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalrClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry_server_errors", &self.retry_server_errors())
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl ScalrClient {
    /// Create a client, filling empty config fields from the environment
    pub fn new(config: Config) -> Result<Self> {
        Self::with_defaults(config, Config::from_env(), &TokenResolver::new())
    }

    pub(crate) fn with_defaults(
        config: Config,
        defaults: Config,
        resolver: &TokenResolver,
    ) -> Result<Self> {
        let address = first_non_empty(&config.address, &defaults.address)
            .unwrap_or(api::DEFAULT_ADDRESS)
            .to_string();
        let base_url = Url::parse(&address)
            .map_err(|e| ScalrError::Config(format!("invalid address '{}': {}", address, e)))?;

        let mut base_path = first_non_empty(&config.base_path, &defaults.base_path)
            .unwrap_or(api::BASE_PATH)
            .to_string();
        if !base_path.ends_with('/') {
            base_path.push('/');
        }
        let base_url = base_url.join(&base_path)?;

        let token = match first_non_empty(&config.token, &defaults.token) {
            Some(token) => token.to_string(),
            None => resolver
                .lookup(base_url.host_str().unwrap_or_default())?
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ScalrError::Config("missing API token".to_string()))?,
        };

        let mut headers = defaults.headers;
        for key in config.headers.keys() {
            headers.remove(key);
        }
        for (key, value) in config.headers.iter() {
            headers.append(key.clone(), value.clone());
        }

        let http = match config.http_client.or(defaults.http_client) {
            Some(client) => client,
            None => Client::builder()
                .pool_max_idle_per_host(20)
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .connect_timeout(Duration::from_secs(10))
                .build()?,
        };

        debug!("Scalr client configured for {}", base_url);

        Ok(Self {
            http,
            base_url,
            token,
            headers: Mutex::new(headers),
            retry_server_errors: AtomicBool::new(config.retry_server_errors),
            retry_log_hook: config.retry_log_hook.or(defaults.retry_log_hook),
            retry_policy: config
                .retry_policy
                .unwrap_or_else(|| Arc::new(DefaultRetryPolicy)),
            max_retries: config.max_retries.unwrap_or(retry_config::MAX_RETRIES),
            max_parallel_changes: config
                .max_parallel_changes
                .filter(|n| *n > 0)
                .unwrap_or(retry_config::NUM_PARALLEL),
        })
    }

    /// API root all request paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// Snapshot of the default headers
    pub fn headers(&self) -> HeaderMap {
        self.headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set (or replace) a default header
    pub fn set_header(&self, name: HeaderName, value: HeaderValue) {
        self.headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, value);
    }

    pub fn remove_header(&self, name: &HeaderName) {
        self.headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    /// Select an API profile with `Prefer: profile=<name>`
    pub fn set_profile(&self, profile: &str) {
        match HeaderValue::from_str(&format!("profile={}", profile)) {
            Ok(value) => self.set_header(reqwest::header::HeaderName::from_static("prefer"), value),
            Err(_) => warn!("Ignoring invalid profile name '{}'", profile),
        }
    }

    pub fn retry_server_errors(&self) -> bool {
        self.retry_server_errors.load(Ordering::Relaxed)
    }

    /// Toggle retries for 5xx responses and transport failures
    pub fn set_retry_server_errors(&self, enabled: bool) {
        self.retry_server_errors.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn max_parallel_changes(&self) -> usize {
        self.max_parallel_changes
    }

    /// Send a request and decode the response into `D`.
    ///
    /// Transient failures are retried per the retry policy. Non-2xx
    /// responses become typed errors; a cancelled `ctx` yields
    /// [`ScalrError::Cancelled`].
    pub async fn execute<D: ResponseTarget>(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<D> {
        let response = self.send_with_retry(ctx, request).await?;

        let status = response.status().as_u16();
        let path = response.url().path().to_string();

        let body = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ScalrError::Cancelled),
            body = response.bytes() => body?,
        };

        if let Some(err) = map_status(status, &path, &body) {
            debug!("Request to {} failed with status {}", path, status);
            return Err(err);
        }

        D::from_body(&body)
    }

    async fn send_with_retry(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<reqwest::Response> {
        let retry_server_errors = self.retry_server_errors();
        let mut retries: u32 = 0;

        loop {
            let Some(attempt_request) = request.try_clone() else {
                // Streaming bodies cannot be replayed
                return self.send_once(ctx, request).await;
            };

            debug!(
                "{} {} (attempt {})",
                attempt_request.method(),
                attempt_request.url(),
                retries + 1
            );

            let result = self.send_once_raw(ctx, attempt_request).await?;

            let attempt = match &result {
                Ok(response) => Attempt::Status(response.status().as_u16()),
                Err(_) => Attempt::TransportError,
            };

            match self
                .retry_policy
                .should_retry(ctx, attempt, retry_server_errors)
            {
                RetryDecision::Cancelled => return Err(ScalrError::Cancelled),
                RetryDecision::Return => return result.map_err(ScalrError::from),
                RetryDecision::Retry => {}
            }

            if retries >= self.max_retries {
                warn!(
                    "Giving up on {} after {} retries ({:?})",
                    request.url(),
                    retries,
                    attempt
                );
                return result.map_err(ScalrError::from);
            }

            let server_wait = result.as_ref().ok().and_then(retry_after);
            let wait = backoff(
                retry_config::WAIT_MIN,
                retry_config::WAIT_MAX,
                retries,
                server_wait,
            );
            retries += 1;

            if let Some(hook) = &self.retry_log_hook {
                hook(retries, result.as_ref().ok());
            }

            debug!(
                "Retrying {} in {:?} (retry {}, {:?})",
                request.url(),
                wait,
                retries,
                attempt
            );

            tokio::select! {
                biased;
                _ = ctx.cancelled() => return Err(ScalrError::Cancelled),
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    async fn send_once(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<reqwest::Response> {
        Ok(self.send_once_raw(ctx, request).await??)
    }

    /// One round trip. The outer error is cancellation, the inner one is the
    /// transport outcome the retry policy gets to judge.
    async fn send_once_raw(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<std::result::Result<reqwest::Response, reqwest::Error>> {
        tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(ScalrError::Cancelled),
            result = self.http.execute(request) => Ok(result),
        }
    }

    /// Build and execute in one step
    pub(crate) async fn call<D: ResponseTarget>(
        &self,
        ctx: &CancellationToken,
        method: reqwest::Method,
        path: &str,
        body: RequestBody,
    ) -> Result<D> {
        let request = self.new_request(method, path, body)?;
        self.execute(ctx, request).await
    }

    pub fn environments(&self) -> Environments<'_> {
        Environments::new(self)
    }

    pub fn workspaces(&self) -> Workspaces<'_> {
        Workspaces::new(self)
    }

    pub fn runs(&self) -> Runs<'_> {
        Runs::new(self)
    }

    pub fn variables(&self) -> Variables<'_> {
        Variables::new(self)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    pub fn teams(&self) -> Teams<'_> {
        Teams::new(self)
    }

    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    pub fn provider_configurations(&self) -> ProviderConfigurations<'_> {
        ProviderConfigurations::new(self)
    }

    pub fn provider_configuration_parameters(&self) -> ProviderConfigurationParameters<'_> {
        ProviderConfigurationParameters::new(self)
    }

    pub fn configuration_versions(&self) -> ConfigurationVersions<'_> {
        ConfigurationVersions::new(self)
    }

    pub fn state_versions(&self) -> StateVersions<'_> {
        StateVersions::new(self)
    }
}

fn first_non_empty<'a>(explicit: &'a str, fallback: &'a str) -> Option<&'a str> {
    [explicit, fallback].into_iter().find(|s| !s.is_empty())
}

#[cfg(test)]
impl ScalrClient {
    /// Client pointed at a mock server, isolated from the environment
    pub fn test_client(address: &str) -> Self {
        Self::test_client_with(Config {
            address: address.to_string(),
            ..Default::default()
        })
    }

    /// Like [`test_client`](Self::test_client) with extra config
    pub fn test_client_with(mut config: Config) -> Self {
        if config.token.is_empty() {
            config.token = "test-token".to_string();
        }
        Self::with_defaults(config, Config::default(), &TokenResolver::with_path("/nonexistent"))
            .expect("test client config is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use std::sync::atomic::AtomicU32;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn isolated(config: Config) -> Result<ScalrClient> {
        ScalrClient::with_defaults(
            config,
            Config::default(),
            &TokenResolver::with_path("/nonexistent"),
        )
    }

    #[test]
    fn test_base_url_normalization() {
        let client = isolated(Config {
            address: "https://acme.scalr.io".to_string(),
            base_path: "/api/iacp/v3".to_string(),
            token: "t".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url().as_str(), "https://acme.scalr.io/api/iacp/v3/");
    }

    #[test]
    fn test_defaults_fill_empty_fields() {
        let defaults = Config {
            address: "https://env.scalr.io".to_string(),
            token: "env-token".to_string(),
            ..Default::default()
        };
        let client = ScalrClient::with_defaults(
            Config::default(),
            defaults,
            &TokenResolver::with_path("/nonexistent"),
        )
        .unwrap();
        assert_eq!(client.base_url().as_str(), "https://env.scalr.io/api/iacp/v3/");
        assert_eq!(client.token(), "env-token");
    }

    #[test]
    fn test_explicit_fields_win() {
        let defaults = Config {
            address: "https://env.scalr.io".to_string(),
            token: "env-token".to_string(),
            ..Default::default()
        };
        let client = ScalrClient::with_defaults(
            Config {
                address: "https://explicit.scalr.io".to_string(),
                token: "explicit-token".to_string(),
                ..Default::default()
            },
            defaults,
            &TokenResolver::with_path("/nonexistent"),
        )
        .unwrap();
        assert_eq!(client.base_url().host_str(), Some("explicit.scalr.io"));
        assert_eq!(client.token(), "explicit-token");
    }

    #[test]
    fn test_missing_token() {
        let err = isolated(Config {
            address: "https://acme.scalr.io".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "configuration error: missing API token");
    }

    #[test]
    fn test_token_from_credentials_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"credentials":{"acme.scalr.io":{"token":"file-token"}}}"#)
            .unwrap();

        let client = ScalrClient::with_defaults(
            Config {
                address: "https://acme.scalr.io".to_string(),
                ..Default::default()
            },
            Config::default(),
            &TokenResolver::with_path(file.path()),
        )
        .unwrap();
        assert_eq!(client.token(), "file-token");
    }

    #[test]
    fn test_invalid_address() {
        let err = isolated(Config {
            address: "not a url".to_string(),
            token: "t".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ScalrError::Config(_)));
    }

    #[test]
    fn test_runtime_tunables() {
        let client = ScalrClient::test_client("https://acme.scalr.io");
        assert!(!client.retry_server_errors());
        client.set_retry_server_errors(true);
        assert!(client.retry_server_errors());

        let name = HeaderName::from_static("x-trace");
        client.set_header(name.clone(), HeaderValue::from_static("1"));
        assert_eq!(client.headers()["x-trace"], "1");
        client.remove_header(&name);
        assert!(client.headers().get("x-trace").is_none());
    }

    #[test]
    fn test_parallelism_defaults() {
        let client = ScalrClient::test_client("https://acme.scalr.io");
        assert_eq!(client.max_parallel_changes(), retry_config::NUM_PARALLEL);

        let client = ScalrClient::test_client_with(Config {
            address: "https://acme.scalr.io".to_string(),
            max_parallel_changes: Some(0),
            ..Default::default()
        });
        assert_eq!(client.max_parallel_changes(), retry_config::NUM_PARALLEL);
    }

    #[tokio::test]
    async fn test_execute_sends_auth_and_decodes_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/iacp/v3/widgets/w-1"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let req = client
            .new_request(Method::DELETE, "widgets/w-1", RequestBody::Empty)
            .unwrap();
        let result: Result<()> = client.execute(&CancellationToken::new(), req).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_server_errors_not_retried_by_default() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/iacp/v3/widgets"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let req = client
            .new_request(Method::GET, "widgets", RequestBody::Empty)
            .unwrap();
        let err = client
            .execute::<()>(&CancellationToken::new(), req)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_retry_exhaustion_returns_last_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/iacp/v3/widgets"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&mock_server)
            .await;

        let retries = Arc::new(AtomicU32::new(0));
        let seen = retries.clone();
        let client = ScalrClient::test_client_with(Config {
            address: mock_server.uri(),
            retry_server_errors: true,
            max_retries: Some(2),
            retry_log_hook: Some(Arc::new(move |_: u32, _: Option<&reqwest::Response>| {
                seen.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        });

        let req = client
            .new_request(Method::GET, "widgets", RequestBody::Empty)
            .unwrap();
        let err = client
            .execute::<()>(&CancellationToken::new(), req)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "503 Service Unavailable");
        assert_eq!(retries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_connection_failure_retried_only_with_flag() {
        for (flag, expected_retries) in [(false, 0), (true, 2)] {
            let seen_without_response = Arc::new(AtomicU32::new(0));
            let seen = seen_without_response.clone();
            let client = ScalrClient::test_client_with(Config {
                address: "http://127.0.0.1:1".to_string(),
                retry_server_errors: flag,
                max_retries: Some(2),
                retry_log_hook: Some(Arc::new(
                    move |_: u32, response: Option<&reqwest::Response>| {
                        assert!(response.is_none());
                        seen.fetch_add(1, Ordering::SeqCst);
                    },
                )),
                ..Default::default()
            });

            let req = client
                .new_request(Method::GET, "widgets", RequestBody::Empty)
                .unwrap();
            let err = client
                .execute::<()>(&CancellationToken::new(), req)
                .await
                .unwrap_err();

            assert!(matches!(err, ScalrError::Http(_)), "flag {flag}: {err:?}");
            assert_eq!(
                seen_without_response.load(Ordering::SeqCst),
                expected_retries,
                "flag {flag}"
            );
        }
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let ctx = CancellationToken::new();
        ctx.cancel();

        let req = client
            .new_request(Method::GET, "widgets", RequestBody::Empty)
            .unwrap();
        let err = client.execute::<()>(&ctx, req).await.unwrap_err();
        assert!(matches!(err, ScalrError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancelled_while_waiting_to_retry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let ctx = CancellationToken::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let req = client
            .new_request(Method::GET, "widgets", RequestBody::Empty)
            .unwrap();
        let err = tokio::time::timeout(Duration::from_secs(5), client.execute::<()>(&ctx, req))
            .await
            .expect("cancellation should interrupt the retry wait")
            .unwrap_err();
        assert!(matches!(err, ScalrError::Cancelled));
    }
}
