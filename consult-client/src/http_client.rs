use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, Url};
use tracing::debug;

use crate::cache::QueryCache;
use crate::client::{ApiOrigin, ConsultClient};
use crate::error::{ConsultClientError, ConsultClientResult};
use crate::transport::{ApiResponse, ApiTransport, HttpMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Таймауты нативного HTTP-клиента.
pub struct HttpClientConfig {
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут запроса целиком.
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
/// Нативный транспорт на `reqwest` с собственным cookie jar.
///
/// Cookies, выставленные сервером (сессия админки), отправляются обратно с
/// каждым следующим запросом к тому же хосту.
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    /// Создаёт транспорт с заданными таймаутами.
    pub fn new(config: HttpClientConfig) -> ConsultClientResult<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(ConsultClientError::from_reqwest)?;

        Ok(Self { client, jar })
    }

    /// Cookies для origin в формате заголовка `Cookie`, если они есть.
    pub fn session_cookies(&self, origin: &str) -> ConsultClientResult<Option<String>> {
        let url = parse_origin(origin)?;
        Ok(self
            .jar
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(str::to_string)))
    }

    /// Восстанавливает cookies, ранее полученные через [`Self::session_cookies`].
    pub fn restore_session(&self, origin: &str, cookie_header: &str) -> ConsultClientResult<()> {
        let url = parse_origin(origin)?;
        for pair in cookie_header.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            self.jar.add_cookie_str(&format!("{pair}; Path=/"), &url);
        }
        debug!(origin, "session cookies restored");
        Ok(())
    }
}

fn parse_origin(origin: &str) -> ConsultClientResult<Url> {
    Url::parse(origin).map_err(|err| ConsultClientError::Config(format!("invalid origin {origin:?}: {err}")))
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait(?Send)]
impl ApiTransport for HttpTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> ConsultClientResult<ApiResponse> {
        let mut request = self.client.request(to_reqwest_method(method), url);
        if let Some(body) = body {
            // json() выставляет Content-Type: application/json
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(ConsultClientError::from_reqwest)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ConsultClientError::from_reqwest)?;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Клиент с нативным транспортом.
pub type NativeClient = ConsultClient<HttpTransport>;

impl ConsultClient<HttpTransport> {
    /// Клиент поверх `reqwest` с собственным кэшем.
    pub fn native(origin: ApiOrigin, config: HttpClientConfig) -> ConsultClientResult<Self> {
        if origin.is_same_origin() {
            return Err(ConsultClientError::Config(
                "native client needs an absolute API origin".to_string(),
            ));
        }
        Ok(Self::new(HttpTransport::new(config)?, origin, QueryCache::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeouts_match_cli_expectations() {
        let config = HttpClientConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn restored_cookies_are_exported_back() {
        let transport = HttpTransport::new(HttpClientConfig::default()).expect("client builds");
        transport
            .restore_session("http://localhost:3000", "sid=abc; theme=dark")
            .expect("origin parses");

        let header = transport
            .session_cookies("http://localhost:3000")
            .expect("origin parses")
            .expect("cookies present");
        assert!(header.contains("sid=abc"));
        assert!(header.contains("theme=dark"));
    }

    #[test]
    fn invalid_origin_is_config_error() {
        let transport = HttpTransport::new(HttpClientConfig::default()).expect("client builds");
        let err = transport.session_cookies("not a url").expect_err("must fail");
        assert!(matches!(err, ConsultClientError::Config(_)));
    }

    #[tokio::test]
    async fn relative_url_fails_without_network() {
        let transport = HttpTransport::new(HttpClientConfig::default()).expect("client builds");
        let err = transport
            .send(HttpMethod::Get, "/api/blogs", None)
            .await
            .expect_err("relative urls need an origin");
        assert!(matches!(err, ConsultClientError::Config(_)));
    }
}
