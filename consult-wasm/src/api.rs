use async_trait::async_trait;
use consult_client::{
    ApiOrigin, ApiResponse, ApiTransport, ConsultClient, ConsultClientError, ConsultClientResult,
    HttpMethod, QueryCache,
};
use gloo_net::http::{Request, RequestBuilder};
use web_sys::RequestCredentials;

const API_ORIGIN: &str = match option_env!("CONSULT_API_ORIGIN") {
    Some(value) => value,
    None => "",
};

/// Транспорт на `fetch`. Cookies сессии отправляются всегда
/// (`credentials: include`), таймаутов нет.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BrowserTransport;

pub(crate) type BrowserClient = ConsultClient<BrowserTransport>;

pub(crate) fn browser_client() -> BrowserClient {
    ConsultClient::new(BrowserTransport, ApiOrigin::new(API_ORIGIN), QueryCache::new())
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    let builder = match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    };
    builder.credentials(RequestCredentials::Include)
}

#[async_trait(?Send)]
impl ApiTransport for BrowserTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> ConsultClientResult<ApiResponse> {
        let builder = builder(method, url);
        let request = match body {
            // json() сам ставит Content-Type
            Some(body) => builder
                .json(body)
                .map_err(|err| ConsultClientError::Encode(err.to_string()))?,
            None => builder
                .build()
                .map_err(|err| ConsultClientError::Network(err.to_string()))?,
        };

        let response = request
            .send()
            .await
            .map_err(|err| ConsultClientError::Network(err.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|err| ConsultClientError::Network(err.to_string()))?;

        Ok(ApiResponse {
            status,
            status_text,
            body,
        })
    }
}
