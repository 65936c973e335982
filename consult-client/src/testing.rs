//! Транспорт в памяти для юнит-тестов.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ConsultClientError, ConsultClientResult};
use crate::transport::{ApiResponse, ApiTransport, HttpMethod};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SentRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(ApiResponse),
    NetworkDown,
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<(HttpMethod, String, Reply)>,
    requests: Vec<SentRequest>,
}

/// Отвечает заранее заданными ответами по суффиксу URL и пишет журнал
/// отправленных запросов. Незнакомый маршрут получает `404`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Rc<RefCell<State>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        let response = ApiResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
        };
        self.state
            .borrow_mut()
            .routes
            .push((method, path.to_string(), Reply::Response(response)));
        self
    }

    pub fn fail(self, method: HttpMethod, path: &str) -> Self {
        self.state
            .borrow_mut()
            .routes
            .push((method, path.to_string(), Reply::NetworkDown));
        self
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn calls_to(&self, method: HttpMethod, path: &str) -> usize {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|request| request.method == method && request.url.ends_with(path))
            .count()
    }
}

#[async_trait(?Send)]
impl ApiTransport for FakeTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> ConsultClientResult<ApiResponse> {
        let mut state = self.state.borrow_mut();
        state.requests.push(SentRequest {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });

        let reply = state
            .routes
            .iter()
            .rev()
            .find(|(route_method, path, _)| *route_method == method && url.ends_with(path.as_str()))
            .map(|(_, _, reply)| reply.clone());

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::NetworkDown) => Err(ConsultClientError::Network("connection refused".to_string())),
            None => Ok(ApiResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: String::new(),
            }),
        }
    }
}
