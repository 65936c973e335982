use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{ConsultClientError, ConsultClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP-методы, которые использует API сайта.
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Имя метода в верхнем регистре.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Сырой ответ сервера. Разбор тела остаётся за вызывающим кодом.
pub struct ApiResponse {
    /// HTTP-статус.
    pub status: u16,
    /// Reason phrase статуса (`Not Found` и т.п.), может быть пустой.
    pub status_text: String,
    /// Тело ответа как текст.
    pub body: String,
}

impl ApiResponse {
    /// Статус в диапазоне 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Возвращает ответ как есть, если он успешный, иначе ошибку
    /// `"<status>: <message>"`.
    pub fn error_for_status(self) -> ConsultClientResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(ConsultClientError::from_http_response(
            self.status,
            &self.status_text,
            &self.body,
        ))
    }

    /// Разбирает тело как JSON. Пустое тело (например, `204`) даёт `null`.
    pub fn json_value(&self) -> ConsultClientResult<serde_json::Value> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|err| ConsultClientError::Decode(err.to_string()))
    }

    /// Разбирает тело в конкретный тип.
    pub fn json<T: DeserializeOwned>(&self) -> ConsultClientResult<T> {
        serde_json::from_value(self.json_value()?)
            .map_err(|err| ConsultClientError::Decode(err.to_string()))
    }
}

/// Транспорт, через который `ConsultClient` отправляет запросы.
///
/// Реализация обязана отправлять cookies (credentials) с каждым запросом и
/// выставлять `Content-Type: application/json` только при наличии тела.
/// Ответ с любым статусом возвращается как `Ok`; `Err` означает, что ответа
/// не было вовсе.
///
/// Фьючерсы не требуют `Send`: в браузере запросы живут в однопоточном
/// event loop.
#[async_trait(?Send)]
pub trait ApiTransport {
    /// Отправляет запрос на уже разрешённый URL.
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> ConsultClientResult<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn empty_body_decodes_to_null() {
        let value = response(204, "").json_value().expect("empty body is null");
        assert!(value.is_null());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = response(200, "{oops").json_value().expect_err("must fail");
        assert!(matches!(err, ConsultClientError::Decode(_)));
    }

    #[test]
    fn error_for_status_keeps_success() {
        let ok = response(201, "{}").error_for_status();
        assert!(ok.is_ok());

        let err = response(409, "duplicate").error_for_status().expect_err("must fail");
        assert_eq!(err.to_string(), "409: duplicate");
    }
}
