use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Ошибки клиентской библиотеки `consult-client`.
pub enum ConsultClientError {
    /// Ответ не получен: сеть недоступна, соединение оборвано, таймаут.
    #[error("network error: {0}")]
    Network(String),

    /// Сервер ответил статусом вне диапазона 2xx.
    ///
    /// Отображается как `"<status>: <message>"`.
    #[error("{status}: {message}")]
    Http {
        /// HTTP-статус ответа.
        status: u16,
        /// Текст ошибки: поле `message` JSON-тела, тело целиком или reason phrase.
        message: String,
    },

    /// Успешный ответ не удалось разобрать как JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// Тело запроса не удалось сериализовать в JSON.
    #[error("encode error: {0}")]
    Encode(String),

    /// Локальная проверка формы не пройдена, запрос не отправлялся.
    #[error("{0}")]
    Validation(String),

    /// У записи нет `id`/`_id`, адресовать её в update/delete нельзя.
    #[error("Missing {0} id")]
    MissingId(&'static str),

    /// Некорректная конфигурация клиента (origin, URL и т.п.).
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Результат операций `consult-client`.
pub type ConsultClientResult<T> = Result<T, ConsultClientError>;

impl ConsultClientError {
    /// Строит HTTP-ошибку из статуса и тела ответа.
    ///
    /// Тело трактуется как обычный текст, если только это не JSON со строковым
    /// полем `message`. Пустое тело заменяется reason phrase статуса.
    pub fn from_http_response(status: u16, status_text: &str, body: &str) -> Self {
        let message = server_message(body)
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .unwrap_or_else(|| status_text.to_string());

        Self::Http { status, message }
    }

    /// HTTP-статус, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Ошибка возникла до отправки запроса (валидация или отсутствие id).
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MissingId(_))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if err.is_builder() {
            return Self::Config(err.to_string());
        }
        Self::Network(err.to_string())
    }
}

/// Достаёт строковое поле `message` из JSON-тела, если оно есть.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() {
        return None;
    }
    Some(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_json_message() {
        let err = ConsultClientError::from_http_response(
            400,
            "Bad Request",
            r#"{"message":"name already taken"}"#,
        );
        assert_eq!(err.to_string(), "400: name already taken");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn http_error_uses_plain_text_body() {
        let err = ConsultClientError::from_http_response(500, "Internal Server Error", "db down");
        assert_eq!(err.to_string(), "500: db down");
    }

    #[test]
    fn http_error_falls_back_to_status_text() {
        let err = ConsultClientError::from_http_response(404, "Not Found", "   ");
        assert_eq!(err.to_string(), "404: Not Found");
    }

    #[test]
    fn json_without_message_is_kept_as_text() {
        let err = ConsultClientError::from_http_response(422, "Unprocessable Entity", r#"{"error":"x"}"#);
        assert_eq!(err.to_string(), r#"422: {"error":"x"}"#);
    }

    #[test]
    fn missing_id_reads_like_a_sentence() {
        let err = ConsultClientError::MissingId("course");
        assert_eq!(err.to_string(), "Missing course id");
        assert!(err.is_local());
    }
}
