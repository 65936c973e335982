use tracing::{info, warn};

use crate::client::ConsultClient;
use crate::error::server_message;
use crate::forms::{FormPayload, FormData, LoginPayload};
use crate::notify::{Toast, ToastVariant};
use crate::transport::ApiTransport;

/// Куда уходить после успешного входа.
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

const CONNECTION_FAILED: &str = "Failed to login. Please check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Итог попытки входа.
pub enum LoginOutcome {
    /// Сервер принял учётные данные. Сессия живёт в cookie транспорта.
    Success {
        /// `message` ответа или `Logged in successfully`.
        message: String,
    },
    /// Сервер ответил ошибкой.
    Rejected {
        /// `message` ответа или `Invalid credentials`.
        message: String,
    },
    /// Не заполнены поля, запрос не отправлялся.
    Invalid {
        /// Текст проверки.
        message: String,
    },
    /// Ответа не было.
    Unreachable,
}

impl LoginOutcome {
    /// Уведомление для пользователя.
    pub fn toast(&self) -> Toast {
        match self {
            Self::Success { message } => Toast::success(message.clone()),
            Self::Rejected { message } | Self::Invalid { message } => {
                Toast::new("Error", message.clone(), ToastVariant::Destructive)
            }
            Self::Unreachable => Toast::new("Error", CONNECTION_FAILED, ToastVariant::Destructive),
        }
    }

    /// Путь для перехода, если вход удался.
    pub fn redirect(&self) -> Option<&'static str> {
        matches!(self, Self::Success { .. }).then_some(DASHBOARD_PATH)
    }
}

/// Отправляет учётные данные из формы входа.
pub async fn login<T: ApiTransport>(api: &ConsultClient<T>, form: &FormData) -> LoginOutcome {
    let credentials = match LoginPayload::from_form(form) {
        Ok(credentials) => credentials,
        Err(err) => {
            return LoginOutcome::Invalid {
                message: err.to_string(),
            };
        }
    };

    let response = match api.login(&credentials).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "login request failed");
            return LoginOutcome::Unreachable;
        }
    };

    let message = server_message(&response.body);
    if response.is_success() {
        info!(username = %credentials.username, "logged in");
        LoginOutcome::Success {
            message: message.unwrap_or_else(|| "Logged in successfully".to_string()),
        }
    } else {
        warn!(status = response.status, "login rejected");
        LoginOutcome::Rejected {
            message: message.unwrap_or_else(|| "Invalid credentials".to_string()),
        }
    }
}
