#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Оформление уведомления.
pub enum ToastVariant {
    /// Обычное (успех).
    #[default]
    Default,
    /// Ошибка.
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Короткое уведомление по итогам действия пользователя.
pub struct Toast {
    /// Заголовок: `Success`, `Error`, `Missing fields`, ...
    pub title: String,
    /// Текст уведомления.
    pub description: String,
    /// Оформление.
    pub variant: ToastVariant,
}

impl Toast {
    /// Уведомление с произвольным заголовком.
    pub fn new(title: impl Into<String>, description: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    /// `Success`.
    pub fn success(description: impl Into<String>) -> Self {
        Self::new("Success", description, ToastVariant::Default)
    }

    /// `Error` с текстом ошибки или запасным текстом, если он пуст.
    pub fn error(message: impl Into<String>, fallback: &str) -> Self {
        let message = message.into();
        let description = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };
        Self::new("Error", description, ToastVariant::Destructive)
    }

    /// `true` для уведомлений об ошибке.
    pub fn is_error(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

impl core::fmt::Display for Toast {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
