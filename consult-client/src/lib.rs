//! Клиентская библиотека сайта образовательного консалтинга.
//!
//! Предоставляет `ConsultClient` поверх абстрактного транспорта:
//! - разрешение путей относительно API origin и отправку запросов с cookies;
//! - кэш чтений с явной инвалидацией после изменений;
//! - типизированные записи (университеты, курсы, классы, блог, отзывы, команда,
//!   настройки) с единым `EntityId`;
//! - проекции для публичных страниц и контроллеры экранов админки.
//!
//! Нативный транспорт на `reqwest` собирается для всех целей, кроме `wasm32`;
//! браузерный транспорт живёт во фронтенде.
#![warn(missing_docs)]

pub mod admin;
pub mod auth;
mod cache;
pub mod carousel;
mod client;
mod error;
pub mod flags;
pub mod forms;
#[cfg(not(target_arch = "wasm32"))]
mod http_client;
mod models;
mod notify;
#[cfg(test)]
mod testing;
mod transport;
pub mod views;

pub use cache::{QueryCache, QueryKey};
pub use client::{ApiOrigin, ConsultClient, UnauthorizedBehavior, paths};
pub use error::{ConsultClientError, ConsultClientResult};
#[cfg(not(target_arch = "wasm32"))]
pub use http_client::{HttpClientConfig, HttpTransport, NativeClient};
pub use models::{
    Blog, Class, Course, EntityId, FromRecord, Identified, Review, SiteSettings, TeamMember,
    University, decode_list,
};
pub use notify::{Toast, ToastVariant};
pub use transport::{ApiResponse, ApiTransport, HttpMethod};
