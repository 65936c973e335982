use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{QueryCache, QueryKey};
use crate::error::{ConsultClientError, ConsultClientResult};
use crate::models::{
    Blog, Class, Course, EntityId, FromRecord, Review, SiteSettings, TeamMember, University,
    decode_list,
};
use crate::transport::{ApiResponse, ApiTransport, HttpMethod};

/// Пути REST API сайта.
pub mod paths {
    /// Настройки сайта (singleton).
    pub const SETTINGS: &str = "/api/settings";
    /// Команда.
    pub const TEAM: &str = "/api/team";
    /// Университеты.
    pub const UNIVERSITIES: &str = "/api/universities";
    /// Курсы.
    pub const COURSES: &str = "/api/courses";
    /// Подготовительные классы.
    pub const CLASSES: &str = "/api/classes";
    /// Блог.
    pub const BLOGS: &str = "/api/blogs";
    /// Отзывы.
    pub const REVIEWS: &str = "/api/reviews";
    /// Вход в админку.
    pub const LOGIN: &str = "/api/auth/login";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Базовый адрес API. Пустой origin означает относительные запросы к тому же
/// хосту (например, за reverse proxy).
pub struct ApiOrigin(String);

impl ApiOrigin {
    /// Создаёт origin, отрезая пробелы и завершающие `/`.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().trim_end_matches('/').to_string())
    }

    /// Origin для запросов к тому же хосту.
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// Строка origin без завершающего `/`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true`, если запросы будут относительными.
    pub fn is_same_origin(&self) -> bool {
        self.0.is_empty()
    }

    /// Разрешает путь относительно origin.
    ///
    /// Абсолютные `http(s)://` URL возвращаются как есть, к относительному
    /// пути при необходимости добавляется ведущий `/`.
    pub fn resolve(&self, path: &str) -> String {
        if path.is_empty() || is_absolute_url(path) {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}

fn is_absolute_url(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Что делать с ответом `401` при чтении через кэш.
pub enum UnauthorizedBehavior {
    /// Вернуть ошибку `401: ...`.
    #[default]
    Throw,
    /// Вернуть пустой результат без ошибки (для страниц за сессией).
    ReturnNull,
}

#[derive(Debug, Clone)]
/// Клиент API сайта: разрешение путей, отправка запросов с credentials и
/// кэш чтений.
///
/// Кэш передаётся снаружи, поэтому несколько клиентов (и тесты) могут
/// делить одно хранилище или держать свои.
pub struct ConsultClient<T> {
    origin: ApiOrigin,
    transport: T,
    cache: QueryCache,
}

impl<T: ApiTransport> ConsultClient<T> {
    /// Создаёт клиент поверх транспорта.
    pub fn new(transport: T, origin: ApiOrigin, cache: QueryCache) -> Self {
        Self {
            origin,
            transport,
            cache,
        }
    }

    /// Базовый адрес API.
    pub fn origin(&self) -> &ApiOrigin {
        &self.origin
    }

    /// Кэш чтений.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Транспорт.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ключ кэша для пути.
    pub fn query_key(&self, path: &str) -> QueryKey {
        QueryKey::new(self.origin.as_str(), path)
    }

    /// Отправляет запрос и возвращает ответ с любым статусом.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> ConsultClientResult<ApiResponse> {
        let url = self.origin.resolve(path);
        debug!(%method, %url, has_body = body.is_some(), "sending request");

        let response = self.transport.send(method, &url, body).await;
        if let Err(err) = &response {
            warn!(%method, %url, error = %err, "request failed without response");
        }
        response
    }

    /// Отправляет запрос; статус вне 2xx превращается в ошибку
    /// `"<status>: <message>"`.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> ConsultClientResult<ApiResponse> {
        let response = self.send(method, path, body).await?;
        response.error_for_status().inspect_err(|err| {
            warn!(%method, path, error = %err, "request rejected by server");
        })
    }

    /// Читает путь через кэш.
    ///
    /// `None` означает `null`-результат: пустое тело или `401` в режиме
    /// [`UnauthorizedBehavior::ReturnNull`].
    pub async fn query(
        &self,
        path: &str,
        on_unauthorized: UnauthorizedBehavior,
    ) -> ConsultClientResult<Option<Value>> {
        let key = self.query_key(path);
        let value = self
            .cache
            .get_or_load(&key, || self.load(path, on_unauthorized))
            .await?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn load(
        &self,
        path: &str,
        on_unauthorized: UnauthorizedBehavior,
    ) -> ConsultClientResult<Value> {
        let response = self.send(HttpMethod::Get, path, None).await?;
        if on_unauthorized == UnauthorizedBehavior::ReturnNull && response.status == 401 {
            debug!(path, "unauthorized read resolved to null");
            return Ok(Value::Null);
        }
        response.error_for_status()?.json_value()
    }

    /// Инвалидирует закэшированное чтение пути.
    pub fn invalidate(&self, path: &str) -> bool {
        self.cache.invalidate(&self.query_key(path))
    }

    /// Читает список записей через кэш. Записи не фильтруются.
    pub async fn list<M: FromRecord>(&self, path: &str) -> ConsultClientResult<Vec<M>> {
        let value = self.query(path, UnauthorizedBehavior::Throw).await?;
        Ok(value.map(decode_list).unwrap_or_default())
    }

    /// Все университеты.
    pub async fn universities(&self) -> ConsultClientResult<Vec<University>> {
        self.list(paths::UNIVERSITIES).await
    }

    /// Все курсы.
    pub async fn courses(&self) -> ConsultClientResult<Vec<Course>> {
        self.list(paths::COURSES).await
    }

    /// Все классы.
    pub async fn classes(&self) -> ConsultClientResult<Vec<Class>> {
        self.list(paths::CLASSES).await
    }

    /// Все статьи блога.
    pub async fn blogs(&self) -> ConsultClientResult<Vec<Blog>> {
        self.list(paths::BLOGS).await
    }

    /// Все отзывы.
    pub async fn reviews(&self) -> ConsultClientResult<Vec<Review>> {
        self.list(paths::REVIEWS).await
    }

    /// Команда.
    pub async fn team(&self) -> ConsultClientResult<Vec<TeamMember>> {
        self.list(paths::TEAM).await
    }

    /// Настройки сайта; `None`, если сервер ещё ничего не сохранил.
    pub async fn settings(&self) -> ConsultClientResult<Option<SiteSettings>> {
        let value = self
            .query(paths::SETTINGS, UnauthorizedBehavior::Throw)
            .await?;
        Ok(value.and_then(SiteSettings::from_record))
    }

    /// `POST` коллекции. Возвращает тело ответа (`null`, если оно пустое).
    pub async fn create<P: Serialize>(&self, path: &str, payload: &P) -> ConsultClientResult<Value> {
        let body = encode(payload)?;
        self.request(HttpMethod::Post, path, Some(&body))
            .await?
            .json_value()
    }

    /// `PUT` записи `path/:id`.
    pub async fn update<P: Serialize>(
        &self,
        path: &str,
        id: &EntityId,
        payload: &P,
    ) -> ConsultClientResult<Value> {
        let body = encode(payload)?;
        self.request(HttpMethod::Put, &item_path(path, id), Some(&body))
            .await?
            .json_value()
    }

    /// `DELETE` записи `path/:id`. Тело ответа не разбирается.
    pub async fn delete(&self, path: &str, id: &EntityId) -> ConsultClientResult<()> {
        self.request(HttpMethod::Delete, &item_path(path, id), None)
            .await?;
        Ok(())
    }

    /// Полная перезапись настроек сайта.
    pub async fn update_settings<P: Serialize>(&self, payload: &P) -> ConsultClientResult<Value> {
        let body = encode(payload)?;
        self.request(HttpMethod::Put, paths::SETTINGS, Some(&body))
            .await?
            .json_value()
    }

    /// Вход в админку. Ответ возвращается с любым статусом: разбор неудачи
    /// остаётся за формой входа.
    pub async fn login<P: Serialize>(&self, credentials: &P) -> ConsultClientResult<ApiResponse> {
        let body = encode(credentials)?;
        self.send(HttpMethod::Post, paths::LOGIN, Some(&body)).await
    }
}

fn encode<P: Serialize>(payload: &P) -> ConsultClientResult<Value> {
    serde_json::to_value(payload).map_err(|err| ConsultClientError::Encode(err.to_string()))
}

fn item_path(path: &str, id: &EntityId) -> String {
    format!("{}/{}", path.trim_end_matches('/'), id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use serde_json::json;

    fn client(transport: FakeTransport) -> ConsultClient<FakeTransport> {
        ConsultClient::new(transport, ApiOrigin::new("http://api.local/"), QueryCache::new())
    }

    #[test]
    fn resolve_prefixes_relative_paths() {
        let origin = ApiOrigin::new("http://localhost:3000/");
        assert_eq!(origin.resolve("/api/blogs"), "http://localhost:3000/api/blogs");
        assert_eq!(origin.resolve("api/blogs"), "http://localhost:3000/api/blogs");
    }

    #[test]
    fn resolve_keeps_absolute_urls() {
        let origin = ApiOrigin::new("http://localhost:3000");
        assert_eq!(
            origin.resolve("HTTPS://cdn.example.com/x"),
            "HTTPS://cdn.example.com/x"
        );
    }

    #[test]
    fn empty_origin_yields_relative_paths() {
        let origin = ApiOrigin::same_origin();
        assert!(origin.is_same_origin());
        assert_eq!(origin.resolve("api/team"), "/api/team");
    }

    #[tokio::test]
    async fn query_returns_null_on_401_in_return_null_mode() {
        let transport = FakeTransport::new().respond(HttpMethod::Get, "/api/universities", 401, "no session");
        let client = client(transport);

        let value = client
            .query(paths::UNIVERSITIES, UnauthorizedBehavior::ReturnNull)
            .await
            .expect("401 must not fail in return-null mode");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn query_fails_on_401_in_throw_mode() {
        let transport = FakeTransport::new().respond(HttpMethod::Get, "/api/universities", 401, "no session");
        let client = client(transport);

        let err = client
            .query(paths::UNIVERSITIES, UnauthorizedBehavior::Throw)
            .await
            .expect_err("401 must fail");
        assert_eq!(err.to_string(), "401: no session");
    }

    #[tokio::test]
    async fn list_reads_are_cached_until_invalidated() {
        let transport = FakeTransport::new().respond(
            HttpMethod::Get,
            "/api/courses",
            200,
            r#"[{"id":1,"name":"MBA","isActive":true}]"#,
        );
        let client = client(transport);

        let first = client.courses().await.expect("list loads");
        let second = client.courses().await.expect("list loads");
        assert_eq!(first, second);
        assert_eq!(client.transport().calls_to(HttpMethod::Get, "/api/courses"), 1);

        client.invalidate(paths::COURSES);
        client.courses().await.expect("list reloads");
        assert_eq!(client.transport().calls_to(HttpMethod::Get, "/api/courses"), 2);
    }

    #[tokio::test]
    async fn requests_go_to_resolved_url_with_body() {
        let transport = FakeTransport::new().respond(HttpMethod::Put, "/api/courses/42", 200, r#"{"id":42}"#);
        let client = client(transport);
        let id = EntityId::new("42").expect("valid id");

        let body = client
            .update(paths::COURSES, &id, &json!({"name": "MBA"}))
            .await
            .expect("update succeeds");
        assert_eq!(body, json!({"id": 42}));

        let sent = client.transport().requests();
        assert_eq!(sent[0].url, "http://api.local/api/courses/42");
        assert_eq!(sent[0].body, Some(json!({"name": "MBA"})));
    }

    #[tokio::test]
    async fn delete_sends_no_body() {
        let transport = FakeTransport::new().respond(HttpMethod::Delete, "/api/classes/7", 204, "");
        let client = client(transport);
        let id = EntityId::new("7").expect("valid id");

        client.delete(paths::CLASSES, &id).await.expect("delete succeeds");
        assert_eq!(client.transport().requests()[0].body, None);
    }

    #[tokio::test]
    async fn settings_read_tolerates_empty_body() {
        let transport = FakeTransport::new().respond(HttpMethod::Get, "/api/settings", 200, "");
        let client = client(transport);
        assert!(client.settings().await.expect("read succeeds").is_none());
    }
}
