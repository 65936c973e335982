//! Контроллеры экранов админки: CRUD-список с модальной формой и настройки
//! сайта.
//!
//! Контроллер не знает ничего про отрисовку: фронтенд показывает модалку по
//! [`AdminCrud::is_modal_open`], а результат каждого действия получает в виде
//! [`Toast`].

use std::fmt;
use std::marker::PhantomData;

use tracing::{info, warn};

use crate::client::{ConsultClient, paths};
use crate::error::{ConsultClientError, ConsultClientResult};
use crate::forms::{
    BlogPayload, ClassPayload, CoursePayload, FormData, FormPayload, ReviewPayload,
    SettingsPayload, UniversityPayload,
};
use crate::models::{
    Blog, Class, Course, FromRecord, Identified, Review, SiteSettings, University,
};
use crate::notify::{Toast, ToastVariant};
use crate::transport::ApiTransport;

/// Ресурс, которым управляет экран админки.
pub trait AdminResource {
    /// Запись списка.
    type Model: FromRecord + Identified + Clone + fmt::Debug + PartialEq;
    /// Тело create/update.
    type Payload: FormPayload;

    /// Путь коллекции, он же ключ кэша списка.
    const PATH: &'static str;
    /// Имя в единственном числе, строчными: `course`.
    const SINGULAR: &'static str;
    /// Имя во множественном числе, строчными: `courses`.
    const PLURAL: &'static str;
    /// Имя для заголовков и уведомлений: `Course`.
    const TITLE: &'static str;

    /// Значения формы для редактирования записи.
    fn prefill(model: &Self::Model) -> FormData;
}

macro_rules! admin_resource {
    ($name:ident, $model:ty, $payload:ty, $path:expr, $singular:literal, $plural:literal, $title:literal) => {
        #[derive(Debug, Clone, Copy, Default)]
        #[doc = concat!("Экран `", $plural, "` в админке.")]
        pub struct $name;

        impl AdminResource for $name {
            type Model = $model;
            type Payload = $payload;

            const PATH: &'static str = $path;
            const SINGULAR: &'static str = $singular;
            const PLURAL: &'static str = $plural;
            const TITLE: &'static str = $title;

            fn prefill(model: &Self::Model) -> FormData {
                FormData::from(model)
            }
        }
    };
}

admin_resource!(Universities, University, UniversityPayload, paths::UNIVERSITIES, "university", "universities", "University");
admin_resource!(Courses, Course, CoursePayload, paths::COURSES, "course", "courses", "Course");
admin_resource!(Classes, Class, ClassPayload, paths::CLASSES, "class", "classes", "Class");
admin_resource!(Blogs, Blog, BlogPayload, paths::BLOGS, "blog", "blogs", "Blog");
admin_resource!(Reviews, Review, ReviewPayload, paths::REVIEWS, "review", "reviews", "Review");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

fn missing_id_toast(singular: &str) -> Toast {
    Toast::new(
        "Missing ID",
        format!("This {singular} does not have an id field."),
        ToastVariant::Destructive,
    )
}

fn missing_fields_toast(message: String) -> Toast {
    Toast::new("Missing fields", message, ToastVariant::Destructive)
}

/// Текст ошибки загрузки списка: `Failed to load courses: <message>`.
pub fn load_error_text(plural: &str, err: &ConsultClientError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        format!("Failed to load {plural}: Unknown error")
    } else {
        format!("Failed to load {plural}: {message}")
    }
}

/// Состояние CRUD-экрана: редактируемая запись и флаг модалки.
pub struct AdminCrud<R: AdminResource> {
    editing: Option<R::Model>,
    modal_open: bool,
    _resource: PhantomData<fn() -> R>,
}

impl<R: AdminResource> Default for AdminCrud<R> {
    fn default() -> Self {
        Self {
            editing: None,
            modal_open: false,
            _resource: PhantomData,
        }
    }
}

impl<R: AdminResource> Clone for AdminCrud<R> {
    fn clone(&self) -> Self {
        Self {
            editing: self.editing.clone(),
            modal_open: self.modal_open,
            _resource: PhantomData,
        }
    }
}

impl<R: AdminResource> fmt::Debug for AdminCrud<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCrud")
            .field("resource", &R::PLURAL)
            .field("editing", &self.editing)
            .field("modal_open", &self.modal_open)
            .finish()
    }
}

impl<R: AdminResource> PartialEq for AdminCrud<R> {
    fn eq(&self, other: &Self) -> bool {
        self.editing == other.editing && self.modal_open == other.modal_open
    }
}

impl<R: AdminResource> AdminCrud<R> {
    /// Экран с закрытой модалкой.
    pub fn new() -> Self {
        Self::default()
    }

    /// Открыта ли модалка.
    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Редактируемая запись; `None` в режиме создания.
    pub fn editing(&self) -> Option<&R::Model> {
        self.editing.as_ref()
    }

    /// Заголовок модалки.
    pub fn modal_title(&self) -> String {
        match self.editing {
            Some(_) => format!("Edit {}", R::TITLE),
            None => format!("Add {}", R::TITLE),
        }
    }

    /// Начальные значения формы.
    pub fn form(&self) -> FormData {
        self.editing.as_ref().map(R::prefill).unwrap_or_default()
    }

    /// Открывает пустую форму создания.
    pub fn open_create(&mut self) {
        self.editing = None;
        self.modal_open = true;
    }

    /// Открывает форму, заполненную из записи.
    pub fn open_edit(&mut self, item: R::Model) {
        self.editing = Some(item);
        self.modal_open = true;
    }

    /// Закрывает модалку и сбрасывает редактирование.
    pub fn close(&mut self) {
        self.editing = None;
        self.modal_open = false;
    }

    /// Список без фильтрации по активности.
    pub async fn load<T: ApiTransport>(
        api: &ConsultClient<T>,
    ) -> ConsultClientResult<Vec<R::Model>> {
        api.list(R::PATH).await
    }

    /// Отправляет форму: create в режиме создания, update при редактировании.
    ///
    /// При успехе модалка закрывается и список инвалидируется ровно один раз.
    /// При ошибке модалка остаётся открытой, чтобы ввод не потерялся.
    pub async fn submit<T: ApiTransport>(&mut self, api: &ConsultClient<T>, form: &FormData) -> Toast {
        let payload = match R::Payload::from_form(form) {
            Ok(payload) => payload,
            Err(err) => return missing_fields_toast(err.to_string()),
        };

        let (mutation, result) = match &self.editing {
            None => (Mutation::Create, api.create(R::PATH, &payload).await.map(drop)),
            Some(item) => match item.entity_id() {
                Some(id) => (
                    Mutation::Update,
                    api.update(R::PATH, id, &payload).await.map(drop),
                ),
                None => {
                    warn!(resource = R::PLURAL, "edited record has no id");
                    return missing_id_toast(R::SINGULAR);
                }
            },
        };

        match result {
            Ok(()) => {
                self.close();
                Self::succeeded(api, mutation)
            }
            Err(err) => Self::failed(mutation, &err),
        }
    }

    /// Удаляет запись без подтверждения. Без `id` запрос не отправляется.
    pub async fn delete<T: ApiTransport>(api: &ConsultClient<T>, item: &R::Model) -> Toast {
        let Some(id) = item.entity_id() else {
            warn!(resource = R::PLURAL, "record without id cannot be deleted");
            return missing_id_toast(R::SINGULAR);
        };

        match api.delete(R::PATH, id).await {
            Ok(()) => Self::succeeded(api, Mutation::Delete),
            Err(err) => Self::failed(Mutation::Delete, &err),
        }
    }

    fn succeeded<T: ApiTransport>(api: &ConsultClient<T>, mutation: Mutation) -> Toast {
        api.invalidate(R::PATH);
        info!(resource = R::PLURAL, action = mutation.verb(), "mutation succeeded");
        Toast::success(format!("{} {} successfully", R::TITLE, mutation.past()))
    }

    fn failed(mutation: Mutation, err: &ConsultClientError) -> Toast {
        warn!(resource = R::PLURAL, action = mutation.verb(), error = %err, "mutation failed");
        Toast::error(
            err.to_string(),
            &format!("Failed to {} {}", mutation.verb(), R::SINGULAR),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Форма настроек сайта. Стартует пустой и заменяется, когда приходят
/// настройки с сервера.
pub struct SettingsForm {
    values: FormData,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_settings(&SiteSettings::default())
    }
}

impl SettingsForm {
    /// Пустая форма.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_settings(settings: &SiteSettings) -> Self {
        Self {
            values: FormData::from(settings),
        }
    }

    /// Загружает настройки (через кэш).
    pub async fn load<T: ApiTransport>(
        api: &ConsultClient<T>,
    ) -> ConsultClientResult<Option<SiteSettings>> {
        api.settings().await
    }

    /// Заменяет значения пришедшими настройками. `None` форму не трогает.
    pub fn sync(&mut self, settings: Option<&SiteSettings>) {
        if let Some(settings) = settings {
            *self = Self::from_settings(settings);
        }
    }

    /// Текущие значения.
    pub fn values(&self) -> &FormData {
        &self.values
    }

    /// Меняет одно поле.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.set(name, value);
    }

    /// Сохраняет всю запись `PUT /api/settings`.
    pub async fn save<T: ApiTransport>(&self, api: &ConsultClient<T>) -> Toast {
        let payload = match SettingsPayload::from_form(&self.values) {
            Ok(payload) => payload,
            Err(err) => return missing_fields_toast(err.to_string()),
        };

        match api.update_settings(&payload).await {
            Ok(_) => {
                api.invalidate(paths::SETTINGS);
                info!("settings updated");
                Toast::success("Settings updated successfully")
            }
            Err(err) => {
                warn!(error = %err, "settings update failed");
                Toast::error(err.to_string(), "Failed to update settings")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::QueryCache;
    use crate::client::ApiOrigin;
    use crate::models::EntityId;
    use crate::testing::FakeTransport;
    use crate::transport::HttpMethod;

    fn api(transport: FakeTransport) -> ConsultClient<FakeTransport> {
        ConsultClient::new(transport, ApiOrigin::new("http://api.local"), QueryCache::new())
    }

    fn course_form() -> FormData {
        FormData::new().with("name", "MBA").with("category", "Business")
    }

    fn generation<T: ApiTransport>(api: &ConsultClient<T>, path: &str) -> u64 {
        api.cache().generation(&api.query_key(path))
    }

    #[tokio::test]
    async fn create_invalidates_list_once_and_closes_modal() {
        let api = api(FakeTransport::new().respond(HttpMethod::Post, "/api/courses", 201, r#"{"id":1}"#));
        let mut screen = AdminCrud::<Courses>::new();
        screen.open_create();

        let toast = screen.submit(&api, &course_form()).await;

        assert_eq!(toast, Toast::success("Course created successfully"));
        assert_eq!(generation(&api, paths::COURSES), 1);
        assert!(!screen.is_modal_open());
    }

    #[tokio::test]
    async fn server_rejection_keeps_modal_and_cache() {
        let api = api(FakeTransport::new().respond(
            HttpMethod::Post,
            "/api/courses",
            400,
            r#"{"message":"duplicate course"}"#,
        ));
        let mut screen = AdminCrud::<Courses>::new();
        screen.open_create();

        let toast = screen.submit(&api, &course_form()).await;

        assert!(toast.is_error());
        assert_eq!(toast.description, "400: duplicate course");
        assert_eq!(generation(&api, paths::COURSES), 0);
        assert!(screen.is_modal_open());
    }

    #[tokio::test]
    async fn missing_required_fields_never_hit_network() {
        let api = api(FakeTransport::new());
        let mut screen = AdminCrud::<Universities>::new();
        screen.open_create();

        let toast = screen.submit(&api, &FormData::new().with("name", "ETH")).await;

        assert_eq!(toast.title, "Missing fields");
        assert_eq!(toast.description, "University name and country are required.");
        assert!(api.transport().requests().is_empty());
        assert!(screen.is_modal_open());
    }

    #[tokio::test]
    async fn update_uses_normalized_id() {
        let api = api(FakeTransport::new().respond(HttpMethod::Put, "/api/courses/42", 200, "{}"));
        let mut screen = AdminCrud::<Courses>::new();
        screen.open_edit(Course {
            id: EntityId::new("42"),
            name: "MBA".to_string(),
            category: "Business".to_string(),
            ..Course::default()
        });
        assert_eq!(screen.form().get("name"), "MBA");
        assert_eq!(screen.modal_title(), "Edit Course");

        let toast = screen.submit(&api, &course_form()).await;

        assert_eq!(toast.description, "Course updated successfully");
        assert_eq!(generation(&api, paths::COURSES), 1);
        assert!(screen.editing().is_none());
    }

    #[tokio::test]
    async fn update_without_id_fails_locally() {
        let api = api(FakeTransport::new());
        let mut screen = AdminCrud::<Classes>::new();
        screen.open_edit(Class {
            name: "IELTS".to_string(),
            ..Class::default()
        });

        let toast = screen.submit(&api, &FormData::new().with("name", "IELTS")).await;

        assert_eq!(toast.title, "Missing ID");
        assert_eq!(toast.description, "This class does not have an id field.");
        assert!(api.transport().requests().is_empty());
        assert!(screen.is_modal_open());
    }

    #[tokio::test]
    async fn delete_without_id_sends_nothing() {
        let api = api(FakeTransport::new());
        let toast = AdminCrud::<Blogs>::delete(&api, &Blog::default()).await;

        assert_eq!(toast.description, "This blog does not have an id field.");
        assert!(api.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn delete_network_failure_reports_error() {
        let api = api(FakeTransport::new().fail(HttpMethod::Delete, "/api/reviews/r1"));
        let review = Review {
            id: EntityId::new("r1"),
            ..Review::default()
        };

        let toast = AdminCrud::<Reviews>::delete(&api, &review).await;

        assert!(toast.is_error());
        assert_eq!(toast.description, "network error: connection refused");
        assert_eq!(generation(&api, paths::REVIEWS), 0);
    }

    #[tokio::test]
    async fn admin_list_is_unfiltered() {
        let api = api(FakeTransport::new().respond(
            HttpMethod::Get,
            "/api/universities",
            200,
            r#"[{"id":1,"name":"A","isActive":true},{"_id":"b","name":"B","isActive":false}]"#,
        ));
        let all = AdminCrud::<Universities>::load(&api).await.expect("list loads");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn load_error_copy() {
        let err = ConsultClientError::from_http_response(500, "Internal Server Error", "");
        assert_eq!(
            load_error_text(Courses::PLURAL, &err),
            "Failed to load courses: 500: Internal Server Error"
        );
    }

    #[tokio::test]
    async fn settings_form_starts_empty_then_syncs() {
        let api = api(FakeTransport::new().respond(
            HttpMethod::Get,
            "/api/settings",
            200,
            r#"{"companyName":"Acme","footerDescription":"We help"}"#,
        ));
        let mut form = SettingsForm::new();
        assert_eq!(form.values().get("companyName"), "");

        let settings = SettingsForm::load(&api).await.expect("settings load");
        form.sync(settings.as_ref());
        assert_eq!(form.values().get("companyName"), "Acme");
    }

    #[tokio::test]
    async fn settings_save_puts_full_record() {
        let api = api(FakeTransport::new().respond(HttpMethod::Put, "/api/settings", 200, "{}"));
        let mut form = SettingsForm::new();
        form.set("companyName", "Acme");
        form.set("footerDescription", "We help");

        let toast = form.save(&api).await;

        assert_eq!(toast, Toast::success("Settings updated successfully"));
        let body = api.transport().requests()[0].body.clone().expect("body sent");
        assert_eq!(body["companyName"], "Acme");
        assert_eq!(body["privacyUrl"], "");
        assert_eq!(generation(&api, paths::SETTINGS), 1);
    }
}
