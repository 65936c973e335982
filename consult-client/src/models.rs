use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Нормализованный идентификатор записи (`id` или `_id` из ответа сервера).
///
/// Числовые идентификаторы хранятся в десятичной записи.
pub struct EntityId(String);

impl EntityId {
    /// Создаёт идентификатор; пустая строка идентификатором не считается.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Строковое представление для подстановки в путь.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Запись, которую можно адресовать по идентификатору.
pub trait Identified {
    /// Идентификатор, если сервер его прислал.
    fn entity_id(&self) -> Option<&EntityId>;

    /// Ключ для отрисовки списка: id, иначе запасная цепочка полей записи.
    fn render_key(&self) -> String;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Университет-партнёр.
pub struct University {
    /// Идентификатор.
    pub id: Option<EntityId>,
    /// Название.
    pub name: String,
    /// Страна.
    pub country: String,
    /// Описание.
    pub description: String,
    /// URL логотипа.
    pub logo_url: String,
    /// Сайт университета.
    pub website_url: String,
    /// Показывать ли на публичных страницах.
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Курс или программа обучения.
pub struct Course {
    /// Идентификатор.
    pub id: Option<EntityId>,
    /// Название.
    pub name: String,
    /// Категория (Engineering, Business, ...).
    pub category: String,
    /// Длительность в свободной форме.
    pub duration: String,
    /// Описание.
    pub description: String,
    /// URL картинки.
    pub image_url: String,
    /// Slug, если сервер его выдаёт.
    pub slug: String,
    /// Показывать ли на публичных страницах.
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Подготовительный класс (IELTS, TOEFL и т.п.).
pub struct Class {
    /// Идентификатор.
    pub id: Option<EntityId>,
    /// Название.
    pub name: String,
    /// Преподаватель.
    pub instructor: String,
    /// Расписание в свободной форме.
    pub schedule: String,
    /// Описание.
    pub description: String,
    /// URL картинки.
    pub image_url: String,
    /// Вместимость группы.
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Статья блога.
pub struct Blog {
    /// Идентификатор.
    pub id: Option<EntityId>,
    /// Заголовок.
    pub title: String,
    /// Краткое содержание.
    pub excerpt: String,
    /// Автор.
    pub author: String,
    /// Категория.
    pub category: String,
    /// URL картинки.
    pub image_url: String,
    /// Slug для ссылки на статью.
    pub slug: String,
    /// Дата публикации (UTC), если сервер прислал разбираемую дату.
    pub published_at: Option<DateTime<Utc>>,
    /// Опубликована ли статья.
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Отзыв студента.
pub struct Review {
    /// Идентификатор.
    pub id: Option<EntityId>,
    /// Имя студента.
    pub student_name: String,
    /// Университет, куда поступил студент.
    pub university: String,
    /// Страна.
    pub country: String,
    /// Текст отзыва.
    pub testimonial: String,
    /// Оценка как пришла с сервера (не ограничена).
    pub rating: f64,
    /// URL фотографии.
    pub image_url: String,
    /// Показывать ли на публичных страницах.
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Сотрудник из блока «Meet Our Team».
pub struct TeamMember {
    /// Идентификатор.
    pub id: Option<EntityId>,
    /// Имя.
    pub name: String,
    /// Должность.
    pub position: String,
    /// URL фотографии.
    pub image_url: String,
    /// Порядок вывода; нечисловое значение считается нулём.
    pub order: f64,
    /// Дата создания (UTC).
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Настройки сайта (singleton `/api/settings`).
pub struct SiteSettings {
    /// Название компании.
    pub company_name: String,
    /// Текст в подвале.
    pub footer_description: String,
    /// URL логотипа.
    pub logo_url: String,
    /// Email.
    pub email: String,
    /// Мобильный телефон.
    pub mobile: String,
    /// Стационарный телефон.
    pub telephone: String,
    /// Адрес офиса.
    pub address: String,
    /// Facebook.
    pub facebook_url: String,
    /// WhatsApp.
    pub whatsapp_url: String,
    /// TikTok.
    pub tiktok_url: String,
    /// Instagram.
    pub instagram_url: String,
    /// Условия использования.
    pub terms_url: String,
    /// Политика конфиденциальности.
    pub privacy_url: String,
}

// Сервер владеет схемой, клиент читает поля оптимистично: отсутствующее или
// неожиданного типа поле становится пустым значением, а не ошибкой.
mod lenient {
    use super::{EntityId, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }

    pub(super) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Null => false,
            Value::Array(_) | Value::Object(_) => true,
        })
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(super::number_from_value(&Value::deserialize(d)?).unwrap_or(0.0))
    }

    pub(super) fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Value::String(s) => super::parse_leading_int(&s),
            _ => None,
        })
    }

    pub(super) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<EntityId>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => EntityId::new(s),
            Value::Number(n) => EntityId::new(n.to_string()),
            _ => None,
        })
    }

    pub(super) fn timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => parse_timestamp(&s),
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis),
            _ => None,
        })
    }
}

fn number_from_value(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) if s.trim().is_empty() => Some(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        serde_json::Value::Null => Some(0.0),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Разбирает целое в начале строки, как это делает `parseInt(raw, 10)`:
/// `"12 seats"` → `12`, `"abc"` → `None`.
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(idx, _)| idx);
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Разбирает дату из ответа сервера: RFC 3339, локальная дата-время без зоны
/// (считается UTC) или просто дата.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Deserialize)]
struct IdentityDto {
    #[serde(default, deserialize_with = "lenient::id")]
    id: Option<EntityId>,
    #[serde(default, rename = "_id", deserialize_with = "lenient::id")]
    legacy_id: Option<EntityId>,
}

impl IdentityDto {
    fn resolve(self) -> Option<EntityId> {
        self.id.or(self.legacy_id)
    }

    /// Публичный список команды ключуется по `_id`, затем по `id`.
    fn resolve_legacy_first(self) -> Option<EntityId> {
        self.legacy_id.or(self.id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UniversityDto {
    #[serde(flatten)]
    identity: IdentityDto,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    country: String,
    #[serde(default, deserialize_with = "lenient::text")]
    description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    logo_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    website_url: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseDto {
    #[serde(flatten)]
    identity: IdentityDto,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    category: String,
    #[serde(default, deserialize_with = "lenient::text")]
    duration: String,
    #[serde(default, deserialize_with = "lenient::text")]
    description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    image_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    slug: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassDto {
    #[serde(flatten)]
    identity: IdentityDto,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    instructor: String,
    #[serde(default, deserialize_with = "lenient::text")]
    schedule: String,
    #[serde(default, deserialize_with = "lenient::text")]
    description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    image_url: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    capacity: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogDto {
    #[serde(flatten)]
    identity: IdentityDto,
    #[serde(default, deserialize_with = "lenient::text")]
    title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    excerpt: String,
    #[serde(default, deserialize_with = "lenient::text")]
    author: String,
    #[serde(default, deserialize_with = "lenient::text")]
    category: String,
    #[serde(default, deserialize_with = "lenient::text")]
    image_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    slug: String,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_published: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDto {
    #[serde(flatten)]
    identity: IdentityDto,
    #[serde(default, deserialize_with = "lenient::text")]
    student_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    university: String,
    #[serde(default, deserialize_with = "lenient::text")]
    country: String,
    #[serde(default, deserialize_with = "lenient::text")]
    testimonial: String,
    #[serde(default, deserialize_with = "lenient::number")]
    rating: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    image_url: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamMemberDto {
    #[serde(flatten)]
    identity: IdentityDto,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    position: String,
    #[serde(default, deserialize_with = "lenient::text")]
    image_url: String,
    #[serde(default, deserialize_with = "lenient::number")]
    order: f64,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteSettingsDto {
    #[serde(default, deserialize_with = "lenient::text")]
    company_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    footer_description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    logo_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    email: String,
    #[serde(default, deserialize_with = "lenient::text")]
    mobile: String,
    #[serde(default, deserialize_with = "lenient::text")]
    telephone: String,
    #[serde(default, deserialize_with = "lenient::text")]
    address: String,
    #[serde(default, deserialize_with = "lenient::text")]
    facebook_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    whatsapp_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    tiktok_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    instagram_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    terms_url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    privacy_url: String,
}

impl From<UniversityDto> for University {
    fn from(value: UniversityDto) -> Self {
        Self {
            id: value.identity.resolve(),
            name: value.name,
            country: value.country,
            description: value.description,
            logo_url: value.logo_url,
            website_url: value.website_url,
            is_active: value.is_active,
        }
    }
}

impl From<CourseDto> for Course {
    fn from(value: CourseDto) -> Self {
        Self {
            id: value.identity.resolve(),
            name: value.name,
            category: value.category,
            duration: value.duration,
            description: value.description,
            image_url: value.image_url,
            slug: value.slug,
            is_active: value.is_active,
        }
    }
}

impl From<ClassDto> for Class {
    fn from(value: ClassDto) -> Self {
        Self {
            id: value.identity.resolve(),
            name: value.name,
            instructor: value.instructor,
            schedule: value.schedule,
            description: value.description,
            image_url: value.image_url,
            capacity: value.capacity,
        }
    }
}

impl From<BlogDto> for Blog {
    fn from(value: BlogDto) -> Self {
        Self {
            id: value.identity.resolve(),
            title: value.title,
            excerpt: value.excerpt,
            author: value.author,
            category: value.category,
            image_url: value.image_url,
            slug: value.slug,
            published_at: value.published_at,
            is_published: value.is_published,
        }
    }
}

impl From<ReviewDto> for Review {
    fn from(value: ReviewDto) -> Self {
        Self {
            id: value.identity.resolve(),
            student_name: value.student_name,
            university: value.university,
            country: value.country,
            testimonial: value.testimonial,
            rating: value.rating,
            image_url: value.image_url,
            is_active: value.is_active,
        }
    }
}

impl From<TeamMemberDto> for TeamMember {
    fn from(value: TeamMemberDto) -> Self {
        Self {
            id: value.identity.resolve_legacy_first(),
            name: value.name,
            position: value.position,
            image_url: value.image_url,
            order: value.order,
            created_at: value.created_at,
        }
    }
}

impl From<SiteSettingsDto> for SiteSettings {
    fn from(value: SiteSettingsDto) -> Self {
        Self {
            company_name: value.company_name,
            footer_description: value.footer_description,
            logo_url: value.logo_url,
            email: value.email,
            mobile: value.mobile,
            telephone: value.telephone,
            address: value.address,
            facebook_url: value.facebook_url,
            whatsapp_url: value.whatsapp_url,
            tiktok_url: value.tiktok_url,
            instagram_url: value.instagram_url,
            terms_url: value.terms_url,
            privacy_url: value.privacy_url,
        }
    }
}

/// Модель, которую можно собрать из JSON-записи сервера.
///
/// Реализуется только для моделей этого модуля; разбор идёт через приватный
/// DTO, где и нормализуется идентификатор.
pub trait FromRecord: Sized {
    /// Разбирает одну запись; `None` для не-объектов.
    fn from_record(value: serde_json::Value) -> Option<Self>;
}

fn decode_record<D, M>(value: serde_json::Value) -> Option<M>
where
    D: DeserializeOwned,
    M: From<D>,
{
    if !value.is_object() {
        return None;
    }
    serde_json::from_value::<D>(value).ok().map(M::from)
}

impl FromRecord for University {
    fn from_record(value: serde_json::Value) -> Option<Self> {
        decode_record::<UniversityDto, _>(value)
    }
}

impl FromRecord for Course {
    fn from_record(value: serde_json::Value) -> Option<Self> {
        decode_record::<CourseDto, _>(value)
    }
}

impl FromRecord for Class {
    fn from_record(value: serde_json::Value) -> Option<Self> {
        decode_record::<ClassDto, _>(value)
    }
}

impl FromRecord for Blog {
    fn from_record(value: serde_json::Value) -> Option<Self> {
        decode_record::<BlogDto, _>(value)
    }
}

impl FromRecord for Review {
    fn from_record(value: serde_json::Value) -> Option<Self> {
        decode_record::<ReviewDto, _>(value)
    }
}

impl FromRecord for TeamMember {
    fn from_record(value: serde_json::Value) -> Option<Self> {
        decode_record::<TeamMemberDto, _>(value)
    }
}

impl FromRecord for SiteSettings {
    fn from_record(value: serde_json::Value) -> Option<Self> {
        decode_record::<SiteSettingsDto, _>(value)
    }
}

/// Разбирает тело списка. Не-массив даёт пустой список, не-объекты пропускаются.
pub fn decode_list<M: FromRecord>(value: serde_json::Value) -> Vec<M> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().filter_map(M::from_record).collect(),
        _ => Vec::new(),
    }
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|s| !s.is_empty())
}

impl Identified for University {
    fn entity_id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn render_key(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => first_non_empty(&[self.name.as_str()]).unwrap_or("university").to_string(),
        }
    }
}

impl Identified for Course {
    fn entity_id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn render_key(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => first_non_empty(&[self.slug.as_str(), self.name.as_str()]).unwrap_or("course").to_string(),
        }
    }
}

impl Identified for Class {
    fn entity_id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn render_key(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => first_non_empty(&[self.name.as_str()]).unwrap_or("class").to_string(),
        }
    }
}

impl Identified for Blog {
    fn entity_id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn render_key(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => first_non_empty(&[self.slug.as_str(), self.title.as_str()]).unwrap_or("blog").to_string(),
        }
    }
}

impl Identified for Review {
    fn entity_id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn render_key(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("{}-{}", self.student_name, self.university),
        }
    }
}

impl Identified for TeamMember {
    fn entity_id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn render_key(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_prefers_id_over_legacy_id() {
        let course = Course::from_record(json!({"id": 42, "_id": "abc", "name": "MBA"}))
            .expect("object must decode");
        assert_eq!(course.id.as_ref().map(EntityId::as_str), Some("42"));

        let course = Course::from_record(json!({"_id": "65f0c1", "name": "MBA"}))
            .expect("object must decode");
        assert_eq!(course.id.as_ref().map(EntityId::as_str), Some("65f0c1"));
    }

    #[test]
    fn blank_identity_is_not_resolvable() {
        let uni = University::from_record(json!({"id": "  ", "name": "ETH"})).expect("decodes");
        assert!(uni.entity_id().is_none());
        assert_eq!(uni.render_key(), "ETH");
    }

    #[test]
    fn missing_and_mistyped_fields_degrade_to_defaults() {
        let uni = University::from_record(json!({
            "name": null,
            "country": 7,
            "isActive": "yes",
            "logoUrl": ["not", "a", "string"]
        }))
        .expect("object must decode");

        assert_eq!(uni.name, "");
        assert_eq!(uni.country, "7");
        assert!(uni.is_active);
        assert_eq!(uni.logo_url, "");
    }

    #[test]
    fn decode_list_skips_non_objects_and_tolerates_non_arrays() {
        let list: Vec<Course> = decode_list(json!([{"name": "A"}, null, 5, {"name": "B"}]));
        assert_eq!(list.len(), 2);

        let list: Vec<Course> = decode_list(json!({"items": []}));
        assert!(list.is_empty());
    }

    #[test]
    fn class_capacity_follows_parse_int() {
        let class = Class::from_record(json!({"name": "IELTS", "capacity": "12 seats"})).expect("decodes");
        assert_eq!(class.capacity, Some(12));

        let class = Class::from_record(json!({"name": "IELTS", "capacity": "many"})).expect("decodes");
        assert_eq!(class.capacity, None);

        let class = Class::from_record(json!({"name": "IELTS", "capacity": 20})).expect("decodes");
        assert_eq!(class.capacity, Some(20));
    }

    #[test]
    fn parse_leading_int_handles_signs_and_garbage() {
        assert_eq!(parse_leading_int("  -3x"), Some(-3));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("x1"), None);
    }

    #[test]
    fn timestamps_accept_common_server_formats() {
        assert!(parse_timestamp("2025-10-29T08:00:00Z").is_some());
        assert!(parse_timestamp("2025-10-29T08:00:00.123").is_some());
        assert!(parse_timestamp("2025-10-29").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn team_order_treats_non_numeric_as_zero() {
        let member = TeamMember::from_record(json!({"name": "A", "order": "first"})).expect("decodes");
        assert_eq!(member.order, 0.0);

        let member = TeamMember::from_record(json!({"name": "A", "order": "3"})).expect("decodes");
        assert_eq!(member.order, 3.0);
    }

    #[test]
    fn team_render_key_prefers_legacy_id_then_id_then_name() {
        let member = TeamMember::from_record(json!({"id": 7, "_id": "65f0aa", "name": "Mira"})).expect("decodes");
        assert_eq!(member.render_key(), "65f0aa");

        let member = TeamMember::from_record(json!({"id": 7, "name": "Mira"})).expect("decodes");
        assert_eq!(member.render_key(), "7");

        let member = TeamMember::from_record(json!({"_id": "", "name": "Mira"})).expect("decodes");
        assert_eq!(member.render_key(), "Mira");
    }

    #[test]
    fn review_render_key_falls_back_to_name_and_university() {
        let review = Review::from_record(json!({"studentName": "Asha", "university": "UCL"})).expect("decodes");
        assert_eq!(review.render_key(), "Asha-UCL");
    }
}
