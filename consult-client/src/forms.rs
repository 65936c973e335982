//! Типизированные тела запросов админки.
//!
//! Форма приходит как набор строковых полей [`FormData`]; каждый payload
//! собирается из неё и проверяется `validator` до отправки. Незаполненное
//! обязательное поле даёт [`ConsultClientError::Validation`] и запрос не
//! уходит.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;
use validator::{Validate, ValidationErrors};

use crate::error::{ConsultClientError, ConsultClientResult};
use crate::models::{Blog, Class, Course, Review, SiteSettings, University, parse_leading_int};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Значения полей формы по имени.
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    /// Пустая форма.
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет поле и возвращает форму (для цепочек).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Устанавливает значение поля.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Значение поля; отсутствующее поле читается как пустая строка.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    /// Чекбокс: `None`, если поля в форме нет.
    pub fn flag(&self, name: &str) -> Option<bool> {
        let raw = self.0.get(name)?.trim().to_ascii_lowercase();
        Some(matches!(raw.as_str(), "on" | "true" | "1" | "yes"))
    }

    /// Поля формы по порядку имён.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Тело запроса, которое собирается из формы.
pub trait FormPayload: Serialize + Validate + Sized {
    /// Переносит поля формы без проверок.
    fn from_fields(form: &FormData) -> Self;

    /// Собирает payload и проверяет обязательные поля.
    fn from_form(form: &FormData) -> ConsultClientResult<Self> {
        let payload = Self::from_fields(form);
        payload.validate().map_err(|errors| {
            let message = first_message(&errors);
            warn!(message = %message, "form rejected locally");
            ConsultClientError::Validation(message)
        })?;
        Ok(payload)
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|error| error.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Please fill in the required fields.".to_string())
}

fn text(value: &str) -> String {
    value.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Создание/изменение университета.
pub struct UniversityPayload {
    /// `name`.
    #[validate(length(min = 1, message = "University name and country are required."))]
    pub name: String,
    /// `country`.
    #[validate(length(min = 1, message = "University name and country are required."))]
    pub country: String,
    /// `description`.
    pub description: String,
    /// `logoUrl`.
    pub logo_url: String,
    /// `websiteUrl`.
    pub website_url: String,
    /// `isActive`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl FormPayload for UniversityPayload {
    fn from_fields(form: &FormData) -> Self {
        Self {
            name: text(form.get("name")),
            country: text(form.get("country")),
            description: text(form.get("description")),
            logo_url: text(form.get("logoUrl")),
            website_url: text(form.get("websiteUrl")),
            is_active: form.flag("isActive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Создание/изменение курса.
pub struct CoursePayload {
    /// `name`.
    #[validate(length(min = 1, message = "Course name and category are required."))]
    pub name: String,
    /// `category`.
    #[validate(length(min = 1, message = "Course name and category are required."))]
    pub category: String,
    /// `duration`.
    pub duration: String,
    /// `description`.
    pub description: String,
    /// `imageUrl`.
    pub image_url: String,
    /// `isActive`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl FormPayload for CoursePayload {
    fn from_fields(form: &FormData) -> Self {
        Self {
            name: text(form.get("name")),
            category: text(form.get("category")),
            duration: text(form.get("duration")),
            description: text(form.get("description")),
            image_url: text(form.get("imageUrl")),
            is_active: form.flag("isActive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Создание/изменение подготовительного класса.
pub struct ClassPayload {
    /// `name`.
    #[validate(length(min = 1, message = "Class name is required."))]
    pub name: String,
    /// `instructor`.
    pub instructor: String,
    /// `schedule`.
    pub schedule: String,
    /// `description`.
    pub description: String,
    /// `imageUrl`.
    pub image_url: String,
    /// Пустое или нечисловое значение уходит как `null`.
    pub capacity: Option<i64>,
}

impl FormPayload for ClassPayload {
    fn from_fields(form: &FormData) -> Self {
        Self {
            name: text(form.get("name")),
            instructor: text(form.get("instructor")),
            schedule: text(form.get("schedule")),
            description: text(form.get("description")),
            image_url: text(form.get("imageUrl")),
            capacity: parse_leading_int(form.get("capacity")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Создание/изменение статьи блога.
pub struct BlogPayload {
    /// `title`.
    #[validate(length(min = 1, message = "Blog title is required."))]
    pub title: String,
    /// `excerpt`.
    pub excerpt: String,
    /// `author`.
    pub author: String,
    /// `category`.
    pub category: String,
    /// `imageUrl`.
    pub image_url: String,
    /// `slug`.
    pub slug: String,
    /// `publishedAt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// `isPublished`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl FormPayload for BlogPayload {
    fn from_fields(form: &FormData) -> Self {
        let published_at = form.get("publishedAt").trim();
        Self {
            title: text(form.get("title")),
            excerpt: text(form.get("excerpt")),
            author: text(form.get("author")),
            category: text(form.get("category")),
            image_url: text(form.get("imageUrl")),
            slug: text(form.get("slug")),
            published_at: (!published_at.is_empty()).then(|| published_at.to_string()),
            is_published: form.flag("isPublished"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Создание/изменение отзыва.
pub struct ReviewPayload {
    /// `studentName`.
    #[validate(length(min = 1, message = "Student name and testimonial are required."))]
    pub student_name: String,
    /// `university`.
    pub university: String,
    /// `country`.
    pub country: String,
    /// `testimonial`.
    #[validate(length(min = 1, message = "Student name and testimonial are required."))]
    pub testimonial: String,
    /// `rating`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// `imageUrl`.
    pub image_url: String,
    /// `isActive`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl FormPayload for ReviewPayload {
    fn from_fields(form: &FormData) -> Self {
        Self {
            student_name: text(form.get("studentName")),
            university: text(form.get("university")),
            country: text(form.get("country")),
            testimonial: text(form.get("testimonial")),
            rating: form
                .get("rating")
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rating| rating.is_finite())
                .map(|rating| rating.clamp(0.0, 5.0)),
            image_url: text(form.get("imageUrl")),
            is_active: form.flag("isActive"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Полная запись настроек для `PUT /api/settings`.
pub struct SettingsPayload {
    /// `companyName`.
    #[validate(length(min = 1, message = "Company name and footer description are required."))]
    pub company_name: String,
    /// `footerDescription`.
    #[validate(length(min = 1, message = "Company name and footer description are required."))]
    pub footer_description: String,
    /// `logoUrl`.
    pub logo_url: String,
    /// `email`.
    pub email: String,
    /// `mobile`.
    pub mobile: String,
    /// `telephone`.
    pub telephone: String,
    /// `address`.
    pub address: String,
    /// `facebookUrl`.
    pub facebook_url: String,
    /// `whatsappUrl`.
    pub whatsapp_url: String,
    /// `tiktokUrl`.
    pub tiktok_url: String,
    /// `instagramUrl`.
    pub instagram_url: String,
    /// `termsUrl`.
    pub terms_url: String,
    /// `privacyUrl`.
    pub privacy_url: String,
}

/// Имена полей формы настроек в порядке отрисовки.
pub const SETTINGS_FIELDS: [&str; 13] = [
    "companyName",
    "footerDescription",
    "logoUrl",
    "email",
    "mobile",
    "telephone",
    "address",
    "facebookUrl",
    "whatsappUrl",
    "tiktokUrl",
    "instagramUrl",
    "termsUrl",
    "privacyUrl",
];

impl FormPayload for SettingsPayload {
    fn from_fields(form: &FormData) -> Self {
        Self {
            company_name: text(form.get("companyName")),
            footer_description: text(form.get("footerDescription")),
            logo_url: text(form.get("logoUrl")),
            email: text(form.get("email")),
            mobile: text(form.get("mobile")),
            telephone: text(form.get("telephone")),
            address: text(form.get("address")),
            facebook_url: text(form.get("facebookUrl")),
            whatsapp_url: text(form.get("whatsappUrl")),
            tiktok_url: text(form.get("tiktokUrl")),
            instagram_url: text(form.get("instagramUrl")),
            terms_url: text(form.get("termsUrl")),
            privacy_url: text(form.get("privacyUrl")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
/// Учётные данные для входа.
pub struct LoginPayload {
    /// `username`.
    #[validate(length(min = 1, message = "Username and password are required."))]
    pub username: String,
    /// `password`.
    #[validate(length(min = 1, message = "Username and password are required."))]
    pub password: String,
}

impl LoginPayload {
    /// Учётные данные из введённых строк.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl FormPayload for LoginPayload {
    fn from_fields(form: &FormData) -> Self {
        Self::new(form.get("username"), form.get("password"))
    }
}

// Предзаполнение модалки редактирования из записи.

fn flag_text(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

impl From<&University> for FormData {
    fn from(value: &University) -> Self {
        FormData::new()
            .with("name", &value.name)
            .with("country", &value.country)
            .with("description", &value.description)
            .with("logoUrl", &value.logo_url)
            .with("websiteUrl", &value.website_url)
            .with("isActive", flag_text(value.is_active))
    }
}

impl From<&Course> for FormData {
    fn from(value: &Course) -> Self {
        FormData::new()
            .with("name", &value.name)
            .with("category", &value.category)
            .with("duration", &value.duration)
            .with("description", &value.description)
            .with("imageUrl", &value.image_url)
            .with("isActive", flag_text(value.is_active))
    }
}

impl From<&Class> for FormData {
    fn from(value: &Class) -> Self {
        FormData::new()
            .with("name", &value.name)
            .with("instructor", &value.instructor)
            .with("schedule", &value.schedule)
            .with("description", &value.description)
            .with("imageUrl", &value.image_url)
            .with(
                "capacity",
                value.capacity.map(|c| c.to_string()).unwrap_or_default(),
            )
    }
}

impl From<&Blog> for FormData {
    fn from(value: &Blog) -> Self {
        FormData::new()
            .with("title", &value.title)
            .with("excerpt", &value.excerpt)
            .with("author", &value.author)
            .with("category", &value.category)
            .with("imageUrl", &value.image_url)
            .with("slug", &value.slug)
            .with(
                "publishedAt",
                value.published_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
            )
            .with("isPublished", flag_text(value.is_published))
    }
}

impl From<&Review> for FormData {
    fn from(value: &Review) -> Self {
        FormData::new()
            .with("studentName", &value.student_name)
            .with("university", &value.university)
            .with("country", &value.country)
            .with("testimonial", &value.testimonial)
            .with("rating", value.rating.to_string())
            .with("imageUrl", &value.image_url)
            .with("isActive", flag_text(value.is_active))
    }
}

impl From<&SiteSettings> for FormData {
    fn from(value: &SiteSettings) -> Self {
        let values = [
            &value.company_name,
            &value.footer_description,
            &value.logo_url,
            &value.email,
            &value.mobile,
            &value.telephone,
            &value.address,
            &value.facebook_url,
            &value.whatsapp_url,
            &value.tiktok_url,
            &value.instagram_url,
            &value.terms_url,
            &value.privacy_url,
        ];
        SETTINGS_FIELDS
            .into_iter()
            .zip(values)
            .map(|(name, value)| (name, value.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_requires_name_and_category() {
        let form = FormData::new().with("name", "MBA");
        let err = CoursePayload::from_form(&form).expect_err("category missing");
        assert_eq!(err.to_string(), "Course name and category are required.");
        assert!(err.is_local());
    }

    #[test]
    fn course_payload_serializes_camel_case() {
        let form = FormData::new()
            .with("name", "MBA")
            .with("category", "Business")
            .with("imageUrl", "https://img/x.png");
        let payload = CoursePayload::from_form(&form).expect("valid form");
        assert_eq!(
            serde_json::to_value(&payload).expect("serializes"),
            json!({
                "name": "MBA",
                "category": "Business",
                "duration": "",
                "description": "",
                "imageUrl": "https://img/x.png"
            })
        );
    }

    #[test]
    fn class_capacity_parses_leading_integer() {
        let payload = |raw: &str| {
            ClassPayload::from_form(&FormData::new().with("name", "IELTS").with("capacity", raw))
                .expect("valid form")
                .capacity
        };
        assert_eq!(payload("25"), Some(25));
        assert_eq!(payload("12 seats"), Some(12));
        assert_eq!(payload(""), None);
        assert_eq!(payload("many"), None);
    }

    #[test]
    fn class_capacity_is_sent_as_null() {
        let payload = ClassPayload::from_form(&FormData::new().with("name", "PTE")).expect("valid form");
        let value = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(value["capacity"], serde_json::Value::Null);
    }

    #[test]
    fn university_requires_country() {
        let err = UniversityPayload::from_form(&FormData::new().with("name", "ETH"))
            .expect_err("country missing");
        assert_eq!(err.to_string(), "University name and country are required.");
    }

    #[test]
    fn review_rating_is_clamped() {
        let form = FormData::new()
            .with("studentName", "Anita")
            .with("testimonial", "Great help")
            .with("rating", "7");
        let payload = ReviewPayload::from_form(&form).expect("valid form");
        assert_eq!(payload.rating, Some(5.0));
    }

    #[test]
    fn settings_round_trip_through_form() {
        let settings = SiteSettings {
            company_name: "Acme".to_string(),
            footer_description: "We help".to_string(),
            email: "a@b.c".to_string(),
            ..SiteSettings::default()
        };
        let payload = SettingsPayload::from_form(&FormData::from(&settings)).expect("valid form");
        assert_eq!(payload.company_name, "Acme");
        assert_eq!(payload.email, "a@b.c");

        let err = SettingsPayload::from_form(&FormData::new()).expect_err("empty form");
        assert_eq!(err.to_string(), "Company name and footer description are required.");
    }

    #[test]
    fn flags_read_checkbox_values() {
        let form = FormData::new().with("isActive", "on").with("isPublished", "false");
        assert_eq!(form.flag("isActive"), Some(true));
        assert_eq!(form.flag("isPublished"), Some(false));
        assert_eq!(form.flag("missing"), None);
    }
}
