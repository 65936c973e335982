//! Проекции для публичных страниц: фильтр видимости, поиск, сортировки и
//! подписи, которые одинаково нужны CLI и браузерному фронтенду.

use chrono::{DateTime, Utc};

use crate::flags::country_flag;
use crate::models::{Blog, Course, Identified, Review, SiteSettings, TeamMember, University};

/// Сколько заглушек рисовать, пока список грузится.
pub const SKELETON_COUNT: usize = 6;

/// Сколько университетов показывает секция на главной.
pub const FEATURED_UNIVERSITIES: usize = 6;

/// Название компании, пока настройки не сохранены.
pub const DEFAULT_COMPANY_NAME: &str = "Everest Worldwide Consultancy Pvt. Ltd.";

/// Текст футера, пока настройки не сохранены.
pub const DEFAULT_FOOTER_DESCRIPTION: &str = "Your trusted partner for international education. \
We provide expert guidance to help you achieve your dreams of studying abroad.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Почему список пуст.
pub enum EmptyReason {
    /// Сервер не вернул ни одной видимой записи.
    NoData,
    /// Записи есть, но под запрос ничего не подошло.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq)]
/// Состояние публичного списка.
pub enum ListingState<T> {
    /// Данные ещё грузятся: рисуем [`SKELETON_COUNT`] заглушек.
    Loading,
    /// Показывать нечего.
    Empty(EmptyReason),
    /// Записи для отрисовки, уже отфильтрованные.
    Populated(Vec<T>),
}

impl<T> ListingState<T> {
    /// Записи, если они есть.
    pub fn items(&self) -> &[T] {
        match self {
            Self::Populated(items) => items,
            _ => &[],
        }
    }
}

/// Запись, которая может быть скрыта с публичных страниц.
pub trait Visible {
    /// `isActive` / `isPublished`.
    fn is_visible(&self) -> bool;
}

impl Visible for University {
    fn is_visible(&self) -> bool {
        self.is_active
    }
}

impl Visible for Course {
    fn is_visible(&self) -> bool {
        self.is_active
    }
}

impl Visible for Blog {
    fn is_visible(&self) -> bool {
        self.is_published
    }
}

impl Visible for Review {
    fn is_visible(&self) -> bool {
        self.is_active
    }
}

/// Запись, по которой работает поиск на странице.
pub trait Searchable {
    /// Поля, в которых ищется подстрока.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Course {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

impl Searchable for Blog {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.excerpt.as_str(), self.category.as_str()]
    }
}

impl Searchable for University {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.country.as_str()]
    }
}

/// Только видимые записи, порядок сохраняется.
pub fn visible<T: Visible + Clone>(items: &[T]) -> Vec<T> {
    items.iter().filter(|item| item.is_visible()).cloned().collect()
}

/// Записи, у которых хотя бы одно поле содержит запрос без учёта регистра.
///
/// Пустой запрос возвращает всё.
pub fn search<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Собирает состояние страницы из уже видимых записей.
///
/// `None` означает, что данные ещё не пришли.
pub fn listing<T: Searchable + Clone>(items: Option<&[T]>, query: &str) -> ListingState<T> {
    let Some(items) = items else {
        return ListingState::Loading;
    };

    let matches = search(items, query);
    if !matches.is_empty() {
        return ListingState::Populated(matches);
    }
    if query.is_empty() {
        ListingState::Empty(EmptyReason::NoData)
    } else {
        ListingState::Empty(EmptyReason::NoMatches)
    }
}

/// Состояние страницы курсов.
pub fn course_listing(courses: Option<&[Course]>, query: &str) -> ListingState<Course> {
    let active = courses.map(visible);
    listing(active.as_deref(), query)
}

/// Состояние страницы университетов: только активные, поиск по названию и стране.
pub fn university_listing(universities: Option<&[University]>, query: &str) -> ListingState<University> {
    let active = universities.map(visible);
    listing(active.as_deref(), query)
}

/// Состояние страницы блога: только опубликованные, новые сверху.
pub fn blog_listing(blogs: Option<&[Blog]>, query: &str) -> ListingState<Blog> {
    let published = blogs.map(published_blogs);
    listing(published.as_deref(), query)
}

/// Текст пустого списка курсов.
pub fn course_empty_text(reason: EmptyReason) -> &'static str {
    match reason {
        EmptyReason::NoData => "No courses available at the moment",
        EmptyReason::NoMatches => "No courses found matching your search",
    }
}

/// Текст пустого списка университетов.
pub fn university_empty_text(reason: EmptyReason) -> &'static str {
    match reason {
        EmptyReason::NoData => "No universities available at the moment",
        EmptyReason::NoMatches => "No universities found matching your search",
    }
}

/// Текст пустого списка статей.
pub fn blog_empty_text(reason: EmptyReason) -> &'static str {
    match reason {
        EmptyReason::NoData => "No articles available at the moment",
        EmptyReason::NoMatches => "No articles found matching your search",
    }
}

fn millis(timestamp: Option<DateTime<Utc>>) -> i64 {
    timestamp.map_or(0, |value| value.timestamp_millis())
}

/// Опубликованные статьи, новые сверху. Статьи без даты считаются
/// опубликованными в начале эпохи.
pub fn published_blogs(blogs: &[Blog]) -> Vec<Blog> {
    let mut published = visible(blogs);
    published.sort_by_key(|blog| std::cmp::Reverse(millis(blog.published_at)));
    published
}

/// Дата публикации в виде `Oct 29, 2025`.
pub fn format_blog_date(published_at: Option<DateTime<Utc>>) -> Option<String> {
    published_at.map(|value| value.format("%b %-d, %Y").to_string())
}

/// Ссылка на страницу статьи.
pub fn blog_link(blog: &Blog) -> String {
    if blog.slug.is_empty() {
        format!("/blogs/{}", blog.render_key())
    } else {
        format!("/blogs/{}", blog.slug)
    }
}

/// Заголовок страницы «О нас».
pub const ABOUT_HEADLINE: &str = "Empowering Students to Achieve Their Global Education Dreams";

/// Миссия компании под заголовком.
pub const ABOUT_MISSION: &str = "At Everest Worldwide Consultancy, we believe education knows no borders. \
Our mission is to guide aspiring students through every step of their international education journey \
with expertise, care, and commitment.";

/// Абзацы блока «Our Story».
pub const ABOUT_STORY: [&str; 3] = [
    "Founded in 2008, Everest Worldwide Consultancy began with a simple yet powerful vision: \
to make quality international education accessible to students from all backgrounds.",
    "Over the years, we've grown from a small team of education enthusiasts to a trusted consultancy \
with a global network of partnerships. Our success is measured not just in numbers, but in the \
thousands of lives we've helped transform through education.",
    "Today, we continue to innovate and evolve, staying at the forefront of international education \
trends while maintaining the personal touch that has always been our hallmark.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Цифра из полосы статистики.
pub struct AboutStat {
    /// Значение, например `15+`.
    pub number: &'static str,
    /// Подпись.
    pub label: &'static str,
}

/// Полоса статистики на странице «О нас».
pub const ABOUT_STATS: [AboutStat; 4] = [
    AboutStat { number: "15+", label: "Years Experience" },
    AboutStat { number: "5000+", label: "Students Placed" },
    AboutStat { number: "200+", label: "Partner Universities" },
    AboutStat { number: "30+", label: "Countries Worldwide" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Карточка ценности компании.
pub struct CoreValue {
    /// Название.
    pub title: &'static str,
    /// Описание.
    pub description: &'static str,
}

/// Блок «Our Core Values».
pub const CORE_VALUES: [CoreValue; 3] = [
    CoreValue {
        title: "Excellence",
        description: "We strive for the highest standards in everything we do, ensuring quality service and support.",
    },
    CoreValue {
        title: "Student-Centric",
        description: "Your success is our priority. We provide personalized guidance tailored to your unique goals.",
    },
    CoreValue {
        title: "Innovation",
        description: "We embrace modern approaches and technologies to make your journey smoother and more efficient.",
    },
];

/// Команда по возрастанию `order`; при равенстве новые записи выше.
pub fn sorted_team(team: &[TeamMember]) -> Vec<TeamMember> {
    let mut sorted = team.to_vec();
    sorted.sort_by(|a, b| {
        order_key(a.order)
            .total_cmp(&order_key(b.order))
            .then_with(|| millis(b.created_at).cmp(&millis(a.created_at)))
    });
    sorted
}

fn order_key(order: f64) -> f64 {
    if order.is_finite() { order } else { 0.0 }
}

/// Текст пустой команды.
pub const TEAM_EMPTY_TEXT: &str = "Team coming soon";

/// Первая буква имени в верхнем регистре или `fallback`.
pub fn initial(name: &str, fallback: char) -> char {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, PartialEq)]
/// Карточка университета на главной.
pub struct UniversityCard {
    /// Запись университета.
    pub university: University,
    /// Флаг страны.
    pub flag: &'static str,
}

/// Первые [`FEATURED_UNIVERSITIES`] активных университетов; `None`, если
/// показывать нечего и секцию надо скрыть.
pub fn featured_universities(universities: &[University]) -> Option<Vec<UniversityCard>> {
    let cards: Vec<_> = universities
        .iter()
        .filter(|university| university.is_visible())
        .take(FEATURED_UNIVERSITIES)
        .map(|university| UniversityCard {
            flag: country_flag(&university.country),
            university: university.clone(),
        })
        .collect();
    (!cards.is_empty()).then_some(cards)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Ссылка навигации.
pub struct NavLink {
    /// Подпись.
    pub label: &'static str,
    /// Путь на сайте.
    pub path: &'static str,
}

/// Быстрые ссылки футера.
pub const FOOTER_LINKS: [NavLink; 3] = [
    NavLink { label: "About", path: "/about" },
    NavLink { label: "Blogs", path: "/blogs" },
    NavLink { label: "Contact Us", path: "/appointment" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Соцсеть в футере.
pub enum SocialKind {
    /// Facebook.
    Facebook,
    /// WhatsApp.
    WhatsApp,
    /// TikTok.
    TikTok,
    /// Instagram.
    Instagram,
}

impl SocialKind {
    /// Подпись для текстового вывода и `aria-label`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::WhatsApp => "WhatsApp",
            Self::TikTok => "TikTok",
            Self::Instagram => "Instagram",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Строка контактов футера.
pub struct ContactLine {
    /// Что показывать.
    pub text: String,
    /// `mailto:`/`tel:` ссылка; у адреса её нет.
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Всё, что нужно для отрисовки футера.
pub struct FooterView {
    /// Логотип, если задан.
    pub logo_url: Option<String>,
    /// Название компании.
    pub company_name: String,
    /// Описание под названием.
    pub description: String,
    /// Соцсети, только заполненные.
    pub social: Vec<(SocialKind, String)>,
    /// Email, телефоны и адрес, только заполненные.
    pub contacts: Vec<ContactLine>,
    /// Ссылки на условия и политику конфиденциальности.
    pub legal: Vec<(&'static str, String)>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl FooterView {
    /// Строит футер из настроек; незаполненные поля заменяются значениями по
    /// умолчанию или пропускаются.
    pub fn from_settings(settings: Option<&SiteSettings>) -> Self {
        let empty = SiteSettings::default();
        let settings = settings.unwrap_or(&empty);

        let social = [
            (SocialKind::Facebook, &settings.facebook_url),
            (SocialKind::WhatsApp, &settings.whatsapp_url),
            (SocialKind::TikTok, &settings.tiktok_url),
            (SocialKind::Instagram, &settings.instagram_url),
        ]
        .into_iter()
        .filter_map(|(kind, url)| non_empty(url).map(|url| (kind, url)))
        .collect();

        let mut contacts = Vec::new();
        if let Some(email) = non_empty(&settings.email) {
            contacts.push(ContactLine {
                href: Some(format!("mailto:{email}")),
                text: email,
            });
        }
        for phone in [&settings.mobile, &settings.telephone] {
            if let Some(phone) = non_empty(phone) {
                contacts.push(ContactLine {
                    href: Some(format!("tel:{phone}")),
                    text: phone,
                });
            }
        }
        if let Some(address) = non_empty(&settings.address) {
            contacts.push(ContactLine { text: address, href: None });
        }

        let legal = [
            ("Terms & Conditions", &settings.terms_url),
            ("Privacy Policy", &settings.privacy_url),
        ]
        .into_iter()
        .filter_map(|(label, url)| non_empty(url).map(|url| (label, url)))
        .collect();

        Self {
            logo_url: non_empty(&settings.logo_url),
            company_name: non_empty(&settings.company_name)
                .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
            description: non_empty(&settings.footer_description)
                .unwrap_or_else(|| DEFAULT_FOOTER_DESCRIPTION.to_string()),
            social,
            contacts,
            legal,
        }
    }

    /// Строка копирайта за указанный год.
    pub fn copyright(&self, year: i32) -> String {
        format!("© {year} {}. All rights reserved.", self.company_name)
    }
}
