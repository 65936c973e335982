//! Раскладка экранов админки: колонки таблицы и поля модальной формы.

use consult_client::admin::{
    AdminResource, Blogs, Classes, Courses, Reviews, SettingsForm, Universities,
};
use consult_client::carousel::{MAX_STARS, review_origin, star_count};
use consult_client::flags::country_flag;
use consult_client::forms::FormData;
use consult_client::views::format_blog_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    TextArea,
    Number,
    Url,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) name: &'static str,
    pub(crate) label: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        label,
        kind,
        required: false,
    }
}

const fn required(name: &'static str, label: &'static str) -> Field {
    Field {
        name,
        label,
        kind: FieldKind::Text,
        required: true,
    }
}

pub(crate) trait AdminLayout: AdminResource {
    /// Заголовки колонок таблицы.
    const COLUMNS: &'static [&'static str];
    /// Поля формы в порядке отрисовки.
    const FIELDS: &'static [Field];

    fn cells(item: &Self::Model) -> Vec<String>;

    /// Форма для модалки: значения записи или пустая форма создания, где
    /// переключатели включены.
    fn initial_form(prefill: FormData, creating: bool) -> FormData {
        let mut form = prefill;
        if creating {
            for f in Self::FIELDS.iter().filter(|f| f.kind == FieldKind::Toggle) {
                form.set(f.name, toggle_value(true));
            }
        }
        form
    }
}

impl AdminLayout for Universities {
    const COLUMNS: &'static [&'static str] = &["Name", "Country", "Website", "Status"];
    const FIELDS: &'static [Field] = &[
        required("name", "University Name"),
        required("country", "Country"),
        field("description", "Description", FieldKind::TextArea),
        field("logoUrl", "Logo URL", FieldKind::Url),
        field("websiteUrl", "Website URL", FieldKind::Url),
        field("isActive", "Active", FieldKind::Toggle),
    ];

    fn cells(item: &Self::Model) -> Vec<String> {
        vec![
            item.name.clone(),
            format!("{} {}", country_flag(&item.country), item.country),
            item.website_url.clone(),
            status(item.is_active, "Active", "Inactive"),
        ]
    }
}

impl AdminLayout for Courses {
    const COLUMNS: &'static [&'static str] = &["Name", "Category", "Duration", "Status"];
    const FIELDS: &'static [Field] = &[
        required("name", "Course Name"),
        required("category", "Category"),
        field("duration", "Duration", FieldKind::Text),
        field("description", "Description", FieldKind::TextArea),
        field("imageUrl", "Image URL", FieldKind::Url),
        field("isActive", "Active", FieldKind::Toggle),
    ];

    fn cells(item: &Self::Model) -> Vec<String> {
        vec![
            item.name.clone(),
            item.category.clone(),
            item.duration.clone(),
            status(item.is_active, "Active", "Inactive"),
        ]
    }
}

impl AdminLayout for Classes {
    const COLUMNS: &'static [&'static str] = &["Name", "Instructor", "Schedule", "Capacity"];
    const FIELDS: &'static [Field] = &[
        required("name", "Class Name"),
        field("description", "Description", FieldKind::TextArea),
        field("imageUrl", "Image URL", FieldKind::Url),
        field("schedule", "Schedule", FieldKind::Text),
        field("instructor", "Instructor", FieldKind::Text),
        field("capacity", "Capacity", FieldKind::Number),
    ];

    fn cells(item: &Self::Model) -> Vec<String> {
        vec![
            item.name.clone(),
            item.instructor.clone(),
            item.schedule.clone(),
            item.capacity.map(|c| c.to_string()).unwrap_or_default(),
        ]
    }
}

impl AdminLayout for Blogs {
    const COLUMNS: &'static [&'static str] = &["Title", "Author", "Published", "Status"];
    const FIELDS: &'static [Field] = &[
        required("title", "Title"),
        field("excerpt", "Excerpt", FieldKind::TextArea),
        field("author", "Author", FieldKind::Text),
        field("category", "Category", FieldKind::Text),
        field("slug", "Slug", FieldKind::Text),
        field("imageUrl", "Image URL", FieldKind::Url),
        field("publishedAt", "Published At", FieldKind::Text),
        field("isPublished", "Published", FieldKind::Toggle),
    ];

    fn cells(item: &Self::Model) -> Vec<String> {
        vec![
            item.title.clone(),
            item.author.clone(),
            format_blog_date(item.published_at).unwrap_or_default(),
            status(item.is_published, "Published", "Draft"),
        ]
    }
}

impl AdminLayout for Reviews {
    const COLUMNS: &'static [&'static str] = &["Student", "University", "Rating", "Status"];
    const FIELDS: &'static [Field] = &[
        required("studentName", "Student Name"),
        field("university", "University", FieldKind::Text),
        field("country", "Country", FieldKind::Text),
        Field {
            name: "testimonial",
            label: "Testimonial",
            kind: FieldKind::TextArea,
            required: true,
        },
        field("rating", "Rating (0-5)", FieldKind::Number),
        field("imageUrl", "Photo URL", FieldKind::Url),
        field("isActive", "Active", FieldKind::Toggle),
    ];

    fn cells(item: &Self::Model) -> Vec<String> {
        vec![
            item.student_name.clone(),
            review_origin(item),
            format!("{}/{MAX_STARS}", star_count(item.rating)),
            status(item.is_active, "Active", "Inactive"),
        ]
    }
}

/// Поля настроек сайта, сгруппированные как на странице.
pub(crate) const SETTINGS_GROUPS: [(&str, &[Field]); 3] = [
    (
        "Branding",
        &[
            required("companyName", "Company Name"),
            Field {
                name: "footerDescription",
                label: "Footer Description",
                kind: FieldKind::TextArea,
                required: true,
            },
            field("logoUrl", "Logo URL", FieldKind::Url),
        ],
    ),
    (
        "Contact",
        &[
            field("email", "Email", FieldKind::Text),
            field("mobile", "Mobile", FieldKind::Text),
            field("telephone", "Telephone", FieldKind::Text),
            field("address", "Address", FieldKind::TextArea),
        ],
    ),
    (
        "Social & Legal",
        &[
            field("facebookUrl", "Facebook URL", FieldKind::Url),
            field("whatsappUrl", "WhatsApp URL", FieldKind::Url),
            field("tiktokUrl", "TikTok URL", FieldKind::Url),
            field("instagramUrl", "Instagram URL", FieldKind::Url),
            field("termsUrl", "Terms URL", FieldKind::Url),
            field("privacyUrl", "Privacy URL", FieldKind::Url),
        ],
    ),
];

/// Хранилище значений, к которому привязаны поля ввода.
pub(crate) trait FieldStore {
    fn value(&self, name: &str) -> String;
    fn assign(&mut self, name: &'static str, value: String);
}

impl FieldStore for FormData {
    fn value(&self, name: &str) -> String {
        self.get(name).to_string()
    }

    fn assign(&mut self, name: &'static str, value: String) {
        self.set(name, value);
    }
}

impl FieldStore for SettingsForm {
    fn value(&self, name: &str) -> String {
        self.values().get(name).to_string()
    }

    fn assign(&mut self, name: &'static str, value: String) {
        self.set(name, value);
    }
}

fn status(flag: bool, on: &str, off: &str) -> String {
    if flag { on } else { off }.to_string()
}

/// Значение переключателя в форме.
pub(crate) fn toggle_value(checked: bool) -> &'static str {
    if checked { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_client::forms::SETTINGS_FIELDS;
    use consult_client::{Course, Review};

    #[test]
    fn create_form_turns_toggles_on() {
        let form = Courses::initial_form(FormData::new(), true);
        assert_eq!(form.flag("isActive"), Some(true));
        assert_eq!(form.get("name"), "");
    }

    #[test]
    fn edit_form_keeps_record_values() {
        let course = Course {
            name: "MBA".to_string(),
            is_active: false,
            ..Course::default()
        };
        let form = Courses::initial_form(Courses::prefill(&course), false);
        assert_eq!(form.get("name"), "MBA");
        assert_eq!(form.flag("isActive"), Some(false));
    }

    #[test]
    fn classes_have_no_toggles() {
        let form = Classes::initial_form(FormData::new(), true);
        assert_eq!(form.iter().count(), 0);
    }

    #[test]
    fn cells_line_up_with_columns() {
        let course = Course {
            name: "MBA".to_string(),
            category: "Business".to_string(),
            is_active: true,
            ..Course::default()
        };
        let cells = Courses::cells(&course);
        assert_eq!(cells.len(), Courses::COLUMNS.len());
        assert_eq!(cells[3], "Active");

        let review = Review {
            student_name: "Anita".to_string(),
            university: "ETH".to_string(),
            country: "Switzerland".to_string(),
            rating: 4.0,
            ..Review::default()
        };
        assert_eq!(Reviews::cells(&review), ["Anita", "ETH, Switzerland", "4/5", "Inactive"]);
    }

    #[test]
    fn settings_groups_cover_every_settings_field() {
        let mut names: Vec<_> = SETTINGS_GROUPS
            .iter()
            .flat_map(|(_, fields)| fields.iter().map(|f| f.name))
            .collect();
        names.sort_unstable();
        let mut expected = SETTINGS_FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }
}
