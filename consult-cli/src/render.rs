//! Текстовая отрисовка страниц сайта.

use consult_client::carousel::{ReviewCarousel, review_initial, review_origin, star_count};
use consult_client::flags::country_flag;
use consult_client::views::{
    ABOUT_HEADLINE, ABOUT_MISSION, ABOUT_STATS, ABOUT_STORY, CORE_VALUES, EmptyReason, FOOTER_LINKS,
    FooterView, ListingState, UniversityCard, blog_link, format_blog_date, initial,
};
use consult_client::{
    Blog, Class, Course, EntityId, Identified, Review, SiteSettings, TeamMember, Toast, University,
};

/// Одна строка списка.
pub trait Row {
    fn row(&self) -> String;
}

impl Row for University {
    fn row(&self) -> String {
        let mut line = format!("{} {} ({})", country_flag(&self.country), self.name, self.country);
        if !self.website_url.is_empty() {
            line.push_str(&format!(" {}", self.website_url));
        }
        if !self.is_active {
            line.push_str(" [inactive]");
        }
        line
    }
}

impl Row for Course {
    fn row(&self) -> String {
        let mut line = format!("{} [{}]", self.name, self.category);
        if !self.duration.is_empty() {
            line.push_str(&format!(", {}", self.duration));
        }
        if !self.is_active {
            line.push_str(" [inactive]");
        }
        line
    }
}

impl Row for Class {
    fn row(&self) -> String {
        let capacity = self
            .capacity
            .map_or_else(|| "-".to_string(), |capacity| capacity.to_string());
        format!(
            "{} (instructor: {}, schedule: {}, capacity: {capacity})",
            self.name, self.instructor, self.schedule
        )
    }
}

impl Row for Blog {
    fn row(&self) -> String {
        let date = format_blog_date(self.published_at).unwrap_or_else(|| "undated".to_string());
        let mut line = format!("{date}  {}", self.title);
        if !self.author.is_empty() {
            line.push_str(&format!(" by {}", self.author));
        }
        line.push_str(&format!("  {}", blog_link(self)));
        if !self.is_published {
            line.push_str(" [draft]");
        }
        line
    }
}

impl Row for Review {
    fn row(&self) -> String {
        format!(
            "{} {} ({}) \"{}\"",
            stars(self.rating),
            self.student_name,
            review_origin(self),
            self.testimonial
        )
    }
}

impl Row for TeamMember {
    fn row(&self) -> String {
        format!("({}) {}, {}", initial(&self.name, '?'), self.name, self.position)
    }
}

pub fn stars(rating: f64) -> String {
    let filled = star_count(rating);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn id_label(id: Option<&EntityId>) -> String {
    id.map_or_else(|| "<no id>".to_string(), |id| id.to_string())
}

/// Список админки с идентификаторами.
pub fn print_admin_rows<M: Row + Identified>(title: &str, items: &[M]) {
    println!("{title}: {}", items.len());
    for item in items {
        println!("- [{}] {}", id_label(item.entity_id()), item.row());
    }
}

/// Строки публичного списка под заголовком.
pub fn listing_lines<M: Row>(
    state: &ListingState<M>,
    empty_text: fn(EmptyReason) -> &'static str,
) -> Vec<String> {
    match state {
        // CLI печатает список только после ответа сервера.
        ListingState::Loading => Vec::new(),
        ListingState::Empty(reason) => vec![format!("  {}", empty_text(*reason))],
        ListingState::Populated(items) => items.iter().map(|item| format!("  - {}", item.row())).collect(),
    }
}

pub fn print_listing<M: Row>(
    title: &str,
    state: &ListingState<M>,
    empty_text: fn(EmptyReason) -> &'static str,
) {
    println!("{title}");
    for line in listing_lines(state, empty_text) {
        println!("{line}");
    }
}

pub fn print_universities_section(cards: Option<&[UniversityCard]>) {
    let Some(cards) = cards else {
        return;
    };
    println!("Partner Universities");
    for card in cards {
        println!("  {} {} ({})", card.flag, card.university.name, card.university.country);
    }
}

pub fn print_reviews_section(carousel: &ReviewCarousel) {
    if carousel.is_empty() {
        return;
    }
    println!("Student Success Stories");
    for review in carousel.visible() {
        println!(
            "  ({}) {} {}",
            review_initial(review),
            stars(review.rating),
            review.student_name
        );
        println!("      {}", review_origin(review));
        println!("      \"{}\"", review.testimonial);
    }
    if carousel.has_navigation() {
        println!(
            "  [{} prev] [next {}]",
            if carousel.can_go_previous() { "<" } else { " " },
            if carousel.can_go_next() { ">" } else { " " }
        );
    }
}

/// Статичные блоки страницы «О нас» до списка команды.
pub fn about_lines() -> Vec<String> {
    let mut lines = vec![ABOUT_HEADLINE.to_string(), ABOUT_MISSION.to_string(), String::new()];
    lines.push(
        ABOUT_STATS
            .iter()
            .map(|stat| format!("{} {}", stat.number, stat.label))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    lines.push(String::new());
    lines.push("Our Story".to_string());
    lines.extend(ABOUT_STORY.iter().map(|paragraph| format!("  {paragraph}")));
    lines.push(String::new());
    lines.push("Our Core Values".to_string());
    lines.extend(
        CORE_VALUES
            .iter()
            .map(|value| format!("  {}: {}", value.title, value.description)),
    );
    lines.push(String::new());
    lines
}

pub fn print_team(team: &[TeamMember]) {
    println!("Meet Our Team");
    if team.is_empty() {
        println!("  {}", consult_client::views::TEAM_EMPTY_TEXT);
        return;
    }
    for member in team {
        println!("  {}", member.row());
    }
}

pub fn print_footer(footer: &FooterView, year: i32) {
    println!("----");
    println!("{}", footer.company_name);
    println!("{}", footer.description);
    let links: Vec<_> = FOOTER_LINKS
        .iter()
        .map(|link| format!("{} ({})", link.label, link.path))
        .collect();
    println!("Quick Links: {}", links.join(" | "));
    for (kind, url) in &footer.social {
        println!("{}: {url}", kind.label());
    }
    for contact in &footer.contacts {
        match &contact.href {
            Some(href) => println!("{} <{href}>", contact.text),
            None => println!("{}", contact.text),
        }
    }
    for (label, url) in &footer.legal {
        println!("{label}: {url}");
    }
    println!("{}", footer.copyright(year));
}

pub fn print_settings(settings: Option<&SiteSettings>) {
    let Some(settings) = settings else {
        println!("Settings have not been saved yet");
        return;
    };
    let fields = [
        ("companyName", &settings.company_name),
        ("footerDescription", &settings.footer_description),
        ("logoUrl", &settings.logo_url),
        ("email", &settings.email),
        ("mobile", &settings.mobile),
        ("telephone", &settings.telephone),
        ("address", &settings.address),
        ("facebookUrl", &settings.facebook_url),
        ("whatsappUrl", &settings.whatsapp_url),
        ("tiktokUrl", &settings.tiktok_url),
        ("instagramUrl", &settings.instagram_url),
        ("termsUrl", &settings.terms_url),
        ("privacyUrl", &settings.privacy_url),
    ];
    for (name, value) in fields {
        println!("{name}: {value}");
    }
}

/// Печатает уведомление; ошибка превращается в код выхода 1.
pub fn report(toast: Toast) -> anyhow::Result<()> {
    if toast.is_error() {
        anyhow::bail!("{toast}");
    }
    println!("{toast}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_render_clamped_rating() {
        assert_eq!(stars(4.0), "★★★★☆");
        assert_eq!(stars(12.0), "★★★★★");
        assert_eq!(stars(-1.0), "☆☆☆☆☆");
    }

    #[test]
    fn class_row_shows_missing_capacity() {
        let class = Class {
            name: "IELTS".to_string(),
            ..Class::default()
        };
        assert!(class.row().ends_with("capacity: -)"));
    }

    #[test]
    fn listing_lines_show_rows_or_empty_text() {
        let state = ListingState::Populated(vec![Class {
            name: "IELTS".to_string(),
            ..Class::default()
        }]);
        let lines = listing_lines(&state, |_| "none");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("  - IELTS"));

        let state: ListingState<Class> = ListingState::Empty(EmptyReason::NoMatches);
        assert_eq!(listing_lines(&state, |_| "nothing matches"), ["  nothing matches"]);

        let state: ListingState<Class> = ListingState::Loading;
        assert!(listing_lines(&state, |_| "none").is_empty());
    }

    #[test]
    fn about_lines_cover_stats_story_and_values() {
        let lines = about_lines();
        assert_eq!(lines[0], ABOUT_HEADLINE);
        assert!(lines.iter().any(|line| line.contains("5000+ Students Placed")));
        assert!(lines.iter().any(|line| line.starts_with("  Founded in 2008")));
        assert!(lines.iter().any(|line| line.starts_with("  Student-Centric: ")));
    }

    #[test]
    fn error_toast_fails_command() {
        let err = report(Toast::error("500: boom", "Failed to delete course"))
            .expect_err("error toast must fail");
        assert_eq!(err.to_string(), "Error: 500: boom");
    }
}
