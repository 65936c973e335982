//! Карусель отзывов на главной: окно из трёх карточек по активным отзывам.

use crate::models::Review;
use crate::views::{initial, visible};

/// Сколько отзывов видно одновременно.
pub const WINDOW: usize = 3;

/// Сколько заглушек показывать, пока отзывы грузятся.
pub const LOADING_PLACEHOLDERS: usize = WINDOW;

/// Максимум звёзд в рейтинге.
pub const MAX_STARS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
/// Состояние карусели. Хранит только активные отзывы.
pub struct ReviewCarousel {
    reviews: Vec<Review>,
    index: usize,
}

impl ReviewCarousel {
    /// Строит карусель по всем отзывам; неактивные отбрасываются.
    pub fn new(reviews: &[Review]) -> Self {
        Self {
            reviews: visible(reviews),
            index: 0,
        }
    }

    /// `true`, если секцию надо скрыть.
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Индекс первой видимой карточки.
    pub fn index(&self) -> usize {
        self.index
    }

    fn last_start(&self) -> usize {
        self.reviews.len().saturating_sub(WINDOW)
    }

    /// Видимые сейчас отзывы.
    pub fn visible(&self) -> &[Review] {
        let end = (self.index + WINDOW).min(self.reviews.len());
        self.reviews.get(self.index..end).unwrap_or_default()
    }

    /// Стрелки нужны, только если отзывов больше, чем влезает в окно.
    pub fn has_navigation(&self) -> bool {
        self.reviews.len() > WINDOW
    }

    /// Кнопка «назад» неактивна в начале.
    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    /// Кнопка «вперёд» неактивна, когда показано последнее окно.
    pub fn can_go_next(&self) -> bool {
        self.index < self.last_start()
    }

    /// Сдвиг назад; из начала перескакивает в последнее окно.
    pub fn previous(&mut self) {
        self.index = if self.index == 0 {
            self.last_start()
        } else {
            self.index - 1
        };
    }

    /// Сдвиг вперёд, не дальше последнего окна.
    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.last_start());
    }
}

/// Число закрашенных звёзд для рейтинга.
pub fn star_count(rating: f64) -> usize {
    let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, MAX_STARS as f64) };
    (0..MAX_STARS).filter(|i| (*i as f64) < rating).count()
}

/// Буква для аватара без фотографии.
pub fn review_initial(review: &Review) -> char {
    initial(&review.student_name, 'S')
}

/// Строка `университет, страна` под именем студента.
pub fn review_origin(review: &Review) -> String {
    if review.country.is_empty() {
        review.university.clone()
    } else {
        format!("{}, {}", review.university, review.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(count: usize) -> Vec<Review> {
        (0..count)
            .map(|i| Review {
                student_name: format!("s{i}"),
                is_active: true,
                ..Review::default()
            })
            .collect()
    }

    #[test]
    fn inactive_reviews_are_skipped() {
        let mut all = reviews(2);
        all[0].is_active = false;
        let carousel = ReviewCarousel::new(&all);
        assert_eq!(carousel.visible().len(), 1);
        assert_eq!(carousel.visible()[0].student_name, "s1");
        assert!(!carousel.has_navigation());
    }

    #[test]
    fn next_stops_at_last_window() {
        let mut carousel = ReviewCarousel::new(&reviews(5));
        assert!(carousel.has_navigation());
        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 2);
        assert!(!carousel.can_go_next());
        assert_eq!(carousel.visible().len(), 3);
    }

    #[test]
    fn previous_from_start_wraps_to_last_window() {
        let mut carousel = ReviewCarousel::new(&reviews(5));
        assert!(!carousel.can_go_previous());
        carousel.previous();
        assert_eq!(carousel.index(), 2);
        carousel.previous();
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn small_sets_never_move() {
        let mut carousel = ReviewCarousel::new(&reviews(2));
        carousel.next();
        carousel.previous();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn stars_are_clamped() {
        assert_eq!(star_count(4.0), 4);
        assert_eq!(star_count(3.5), 4);
        assert_eq!(star_count(9.0), 5);
        assert_eq!(star_count(-2.0), 0);
        assert_eq!(star_count(f64::NAN), 0);
    }

    #[test]
    fn card_text_helpers() {
        let review = Review {
            student_name: " anita".to_string(),
            university: "ETH Zurich".to_string(),
            country: "Switzerland".to_string(),
            ..Review::default()
        };
        assert_eq!(review_initial(&review), 'A');
        assert_eq!(review_origin(&review), "ETH Zurich, Switzerland");
        assert_eq!(review_initial(&Review::default()), 'S');
    }
}
