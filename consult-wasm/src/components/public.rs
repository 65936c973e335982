use consult_client::carousel::{
    LOADING_PLACEHOLDERS, MAX_STARS, ReviewCarousel, review_initial, review_origin, star_count,
};
use consult_client::flags::country_flag;
use consult_client::views::{
    ABOUT_HEADLINE, ABOUT_MISSION, ABOUT_STATS, ABOUT_STORY, CORE_VALUES, EmptyReason, ListingState,
    TEAM_EMPTY_TEXT, blog_empty_text, blog_link, blog_listing, course_empty_text, course_listing,
    featured_universities, format_blog_date, initial, sorted_team, university_empty_text,
    university_listing,
};
use consult_client::{Blog, Class, Course, Review, TeamMember, University};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::components::{Skeletons, load_public};
use crate::state::AppState;

fn stars(rating: f64) -> String {
    let filled = star_count(rating);
    format!("{}{}", "★".repeat(filled), "☆".repeat(MAX_STARS - filled))
}

fn empty_state(text: &'static str) -> AnyView {
    view! { <p class="empty-state">{text}</p> }.into_any()
}

fn listing_view<T, V>(
    state: ListingState<T>,
    empty_text: fn(EmptyReason) -> &'static str,
    card: impl Fn(T) -> V,
) -> AnyView
where
    V: IntoView + 'static,
{
    match state {
        ListingState::Loading => view! { <Skeletons /> }.into_any(),
        ListingState::Empty(reason) => empty_state(empty_text(reason)),
        ListingState::Populated(items) => view! {
            <div class="grid">{items.into_iter().map(card).collect_view()}</div>
        }
        .into_any(),
    }
}

#[component]
fn UniversityCard(university: University, flag: &'static str) -> impl IntoView {
    let website = (!university.website_url.is_empty()).then(|| university.website_url.clone());
    view! {
        <article class="card">
            {(!university.logo_url.is_empty())
                .then(|| view! { <img src=university.logo_url.clone() alt=university.name.clone() /> })}
            <h3>{university.name.clone()}</h3>
            <p class="country">{flag} " " {university.country.clone()}</p>
            <p>{university.description.clone()}</p>
            {website.map(|url| view! { <a href=url target="_blank" rel="noopener">"Visit Website"</a> })}
        </article>
    }
}

/// Партнёрские университеты на главной. Секция скрыта, если показывать нечего.
#[component]
pub(crate) fn UniversitiesSection(state: AppState) -> impl IntoView {
    let universities = RwSignal::new(None::<Vec<University>>);
    load_public(&state, "universities", universities, |api| async move { api.universities().await });

    move || match universities.get() {
        None => Some(view! { <section class="universities"><Skeletons /></section> }.into_any()),
        Some(items) => featured_universities(&items).map(|cards| {
            view! {
                <section class="universities">
                    <h2>"Partner Universities"</h2>
                    <div class="grid">
                        {cards
                            .into_iter()
                            .map(|card| view! { <UniversityCard university=card.university flag=card.flag /> })
                            .collect_view()}
                    </div>
                </section>
            }
            .into_any()
        }),
    }
}

#[component]
fn ReviewCard(review: Review) -> impl IntoView {
    let avatar = if review.image_url.is_empty() {
        view! { <span class="avatar">{review_initial(&review).to_string()}</span> }.into_any()
    } else {
        view! { <img class="avatar" src=review.image_url.clone() alt=review.student_name.clone() /> }.into_any()
    };
    view! {
        <article class="card review">
            {avatar}
            <h3>{review.student_name.clone()}</h3>
            <p class="origin">{review_origin(&review)}</p>
            <p class="stars" aria-label=format!("{} out of {MAX_STARS}", star_count(review.rating))>
                {stars(review.rating)}
            </p>
            <blockquote>{review.testimonial.clone()}</blockquote>
        </article>
    }
}

/// Отзывы студентов по три за раз.
#[component]
pub(crate) fn ReviewsSection(state: AppState) -> impl IntoView {
    let carousel = RwSignal::new(None::<ReviewCarousel>);
    let api = state.api.clone();
    spawn_local(async move {
        let reviews = api.reviews().await.unwrap_or_else(|err| {
            warn!(error = %err, "reviews failed to load");
            Vec::new()
        });
        carousel.set(Some(ReviewCarousel::new(&reviews)));
    });

    let previous = move |_: MouseEvent| carousel.update(|c| c.iter_mut().for_each(ReviewCarousel::previous));
    let next = move |_: MouseEvent| carousel.update(|c| c.iter_mut().for_each(ReviewCarousel::next));

    move || match carousel.get() {
        None => Some(
            view! { <section class="reviews"><Skeletons count=LOADING_PLACEHOLDERS /></section> }.into_any(),
        ),
        Some(c) if c.is_empty() => None,
        Some(c) => {
            let navigation = c.has_navigation().then(|| {
                view! {
                    <nav class="carousel-nav">
                        <button aria-label="Previous" on:click=previous disabled=!c.can_go_previous()>"‹"</button>
                        <button aria-label="Next" on:click=next disabled=!c.can_go_next()>"›"</button>
                    </nav>
                }
            });
            Some(
                view! {
                    <section class="reviews">
                        <h2>"What Our Students Say"</h2>
                        <div class="grid">
                            {c.visible()
                                .iter()
                                .cloned()
                                .map(|review| view! { <ReviewCard review=review /> })
                                .collect_view()}
                        </div>
                        {navigation}
                    </section>
                }
                .into_any(),
            )
        }
    }
}

#[component]
pub(crate) fn HomePage(state: AppState) -> impl IntoView {
    view! {
        <UniversitiesSection state=state.clone() />
        <ReviewsSection state=state />
    }
}

#[component]
pub(crate) fn UniversitiesPage(state: AppState) -> impl IntoView {
    let universities = RwSignal::new(None::<Vec<University>>);
    let query = RwSignal::new(String::new());
    load_public(&state, "universities", universities, |api| async move { api.universities().await });

    view! {
        <h1>"Universities"</h1>
        <input
            type="search"
            placeholder="Search universities or countries..."
            prop:value=move || query.get()
            on:input=move |ev| query.set(event_target_value(&ev))
        />
        {move || {
            let state = university_listing(universities.get().as_deref(), &query.get());
            listing_view(state, university_empty_text, |u| {
                let flag = country_flag(&u.country);
                view! { <UniversityCard university=u flag=flag /> }
            })
        }}
    }
}

#[component]
fn CourseCard(course: Course) -> impl IntoView {
    view! {
        <article class="card">
            {(!course.image_url.is_empty())
                .then(|| view! { <img src=course.image_url.clone() alt=course.name.clone() /> })}
            <span class="badge">{course.category.clone()}</span>
            <h3>{course.name.clone()}</h3>
            <p>{course.description.clone()}</p>
            {(!course.duration.is_empty()).then(|| view! { <p class="duration">{course.duration.clone()}</p> })}
        </article>
    }
}

#[component]
pub(crate) fn CoursesPage(state: AppState) -> impl IntoView {
    let courses = RwSignal::new(None::<Vec<Course>>);
    let query = RwSignal::new(String::new());
    load_public(&state, "courses", courses, |api| async move { api.courses().await });

    view! {
        <h1>"Explore Our Courses"</h1>
        <input
            type="search"
            placeholder="Search courses..."
            prop:value=move || query.get()
            on:input=move |ev| query.set(event_target_value(&ev))
        />
        {move || {
            let state = course_listing(courses.get().as_deref(), &query.get());
            listing_view(state, course_empty_text, |course| view! { <CourseCard course=course /> })
        }}
    }
}

#[component]
pub(crate) fn ClassesPage(state: AppState) -> impl IntoView {
    let classes = RwSignal::new(None::<Vec<Class>>);
    load_public(&state, "classes", classes, |api| async move { api.classes().await });

    view! {
        <h1>"Classes"</h1>
        {move || match classes.get() {
            None => view! { <Skeletons /> }.into_any(),
            Some(items) if items.is_empty() => empty_state("No classes available at the moment"),
            Some(items) => view! {
                <div class="grid">
                    {items
                        .into_iter()
                        .map(|class| view! {
                            <article class="card">
                                <h3>{class.name}</h3>
                                <p>{class.description}</p>
                                <p class="schedule">{class.schedule}</p>
                                <p class="instructor">{class.instructor}</p>
                                {class.capacity.map(|capacity| view! { <p>"Capacity: " {capacity}</p> })}
                            </article>
                        })
                        .collect_view()}
                </div>
            }
            .into_any(),
        }}
    }
}

#[component]
fn BlogCard(blog: Blog) -> impl IntoView {
    let href = blog_link(&blog);
    view! {
        <article class="card">
            {(!blog.image_url.is_empty())
                .then(|| view! { <img src=blog.image_url.clone() alt=blog.title.clone() /> })}
            <span class="badge">{blog.category.clone()}</span>
            <h3>{blog.title.clone()}</h3>
            <p>{blog.excerpt.clone()}</p>
            <p class="meta">
                {blog.author.clone()}
                {format_blog_date(blog.published_at).map(|date| view! { " · " <time>{date}</time> })}
            </p>
            <a href=href>"Read More"</a>
        </article>
    }
}

#[component]
pub(crate) fn BlogsPage(state: AppState) -> impl IntoView {
    let blogs = RwSignal::new(None::<Vec<Blog>>);
    let query = RwSignal::new(String::new());
    load_public(&state, "blogs", blogs, |api| async move { api.blogs().await });

    view! {
        <h1>"Our Blog"</h1>
        <input
            type="search"
            placeholder="Search articles..."
            prop:value=move || query.get()
            on:input=move |ev| query.set(event_target_value(&ev))
        />
        {move || {
            let state = blog_listing(blogs.get().as_deref(), &query.get());
            listing_view(state, blog_empty_text, |blog| view! { <BlogCard blog=blog /> })
        }}
    }
}

#[component]
fn TeamCard(member: TeamMember) -> impl IntoView {
    let photo = if member.image_url.is_empty() {
        view! { <span class="avatar">{initial(&member.name, '?').to_string()}</span> }.into_any()
    } else {
        view! { <img class="avatar" src=member.image_url.clone() alt=member.name.clone() /> }.into_any()
    };
    view! {
        <article class="card team">
            {photo}
            <h3>{member.name.clone()}</h3>
            <p>{member.position.clone()}</p>
        </article>
    }
}

#[component]
pub(crate) fn AboutPage(state: AppState) -> impl IntoView {
    let team = RwSignal::new(None::<Vec<TeamMember>>);
    load_public(&state, "team", team, |api| async move { api.team().await });

    view! {
        <section class="hero">
            <h1>{ABOUT_HEADLINE}</h1>
            <p>{ABOUT_MISSION}</p>
        </section>
        <section class="stats">
            {ABOUT_STATS
                .iter()
                .map(|stat| view! {
                    <div class="stat">
                        <strong>{stat.number}</strong>
                        <span>{stat.label}</span>
                    </div>
                })
                .collect_view()}
        </section>
        <section>
            <h2>"Our Story"</h2>
            {ABOUT_STORY.iter().map(|paragraph| view! { <p>{*paragraph}</p> }).collect_view()}
        </section>
        <section>
            <h2>"Our Core Values"</h2>
            <p>"The principles that guide everything we do"</p>
            <div class="grid">
                {CORE_VALUES
                    .iter()
                    .map(|value| view! {
                        <article class="card value">
                            <h3>{value.title}</h3>
                            <p>{value.description}</p>
                        </article>
                    })
                    .collect_view()}
            </div>
        </section>
        <h2>"Meet Our Team"</h2>
        <p>"The people behind our students’ success"</p>
        {move || match team.get() {
            None => view! { <Skeletons /> }.into_any(),
            Some(members) if members.is_empty() => empty_state(TEAM_EMPTY_TEXT),
            Some(members) => view! {
                <div class="grid">
                    {sorted_team(&members)
                        .into_iter()
                        .map(|member| view! { <TeamCard member=member /> })
                        .collect_view()}
                </div>
            }
            .into_any(),
        }}
    }
}

#[component]
pub(crate) fn NotFoundPage() -> impl IntoView {
    view! {
        <h1>"404 Page Not Found"</h1>
        <p>"The page you are looking for does not exist."</p>
    }
}
