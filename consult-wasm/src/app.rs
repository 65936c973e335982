use leptos::prelude::*;

use crate::components::admin::admin_screen;
use crate::components::footer::Footer;
use crate::components::public::{
    AboutPage, BlogsPage, ClassesPage, CoursesPage, HomePage, NotFoundPage, UniversitiesPage,
};
use crate::components::{NavButton, Toaster};
use crate::routes::{ADMIN_NAV, PUBLIC_NAV, Route};
use crate::state::AppState;

fn page(route: Route, state: AppState) -> AnyView {
    if let Some(screen) = admin_screen(route, state.clone()) {
        return screen;
    }
    match route {
        Route::Home => view! { <HomePage state=state /> }.into_any(),
        Route::Universities => view! { <UniversitiesPage state=state /> }.into_any(),
        Route::Courses => view! { <CoursesPage state=state /> }.into_any(),
        Route::Classes => view! { <ClassesPage state=state /> }.into_any(),
        Route::Blogs => view! { <BlogsPage state=state /> }.into_any(),
        Route::About => view! { <AboutPage state=state /> }.into_any(),
        _ => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    let _popstate = window_event_listener(leptos::ev::popstate, {
        let state = state.clone();
        move |_| state.sync_with_location()
    });

    let nav = {
        let state = state.clone();
        move || {
            let route = state.route.get();
            let links = if route.is_admin() && route != Route::AdminLogin {
                ADMIN_NAV.as_slice()
            } else {
                PUBLIC_NAV.as_slice()
            };
            links
                .iter()
                .map(|link| view! { <NavButton state=state.clone() route=*link /> })
                .collect_view()
        }
    };

    let content = {
        let state = state.clone();
        move || page(state.route.get(), state.clone())
    };

    let footer = {
        let state = state.clone();
        move || (!state.route.get().is_admin()).then(|| view! { <Footer state=state.clone() /> })
    };

    view! {
        <header class="site-header">
            <nav>{nav}</nav>
        </header>
        <main class="page">
            <section class="container">{content}</section>
        </main>
        {footer}
        <Toaster state=state />
    }
}
