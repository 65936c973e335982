use std::future::Future;

use consult_client::views::SKELETON_COUNT;
use consult_client::{ConsultClientResult, Toast};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::api::BrowserClient;
use crate::routes::Route;
use crate::state::AppState;

pub(crate) mod admin;
pub(crate) mod footer;
pub(crate) mod public;

/// Загружает список в сигнал: `None` пока грузится. На публичных страницах
/// ошибка показывается как пустой список.
pub(crate) fn load_public<T, F, Fut>(state: &AppState, what: &'static str, target: RwSignal<Option<Vec<T>>>, load: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(BrowserClient) -> Fut + 'static,
    Fut: Future<Output = ConsultClientResult<Vec<T>>> + 'static,
{
    let api = state.api.clone();
    spawn_local(async move {
        match load(api).await {
            Ok(items) => target.set(Some(items)),
            Err(err) => {
                warn!(what, error = %err, "public listing failed to load");
                target.set(Some(Vec::new()));
            }
        }
    });
}

#[component]
pub(crate) fn Skeletons(#[prop(default = SKELETON_COUNT)] count: usize) -> impl IntoView {
    (0..count)
        .map(|_| view! { <div class="card skeleton" aria-hidden="true"></div> })
        .collect_view()
}

#[component]
pub(crate) fn Toaster(state: AppState) -> impl IntoView {
    let dismiss = {
        let state = state.clone();
        move |_| state.dismiss()
    };

    move || {
        state.toast.get().map(|toast: Toast| {
            let class = if toast.is_error() { "toast toast-destructive" } else { "toast" };
            view! {
                <div class=class role="status">
                    <strong>{toast.title}</strong>
                    <p>{toast.description}</p>
                    <button on:click=dismiss.clone()>"Dismiss"</button>
                </div>
            }
        })
    }
}

/// Ссылка, которая меняет страницу без перезагрузки.
#[component]
pub(crate) fn NavButton(state: AppState, route: Route, #[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    let active = {
        let state = state.clone();
        move || state.route.get() == route
    };
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        state.navigate(route);
    };

    view! {
        <a href=route.path() class:active=active on:click=on_click>
            {label.unwrap_or(route.label())}
        </a>
    }
}
