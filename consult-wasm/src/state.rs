use consult_client::Toast;
use leptos::prelude::*;
use tracing::warn;

use crate::api::{BrowserClient, browser_client};
use crate::routes::Route;

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) api: BrowserClient,
    pub(crate) route: RwSignal<Route>,
    pub(crate) toast: RwSignal<Option<Toast>>,
    pub(crate) loading: RwSignal<bool>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            api: browser_client(),
            route: RwSignal::new(current_route()),
            toast: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    pub(crate) fn notify(&self, toast: Toast) {
        self.toast.set(Some(toast));
    }

    pub(crate) fn dismiss(&self) {
        self.toast.set(None);
    }

    /// Переход без перезагрузки страницы.
    pub(crate) fn navigate(&self, route: Route) {
        let pushed = window()
            .history()
            .and_then(|history| {
                history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.path()))
            });
        if pushed.is_err() {
            warn!(path = route.path(), "history.pushState failed");
        }
        self.route.set(route);
    }

    /// Синхронизация с кнопками назад/вперёд.
    pub(crate) fn sync_with_location(&self) {
        self.route.set(current_route());
    }
}

fn current_route() -> Route {
    let path = window().location().pathname().unwrap_or_default();
    Route::from_path(&path)
}
