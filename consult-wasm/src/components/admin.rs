use consult_client::admin::{
    AdminCrud, Blogs, Classes, Courses, Reviews, SettingsForm, Universities, load_error_text,
};
use consult_client::auth;
use consult_client::forms::FormData;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::BrowserClient;
use crate::components::NavButton;
use crate::fields::{AdminLayout, Field, FieldKind, FieldStore, SETTINGS_GROUPS, toggle_value};
use crate::routes::{ADMIN_NAV, Route};
use crate::state::AppState;

fn field_input<S>(field: Field, store: RwSignal<S>) -> AnyView
where
    S: FieldStore + Send + Sync + 'static,
{
    let name = field.name;
    let value = move || store.with(|s| s.value(name));

    let control = match field.kind {
        FieldKind::TextArea => view! {
            <textarea
                id=name
                name=name
                required=field.required
                prop:value=value
                on:input=move |ev| store.update(|s| s.assign(name, event_target_value(&ev)))
            ></textarea>
        }
        .into_any(),
        FieldKind::Toggle => view! {
            <input
                id=name
                name=name
                type="checkbox"
                prop:checked=move || store.with(|s| s.value(name) == toggle_value(true))
                on:change=move |ev| store.update(|s| s.assign(name, toggle_value(event_target_checked(&ev)).to_string()))
            />
        }
        .into_any(),
        kind => {
            let input_type = match kind {
                FieldKind::Number => "number",
                FieldKind::Url => "url",
                _ => "text",
            };
            view! {
                <input
                    id=name
                    name=name
                    type=input_type
                    required=field.required
                    prop:value=value
                    on:input=move |ev| store.update(|s| s.assign(name, event_target_value(&ev)))
                />
            }
            .into_any()
        }
    };

    view! {
        <div class="field">
            <label for=name>{field.label}</label>
            {control}
        </div>
    }
    .into_any()
}

#[component]
pub(crate) fn LoginPage(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_login = {
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            state.dismiss();

            let form = FormData::new()
                .with("username", username.get())
                .with("password", password.get());

            state.loading.set(true);
            let state2 = state.clone();
            spawn_local(async move {
                let outcome = auth::login(&state2.api, &form).await;
                state2.notify(outcome.toast());
                if outcome.redirect().is_some() {
                    state2.navigate(Route::AdminDashboard);
                }
                state2.loading.set(false);
            });
        }
    };

    view! {
        <section class="login">
            <h1>"Admin Login"</h1>
            <form on:submit=on_login>
                <label for="username">"Username"</label>
                <input
                    id="username"
                    autocomplete="username"
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.loading.get()>
                    {move || if state.loading.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
        </section>
    }
}

#[component]
pub(crate) fn DashboardPage(state: AppState) -> impl IntoView {
    view! {
        <h1>"Dashboard"</h1>
        <ul class="admin-menu">
            {ADMIN_NAV
                .into_iter()
                .map(|route| view! { <li><NavButton state=state.clone() route=route /></li> })
                .collect_view()}
        </ul>
    }
}

fn heading(plural: &str) -> String {
    let mut chars = plural.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Список записей админки: `None` пока грузится, `Err` с текстом ошибки.
type AdminItems<M> = RwSignal<Option<Result<Vec<M>, String>>>;

fn load_admin<R>(api: BrowserClient, items: AdminItems<R::Model>)
where
    R: AdminLayout + 'static,
    R::Model: Send + Sync + 'static,
{
    spawn_local(async move {
        let loaded = AdminCrud::<R>::load(&api)
            .await
            .map_err(|err| load_error_text(R::PLURAL, &err));
        items.set(Some(loaded));
    });
}

/// CRUD-экран ресурса: таблица, модалка создания/редактирования, удаление.
pub(crate) fn admin_crud_page<R>(state: AppState) -> AnyView
where
    R: AdminLayout + 'static,
    R::Model: Send + Sync + 'static,
{
    let items: AdminItems<R::Model> = RwSignal::new(None);
    let screen = RwSignal::new(AdminCrud::<R>::new());
    let form = RwSignal::new(FormData::new());

    load_admin::<R>(state.api.clone(), items);

    let open_create = move |_| {
        screen.update(AdminCrud::open_create);
        form.set(R::initial_form(FormData::new(), true));
    };
    let close = move |_| screen.update(AdminCrud::close);

    let on_submit = {
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let mut current = screen.get_untracked();
            let values = form.get_untracked();

            state.loading.set(true);
            let state2 = state.clone();
            spawn_local(async move {
                let toast = current.submit(&state2.api, &values).await;
                let succeeded = !toast.is_error();
                screen.set(current);
                state2.notify(toast);
                if succeeded {
                    load_admin::<R>(state2.api.clone(), items);
                }
                state2.loading.set(false);
            });
        }
    };

    let on_delete = {
        let state = state.clone();
        move |item: R::Model| {
            let state2 = state.clone();
            spawn_local(async move {
                let toast = AdminCrud::<R>::delete(&state2.api, &item).await;
                let succeeded = !toast.is_error();
                state2.notify(toast);
                if succeeded {
                    load_admin::<R>(state2.api.clone(), items);
                }
            });
        }
    };

    let rows = move || match items.get() {
        None => view! { <p>"Loading..."</p> }.into_any(),
        Some(Err(message)) => view! { <p class="error-banner">{message}</p> }.into_any(),
        Some(Ok(list)) if list.is_empty() => {
            view! { <p class="empty-state">{format!("No {} yet", R::PLURAL)}</p> }.into_any()
        }
        Some(Ok(list)) => {
            let on_delete = on_delete.clone();
            view! {
                <table>
                    <thead>
                        <tr>
                            {R::COLUMNS.iter().map(|title| view! { <th>{*title}</th> }).collect_view()}
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .into_iter()
                            .map(|item| {
                                let cells = R::cells(&item);
                                let for_edit = item.clone();
                                let on_delete = on_delete.clone();
                                view! {
                                    <tr>
                                        {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                        <td>
                                            <button on:click=move |_| {
                                                form.set(R::initial_form(R::prefill(&for_edit), false));
                                                screen.update(|s| s.open_edit(for_edit.clone()));
                                            }>"Edit"</button>
                                            <button on:click=move |_| on_delete(item.clone())>"Delete"</button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_any()
        }
    };

    view! {
        <section class="admin">
            <header>
                <h1>{heading(R::PLURAL)}</h1>
                <button on:click=open_create>{format!("Add {}", R::TITLE)}</button>
            </header>
            {rows}
            <Show when=move || screen.with(AdminCrud::is_modal_open)>
                <div class="modal" role="dialog">
                    <h2>{move || screen.with(AdminCrud::modal_title)}</h2>
                    <form on:submit=on_submit.clone()>
                        {R::FIELDS.iter().map(|field| field_input(*field, form)).collect_view()}
                        <button type="button" on:click=close>"Cancel"</button>
                        <button type="submit" disabled=move || state.loading.get()>"Save"</button>
                    </form>
                </div>
            </Show>
        </section>
    }
    .into_any()
}

#[component]
pub(crate) fn SettingsPage(state: AppState) -> impl IntoView {
    let settings = RwSignal::new(SettingsForm::new());
    let load_error = RwSignal::new(None::<String>);

    let api = state.api.clone();
    spawn_local(async move {
        match SettingsForm::load(&api).await {
            Ok(loaded) => settings.update(|form| form.sync(loaded.as_ref())),
            Err(err) => load_error.set(Some(load_error_text("settings", &err))),
        }
    });

    let on_save = {
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let current = settings.get_untracked();
            state.loading.set(true);
            let state2 = state.clone();
            spawn_local(async move {
                let toast = current.save(&state2.api).await;
                state2.notify(toast);
                state2.loading.set(false);
            });
        }
    };

    view! {
        <section class="admin">
            <h1>"Site Settings"</h1>
            {move || load_error.get().map(|message| view! { <p class="error-banner">{message}</p> })}
            <form on:submit=on_save>
                {SETTINGS_GROUPS
                    .iter()
                    .map(|(title, fields)| view! {
                        <fieldset>
                            <legend>{*title}</legend>
                            {fields.iter().map(|field| field_input(*field, settings)).collect_view()}
                        </fieldset>
                    })
                    .collect_view()}
                <button type="submit" disabled=move || state.loading.get()>
                    {move || if state.loading.get() { "Saving..." } else { "Save Settings" }}
                </button>
            </form>
        </section>
    }
}

/// Экран админки для маршрута, если он есть.
pub(crate) fn admin_screen(route: Route, state: AppState) -> Option<AnyView> {
    let view = match route {
        Route::AdminLogin => view! { <LoginPage state=state /> }.into_any(),
        Route::AdminDashboard => view! { <DashboardPage state=state /> }.into_any(),
        Route::AdminUniversities => admin_crud_page::<Universities>(state),
        Route::AdminCourses => admin_crud_page::<Courses>(state),
        Route::AdminClasses => admin_crud_page::<Classes>(state),
        Route::AdminBlogs => admin_crud_page::<Blogs>(state),
        Route::AdminReviews => admin_crud_page::<Reviews>(state),
        Route::AdminSettings => view! { <SettingsPage state=state /> }.into_any(),
        _ => return None,
    };
    Some(view)
}
