use chrono::Datelike;
use consult_client::SiteSettings;
use consult_client::views::{FOOTER_LINKS, FooterView};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::state::AppState;

#[component]
pub(crate) fn Footer(state: AppState) -> impl IntoView {
    let settings = RwSignal::new(None::<SiteSettings>);
    let api = state.api.clone();
    spawn_local(async move {
        match api.settings().await {
            Ok(loaded) => settings.set(loaded),
            Err(err) => warn!(error = %err, "settings failed to load, footer uses defaults"),
        }
    });

    let year = chrono::Utc::now().year();

    move || {
        let footer = FooterView::from_settings(settings.get().as_ref());
        let copyright = footer.copyright(year);
        view! {
            <footer class="site-footer">
                <div class="brand">
                    {footer.logo_url.clone().map(|src| view! { <img src=src alt=footer.company_name.clone() /> })}
                    <h3>{footer.company_name.clone()}</h3>
                    <p>{footer.description.clone()}</p>
                    <ul class="social">
                        {footer
                            .social
                            .iter()
                            .map(|(kind, url)| view! {
                                <li>
                                    <a href=url.clone() target="_blank" rel="noopener" aria-label=kind.label()>
                                        {kind.label()}
                                    </a>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                </div>
                <nav>
                    <h4>"Quick Links"</h4>
                    <ul>
                        {FOOTER_LINKS
                            .iter()
                            .map(|link| view! { <li><a href=link.path>{link.label}</a></li> })
                            .collect_view()}
                    </ul>
                </nav>
                <address>
                    <h4>"Contact"</h4>
                    {footer
                        .contacts
                        .iter()
                        .map(|line| match &line.href {
                            Some(href) => view! { <p><a href=href.clone()>{line.text.clone()}</a></p> }.into_any(),
                            None => view! { <p>{line.text.clone()}</p> }.into_any(),
                        })
                        .collect_view()}
                </address>
                <div class="legal">
                    <span>{copyright}</span>
                    {footer
                        .legal
                        .iter()
                        .map(|(label, url)| view! { <a href=url.clone()>{*label}</a> })
                        .collect_view()}
                </div>
            </footer>
        }
    }
}
