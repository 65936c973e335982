use std::process;

use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use consult_client::admin::{
    AdminCrud, AdminResource, Blogs, Classes, Courses, Reviews, SettingsForm, Universities,
    load_error_text,
};
use consult_client::auth;
use consult_client::carousel::ReviewCarousel;
use consult_client::forms::FormData;
use consult_client::views::{
    FooterView, blog_empty_text, blog_listing, course_empty_text, course_listing,
    featured_universities, sorted_team, university_empty_text, university_listing,
};
use consult_client::{ApiOrigin, ConsultClient, ConsultClientError, Identified, NativeClient};
use tracing::info;

mod logging;
mod render;
mod session;
mod settings;

use logging::init_logging;
use render::{Row, report};
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "consult-cli", version, about = "Terminal client for the consultancy website API")]
struct Cli {
    /// API origin, e.g. `http://127.0.0.1:3000` (overrides CONSULT_API_ORIGIN).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Home page: partner universities, student reviews, footer.
    Home,
    /// Active universities with optional search by name or country.
    Universities {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Active courses with optional search.
    Courses {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Preparation classes.
    Classes,
    /// Published articles, newest first, with optional search.
    Blogs {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Student reviews, three at a time.
    Reviews {
        /// How many times to press "next".
        #[arg(long, default_value_t = 0)]
        next: usize,
    },
    /// About page: mission, stats, story, values and the team.
    About,
    /// Footer built from site settings.
    Footer,
    /// Admin login; the session cookie is stored in `.consult_session`.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Admin screens.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Resource {
    Universities,
    Courses,
    Classes,
    Blogs,
    Reviews,
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// All records, including inactive ones.
    List { resource: Resource },
    /// Create a record from `--field name=value` pairs.
    Create {
        resource: Resource,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Update a record; fields not given keep their current value.
    Update {
        resource: Resource,
        #[arg(long)]
        id: String,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record.
    Delete {
        resource: Resource,
        #[arg(long)]
        id: String,
    },
    /// Show site settings, or save them when `--field` is given.
    Settings {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

#[derive(Debug)]
enum AdminAction {
    List,
    Create(Vec<(String, String)>),
    Update(String, Vec<(String, String)>),
    Delete(String),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env()?.with_server(cli.server);

    init_logging(&settings.log_level)?;

    let client = ConsultClient::native(ApiOrigin::new(&settings.api_origin), settings.http)
        .map_err(map_client_error)?;

    if let Some(cookies) = session::load_session().context("failed to read .consult_session")? {
        client
            .transport()
            .restore_session(client.origin().as_str(), &cookies)
            .map_err(map_client_error)?;
    }

    match cli.command {
        Command::Home => {
            let universities = client.universities().await.map_err(map_client_error)?;
            let reviews = client.reviews().await.map_err(map_client_error)?;
            let cards = featured_universities(&universities);
            render::print_universities_section(cards.as_deref());
            render::print_reviews_section(&ReviewCarousel::new(&reviews));
            print_footer(&client).await?;
        }
        Command::Universities { search } => {
            let universities = client.universities().await.map_err(map_client_error)?;
            let state = university_listing(Some(universities.as_slice()), &search);
            render::print_listing("Universities", &state, university_empty_text);
        }
        Command::Courses { search } => {
            let courses = client.courses().await.map_err(map_client_error)?;
            let state = course_listing(Some(courses.as_slice()), &search);
            render::print_listing("Explore Our Courses", &state, course_empty_text);
        }
        Command::Classes => {
            let classes = client.classes().await.map_err(map_client_error)?;
            println!("Classes");
            for class in &classes {
                println!("  - {}", class.row());
            }
        }
        Command::Blogs { search } => {
            let blogs = client.blogs().await.map_err(map_client_error)?;
            let state = blog_listing(Some(blogs.as_slice()), &search);
            render::print_listing("Our Blog", &state, blog_empty_text);
        }
        Command::Reviews { next } => {
            let reviews = client.reviews().await.map_err(map_client_error)?;
            let mut carousel = ReviewCarousel::new(&reviews);
            for _ in 0..next {
                carousel.next();
            }
            render::print_reviews_section(&carousel);
        }
        Command::About => {
            let team = client.team().await.map_err(map_client_error)?;
            for line in render::about_lines() {
                println!("{line}");
            }
            render::print_team(&sorted_team(&team));
        }
        Command::Footer => print_footer(&client).await?,
        Command::Login { username, password } => {
            let form = FormData::new()
                .with("username", username)
                .with("password", password);
            let outcome = auth::login(&client, &form).await;
            let redirect = outcome.redirect();
            report(outcome.toast())?;
            if session::persist_session(&client).context("failed to save session")? {
                info!("session saved to {}", session::SESSION_FILE);
            }
            if let Some(path) = redirect {
                println!("Continue at {path}");
            }
        }
        Command::Logout => {
            if session::clear_session().context("failed to remove session")? {
                println!("Session removed");
            } else {
                println!("No stored session");
            }
        }
        Command::Admin(command) => run_admin(&client, command).await?,
    }

    Ok(())
}

async fn run_admin(client: &NativeClient, command: AdminCommand) -> Result<()> {
    let (resource, action) = match command {
        AdminCommand::Settings { fields } => return run_settings(client, fields).await,
        AdminCommand::List { resource } => (resource, AdminAction::List),
        AdminCommand::Create { resource, fields } => (resource, AdminAction::Create(fields)),
        AdminCommand::Update {
            resource,
            id,
            fields,
        } => (resource, AdminAction::Update(id, fields)),
        AdminCommand::Delete { resource, id } => (resource, AdminAction::Delete(id)),
    };

    match resource {
        Resource::Universities => run_crud::<Universities>(client, action).await,
        Resource::Courses => run_crud::<Courses>(client, action).await,
        Resource::Classes => run_crud::<Classes>(client, action).await,
        Resource::Blogs => run_crud::<Blogs>(client, action).await,
        Resource::Reviews => run_crud::<Reviews>(client, action).await,
    }
}

async fn run_crud<R>(client: &NativeClient, action: AdminAction) -> Result<()>
where
    R: AdminResource,
    R::Model: Row,
{
    let mut screen = AdminCrud::<R>::new();

    match action {
        AdminAction::List => {
            let items = load_items::<R>(client).await?;
            render::print_admin_rows(R::PLURAL, &items);
            Ok(())
        }
        AdminAction::Create(fields) => {
            screen.open_create();
            let form = apply_fields(screen.form(), fields);
            report(screen.submit(client, &form).await)
        }
        AdminAction::Update(id, fields) => {
            let item = find_item::<R>(client, &id).await?;
            screen.open_edit(item);
            let form = apply_fields(screen.form(), fields);
            report(screen.submit(client, &form).await)
        }
        AdminAction::Delete(id) => {
            let item = find_item::<R>(client, &id).await?;
            report(AdminCrud::<R>::delete(client, &item).await)
        }
    }
}

async fn load_items<R: AdminResource>(client: &NativeClient) -> Result<Vec<R::Model>> {
    AdminCrud::<R>::load(client)
        .await
        .map_err(|err| anyhow!(load_error_text(R::PLURAL, &err)))
}

async fn find_item<R: AdminResource>(client: &NativeClient, id: &str) -> Result<R::Model> {
    load_items::<R>(client)
        .await?
        .into_iter()
        .find(|item| item.entity_id().is_some_and(|item_id| item_id.as_str() == id))
        .ok_or_else(|| anyhow!("no {} with id {id}", R::SINGULAR))
}

async fn run_settings(client: &NativeClient, fields: Vec<(String, String)>) -> Result<()> {
    let loaded = SettingsForm::load(client)
        .await
        .map_err(|err| anyhow!(load_error_text("settings", &err)))?;

    if fields.is_empty() {
        render::print_settings(loaded.as_ref());
        return Ok(());
    }

    let mut form = SettingsForm::new();
    form.sync(loaded.as_ref());
    for (name, value) in fields {
        form.set(&name, value);
    }
    report(form.save(client).await)
}

async fn print_footer(client: &NativeClient) -> Result<()> {
    let settings = client.settings().await.map_err(map_client_error)?;
    let footer = FooterView::from_settings(settings.as_ref());
    render::print_footer(&footer, chrono::Utc::now().year());
    Ok(())
}

fn apply_fields(mut form: FormData, fields: Vec<(String, String)>) -> FormData {
    for (name, value) in fields {
        form.set(name, value);
    }
    form
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn map_client_error(err: ConsultClientError) -> anyhow::Error {
    let message = match err {
        ConsultClientError::Network(message) => format!("cannot reach API server: {message}"),
        ConsultClientError::Http { status, message } if status == 401 || status == 403 => {
            format!("authorization required: run `consult-cli login ...` ({status}: {message})")
        }
        ConsultClientError::Decode(message) => format!("unexpected response from server: {message}"),
        other => other.to_string(),
    };
    anyhow!(message)
}
