mod render;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client::config::{API_URL_ENV, STATE_DIR_ENV};
use client::pages::FormStatus;
use client::pages::admin::{ActionResult, AdminPage, UploadForm};
use client::pages::booking::BookingForm;
use client::pages::contact::ContactForm;
use client::pages::donate::{DonateForm, ManualDonationForm};
use client::pages::gallery::GalleryPage;
use client::pages::login::{LoginForm, redirect_on_enter};
use client::state::dashboard::AdminTab;
use client::state::session::{FileTokenStore, SessionError};
use client::util::guard::{GuardOutcome, Navigator, Route};
use client::util::validate::FieldErrors;
use client::{ApiClient, ApiError, ClientConfig, ConfigError, SessionStore};
use render::SitePage;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("session store failed: {0}")]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("{0}")]
    Failed(String),
    #[error("sign in first (redirected to {})", .0.path())]
    Redirected(Route),
    #[error("unknown admin tab `{0}`")]
    UnknownTab(String),
}

#[derive(Parser, Debug)]
#[command(name = "reliance", about = "Reliance Soul site and admin console client")]
struct Cli {
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    #[arg(long, env = STATE_DIR_ENV, help = "Directory holding the session token")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is reachable.
    Health,
    /// Sign in as an admin and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RELIANCE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token.
    Logout,
    /// Show whether a session token is stored.
    Status,
    /// Print a static page.
    Page {
        #[arg(value_enum)]
        page: SitePage,
    },
    /// List public gallery media.
    Gallery,
    /// Request a studio booking.
    Book(BookArgs),
    /// Send a contact message.
    Contact(ContactArgs),
    /// Start a donation checkout, or leave details for a manual donation.
    Donate(DonateArgs),
    /// Admin dashboard. Requires a stored session.
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct BookArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long, help = "Studio category, e.g. \"Podcast\" or \"Photo Shoot\"")]
    category: String,
    #[arg(long, help = "YYYY-MM-DD")]
    date: String,
    #[arg(long, help = "HH:MM")]
    time: String,
    #[arg(long, default_value = "1")]
    duration: String,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long)]
    message: String,
}

#[derive(Args, Debug)]
struct DonateArgs {
    #[arg(long, conflicts_with = "manual")]
    amount: Option<String>,
    #[arg(long, conflicts_with = "manual")]
    email: Option<String>,
    #[arg(long, default_value_t = false, requires_all = ["name", "contact"])]
    manual: bool,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, help = "Email or phone number")]
    contact: Option<String>,
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    /// Print one dashboard tab.
    Show {
        #[arg(default_value = "overview")]
        tab: String,
    },
    Approve {
        booking_id: String,
    },
    Reject {
        booking_id: String,
    },
    DeleteBooking {
        booking_id: String,
    },
    Upload {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        caption: String,
    },
    DeleteMedia {
        media_id: String,
    },
}

struct CliContext {
    client: ApiClient,
    session: SessionStore,
    nav: Navigator,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.api_url, cli.state_dir)?;
    let session = SessionStore::open(FileTokenStore::new(&config.state_dir))?;
    let client = ApiClient::new(&config, session.clone())?;
    tracing::debug!(base_url = %config.base_url, state = ?session.state(), "client configured");
    let nav = Navigator::new(&session);
    let mut ctx = CliContext { client, session, nav };

    let result = run(&mut ctx, cli.command).await;
    if let Some(to) = ctx.nav.sync() {
        eprintln!("session expired; sign in again ({})", to.path());
    }
    result
}

/// Flags win over the environment; everything else falls through to it.
fn load_config(api_url: Option<String>, state_dir: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    let config = ClientConfig::from_lookup(|key| {
        if key == API_URL_ENV {
            return api_url.clone();
        }
        std::env::var(key).ok()
    })?;
    Ok(match state_dir {
        Some(dir) => config.with_state_dir(dir),
        None => config,
    })
}

async fn run(ctx: &mut CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Health => run_health(ctx).await,
        Command::Login { email, password } => run_login(ctx, email, password).await,
        Command::Logout => {
            let ended = ctx.client.auth().logout()?;
            ctx.nav.go(Route::Home);
            println!("{}", if ended { "signed out" } else { "not signed in" });
            Ok(())
        }
        Command::Status => {
            println!("{:?}", ctx.session.state());
            Ok(())
        }
        Command::Page { page } => {
            ctx.nav.go(page.route());
            println!("{}", render::site_page(page, ctx.session.state()));
            Ok(())
        }
        Command::Gallery => {
            ctx.nav.go(Route::Gallery);
            let mut page = GalleryPage::default();
            println!("{}", render::gallery(page.load(&ctx.client).await));
            Ok(())
        }
        Command::Book(args) => run_book(ctx, args).await,
        Command::Contact(args) => {
            ctx.nav.go(Route::Contact);
            let mut form = ContactForm {
                name: args.name,
                email: args.email,
                subject: args.subject,
                message: args.message,
                ..ContactForm::default()
            };
            form.submit(&ctx.client).await;
            finish(&form.status, &form.errors)
        }
        Command::Donate(args) => run_donate(ctx, args).await,
        Command::Admin(admin) => run_admin(ctx, admin).await,
    }
}

async fn run_health(ctx: &CliContext) -> Result<(), CliError> {
    match ctx.client.health_check().await {
        Some(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        None => Err(CliError::Failed("backend unreachable".to_owned())),
    }
}

async fn run_login(ctx: &mut CliContext, email: String, password: String) -> Result<(), CliError> {
    ctx.nav.go(Route::Login);
    if let Some(to) = redirect_on_enter(ctx.session.state()) {
        ctx.nav.go(to);
        println!("already signed in");
        return Ok(());
    }
    let mut form = LoginForm { email, password, ..LoginForm::default() };
    if let Some(next) = form.submit(&ctx.client).await {
        ctx.nav.go(next);
    }
    finish(&form.status, &form.errors)
}

async fn run_book(ctx: &mut CliContext, args: BookArgs) -> Result<(), CliError> {
    ctx.nav.go(Route::Book);
    let mut form = BookingForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        category: args.category,
        date: args.date,
        time: args.time,
        duration: args.duration,
        notes: args.notes,
        ..BookingForm::default()
    };
    form.submit(&ctx.client).await;
    finish(&form.status, &form.errors)
}

async fn run_donate(ctx: &mut CliContext, args: DonateArgs) -> Result<(), CliError> {
    ctx.nav.go(Route::Donate);
    if args.manual {
        let mut form = ManualDonationForm {
            name: args.name.unwrap_or_default(),
            contact: args.contact.unwrap_or_default(),
            ..ManualDonationForm::default()
        };
        form.submit();
        return finish(&form.status, &FieldErrors::new());
    }

    let mut form = DonateForm {
        amount: args.amount.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        ..DonateForm::default()
    };
    form.submit(&ctx.client).await;
    if let Some(url) = &form.checkout_url {
        println!("{url}");
    }
    finish(&form.status, &form.errors)
}

async fn run_admin(ctx: &mut CliContext, admin: AdminCommand) -> Result<(), CliError> {
    if let GuardOutcome::Redirect(to) = ctx.nav.go(Route::Admin) {
        return Err(CliError::Redirected(to));
    }

    let mut page = AdminPage::new();
    match admin.command {
        AdminSubcommand::Show { tab } => {
            page.state.tab = AdminTab::parse(&tab).ok_or(CliError::UnknownTab(tab))?;
            println!("{}", render::dashboard(page.load(&ctx.client).await));
            Ok(())
        }
        AdminSubcommand::Approve { booking_id } => {
            page.load(&ctx.client).await;
            report(page.approve(&ctx.client, &booking_id).await)
        }
        AdminSubcommand::Reject { booking_id } => {
            page.load(&ctx.client).await;
            report(page.reject(&ctx.client, &booking_id).await)
        }
        AdminSubcommand::DeleteBooking { booking_id } => report(page.delete_booking(&ctx.client, &booking_id).await),
        AdminSubcommand::Upload { file, title, caption } => {
            let mut form = UploadForm { title, caption, file: Some(file), ..UploadForm::default() };
            let status = page.upload(&ctx.client, &mut form).await;
            finish(&status, &form.errors)
        }
        AdminSubcommand::DeleteMedia { media_id } => report(page.delete_media(&ctx.client, &media_id).await),
    }
}

/// Print an admin action's notice, or fail with it.
fn report(outcome: ActionResult<'_>) -> Result<(), CliError> {
    let notice = outcome.map_err(CliError::Failed)?;
    println!("{notice}");
    Ok(())
}

/// Print a form's success message or turn its failure into an error.
fn finish(status: &FormStatus, errors: &FieldErrors) -> Result<(), CliError> {
    match status {
        FormStatus::Succeeded(message) => {
            println!("{message}");
            Ok(())
        }
        FormStatus::Invalid => Err(CliError::Invalid(errors.clone())),
        FormStatus::Failed(message) => Err(CliError::Failed(message.clone())),
        FormStatus::Idle | FormStatus::Submitting => Ok(()),
    }
}
