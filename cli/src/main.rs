use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use shared::client::{AuthClient, DEFAULT_BASE_URL};
use shared::guard::{navigate, Navigation, Route};
use shared::persist::{PersistConfig, Persistor};
use shared::session::{SessionCommand, SessionStore};
use shared::validators::valid_name;
use shared::{LoginFieldErrors, UserCredentials, UserName};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::storage::FileStorage;
use crate::transport::ReqwestTransport;

mod storage;
mod transport;

type Client = AuthClient<ReqwestTransport>;

#[derive(Parser, Debug)]
#[command(version, about = "Argent Bank command line client")]
struct Config {
    #[arg(long, env = "ARGENT_API_URL", default_value = DEFAULT_BASE_URL)]
    endpoint: Url,

    /// Where the session is kept between runs, defaults to ~/.argent-bank
    #[arg(long, env = "ARGENT_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the token
    Login {
        #[arg(long, env = "ARGENT_EMAIL")]
        email: String,

        #[arg(long, env = "ARGENT_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        remember: bool,
    },
    /// Fetch the profile and refresh the stored user name
    Profile,
    /// Change the first and last name
    UpdateName {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the stored session
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state_dir = match config.state_dir {
        Some(dir) => dir,
        None => home::home_dir()
            .context("Cannot resolve the home directory, use --state-dir")?
            .join(".argent-bank"),
    };
    info!(endpoint = %config.endpoint, state_dir = %state_dir.display(), "Starting Argent Bank client");

    let persistor = Persistor::new(FileStorage::new(state_dir), PersistConfig::default());
    let store = SessionStore::new(persistor.rehydrate()?);
    let client = AuthClient::new(config.endpoint.as_str(), ReqwestTransport::default())?;

    let store = match config.command {
        Command::Login {
            email,
            password,
            remember,
        } => {
            let password = SecretString::from(password);
            login(&client, store, &email, &password, remember).await?
        }
        Command::Profile => profile(&client, store).await?,
        Command::UpdateName {
            first_name,
            last_name,
        } => update_name(&client, store, UserName::new(first_name, last_name)).await?,
        Command::Logout => {
            let store = persistor.purge_store(&store)?;
            println!("Signed out");
            store
        }
        Command::Status => {
            status(&store);
            store
        }
    };

    persistor
        .persist(store.session())
        .context("Fail to store the session")?;
    Ok(())
}

async fn login(
    client: &Client,
    store: SessionStore,
    email: &str,
    password: &SecretString,
    remember: bool,
) -> Result<SessionStore> {
    if let Navigation::Redirect { .. } = navigate(store.session(), Route::Login) {
        println!("Already signed in, run `logout` first to switch user");
        return Ok(store);
    }

    let credentials = UserCredentials::new(email, password.expose_secret());
    let errors = credentials.validate();
    if !errors.is_empty() {
        bail!(
            "Invalid credentials, email: {email:?}, password: {password:?}",
            email = errors.email,
            password = errors.password,
        );
    }

    match client.login(&credentials).await {
        Ok(token) => {
            let mut store = store.reduce(SessionCommand::SetToken(token));
            if store.session().persist_is_checked != remember {
                store = store.reduce(SessionCommand::ToggleCheck);
            }
            info!(email = %credentials.email, "Sign-in succeeded");
            println!("Signed in as {}", credentials.email);
            Ok(store)
        }
        Err(error) => {
            let mut field_errors = LoginFieldErrors::default();
            if field_errors.apply_login_error(&error) {
                let message = if field_errors.email.is_empty() {
                    field_errors.password
                } else {
                    field_errors.email
                };
                bail!("Sign-in failed: {message}");
            }
            Err(error).context("Sign-in attempt failed")
        }
    }
}

fn require_signed_in(store: &SessionStore, route: Route) -> Result<()> {
    match navigate(store.session(), route) {
        Navigation::Permit => Ok(()),
        Navigation::Redirect { .. } => bail!("Not signed in, run `login` first"),
    }
}

async fn profile(client: &Client, store: SessionStore) -> Result<SessionStore> {
    require_signed_in(&store, Route::Profile)?;
    let profile = client
        .fetch_profile(&store.session().token)
        .await
        .context("Fail to fetch the user profile")?;
    let store = store.reduce(SessionCommand::SetUserName(profile.user_name()));
    let user = store.memoized_user();
    println!("Welcome back {} {}!", user.first_name, user.last_name);
    println!("Email: {}", profile.email);
    println!("Member since: {}", profile.created_at);
    Ok(store)
}

async fn update_name(
    client: &Client,
    store: SessionStore,
    user_name: UserName,
) -> Result<SessionStore> {
    require_signed_in(&store, Route::Profile)?;
    for (field, value) in [
        ("first name", &user_name.first_name),
        ("last name", &user_name.last_name),
    ] {
        let message = valid_name(value);
        if !message.is_empty() {
            bail!("Invalid {field} {value:?}: {message}");
        }
    }

    let updated = client
        .update_profile(&store.session().token, &user_name)
        .await
        .context("Fail to update the user profile")?;
    if updated != user_name {
        warn!(?updated, requested = ?user_name, "Server stored a different name");
    }
    let store = store.reduce(SessionCommand::EditUserName(updated));
    let user = store.memoized_user();
    println!("Name changed to {} {}", user.first_name, user.last_name);
    Ok(store)
}

fn status(store: &SessionStore) {
    let session = store.session();
    if !store.is_authenticated() {
        println!("Signed out");
        return;
    }
    let user = store.memoized_user();
    println!("Signed in");
    if !user.first_name.is_empty() || !user.last_name.is_empty() {
        println!("User: {} {}", user.first_name, user.last_name);
    }
    println!("Remember me: {}", session.persist_is_checked);
}
