//! `offbeat` command line client.
#![allow(missing_docs)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use offbeat_client::ApiClient;
use offbeat_config::{Config, ConfigLoad, ConfigLoader};
use offbeat_core::session::{FileStore, SessionStorage, StubAuthenticator};
use offbeat_core::{
    CellEvent, OtpVerification, PhoneEntry, ProfileCompletion, Route,
    SessionStore, ValidationError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "offbeat")]
#[command(about = "Sign in to Offbeat and manage the local session")]
struct Cli {
    /// Path to offbeat.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with a phone number and verification code
    Signin {
        /// 10-digit phone number; prompted when omitted
        #[arg(long)]
        phone: Option<String>,
        /// Verification code; prompted when omitted
        #[arg(long)]
        code: Option<String>,
        /// Full name for the profile; prompted when omitted
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the stored session
    Status,
    /// Sign out and clear the stored session
    Logout,
    /// Send an authenticated GET request and print the JSON response
    Get {
        /// Path relative to the API base URL
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config.clone() {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad { config, warnings } =
        loader.load().context("failed to load configuration")?;

    init_tracing(&config);

    if config.metadata.env_file_loaded {
        tracing::info!("loaded .env file");
    }
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => tracing::debug!(
                message = %warning.message,
                hint = %hint,
                "configuration warning"
            ),
            None => {
                tracing::debug!(message = %warning.message, "configuration warning")
            }
        }
    }

    let session = open_session(&config)?;

    match cli.command {
        Command::Signin { phone, code, name } => {
            signin(&config, &session, phone, code, name).await
        }
        Command::Status => {
            print_status(&session);
            Ok(())
        }
        Command::Logout => {
            session.logout();
            println!("Signed out");
            Ok(())
        }
        Command::Get { path } => get(&config, session, &path).await,
    }
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log.filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_session(config: &Config) -> anyhow::Result<SessionStore> {
    config.storage.ensure_directory().with_context(|| {
        format!(
            "failed to create storage directory {}",
            config.storage.dir.display()
        )
    })?;
    let storage = SessionStorage::new(
        Arc::new(FileStore::new(config.storage.dir.clone())),
        config.storage.key.clone(),
    );
    let authenticator =
        StubAuthenticator::with_latency(config.auth.stub_latency);
    Ok(SessionStore::new(storage, Arc::new(authenticator)))
}

fn prompt(label: &str, provided: Option<String>) -> anyhow::Result<String> {
    match provided {
        Some(value) => Ok(value),
        None => Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .context("prompt failed"),
    }
}

async fn signin(
    config: &Config,
    session: &SessionStore,
    phone: Option<String>,
    code: Option<String>,
    name: Option<String>,
) -> anyhow::Result<()> {
    let mut entry = PhoneEntry::new();
    entry.set_input(&prompt("Phone number", phone)?);
    if !entry.can_submit() {
        bail!(ValidationError::InvalidPhone);
    }

    let Some(route) = entry.submit(session).await else {
        match entry.error() {
            Some(err) => bail!("sign in failed: {}", err),
            None => bail!("sign in was cancelled by a concurrent sign out"),
        }
    };
    let phone = match route {
        Route::VerifyOtp { phone } => phone,
        other => bail!("unexpected route after sign in: {}", other),
    };

    let length = config.auth.otp_length;
    let mut otp = OtpVerification::new(phone, length);
    println!("Code sent to {}", otp.formatted_phone());
    let code = prompt(&format!("{}-digit code", length), code)?;
    let _ = otp.handle(0, CellEvent::Paste(&code));
    if otp.verify().is_none() {
        bail!(ValidationError::IncompleteOtp { expected: length });
    }

    let mut profile = ProfileCompletion::new();
    profile.set_name(prompt("Full name", name)?);
    if profile.submit(session).is_none() {
        bail!(ValidationError::EmptyName);
    }

    print_status(session);
    Ok(())
}

fn print_status(session: &SessionStore) {
    match session.user() {
        Some(user) if session.is_authenticated() => {
            println!("Signed in as {}", user.phone_number.display());
            println!("  id:   {}", user.id);
            if let Some(name) = &user.full_name {
                println!("  name: {}", name);
            }
        }
        _ => println!("Not signed in"),
    }
}

async fn get(
    config: &Config,
    session: SessionStore,
    path: &str,
) -> anyhow::Result<()> {
    let client = ApiClient::from_config(&config.api, session)
        .context("failed to build HTTP client")?
        .with_unauthorized_hook(|route| {
            eprintln!("Session expired; sign in again ({})", route.path());
        });

    let value: serde_json::Value = client.get(path).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
