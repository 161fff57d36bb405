//! Command surface of the `traducteur` binary.
//!
//! Argument parsing and command execution live here so they can be driven
//! from tests; `main.rs` only installs logging and writes to stdout.

use anyhow::{bail, Context as _, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use traducteur_api::{ApiClient, ApiConfig};
use traducteur_app::{ActivationFlow, ActivationOutcome, Route, TranslatorSession};
use traducteur_license::{ActivationStore, FileSecureStorage};
use traducteur_types::{Language, LanguageOption};

#[derive(Parser, Debug)]
#[command(name = "traducteur")]
#[command(about = "License-gated translation client", version)]
pub struct Cli {
    /// Service root URL (overrides TRADUCTEUR_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding the sealed activation record
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate this device with a license key
    Activate {
        key: String,
    },
    /// Translate a text
    Translate {
        text: String,
        #[arg(long, default_value = "fr")]
        from: Language,
        #[arg(long, default_value = "en")]
        to: Language,
    },
    /// Show the current activation
    Status,
    /// Remove the activation from this device
    Logout,
    /// Check that the service is up
    Health,
    /// List supported languages
    Languages {
        /// Hide this language, as a picker would for the other side
        #[arg(long)]
        except: Option<Language>,
    },
}

/// Long-lived services shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub api: Arc<ApiClient>,
    pub store: Arc<ActivationStore>,
}

impl Context {
    /// Resolves configuration from flags, then environment, then defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = ApiConfig::from_env();
        if let Some(url) = &cli.base_url {
            config = config.with_base_url(url.clone());
        }
        debug!("Using API base URL {}", config.base_url);

        let storage = match &cli.data_dir {
            Some(dir) => FileSecureStorage::open(dir.clone()),
            None => FileSecureStorage::open_default(),
        }
        .context("Failed to open secure storage")?;
        debug!("Activation data in {:?}", storage.dir());

        let api = ApiClient::new(&config).context("Failed to create API client")?;

        Ok(Self {
            api: Arc::new(api),
            store: Arc::new(ActivationStore::new(Arc::new(storage))),
        })
    }
}

/// Runs one command, writing user-facing output to `out`.
pub async fn execute<W: Write>(command: &Command, ctx: &Context, out: &mut W) -> Result<()> {
    match command {
        Command::Activate { key } => {
            let flow = ActivationFlow::new(ctx.api.clone(), ctx.store.clone());
            match flow.activate(key).await? {
                ActivationOutcome::Activated(record) => {
                    writeln!(out, "Activation réussie.")?;
                    writeln!(out, "Utilisateur : {}", record.user_id)?;
                    writeln!(out, "Expire le   : {}", record.expires_at.to_rfc3339())?;
                }
                ActivationOutcome::Rejected(message) => bail!(message),
            }
        }
        Command::Translate { text, from, to } => {
            if Route::resolve(&ctx.store) != Route::Translator {
                bail!("Application non activée. Lancez `traducteur activate <CLÉ>`.");
            }
            let mut session = TranslatorSession::new(ctx.api.clone(), ctx.store.clone());
            session.set_source(*from);
            session.set_target(*to);
            session.set_input(text.as_str());
            let translated = session.translate().await?;
            writeln!(out, "{translated}")?;
        }
        Command::Status => match ctx.store.get() {
            Some(record) => {
                let days = record
                    .remaining_at(Utc::now())
                    .map_or(0, |left| left.num_days());
                writeln!(out, "Activé")?;
                writeln!(out, "Utilisateur : {}", record.user_id)?;
                writeln!(out, "Activé le   : {}", record.activated_at.to_rfc3339())?;
                writeln!(out, "Expire le   : {}", record.expires_at.to_rfc3339())?;
                writeln!(out, "Jours restants : {days}")?;
            }
            None => writeln!(out, "Non activé")?,
        },
        Command::Logout => {
            ctx.store.clear();
            writeln!(out, "Déconnecté.")?;
        }
        Command::Health => {
            let health = ctx.api.health_check().await?;
            writeln!(out, "{} ({})", health.status, health.timestamp)?;
        }
        Command::Languages { except } => {
            for option in LanguageOption::available_excluding(*except) {
                writeln!(out, "{option}")?;
            }
        }
    }
    Ok(())
}
