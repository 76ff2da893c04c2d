// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JunkStop command-line client.
//!
//! Logs in against the JunkStop API, keeps the session in the local
//! credential file, and prints screen view models as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use junkstop_client::{
    config::Config,
    models::{ChatRequest, JunkLog},
    screens::{CoachFeedback, Navigation, ProgressScreen, Theme},
    services::AuthResult,
    storage::{CredentialStore, FileStore},
    Client,
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "junkstop", about = "JunkStop habit tracker client")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "JUNKSTOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and store the session
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "JUNKSTOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current session
    Status,
    /// List recent logs
    Logs {
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Coach feedback for today's logs
    Feedback {
        #[arg(long)]
        dark: bool,
    },
    /// Weekly progress screen
    Progress,
    /// Add a clean day to the streak
    Streak,
    /// Talk to the AI coach
    Chat {
        message: String,
        /// Guilt level (1-5) to give the coach context
        #[arg(long)]
        guilt: Option<u8>,
        /// Regret level (1-5)
        #[arg(long)]
        regret: Option<u8>,
    },
    /// Navigation bar with the given screen active
    Nav {
        #[arg(default_value_t = 0)]
        screen: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = Config::from_env().context("Failed to load configuration")?;
    let store = match &config.storage_path {
        Some(path) => FileStore::new(path),
        None => FileStore::open_default().context("Failed to locate credential storage")?,
    };
    tracing::debug!(path = %store.path().display(), api = %config.api_base_url, "Starting client");

    let store: Arc<dyn CredentialStore> = Arc::new(store);
    let client = Client::connect(config, store).await?;

    match cli.command {
        Command::Login { email, password } => {
            let result = client.session.login(&email, &password).await;
            print_auth_result(&result)?;
        }
        Command::Register {
            email,
            username,
            password,
        } => {
            let result = client.session.register(&email, &username, &password).await;
            print_auth_result(&result)?;
        }
        Command::Logout => {
            client.session.logout().await;
            print_json(&client.session.session().await)?;
        }
        Command::Status => {
            let session = client.session.session().await;
            print_json(&serde_json::json!({
                "state": session.state(),
                "user": session.user,
            }))?;
        }
        Command::Logs { limit, offset } => {
            let logs = client.api.list_logs(limit, offset).await?;
            print_json(&logs)?;
        }
        Command::Feedback { dark } => {
            let logs = client.api.list_logs(100, 0).await?;
            let today = todays_logs(logs);
            let theme = if dark { Theme::dark() } else { Theme::default() };
            print_json(&CoachFeedback::new(&today, &theme))?;
        }
        Command::Progress => {
            let analytics = client.api.weekly_analytics().await?;
            let insight = match client.api.daily_insight().await {
                Ok(insight) => Some(insight.insight),
                Err(e) => {
                    tracing::warn!(error = %e, "Daily insight unavailable, using default text");
                    None
                }
            };
            print_json(&ProgressScreen::from_analytics(&analytics, insight))?;
        }
        Command::Streak => {
            let update = client.api.increment_streak().await?;
            print_json(&update)?;
        }
        Command::Chat {
            message,
            guilt,
            regret,
        } => {
            let request = ChatRequest {
                message,
                guilt_level: guilt,
                regret_level: regret,
            };
            print_json(&client.api.chat(&request).await?)?;
        }
        Command::Nav { screen } => {
            let nav = Navigation::new(screen, |_| {});
            print_json(&nav.buttons())?;
        }
    }

    Ok(())
}

/// Logs created today (UTC), by `created_at` date prefix.
fn todays_logs(logs: Vec<JunkLog>) -> Vec<JunkLog> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    logs.into_iter()
        .filter(|log| log.created_at.starts_with(&today))
        .collect()
}

fn print_auth_result(result: &AuthResult) -> anyhow::Result<()> {
    print_json(result)?;
    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize logging to stderr, filtered by `RUST_LOG`.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("junkstop_client=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
