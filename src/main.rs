//! Adcraft CLI entry point.
//!
//! Provides `chat` for the guided conversation and `submit` for one-shot
//! form-style submission.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

use adcraft::adapters::cli::run_repl;
use adcraft::collector::Collector;
use adcraft::config::Config;
use adcraft::credentials::load_client_credentials;
use adcraft::form::{direct_submit, CampaignForm, MusicChoice};
use adcraft::logging;
use adcraft::service::mock::MockAdService;
use adcraft::service::AdService;

/// Adcraft: guided ad campaign builder.
#[derive(Parser)]
#[command(name = "adcraft", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Create a campaign through a guided conversation.
    Chat,
    /// Create a campaign from all fields at once and print the result as JSON.
    Submit {
        /// Campaign name.
        #[arg(long)]
        name: String,
        /// Objective: Traffic or Conversions.
        #[arg(long)]
        objective: String,
        /// Ad text shown to users.
        #[arg(long)]
        ad_text: String,
        /// Call-to-action label or free text.
        #[arg(long)]
        cta: String,
        /// "No Music", "Use Existing Music" or "Upload Custom Music".
        #[arg(long, default_value = "No Music")]
        music: MusicChoice,
        /// Music id or file path, depending on --music.
        #[arg(long)]
        music_ref: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;
    let _logging_guard = logging::init(config.logging.logs_dir.as_deref(), &config.logging.level)
        .context("failed to initialise logging")?;

    let service = connect(&config).await?;

    match cli.command {
        Command::Chat => handle_chat(service).await,
        Command::Submit {
            name,
            objective,
            ad_text,
            cta,
            music,
            music_ref,
        } => {
            let form = CampaignForm {
                campaign_name: name,
                objective,
                ad_text,
                cta,
                music,
                music_ref,
            };
            handle_submit(service.as_ref(), &form).await
        }
    }
}

/// Build the ad service and authorize. Failure here is fatal.
async fn connect(config: &Config) -> anyhow::Result<Arc<dyn AdService>> {
    let credentials = load_client_credentials(&config.credentials.env_file)?;
    let service = MockAdService::new(&config.service);
    service
        .authorize(&credentials.client_id, &credentials.client_secret)
        .await
        .context("failed to authorize with the ad service")?;
    info!(client_id = %credentials.client_id, "authorized with the ad service");
    Ok(Arc::new(service))
}

/// Run the guided conversation on stdin/stdout.
async fn handle_chat(service: Arc<dyn AdService>) -> anyhow::Result<ExitCode> {
    let mut collector = Collector::new(service);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    let step = run_repl(&mut collector, stdin, &mut stdout).await?;
    info!(step = %step, "conversation ended");
    Ok(ExitCode::SUCCESS)
}

/// Submit a complete form and print `{payload, receipt}` or `{error}`.
async fn handle_submit(service: &dyn AdService, form: &CampaignForm) -> anyhow::Result<ExitCode> {
    let (body, code) = match direct_submit(service, form).await {
        Ok(submission) => (
            serde_json::json!({
                "payload": submission.payload,
                "receipt": submission.receipt,
            }),
            ExitCode::SUCCESS,
        ),
        Err(err) => (
            serde_json::json!({ "error": err.to_string() }),
            ExitCode::FAILURE,
        ),
    };
    let rendered = serde_json::to_string_pretty(&body).context("failed to serialize result")?;
    println!("{rendered}");
    Ok(code)
}
