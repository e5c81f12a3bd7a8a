use anyhow::{bail, Context, Result};
use clap::Parser;
use formreach_cli::audit::{AuditLog, AuditRecord};
use formreach_cli::cli::{BatchArgs, Cli, Command, ExtractArgs, FillArgs};
use formreach_cli::config::{self, ContactEntry};
use formreach_cli::runner::{self, RunStatus};
use form_schema::FallbackExtractor;
use serde_json::json;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Fill(args) => run_fill(args).await,
        Command::Batch(args) => run_batch(args).await,
        Command::Extract(args) => run_extract(args),
    }
}

async fn run_fill(args: FillArgs) -> Result<()> {
    let profile = config::load_profile_with_defaults(&args.profile, args.defaults.as_deref())
        .context("loading sender profile")?;
    let message = config::load_message(args.message, args.message_file.as_deref())?;

    let entry = ContactEntry {
        company_name: String::new(),
        contact_url: String::new(),
        snapshot: Some(args.snapshot),
        schema: args.schema,
        html: args.html,
        status: String::new(),
    };

    let outcome = runner::process_contact(&entry, &profile, message.as_deref()).await;

    if let Some(path) = args.audit {
        AuditLog::new(path).append(&AuditRecord::from_outcome("", "", &outcome))?;
    }

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&outcome.filled)?
    } else {
        serde_json::to_string(&outcome.filled)?
    };
    println!("{}", rendered);

    if outcome.status != RunStatus::Success {
        bail!(
            "fill did not complete: {} ({})",
            outcome.result,
            outcome.error.unwrap_or_default()
        );
    }
    Ok(())
}

async fn run_batch(args: BatchArgs) -> Result<()> {
    let profile = config::load_profile_with_defaults(&args.profile, args.defaults.as_deref())
        .context("loading sender profile")?;
    let message = config::load_message(args.message, args.message_file.as_deref())?;
    let contacts = config::load_contacts(&args.contacts).context("loading contact list")?;

    let audit = args.audit.map(AuditLog::new);
    let summary = runner::run_batch(&contacts, &profile, message.as_deref(), audit.as_ref()).await?;

    info!(
        processed = summary.processed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        skipped = summary.skipped,
        "Done"
    );
    if summary.processed > 0 && summary.succeeded == 0 {
        bail!("no contact could be filled");
    }
    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let html = fs::read_to_string(&args.html).context("reading html capture")?;
    let schema = FallbackExtractor::new().extract(&html)?;

    let value = json!({ "fields": schema.fields });
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    match args.out {
        Some(path) => {
            fs::write(&path, rendered)?;
            info!(path = %path.display(), fields = schema.fields.len(), "Schema written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
