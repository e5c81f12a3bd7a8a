//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "formreach",
    version,
    about = "Contact-form autofill engine (fill-only; never submits)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill one captured page snapshot and print the fill summary
    Fill(FillArgs),
    /// Process a contact list sequentially with audit logging
    Batch(BatchArgs),
    /// Extract a degraded (role=other) schema from raw form HTML
    Extract(ExtractArgs),
}

#[derive(Args)]
pub struct FillArgs {
    /// Captured page snapshot (JSON)
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Pre-classified schema JSON; omit to fall back to --html extraction
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Raw form HTML for local fallback extraction
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Sender profile YAML
    #[arg(long)]
    pub profile: PathBuf,

    /// Defaults profile merged under the sender profile
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Message body (overrides the profile's message key)
    #[arg(long)]
    pub message: Option<String>,

    /// Read the message body from a file
    #[arg(long)]
    pub message_file: Option<PathBuf>,

    /// Append the outcome to this JSONL audit log
    #[arg(long)]
    pub audit: Option<PathBuf>,

    /// Pretty-print the summary JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Contact list YAML
    #[arg(long)]
    pub contacts: PathBuf,

    /// Sender profile YAML
    #[arg(long)]
    pub profile: PathBuf,

    /// Defaults profile merged under the sender profile
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Message body (overrides the profile's message key)
    #[arg(long)]
    pub message: Option<String>,

    /// Read the message body from a file
    #[arg(long)]
    pub message_file: Option<PathBuf>,

    /// Append one JSONL audit record per contact
    #[arg(long)]
    pub audit: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Raw form HTML file
    #[arg(long)]
    pub html: PathBuf,

    /// Write the schema JSON here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Pretty-print the schema JSON
    #[arg(long)]
    pub pretty: bool,
}
