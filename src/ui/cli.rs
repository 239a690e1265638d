use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "aimeshare",
    about = "Inspect and export shared AI conversation transcripts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print an outline of every message's segments.
    Show(SourceArgs),

    /// Write the sandboxed preview document of an HTML or web-analysis block.
    #[command(name = "export-html")]
    ExportHtml(ExportHtmlArgs),

    /// Write a markdown table as CSV.
    #[command(name = "export-csv")]
    ExportCsv(ExportCsvArgs),

    /// Print the conversation id contained in a share link.
    Resolve {
        input: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Conversation id or share link.
    pub target: String,

    /// Read the record from a JSON file instead of the remote store.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ExportHtmlArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Zero-based message index.
    #[arg(long)]
    pub message: usize,

    /// Zero-based index among the message's previewable blocks.
    #[arg(long, default_value_t = 0)]
    pub block: usize,

    /// Write the isolated preview document instead of the HTML source.
    #[arg(long)]
    pub sandboxed: bool,

    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ExportCsvArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Zero-based message index.
    #[arg(long)]
    pub message: usize,

    /// Zero-based table index within the message.
    #[arg(long, default_value_t = 0)]
    pub table: usize,

    #[arg(long)]
    pub out: PathBuf,
}
