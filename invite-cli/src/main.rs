//! # Invite CLI
//!
//! Command-line companion for the invitation canvas: inspect the
//! durable slot, render it to a standalone HTML document, and build or
//! decode shareable links.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use invite_core::{store, transfer, Block, FileSlot};
use invite_export::{ExportConfig, HtmlExporter, EXPORT_FILENAME};

#[derive(Parser)]
#[command(name = "invite", version, about = "Invitation canvas tools")]
struct Cli {
    /// Directory holding the durable slot.
    #[arg(long, env = "INVITE_DATA_DIR", default_value = ".invite", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stored block sequence.
    Inspect {
        /// Emit the raw JSON form instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Render the stored sequence to a standalone HTML document.
    Export {
        /// Output path (defaults to the localized download name).
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Document title override.
        #[arg(long)]
        title: Option<String>,
        /// Stylesheet reference override.
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Build a shareable link embedding the full stored sequence.
    Share {
        /// Base URL the payload is appended to.
        base: Url,
    },
    /// Decode a share link or bare payload and print its contents.
    Decode {
        /// A full share link or the bare `data` payload.
        input: String,
        /// Also replace the durable slot with the decoded sequence.
        #[arg(long)]
        save: bool,
    },
}

/// Initialize structured tracing.
///
/// Set `RUST_LOG` to control log levels (default: warn,invite_core=info).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,invite_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let slot = FileSlot::new(&cli.data_dir)
        .with_context(|| format!("cannot open data directory {}", cli.data_dir.display()))?;

    match cli.command {
        Command::Inspect { json } => inspect(&slot, json),
        Command::Export {
            output,
            title,
            stylesheet,
        } => export(&slot, output, title, stylesheet),
        Command::Share { base } => share(&slot, &base),
        Command::Decode { input, save } => decode(&slot, &input, save),
    }
}

fn inspect(slot: &FileSlot, json: bool) -> anyhow::Result<()> {
    let blocks = store::load_blocks(slot);
    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
        return Ok(());
    }

    if blocks.is_empty() {
        println!("(empty canvas)");
        return Ok(());
    }
    for (index, block) in blocks.iter().enumerate() {
        let summary = block.kind.content().unwrap_or("-");
        println!(
            "{index:>3}  {:<12} {:<12} {}  {summary}",
            block.block_type(),
            block.label,
            block.id.as_str(),
        );
    }
    println!("{} block(s)", blocks.len());
    Ok(())
}

fn export(
    slot: &FileSlot,
    output: Option<PathBuf>,
    title: Option<String>,
    stylesheet: Option<String>,
) -> anyhow::Result<()> {
    let blocks = store::load_blocks(slot);

    let mut config = ExportConfig::default();
    if let Some(title) = title {
        config.title = title;
    }
    if let Some(stylesheet) = stylesheet {
        config.stylesheet_href = stylesheet;
    }

    let path = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILENAME));
    HtmlExporter::new(config)
        .export_to(&blocks, &path)
        .with_context(|| format!("cannot write export to {}", path.display()))?;
    println!("{} ({} blocks)", path.display(), blocks.len());
    Ok(())
}

fn share(slot: &FileSlot, base: &Url) -> anyhow::Result<()> {
    let blocks = store::load_blocks(slot);
    let url = transfer::share_url(base, &blocks).context("cannot build share link")?;
    println!("{url}");
    Ok(())
}

fn decode(slot: &FileSlot, input: &str, save: bool) -> anyhow::Result<()> {
    let payload = extract_payload(input);
    let blocks = transfer::decode(&payload).context("cannot decode payload")?;

    print_summary(&blocks);
    if save {
        store::save_blocks(slot, &blocks);
        println!("saved {} block(s) to the durable slot", blocks.len());
    }
    Ok(())
}

/// Accept either a full share link or a bare payload string.
fn extract_payload(input: &str) -> String {
    if let Ok(url) = Url::parse(input) {
        if let Some(payload) = transfer::payload_from_url(&url) {
            return payload;
        }
    }
    input.trim().to_string()
}

fn print_summary(blocks: &[Block]) {
    for block in blocks {
        println!("{:<12} {}", block.block_type(), block.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_payload_from_link() {
        let blocks = vec![Block::new(
            invite_core::BlockType::Text,
            invite_core::catalog::label_for(invite_core::BlockType::Text),
        )];
        let base = Url::parse("https://invite.example/builder?lang=ko").expect("url");
        let link = transfer::share_url(&base, &blocks).expect("share");

        let payload = extract_payload(link.as_str());
        let restored = transfer::decode(&payload).expect("decode");
        assert_eq!(restored, blocks);
    }

    #[test]
    fn test_extract_payload_passthrough() {
        let payload = transfer::encode(&[]).expect("encode");
        assert_eq!(extract_payload(&payload), payload);
        assert_eq!(extract_payload(&format!("  {payload}\n")), payload);
    }
}
