//! rfpad command-line reader
//!
//! Polls one or more proximity-pad RFID readers and prints each
//! newly-seen transponder exactly once.
//!
//! # Usage
//!
//! ```bash
//! # Poll the default pad, plain hex output
//! rfpad-cli
//!
//! # Two pads, structured output, faster cycle
//! rfpad-cli --device 0ab1:0002 --device 0ab1:0003 --format json --interval-ms 250
//!
//! # Frame-level debugging
//! RFPAD_LOG=trace rfpad-cli --verbose
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use rfpad::{DedupScope, DeviceSelector, Poller, Reader, Tag};

#[derive(Parser)]
#[command(name = "rfpad-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Poll proximity-pad RFID readers and report newly-seen transponders")]
#[command(long_about = None)]
struct Cli {
    /// Reader to poll, as vid:pid hex (repeatable)
    #[arg(short, long, default_value = "0ab1:0002")]
    device: Vec<DeviceSelector>,

    /// Output rendering for discovered tags
    #[arg(short, long, value_enum, default_value = "plain")]
    format: FormatArg,

    /// Delay between polling passes, in milliseconds
    #[arg(long, default_value = "1000")]
    interval_ms: u64,

    /// Per-transfer timeout, in milliseconds
    #[arg(long, default_value = "1000")]
    timeout_ms: u64,

    /// De-duplication scope
    #[arg(long, value_enum, default_value = "run")]
    dedup: DedupArg,

    /// Verbose mode (show internal logs)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DedupArg {
    /// One seen-set spanning every reader for the whole run
    Run,
    /// An independent seen-set per reader
    Session,
}

impl From<DedupArg> for DedupScope {
    fn from(arg: DedupArg) -> Self {
        match arg {
            DedupArg::Run => DedupScope::Run,
            DedupArg::Session => DedupScope::PerSession,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RFPAD_LOG overrides; --verbose raises the default floor
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RFPAD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(false).init();

    let timeout = Duration::from_millis(cli.timeout_ms);
    let readers: Vec<Reader> = cli
        .device
        .iter()
        .map(|&selector| Reader::new(selector).with_timeout(timeout))
        .collect();

    let mut poller = Poller::new(readers)
        .with_interval(Duration::from_millis(cli.interval_ms))
        .with_dedup_scope(cli.dedup.into());

    poller.open_all().await.context("Failed to open readers")?;

    // Ctrl+C trips the shutdown signal; the poller releases every
    // transport on its way out
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C, shutting down...");
            let _ = stop_tx.send(true);
        }
    });

    let format = cli.format;
    let mut sink = move |device: &DeviceSelector, tag: &Tag| {
        println!("{}", render(format, device, tag));
    };

    poller
        .run(&mut sink, stop_rx)
        .await
        .context("Polling loop failed")?;

    Ok(())
}

fn render(format: FormatArg, device: &DeviceSelector, tag: &Tag) -> String {
    match format {
        FormatArg::Plain => format!(
            "{} type={} device={}",
            tag.id,
            hex::encode(tag.tag_type),
            device
        ),
        FormatArg::Json => serde_json::json!({
            "device": device.to_string(),
            "type": hex::encode(tag.tag_type),
            "id": tag.id.to_string(),
        })
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> (DeviceSelector, Tag) {
        (
            DeviceSelector::default(),
            Tag::new([0x00, 0x03], [0xE0, 0x04, 0x01, 0x00, 0x12, 0x34, 0x56, 0x78]),
        )
    }

    #[test]
    fn test_render_plain() {
        let (device, tag) = sample();
        assert_eq!(
            render(FormatArg::Plain, &device, &tag),
            "e004010012345678 type=0003 device=0ab1:0002"
        );
    }

    #[test]
    fn test_render_json() {
        let (device, tag) = sample();
        let value: serde_json::Value =
            serde_json::from_str(&render(FormatArg::Json, &device, &tag)).unwrap();

        assert_eq!(value["device"], "0ab1:0002");
        assert_eq!(value["type"], "0003");
        assert_eq!(value["id"], "e004010012345678");
    }

    #[test]
    fn test_cli_parses_multiple_devices() {
        let cli = Cli::parse_from([
            "rfpad-cli",
            "--device",
            "0ab1:0002",
            "--device",
            "16c0:27dd",
            "--format",
            "json",
            "--dedup",
            "session",
        ]);

        assert_eq!(cli.device.len(), 2);
        assert!(matches!(cli.format, FormatArg::Json));
        assert!(matches!(DedupScope::from(cli.dedup), DedupScope::PerSession));
    }

    #[test]
    fn test_cli_default_device() {
        let cli = Cli::parse_from(["rfpad-cli"]);
        assert_eq!(cli.device, vec![DeviceSelector::default()]);
    }
}
