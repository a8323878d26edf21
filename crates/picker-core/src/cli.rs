use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::{ArgAction, Parser};
use popup_picker_shared::{PickerMode, PickerValue};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "popup-picker",
    version,
    about = "Replay tap/scroll scripts against the popup date/time picker",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Picker mode; defaults to the configured mode.
    #[arg(long = "mode", value_parser = parse_mode)]
    pub mode: Option<PickerMode>,

    /// Initial controlled value.
    #[arg(long = "value", value_parser = parse_value)]
    pub value: Option<PickerValue>,

    /// Allowed range as START,END.
    #[arg(long = "range", value_parser = parse_range)]
    pub range: Option<RangeArg>,

    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Emit the transcript as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Script file; stdin when omitted.
    pub script: Option<PathBuf>,
}

fn parse_mode(raw: &str) -> anyhow::Result<PickerMode> {
    PickerMode::from_key(raw).ok_or_else(|| anyhow!("expected date or time, got: {raw}"))
}

fn parse_value(raw: &str) -> anyhow::Result<PickerValue> {
    if raw.trim().is_empty() {
        bail!("value must not be empty");
    }
    Ok(PickerValue::parse_loose(raw))
}

/// Parsed `--range` bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeArg(pub Vec<PickerValue>);

pub fn parse_range(raw: &str) -> anyhow::Result<RangeArg> {
    let bounds: Vec<PickerValue> = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(PickerValue::parse_loose)
        .collect();
    if bounds.len() > 2 {
        bail!("expected START,END, got {} bounds", bounds.len());
    }
    Ok(RangeArg(bounds))
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
