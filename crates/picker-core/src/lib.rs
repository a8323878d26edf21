#[cfg(feature = "cli")]
pub mod cli;
pub mod clock;
pub mod config;
pub mod datetime;
pub mod header;
pub mod script;
pub mod state;
pub mod wheel;

pub use popup_picker_shared::{
  HeaderButton,
  PickerMode,
  PickerValue,
  PopupHeader
};

#[cfg(feature = "cli")]
#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<std::ffi::OsString>
) -> anyhow::Result<()> {
  use std::io::Read;

  use anyhow::Context;
  use clap::Parser;
  use tracing::{
    debug,
    info
  };

  let cli = cli::GlobalCli::parse_from(
    raw_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting popup-picker replay"
  );

  let cfg = config::PickerConfig::load(
    cli.config.as_deref()
  )?;
  config::warn_on_extra_units(&cfg);

  let source = state::PickerSource {
    value: cli.value,
    mode:  cli.mode.unwrap_or(cfg.mode),
    range: cli
      .range
      .map(|range| range.0)
      .unwrap_or_default()
  };
  debug!(?source, "resolved picker source");

  let raw = match &cli.script {
    | Some(path) => {
      std::fs::read_to_string(path)
        .with_context(|| {
          format!(
            "failed to read script {}",
            path.display()
          )
        })?
    }
    | None => {
      let mut buf = String::new();
      std::io::stdin()
        .read_to_string(&mut buf)
        .context(
          "failed to read script from \
           stdin"
        )?;
      buf
    }
  };

  let steps = script::parse_script(&raw)?;
  let transcript = script::replay(
    source,
    &steps,
    &clock::SystemClock
  );

  if cli.json {
    println!(
      "{}",
      serde_json::to_string_pretty(
        &transcript
      )
      .context(
        "failed to encode transcript"
      )?
    );
  } else {
    print!(
      "{}",
      script::render_transcript(
        &transcript
      )
    );
  }

  info!(
    steps = transcript.len(),
    "done"
  );
  Ok(())
}
