use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::Context;
use popup_picker_shared::PickerMode;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::header::HeaderDefaults;

pub const CONFIG_FILE: &str =
  "popup-picker.toml";
pub const CONFIG_ENV_VAR: &str =
  "POPUP_PICKER_CONFIG";

pub const DEFAULT_DURATION_MS: u32 = 200;
pub const DEFAULT_PICKER_HEIGHT: u32 = 150;

/// Widget defaults that hosts may override per instance through props.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(default)]
pub struct PickerConfig {
  pub duration_ms:   u32,
  pub picker_height: u32,
  pub mode:          PickerMode,
  #[serde(rename = "loop")]
  pub loop_columns:  [bool; 3],
  pub units_inline:  Vec<String>,
  pub header:        HeaderDefaults
}

impl Default for PickerConfig {
  fn default() -> Self {
    Self {
      duration_ms:   DEFAULT_DURATION_MS,
      picker_height: DEFAULT_PICKER_HEIGHT,
      mode:          PickerMode::Date,
      loop_columns:  [true; 3],
      units_inline:  vec![],
      header:        HeaderDefaults::default()
    }
  }
}

impl PickerConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    toml::from_str::<Self>(raw).context(
      "failed to parse picker config"
    )
  }

  #[tracing::instrument]
  pub fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let raw = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read picker config \
           {}",
          path.display()
        )
      })?;
    let cfg = Self::from_toml_str(&raw)
      .with_context(|| {
        format!(
          "invalid picker config {}",
          path.display()
        )
      })?;
    info!(
      file = %path.display(),
      "loaded picker config"
    );
    Ok(cfg)
  }

  /// An explicit path must load; otherwise the env var and the working
  /// directory are tried and anything unusable falls back to defaults.
  pub fn load(
    explicit: Option<&Path>
  ) -> anyhow::Result<Self> {
    if let Some(path) = explicit {
      return Self::load_file(path);
    }

    let Some(path) = discover_config_path()
    else {
      debug!(
        "no picker config location; using \
         defaults"
      );
      return Ok(Self::default());
    };

    Ok(
      load_lenient(&path)
        .unwrap_or_default()
    )
  }
}

fn discover_config_path()
-> Option<PathBuf> {
  if let Ok(raw) =
    std::env::var(CONFIG_ENV_VAR)
  {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
      return Some(PathBuf::from(trimmed));
    }
  }

  std::env::current_dir()
    .ok()
    .map(|dir| dir.join(CONFIG_FILE))
}

/// Missing or broken files are logged and yield `None`.
pub fn load_lenient(
  path: &Path
) -> Option<PickerConfig> {
  if !path.exists() {
    info!(
      file = %path.display(),
      "picker config file not found"
    );
    return None;
  }

  match PickerConfig::load_file(path) {
    | Ok(cfg) => Some(cfg),
    | Err(err) => {
      tracing::error!(
        file = %path.display(),
        error = %format!("{err:#}"),
        "ignoring picker config file"
      );
      None
    }
  }
}

/// Logs a warning when configured unit labels outnumber the columns of
/// `mode`; extras are never rendered.
pub fn warn_on_extra_units(
  cfg: &PickerConfig
) {
  let columns = match cfg.mode {
    | PickerMode::Date => 3,
    | PickerMode::Time => 2
  };
  if cfg.units_inline.len() > columns {
    warn!(
      mode = cfg.mode.as_key(),
      units = cfg.units_inline.len(),
      columns,
      "more inline units than picker \
       columns"
    );
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use tempfile::NamedTempFile;

  use super::*;

  #[test]
  fn empty_file_keeps_builtin_defaults() {
    let cfg = PickerConfig::from_toml_str("")
      .expect("parse empty config");
    assert_eq!(cfg, PickerConfig::default());
    assert_eq!(cfg.duration_ms, 200);
    assert_eq!(cfg.picker_height, 150);
    assert_eq!(cfg.loop_columns, [true; 3]);
  }

  #[test]
  fn partial_file_overrides_named_fields() {
    let cfg = PickerConfig::from_toml_str(
      r#"
duration_ms = 350
mode = "time"
loop = [false, true, true]
units_inline = ["h", "m"]

[header]
ok_text = "OK"
"#
    )
    .expect("parse config");

    assert_eq!(cfg.duration_ms, 350);
    assert_eq!(cfg.mode, PickerMode::Time);
    assert_eq!(
      cfg.loop_columns,
      [false, true, true]
    );
    assert_eq!(cfg.header.ok_text, "OK");
    assert_eq!(cfg.header.cancel_text, "取消");
    assert_eq!(cfg.picker_height, 150);
  }

  #[test]
  fn explicit_path_errors_surface() {
    let mut file = NamedTempFile::new()
      .expect("temp config");
    writeln!(file, "duration_ms = \"slow\"")
      .expect("write config");

    let err =
      PickerConfig::load(Some(file.path()))
        .expect_err("invalid config");
    assert!(
      format!("{err:#}")
        .contains("invalid picker config")
    );
  }

  #[test]
  fn lenient_loader_ignores_broken_files() {
    let mut file = NamedTempFile::new()
      .expect("temp config");
    writeln!(file, "[[[").expect("write");
    assert!(load_lenient(file.path()).is_none());

    let dir =
      tempfile::tempdir().expect("tempdir");
    assert!(
      load_lenient(&dir.path().join(
        CONFIG_FILE
      ))
      .is_none()
    );
  }

  #[test]
  fn explicit_path_loads_valid_file() {
    let mut file = NamedTempFile::new()
      .expect("temp config");
    writeln!(file, "picker_height = 220")
      .expect("write config");
    let cfg =
      PickerConfig::load(Some(file.path()))
        .expect("load config");
    assert_eq!(cfg.picker_height, 220);
  }
}
