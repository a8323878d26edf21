//! Headless replay of tap/scroll sequences against [`PopupPickerState`].
//!
//! One command per line:
//!
//! ```text
//! # comment
//! open
//! request-open deny        # allow | deny | none
//! scroll 2024-5-1
//! confirm
//! cancel
//! backdrop
//! close
//! set-value 2024-1-1       # or `none`
//! ```
//!
//! The harness plays the owning form: every committed change is fed back
//! as the new controlled value.

use anyhow::{
  Context,
  anyhow,
  bail
};
use popup_picker_shared::PickerValue;
use serde::Serialize;
use tracing::{
  debug,
  trace
};
use unicode_width::UnicodeWidthStr;

use crate::clock::Clock;
use crate::state::{
  PickerEffect,
  PickerSource,
  PopupPickerState
};

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum ScriptStep {
  Open,
  RequestOpen(Option<bool>),
  Scroll(PickerValue),
  Confirm,
  Cancel,
  Backdrop,
  Close,
  SetValue(Option<PickerValue>)
}

impl ScriptStep {
  fn parse_line(
    line: &str
  ) -> anyhow::Result<Option<Self>> {
    let line = line
      .split_once('#')
      .map_or(line, |(head, _)| head)
      .trim();
    if line.is_empty() {
      return Ok(None);
    }

    let (command, arg) = line
      .split_once(char::is_whitespace)
      .map_or((line, ""), |(c, a)| {
        (c, a.trim())
      });

    let step = match command {
      | "open" => Self::Open,
      | "request-open" => {
        let verdict = match arg {
          | "" | "none" => None,
          | "allow" | "true" => Some(true),
          | "deny" | "false" => {
            Some(false)
          }
          | other => {
            bail!(
              "request-open expects \
               allow|deny|none, got \
               {other:?}"
            )
          }
        };
        Self::RequestOpen(verdict)
      }
      | "scroll" => {
        if arg.is_empty() {
          bail!("scroll needs a value");
        }
        Self::Scroll(
          PickerValue::parse_loose(arg)
        )
      }
      | "confirm" => Self::Confirm,
      | "cancel" => Self::Cancel,
      | "backdrop" => Self::Backdrop,
      | "close" => Self::Close,
      | "set-value" => {
        match arg {
          | "" => {
            bail!(
              "set-value needs a value or \
               `none`"
            )
          }
          | "none" => Self::SetValue(None),
          | raw => {
            Self::SetValue(Some(
              PickerValue::parse_loose(raw)
            ))
          }
        }
      }
      | other => {
        return Err(anyhow!(
          "unknown command {other:?}"
        ));
      }
    };
    Ok(Some(step))
  }

  #[must_use]
  pub fn label(&self) -> String {
    match self {
      | Self::Open => "open".to_string(),
      | Self::RequestOpen(verdict) => {
        let verdict = match verdict {
          | Some(true) => "allow",
          | Some(false) => "deny",
          | None => "none"
        };
        format!("request-open {verdict}")
      }
      | Self::Scroll(value) => {
        format!("scroll {value}")
      }
      | Self::Confirm => {
        "confirm".to_string()
      }
      | Self::Cancel => "cancel".to_string(),
      | Self::Backdrop => {
        "backdrop".to_string()
      }
      | Self::Close => "close".to_string(),
      | Self::SetValue(Some(value)) => {
        format!("set-value {value}")
      }
      | Self::SetValue(None) => {
        "set-value none".to_string()
      }
    }
  }
}

pub fn parse_script(
  raw: &str
) -> anyhow::Result<Vec<ScriptStep>> {
  let mut steps = Vec::new();
  for (idx, line) in raw.lines().enumerate()
  {
    if let Some(step) =
      ScriptStep::parse_line(line)
        .with_context(|| {
          format!("script line {}", idx + 1)
        })?
    {
      steps.push(step);
    }
  }
  debug!(
    steps = steps.len(),
    "parsed picker script"
  );
  Ok(steps)
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct TranscriptEntry {
  pub step:    usize,
  pub action:  String,
  pub is_open: bool,
  pub pending: PickerValue,
  pub effects: Vec<PickerEffect>
}

pub fn replay(
  source: PickerSource,
  steps: &[ScriptStep],
  clock: &impl Clock
) -> Vec<TranscriptEntry> {
  let mut state =
    PopupPickerState::new(source, clock);
  let mut transcript =
    Vec::with_capacity(steps.len());

  for (idx, step) in steps.iter().enumerate()
  {
    let mut effects = Vec::new();
    match step {
      | ScriptStep::Open => state.open(),
      | ScriptStep::RequestOpen(verdict) => {
        state.request_open(*verdict);
      }
      | ScriptStep::Scroll(value) => {
        effects
          .push(state.scroll(value.clone()));
      }
      | ScriptStep::Confirm => {
        let effect = state.confirm();
        if let PickerEffect::Change(value) =
          &effect
        {
          let mut next =
            state.source().clone();
          next.value = Some(value.clone());
          state.sync_source(next);
        }
        effects.push(effect);
      }
      | ScriptStep::Cancel
      | ScriptStep::Backdrop => {
        state.cancel(clock);
      }
      | ScriptStep::Close => state.close(),
      | ScriptStep::SetValue(value) => {
        let mut next = state.source().clone();
        next.value = value.clone();
        state.sync_source(next);
      }
    }

    trace!(
      step = idx + 1,
      action = %step.label(),
      open = state.is_open(),
      "replayed script step"
    );
    transcript.push(TranscriptEntry {
      step: idx + 1,
      action: step.label(),
      is_open: state.is_open(),
      pending: state.pending().clone(),
      effects
    });
  }

  transcript
}

/// Plain-text transcript, one row per step.
#[must_use]
pub fn render_transcript(
  entries: &[TranscriptEntry]
) -> String {
  let width = entries
    .iter()
    .map(|entry| {
      UnicodeWidthStr::width(
        entry.action.as_str()
      )
    })
    .max()
    .unwrap_or(0);

  let mut out = String::new();
  for entry in entries {
    let effects = entry
      .effects
      .iter()
      .map(|effect| match effect {
        | PickerEffect::Change(value) => {
          format!("on_change({value})")
        }
        | PickerEffect::Select(value) => {
          format!("on_select({value})")
        }
      })
      .collect::<Vec<_>>()
      .join(" ");
    let pad = width.saturating_sub(
      UnicodeWidthStr::width(
        entry.action.as_str()
      )
    );
    let line = format!(
      "{:>3}  {}{}  open={:<5}  \
       pending={}  {}",
      entry.step,
      entry.action,
      " ".repeat(pad),
      entry.is_open,
      entry.pending,
      effects
    );
    out.push_str(line.trim_end());
    out.push('\n');
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_commands_comments_and_blanks() {
    let steps = parse_script(
      "# warm up\n\nrequest-open deny\n\
       scroll 2024-5-1  # pick\nset-value \
       none\nbackdrop\n"
    )
    .expect("parse script");

    assert_eq!(
      steps,
      vec![
        ScriptStep::RequestOpen(Some(false)),
        ScriptStep::Scroll("2024-5-1".into()),
        ScriptStep::SetValue(None),
        ScriptStep::Backdrop,
      ]
    );
  }

  #[test]
  fn render_aligns_wide_glyph_actions() {
    let entry =
      |step: usize, action: &str| {
        TranscriptEntry {
          step,
          action: action.to_string(),
          is_open: true,
          pending: "9:5".into(),
          effects: vec![]
        }
      };
    let rendered = render_transcript(&[
      entry(1, "scroll 9时"),
      entry(2, "open"),
    ]);
    let lines: Vec<&str> =
      rendered.lines().collect();
    assert_eq!(
      lines[0],
      "  1  scroll 9时  open=true   \
       pending=9:5"
    );
    assert_eq!(
      lines[1],
      "  2  open        open=true   \
       pending=9:5"
    );
  }

  #[test]
  fn errors_name_the_offending_line() {
    let err =
      parse_script("open\nwiggle 3\n")
        .expect_err("unknown command");
    let message = format!("{err:#}");
    assert!(message.contains("script line 2"));
    assert!(message.contains("wiggle"));
  }

  #[cfg(feature = "cli")]
  #[test]
  fn json_transcript_tags_effects() {
    let json = serde_json::to_value(
      replay(
        PickerSource {
          value: Some("9:5".into()),
          mode:  popup_picker_shared::PickerMode::Time,
          range: vec![]
        },
        &parse_script("open\nscroll 9:6\nconfirm\n")
          .expect("parse script"),
        &crate::clock::SystemClock
      )
    )
    .expect("encode transcript");

    assert_eq!(
      json[1]["effects"][0],
      serde_json::json!({
        "kind": "select",
        "value": "9:6"
      })
    );
    assert_eq!(
      json[2]["effects"][0]["kind"],
      "change"
    );
    assert_eq!(json[2]["is_open"], false);
  }

  #[test]
  fn render_lists_effects_per_row() {
    let rendered =
      render_transcript(&[TranscriptEntry {
        step:    1,
        action:  "confirm".to_string(),
        is_open: false,
        pending: "9:30".into(),
        effects: vec![PickerEffect::Change(
          "9:30".into()
        )]
      }]);
    assert_eq!(
      rendered,
      "  1  confirm  open=false  \
       pending=9:30  on_change(9:30)\n"
    );
  }
}
