use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

/// A committed or pending picker value.
///
/// Hosts hand the widget either a formatted string (`2024-5-1`,
/// `9:30`) or a raw number; both travel through the widget untouched.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(untagged)]
pub enum PickerValue {
  Number(i64),
  Text(String)
}

impl PickerValue {
  /// Reads a script/CLI token: integer literals become numbers,
  /// everything else stays text.
  #[must_use]
  pub fn parse_loose(raw: &str) -> Self {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
      | Ok(number) => Self::Number(number),
      | Err(_) => {
        Self::Text(trimmed.to_string())
      }
    }
  }

  #[must_use]
  pub fn as_text(&self) -> Option<&str> {
    match self {
      | Self::Text(text) => Some(text),
      | Self::Number(_) => None
    }
  }
}

impl fmt::Display for PickerValue {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::Number(number) => {
        write!(f, "{number}")
      }
      | Self::Text(text) => {
        f.write_str(text)
      }
    }
  }
}

impl From<&str> for PickerValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

impl From<String> for PickerValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<i64> for PickerValue {
  fn from(value: i64) -> Self {
    Self::Number(value)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PickerMode {
  #[default]
  Date,
  Time
}

impl PickerMode {
  #[must_use]
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Date => "date",
      | Self::Time => "time"
    }
  }

  #[must_use]
  pub fn from_key(
    raw: &str
  ) -> Option<Self> {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "date" => Some(Self::Date),
      | "time" => Some(Self::Time),
      | _ => None
    }
  }
}

/// One header button override. Missing fields fall back to the
/// widget defaults individually.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "camelCase")]
pub struct HeaderButton {
  #[serde(default)]
  pub text:        Option<String>,
  #[serde(default)]
  pub touch_class: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "camelCase")]
pub struct PopupHeader {
  #[serde(default)]
  pub title:      Option<String>,
  #[serde(default)]
  pub ok_btn:     Option<HeaderButton>,
  #[serde(default)]
  pub cancel_btn: Option<HeaderButton>
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picker_value_is_untagged_on_the_wire()
  {
    let text = serde_json::to_string(
      &PickerValue::from("2024-5-1")
    )
    .expect("encode text");
    assert_eq!(text, "\"2024-5-1\"");

    let number: PickerValue =
      serde_json::from_str("1714521600")
        .expect("decode number");
    assert_eq!(
      number,
      PickerValue::Number(1_714_521_600)
    );
  }

  #[test]
  fn parse_loose_prefers_integers() {
    assert_eq!(
      PickerValue::parse_loose(" 42 "),
      PickerValue::Number(42)
    );
    assert_eq!(
      PickerValue::parse_loose("9:30"),
      PickerValue::from("9:30")
    );
  }

  #[test]
  fn header_accepts_partial_camel_case_json(
  ) {
    let header: PopupHeader =
      serde_json::from_str(
        r#"{"title":"Pick a day","okBtn":{"text":"OK"}}"#
      )
      .expect("decode header");

    assert_eq!(
      header.title.as_deref(),
      Some("Pick a day")
    );
    let ok = header
      .ok_btn
      .expect("ok button present");
    assert_eq!(ok.text.as_deref(), Some("OK"));
    assert!(ok.touch_class.is_none());
    assert!(header.cancel_btn.is_none());
  }

  #[test]
  fn mode_keys_round_trip_case_insensitively(
  ) {
    assert_eq!(
      PickerMode::from_key("TIME"),
      Some(PickerMode::Time)
    );
    assert_eq!(
      PickerMode::from_key("week"),
      None
    );
    assert_eq!(
      PickerMode::default().as_key(),
      "date"
    );
  }
}
