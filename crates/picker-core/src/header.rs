use popup_picker_shared::{
  HeaderButton,
  PopupHeader
};
use serde::{
  Deserialize,
  Serialize
};

pub const DEFAULT_OK_TEXT: &str = "确定";
pub const DEFAULT_CANCEL_TEXT: &str =
  "取消";
pub const DEFAULT_BUTTON_TOUCH_CLASS:
  &str = "popup-picker-btn-touch";

/// Built-in header texts, overridable from the config file.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(default)]
pub struct HeaderDefaults {
  pub title:              String,
  pub ok_text:            String,
  pub ok_touch_class:     String,
  pub cancel_text:        String,
  pub cancel_touch_class: String
}

impl Default for HeaderDefaults {
  fn default() -> Self {
    Self {
      title:              String::new(),
      ok_text:            DEFAULT_OK_TEXT
        .to_string(),
      ok_touch_class:
        DEFAULT_BUTTON_TOUCH_CLASS
          .to_string(),
      cancel_text:
        DEFAULT_CANCEL_TEXT.to_string(),
      cancel_touch_class:
        DEFAULT_BUTTON_TOUCH_CLASS
          .to_string()
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ResolvedButton {
  pub text:        String,
  pub touch_class: String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ResolvedHeader {
  pub title:  String,
  pub ok:     ResolvedButton,
  pub cancel: ResolvedButton
}

fn resolve_button(
  overrides: Option<&HeaderButton>,
  text: &str,
  touch_class: &str
) -> ResolvedButton {
  ResolvedButton {
    text:        overrides
      .and_then(|btn| btn.text.clone())
      .unwrap_or_else(|| {
        text.to_string()
      }),
    touch_class: overrides
      .and_then(|btn| {
        btn.touch_class.clone()
      })
      .unwrap_or_else(|| {
        touch_class.to_string()
      })
  }
}

/// Merges a partial header over the defaults field by field.
#[must_use]
pub fn resolve_header(
  overrides: Option<&PopupHeader>,
  defaults: &HeaderDefaults
) -> ResolvedHeader {
  ResolvedHeader {
    title:  overrides
      .and_then(|header| {
        header.title.clone()
      })
      .unwrap_or_else(|| {
        defaults.title.clone()
      }),
    ok:     resolve_button(
      overrides.and_then(|header| {
        header.ok_btn.as_ref()
      }),
      &defaults.ok_text,
      &defaults.ok_touch_class
    ),
    cancel: resolve_button(
      overrides.and_then(|header| {
        header.cancel_btn.as_ref()
      }),
      &defaults.cancel_text,
      &defaults.cancel_touch_class
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_overrides_yields_builtin_labels() {
    let resolved = resolve_header(
      None,
      &HeaderDefaults::default()
    );
    assert_eq!(resolved.title, "");
    assert_eq!(resolved.ok.text, "确定");
    assert_eq!(resolved.cancel.text, "取消");
    assert_eq!(
      resolved.ok.touch_class,
      DEFAULT_BUTTON_TOUCH_CLASS
    );
  }

  #[test]
  fn overrides_merge_field_by_field() {
    let header = PopupHeader {
      title:      Some(
        "Delivery date".to_string()
      ),
      ok_btn:     Some(HeaderButton {
        text:        None,
        touch_class: Some(
          "ok-pressed".to_string()
        )
      }),
      cancel_btn: Some(HeaderButton {
        text:        Some(
          "Back".to_string()
        ),
        touch_class: None
      })
    };

    let resolved = resolve_header(
      Some(&header),
      &HeaderDefaults::default()
    );

    assert_eq!(
      resolved.title,
      "Delivery date"
    );
    assert_eq!(resolved.ok.text, "确定");
    assert_eq!(
      resolved.ok.touch_class,
      "ok-pressed"
    );
    assert_eq!(resolved.cancel.text, "Back");
    assert_eq!(
      resolved.cancel.touch_class,
      DEFAULT_BUTTON_TOUCH_CLASS
    );
  }
}
