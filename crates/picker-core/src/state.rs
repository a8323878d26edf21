use popup_picker_shared::{
  PickerMode,
  PickerValue
};
use serde::Serialize;
use tracing::{
  debug,
  info
};

use crate::clock::Clock;
use crate::datetime::compute_default;

/// The controlled inputs the owner passes in.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
)]
pub struct PickerSource {
  pub value: Option<PickerValue>,
  pub mode:  PickerMode,
  pub range: Vec<PickerValue>
}

impl PickerSource {
  /// Committed value, or the computed default when the owner has none.
  #[must_use]
  pub fn committed_or_default(
    &self,
    clock: &impl Clock
  ) -> PickerValue {
    self.value.clone().unwrap_or_else(
      || {
        compute_default(
          self.mode,
          &self.range,
          clock
        )
      }
    )
  }
}

/// Notifications the owner must deliver to its callbacks.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
)]
#[serde(
  tag = "kind",
  content = "value",
  rename_all = "lowercase"
)]
pub enum PickerEffect {
  /// Committed by confirm; goes to `on_change`.
  Change(PickerValue),
  /// Intermediate scroll; goes to `on_select`.
  Select(PickerValue)
}

/// Open/closed flag plus the uncommitted value shown in the wheel.
///
/// `pending` diverges from the committed value only while the popup is
/// open; every close path except [`confirm`](Self::confirm) puts it back.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct PopupPickerState {
  is_open: bool,
  pending: PickerValue,
  source:  PickerSource
}

impl PopupPickerState {
  #[must_use]
  pub fn new(
    source: PickerSource,
    clock: &impl Clock
  ) -> Self {
    let pending =
      source.committed_or_default(clock);
    debug!(
      pending = %pending,
      mode = source.mode.as_key(),
      "picker state initialized"
    );
    Self {
      is_open: false,
      pending,
      source
    }
  }

  #[must_use]
  pub fn is_open(&self) -> bool {
    self.is_open
  }

  #[must_use]
  pub fn pending(&self) -> &PickerValue {
    &self.pending
  }

  #[must_use]
  pub fn source(&self) -> &PickerSource {
    &self.source
  }

  pub fn open(&mut self) {
    self.is_open = true;
    debug!(
      pending = %self.pending,
      "picker opened"
    );
  }

  /// Opens unless the `before_show` hook answered exactly `false`.
  /// `None` means there was no hook or it gave no answer.
  pub fn request_open(
    &mut self,
    verdict: Option<bool>
  ) -> bool {
    if verdict == Some(false) {
      info!(
        "before_show vetoed opening the \
         picker"
      );
      return false;
    }
    self.open();
    true
  }

  pub fn close(&mut self) {
    self.is_open = false;
    debug!("picker closed");
  }

  /// Closes and hands back the pending value for `on_change`.
  pub fn confirm(
    &mut self
  ) -> PickerEffect {
    self.close();
    debug!(
      value = %self.pending,
      "picker value confirmed"
    );
    PickerEffect::Change(
      self.pending.clone()
    )
  }

  /// Closes and discards the pending value. Used for the cancel button
  /// and the backdrop.
  pub fn cancel(
    &mut self,
    clock: &impl Clock
  ) {
    self.close();
    self.pending = self
      .source
      .committed_or_default(clock);
    debug!(
      pending = %self.pending,
      "picker selection discarded"
    );
  }

  /// Stores the wheel's new value; the returned effect carries that same
  /// new value for `on_select`.
  pub fn scroll(
    &mut self,
    value: PickerValue
  ) -> PickerEffect {
    debug!(
      from = %self.pending,
      to = %value,
      "picker scrolled"
    );
    self.pending = value.clone();
    PickerEffect::Select(value)
  }

  /// Applies new controlled inputs. A non-empty `value` that differs from
  /// `pending` overwrites it whenever the popup is closed; while open, only
  /// a `value` that actually changed does.
  pub fn sync_source(
    &mut self,
    source: PickerSource
  ) {
    let value_changed =
      source.value != self.source.value;
    if (value_changed || !self.is_open)
      && let Some(value) = &source.value
      && *value != self.pending
    {
      debug!(
        from = %self.pending,
        to = %value,
        open = self.is_open,
        "controlled value replaced pending \
         value"
      );
      self.pending = value.clone();
    }
    self.source = source;
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::clock::FixedClock;

  fn clock() -> FixedClock {
    FixedClock(
      NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|date| {
          date.and_hms_opt(8, 30, 0)
        })
        .expect("valid clock")
    )
  }

  fn source(
    value: Option<&str>
  ) -> PickerSource {
    PickerSource {
      value: value.map(PickerValue::from),
      mode:  PickerMode::Date,
      range: vec![]
    }
  }

  #[test]
  fn open_keeps_pending_untouched() {
    let mut state = PopupPickerState::new(
      source(Some("2024-1-1")),
      &clock()
    );
    state.scroll("2024-3-3".into());
    state.open();
    assert!(state.is_open());
    assert_eq!(
      state.pending(),
      &PickerValue::from("2024-3-3")
    );
  }

  #[test]
  fn veto_only_on_explicit_false() {
    let mut state = PopupPickerState::new(
      source(None),
      &clock()
    );
    assert!(!state.request_open(Some(false)));
    assert!(!state.is_open());

    assert!(state.request_open(None));
    assert!(state.is_open());

    state.close();
    assert!(state.request_open(Some(true)));
    assert!(state.is_open());
  }

  #[test]
  fn confirm_commits_pending_and_closes() {
    let mut state = PopupPickerState::new(
      source(Some("2024-1-1")),
      &clock()
    );
    state.open();
    state.scroll("2024-2-2".into());
    let effect = state.confirm();
    assert_eq!(
      effect,
      PickerEffect::Change("2024-2-2".into())
    );
    assert!(!state.is_open());
  }

  #[test]
  fn cancel_without_value_recomputes_default(
  ) {
    let mut state = PopupPickerState::new(
      source(None),
      &clock()
    );
    state.open();
    state.scroll("2001-1-1".into());
    state.cancel(&clock());
    assert!(!state.is_open());
    assert_eq!(
      state.pending(),
      &PickerValue::from("2026-10-19")
    );
  }

  #[test]
  fn scroll_reports_new_value_and_stays_open(
  ) {
    let mut state = PopupPickerState::new(
      source(Some("2024-1-1")),
      &clock()
    );
    state.open();
    let effect =
      state.scroll("2024-1-2".into());
    assert_eq!(
      effect,
      PickerEffect::Select("2024-1-2".into())
    );
    assert!(state.is_open());
  }

  #[test]
  fn external_value_change_overrides_pending(
  ) {
    let mut state = PopupPickerState::new(
      source(Some("2024-1-1")),
      &clock()
    );
    state.open();
    state.scroll("2024-6-6".into());

    state.sync_source(source(Some(
      "2025-1-1"
    )));
    assert_eq!(
      state.pending(),
      &PickerValue::from("2025-1-1")
    );
    assert!(state.is_open());
  }

  #[test]
  fn rejected_commit_snaps_back_once_closed(
  ) {
    let mut state = PopupPickerState::new(
      source(Some("2024-1-1")),
      &clock()
    );
    state.open();
    state.scroll("2024-2-2".into());
    let _ = state.confirm();

    // Owner keeps its old value.
    state.sync_source(source(Some(
      "2024-1-1"
    )));
    assert!(!state.is_open());
    assert_eq!(
      state.pending(),
      &PickerValue::from("2024-1-1")
    );

    state.open();
    assert_eq!(
      state.pending(),
      &PickerValue::from("2024-1-1")
    );
  }

  #[test]
  fn unchanged_or_cleared_value_keeps_pending(
  ) {
    let mut state = PopupPickerState::new(
      source(Some("2024-1-1")),
      &clock()
    );
    state.open();
    state.scroll("2024-6-6".into());

    state.sync_source(source(Some(
      "2024-1-1"
    )));
    assert_eq!(
      state.pending(),
      &PickerValue::from("2024-6-6")
    );

    state.sync_source(source(None));
    assert_eq!(
      state.pending(),
      &PickerValue::from("2024-6-6")
    );
    assert_eq!(state.source().value, None);
  }
}
