use chrono::{
  Datelike,
  NaiveDate,
  NaiveTime,
  Timelike
};
use popup_picker_shared::{
  PickerMode,
  PickerValue
};

use crate::clock::Clock;

/// `YYYY-M-D` without zero padding.
#[must_use]
pub fn format_date(
  date: NaiveDate
) -> String {
  format!(
    "{}-{}-{}",
    date.year(),
    date.month(),
    date.day()
  )
}

/// `H:M` without zero padding.
#[must_use]
pub fn format_time(
  time: NaiveTime
) -> String {
  format!(
    "{}:{}",
    time.hour(),
    time.minute()
  )
}

/// Value the picker starts from when the owner supplies none: the first
/// range boundary if a range is given, else the current date or time.
#[must_use]
pub fn compute_default(
  mode: PickerMode,
  range: &[PickerValue],
  clock: &impl Clock
) -> PickerValue {
  if let Some(first) = range.first() {
    return first.clone();
  }

  let now = clock.now();
  let formatted = match mode {
    | PickerMode::Date => {
      format_date(now.date())
    }
    | PickerMode::Time => {
      format_time(now.time())
    }
  };
  tracing::trace!(
    mode = mode.as_key(),
    value = %formatted,
    "computed default picker value"
  );
  PickerValue::Text(formatted)
}

/// Reads `YYYY-M-D` (zero padding and `/` separators tolerated).
#[must_use]
pub fn parse_date_value(
  value: &PickerValue
) -> Option<NaiveDate> {
  let raw = value.as_text()?.trim();
  let mut parts = raw.split(['-', '/']);
  let year =
    parts.next()?.trim().parse::<i32>().ok()?;
  let month =
    parts.next()?.trim().parse::<u32>().ok()?;
  let day =
    parts.next()?.trim().parse::<u32>().ok()?;
  if parts.next().is_some() {
    return None;
  }
  NaiveDate::from_ymd_opt(year, month, day)
}

/// Reads `H:M`; a trailing `:S` is accepted and dropped.
#[must_use]
pub fn parse_time_value(
  value: &PickerValue
) -> Option<NaiveTime> {
  let raw = value.as_text()?.trim();
  let mut parts = raw.split(':');
  let hour =
    parts.next()?.trim().parse::<u32>().ok()?;
  let minute =
    parts.next()?.trim().parse::<u32>().ok()?;
  NaiveTime::from_hms_opt(hour, minute, 0)
}

#[must_use]
pub fn days_in_month(
  year: i32,
  month: u32
) -> u32 {
  let (next_year, next_month) =
    if month >= 12 {
      (year + 1, 1)
    } else {
      (year, month + 1)
    };
  NaiveDate::from_ymd_opt(
    next_year, next_month, 1
  )
  .and_then(|first| first.pred_opt())
  .map_or(31, |last| last.day())
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::clock::FixedClock;

  fn clock_at(
    y: i32,
    m: u32,
    d: u32,
    hh: u32,
    mm: u32
  ) -> FixedClock {
    FixedClock(
      NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| {
          date.and_hms_opt(hh, mm, 0)
        })
        .expect("valid fixed clock")
    )
  }

  #[test]
  fn default_is_unpadded_today_in_date_mode(
  ) {
    let clock = clock_at(2026, 3, 7, 9, 5);
    assert_eq!(
      compute_default(
        PickerMode::Date,
        &[],
        &clock
      ),
      PickerValue::from("2026-3-7")
    );
  }

  #[test]
  fn default_is_unpadded_now_in_time_mode() {
    let clock = clock_at(2026, 3, 7, 9, 5);
    assert_eq!(
      compute_default(
        PickerMode::Time,
        &[],
        &clock
      ),
      PickerValue::from("9:5")
    );
  }

  #[test]
  fn range_start_wins_over_clock() {
    let clock = clock_at(2026, 3, 7, 9, 5);
    let range = vec![
      PickerValue::from("2020-1-1"),
      PickerValue::from("2030-12-31"),
    ];
    for mode in
      [PickerMode::Date, PickerMode::Time]
    {
      assert_eq!(
        compute_default(mode, &range, &clock),
        PickerValue::from("2020-1-1")
      );
    }
  }

  #[test]
  fn parses_padded_and_unpadded_dates() {
    let expected =
      NaiveDate::from_ymd_opt(2024, 5, 1);
    assert_eq!(
      parse_date_value(&"2024-5-1".into()),
      expected
    );
    assert_eq!(
      parse_date_value(&"2024/05/01".into()),
      expected
    );
    assert_eq!(
      parse_date_value(&"2024-13-1".into()),
      None
    );
    assert_eq!(
      parse_date_value(&PickerValue::Number(
        20_240_501
      )),
      None
    );
  }

  #[test]
  fn parses_times_and_ignores_seconds() {
    let parsed =
      parse_time_value(&"7:45:30".into())
        .expect("parse time");
    assert_eq!(format_time(parsed), "7:45");
    assert!(
      parse_time_value(&"25:00".into())
        .is_none()
    );
  }

  #[test]
  fn february_length_tracks_leap_years() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2023, 2), 28);
    assert_eq!(days_in_month(2023, 12), 31);
    assert_eq!(days_in_month(2023, 4), 30);
  }
}
