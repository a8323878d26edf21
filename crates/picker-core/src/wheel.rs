//! Column model behind the date/time wheel.
//!
//! The wheel shows one column per unit (year/month/day or hour/minute).
//! Scrolling a column composes a fresh value string; nothing here rejects
//! a malformed pending value, it just falls back to a usable anchor.

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
use crate::datetime::{
  days_in_month,
  format_date,
  format_time,
  parse_date_value,
  parse_time_value
};

const YEAR_SPAN_WITHOUT_RANGE: i32 = 10;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ColumnKind {
  Year,
  Month,
  Day,
  Hour,
  Minute
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct WheelColumn {
  pub kind:     ColumnKind,
  pub items:    Vec<i32>,
  pub selected: usize,
  pub looped:   bool,
  pub unit:     String
}

impl WheelColumn {
  fn new(
    kind: ColumnKind,
    items: Vec<i32>,
    current: i32,
    looped: bool,
    unit: Option<&String>
  ) -> Self {
    let selected = items
      .iter()
      .position(|item| *item == current)
      .unwrap_or(0);
    Self {
      kind,
      items,
      selected,
      looped,
      unit: unit
        .cloned()
        .unwrap_or_default()
    }
  }

  #[must_use]
  pub fn label(
    &self,
    index: usize
  ) -> String {
    self.items.get(index).map_or_else(
      String::new,
      |item| format!("{item}{}", self.unit)
    )
  }

  fn index_after(
    &self,
    delta: i32
  ) -> usize {
    let len = self.items.len() as i64;
    if len == 0 {
      return 0;
    }
    let raw = self.selected as i64
      + i64::from(delta);
    let index = if self.looped {
      raw.rem_euclid(len)
    } else {
      raw.clamp(0, len - 1)
    };
    usize::try_from(index).unwrap_or(0)
  }
}

/// Inputs that shape the wheel besides the pending value.
#[derive(Debug, Clone, Copy)]
pub struct WheelOptions<'a> {
  pub mode:  PickerMode,
  pub range: &'a [PickerValue],
  pub loops: [bool; 3],
  pub units: &'a [String]
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
enum Anchor {
  Date {
    at:     NaiveDate,
    bounds: Option<(NaiveDate, NaiveDate)>
  },
  Time {
    at:     NaiveTime,
    bounds: Option<(NaiveTime, NaiveTime)>
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct WheelModel {
  anchor:  Anchor,
  columns: Vec<WheelColumn>
}

fn ordered<T: PartialOrd + Copy>(
  start: Option<T>,
  end: Option<T>
) -> Option<(T, T)> {
  match (start, end) {
    | (Some(start), Some(end))
      if start <= end =>
    {
      Some((start, end))
    }
    | _ => None
  }
}

impl WheelModel {
  #[must_use]
  pub fn build(
    pending: &PickerValue,
    options: WheelOptions<'_>,
    clock: &impl Clock
  ) -> Self {
    let range_start = options.range.first();
    let range_end = options.range.get(1);
    let now = clock.now();

    let anchor = match options.mode {
      | PickerMode::Date => {
        let bounds = ordered(
          range_start
            .and_then(parse_date_value),
          range_end
            .and_then(parse_date_value)
        );
        let at = parse_date_value(pending)
          .or_else(|| {
            range_start
              .and_then(parse_date_value)
          })
          .unwrap_or_else(|| now.date());
        Anchor::Date { at, bounds }
      }
      | PickerMode::Time => {
        let bounds = ordered(
          range_start
            .and_then(parse_time_value),
          range_end
            .and_then(parse_time_value)
        );
        let at = parse_time_value(pending)
          .or_else(|| {
            range_start
              .and_then(parse_time_value)
          })
          .unwrap_or_else(|| now.time());
        Anchor::Time { at, bounds }
      }
    };

    let columns =
      Self::columns_for(anchor, options);
    Self { anchor, columns }
  }

  fn columns_for(
    anchor: Anchor,
    options: WheelOptions<'_>
  ) -> Vec<WheelColumn> {
    let unit =
      |index: usize| options.units.get(index);
    match anchor {
      | Anchor::Date { at, bounds } => {
        let years: Vec<i32> = match bounds {
          | Some((start, end)) => {
            (start.year()..=end.year())
              .collect()
          }
          | None => {
            (at.year() - YEAR_SPAN_WITHOUT_RANGE
              ..=at.year()
                + YEAR_SPAN_WITHOUT_RANGE)
              .collect()
          }
        };
        let month_len = days_in_month(
          at.year(),
          at.month()
        ) as i32;
        vec![
          WheelColumn::new(
            ColumnKind::Year,
            years,
            at.year(),
            options.loops[0],
            unit(0)
          ),
          WheelColumn::new(
            ColumnKind::Month,
            (1..=12).collect(),
            at.month() as i32,
            options.loops[1],
            unit(1)
          ),
          WheelColumn::new(
            ColumnKind::Day,
            (1..=month_len).collect(),
            at.day() as i32,
            options.loops[2],
            unit(2)
          ),
        ]
      }
      | Anchor::Time { at, .. } => {
        vec![
          WheelColumn::new(
            ColumnKind::Hour,
            (0..=23).collect(),
            at.hour() as i32,
            options.loops[0],
            unit(0)
          ),
          WheelColumn::new(
            ColumnKind::Minute,
            (0..=59).collect(),
            at.minute() as i32,
            options.loops[1],
            unit(1)
          ),
        ]
      }
    }
  }

  #[must_use]
  pub fn columns(&self) -> &[WheelColumn] {
    &self.columns
  }

  /// The value the wheel currently shows, normalized.
  #[must_use]
  pub fn current_value(
    &self
  ) -> PickerValue {
    self.compose(None)
  }

  /// Value after scrolling `column` by `delta` rows.
  #[must_use]
  pub fn step(
    &self,
    column: usize,
    delta: i32
  ) -> PickerValue {
    let Some(col) = self.columns.get(column)
    else {
      return self.current_value();
    };
    let index = col.index_after(delta);
    self.compose(
      col
        .items
        .get(index)
        .map(|item| (col.kind, *item))
    )
  }

  /// Value after jumping `column` straight to row `index`.
  #[must_use]
  pub fn select(
    &self,
    column: usize,
    index: usize
  ) -> PickerValue {
    let change =
      self.columns.get(column).and_then(
        |col| {
          col
            .items
            .get(index)
            .map(|item| (col.kind, *item))
        }
      );
    self.compose(change)
  }

  fn compose(
    &self,
    change: Option<(ColumnKind, i32)>
  ) -> PickerValue {
    match self.anchor {
      | Anchor::Date { at, bounds } => {
        let mut year = at.year();
        let mut month = at.month();
        let mut day = at.day();
        match change {
          | Some((ColumnKind::Year, v)) => {
            year = v;
          }
          | Some((ColumnKind::Month, v)) => {
            month = v.clamp(1, 12) as u32;
          }
          | Some((ColumnKind::Day, v)) => {
            day = v.max(1) as u32;
          }
          | _ => {}
        }
        day =
          day.min(days_in_month(year, month));
        let mut date =
          NaiveDate::from_ymd_opt(
            year, month, day
          )
          .unwrap_or(at);
        if let Some((start, end)) = bounds {
          date = date.clamp(start, end);
        }
        PickerValue::Text(format_date(date))
      }
      | Anchor::Time { at, bounds } => {
        let mut hour = at.hour();
        let mut minute = at.minute();
        match change {
          | Some((ColumnKind::Hour, v)) => {
            hour = v.clamp(0, 23) as u32;
          }
          | Some((ColumnKind::Minute, v)) => {
            minute = v.clamp(0, 59) as u32;
          }
          | _ => {}
        }
        let mut time =
          NaiveTime::from_hms_opt(
            hour, minute, 0
          )
          .unwrap_or(at);
        if let Some((start, end)) = bounds {
          time = time.clamp(start, end);
        }
        PickerValue::Text(format_time(time))
      }
    }
  }
}
