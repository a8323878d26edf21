use chrono::{
  Local,
  NaiveDateTime
};

/// Source of "now" for default values.
pub trait Clock {
  fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
  fn now(&self) -> NaiveDateTime {
    (**self).now()
  }
}

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime {
    Local::now().naive_local()
  }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
  fn now(&self) -> NaiveDateTime {
    self.0
  }
}
