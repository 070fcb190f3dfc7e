//! Wall-clock sources used by the engine.

use chrono::{Local, NaiveDate, NaiveTime};

/// Source of the real date and time of day.
///
/// The engine only reads [`Clock::today`] to seed the simulated date and
/// [`Clock::time_of_day`] to gate self check-in.
pub trait Clock {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
    /// Current local time of day.
    fn time_of_day(&self) -> NaiveTime;
}

/// Clock backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// Date reported by [`Clock::today`].
    pub date: NaiveDate,
    /// Time reported by [`Clock::time_of_day`].
    pub time: NaiveTime,
}

impl FixedClock {
    /// Freeze the clock at `date` / `time`.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn time_of_day(&self) -> NaiveTime {
        self.time
    }
}
