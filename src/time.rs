//! Clock primitives for the regulated schedules.

use std::fmt::{Debug, Display, Formatter};

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// Wall-clock minute within a day.
///
/// Regulated schedule boundaries are always whole minutes, so seconds are
/// dropped on conversion from [`NaiveTime`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[must_use]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// First minute of a day.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    pub const fn new(hour: u32, minute: u32) -> Self {
        assert!(hour < 24);
        assert!(minute < 60);
        Self { hour, minute }
    }

    pub const fn hour(self) -> u32 {
        self.hour
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    #[must_use]
    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap()
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self { hour: time.hour(), minute: time.minute() }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Debug for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Daily recurring window, start inclusive and end exclusive.
///
/// A window whose end sorts before its start wraps around midnight: it covers
/// the evening of one day and the early morning of the next. An end of `00:00`
/// is the end of the day, so such a window runs up to the next midnight.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub const fn start(self) -> TimeOfDay {
        self.start
    }

    pub const fn end(self) -> TimeOfDay {
        self.end
    }

    /// Whether the window runs over midnight into the following day.
    #[must_use]
    pub fn wraps(self) -> bool {
        self.end < self.start
    }

    #[must_use]
    pub fn contains(self, time: TimeOfDay) -> bool {
        if self.wraps() {
            !((self.end <= time) && (time < self.start))
        } else {
            (self.start <= time) && (time < self.end)
        }
    }

    /// Pins the window onto the calendar around the given timestamp.
    ///
    /// The timestamp is assumed to fall inside the window. For a wrapping
    /// window the evening half anchors the start to the timestamp's date and
    /// the end to the next day, and the small-hours half the other way round.
    pub fn anchor(self, at: NaiveDateTime) -> Interval {
        let date = at.date();
        let start = self.start.to_naive();
        let end = self.end.to_naive();
        if self.wraps() {
            if TimeOfDay::from(at.time()) >= self.start {
                Interval::new(date.and_time(start), date.succ_opt().unwrap().and_time(end))
            } else {
                Interval::new(date.pred_opt().unwrap().and_time(start), date.and_time(end))
            }
        } else {
            Interval::new(date.and_time(start), date.and_time(end))
        }
    }
}

impl Debug for TimeWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Concrete span on the calendar.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: NaiveDateTime,

    /// Exclusive.
    pub end: NaiveDateTime,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, timestamp: NaiveDateTime) -> bool {
        (self.start <= timestamp) && (timestamp < self.end)
    }
}
