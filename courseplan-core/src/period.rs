//! Period-to-time-of-day table.

use crate::error::{CoursePlanError, CoursePlanResult};

/// Minutes a class runs past the start of its last period.
pub const PERIOD_PADDING_MINUTES: u32 = 45;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Start of each teaching period, in minutes after midnight.
pub const DEFAULT_PERIOD_STARTS: [u32; 14] = [
    8 * 60,
    8 * 60 + 50,
    9 * 60 + 50,
    10 * 60 + 40,
    11 * 60 + 30,
    13 * 60,
    13 * 60 + 50,
    14 * 60 + 50,
    15 * 60 + 40,
    16 * 60 + 30,
    18 * 60,
    18 * 60 + 50,
    19 * 60 + 40,
    20 * 60 + 30,
];

/// Ordered start offsets of the periods of a teaching day.
///
/// Period `n` (1-based) starts at `starts[n - 1]`. A class ending in period
/// `n` ends `padding` minutes after that period starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTable {
    starts: Vec<u32>,
    padding: u32,
}

impl Default for PeriodTable {
    fn default() -> Self {
        PeriodTable {
            starts: DEFAULT_PERIOD_STARTS.to_vec(),
            padding: PERIOD_PADDING_MINUTES,
        }
    }
}

impl PeriodTable {
    /// Build a table from minute offsets. Offsets must be strictly increasing
    /// and the padding at most a day.
    pub fn new(starts: Vec<u32>, padding: u32) -> CoursePlanResult<Self> {
        if padding > MINUTES_PER_DAY {
            return Err(CoursePlanError::PeriodPadding(padding));
        }
        if let Some(i) = starts.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CoursePlanError::PeriodTableOrder(i + 2, i + 1));
        }
        Ok(PeriodTable { starts, padding })
    }

    /// Build a table from "H:MM" strings, e.g. `["8:00", "8:50"]`.
    pub fn from_times<S: AsRef<str>>(times: &[S], padding: u32) -> CoursePlanResult<Self> {
        let starts = times
            .iter()
            .map(|t| parse_time_of_day(t.as_ref()))
            .collect::<CoursePlanResult<Vec<_>>>()?;
        Self::new(starts, padding)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Start of a 1-based period, or None when it is outside the table.
    pub fn start_of(&self, period: u32) -> Option<u32> {
        let index = (period as usize).checked_sub(1)?;
        self.starts.get(index).copied()
    }

    /// End of a class whose last period is `period`.
    pub fn end_of(&self, period: u32) -> Option<u32> {
        self.start_of(period)?.checked_add(self.padding)
    }
}

/// Parse "H:MM" or "HH:MM" into minutes after midnight.
pub fn parse_time_of_day(s: &str) -> CoursePlanResult<u32> {
    let invalid = || CoursePlanError::InvalidPeriodTime(s.to_string());

    let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

/// Format minutes after midnight as "HH:MM".
pub fn format_time_of_day(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
