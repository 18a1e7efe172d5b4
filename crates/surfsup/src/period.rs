use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

use crate::Error;

/// Dates are stored as `YYYY-MM-DD` text, so lexical order is calendar order.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value, DATE_FORMAT).map_err(|source| Error::InvalidDate {
        value: value.to_owned(),
        source,
    })
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// The "last year" window used by the precipitation and temperature observation routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    reference_date: Date,
    lookback_days: u32,
    cutoff: Date,
}

impl ReportingPeriod {
    pub fn new(reference_date: Date, lookback_days: u32) -> anyhow::Result<Self> {
        let cutoff = reference_date
            .checked_sub(Duration::days(i64::from(lookback_days)))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "lookback of {} days before {} is out of range",
                    lookback_days,
                    reference_date
                )
            })?;

        Ok(Self {
            reference_date,
            lookback_days,
            cutoff,
        })
    }

    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Earliest date (inclusive) inside the window
    pub fn cutoff(&self) -> Date {
        self.cutoff
    }
}

/// Inclusive date bounds for the temperature aggregate routes.
///
/// A range whose start falls after its end is valid and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn starting(start: Date) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}
