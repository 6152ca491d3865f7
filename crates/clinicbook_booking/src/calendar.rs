// --- File: crates/clinicbook_booking/src/calendar.rs ---
//! Month grid for the scheduling step.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::flow::FlowError;

/// A selectable day cell. Blank leading cells are `None` in [`MonthGrid::cells`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarDay {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2026-10-16"))]
    pub date: NaiveDate,
    pub day: u32,
    /// Strictly before today.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    #[cfg_attr(feature = "openapi", schema(example = "October 2026"))]
    pub label: String,
    pub cells: Vec<Option<CalendarDay>>,
}

/// The month currently shown. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, FlowError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| FlowError::InvalidDate(format!("{year}-{month:02}")))
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, FlowError> {
    let first = first_of_month(year, month)?;
    let next = MonthCursor { year, month }.next();
    let next_first = first_of_month(next.year, next.month)?;
    let days = next_first.signed_duration_since(first).num_days();
    u32::try_from(days).map_err(|_| FlowError::InvalidDate(format!("{year}-{month:02}")))
}

/// "October 2026".
pub fn month_label(year: i32, month: u32) -> Result<String, FlowError> {
    Ok(first_of_month(year, month)?.format("%B %Y").to_string())
}

pub fn is_past_day(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Builds the grid: one blank per weekday before the 1st (Sunday first), then
/// every day of the month. There are no trailing blanks.
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Result<MonthGrid, FlowError> {
    let first = first_of_month(year, month)?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(year, month)?;

    let mut cells: Vec<Option<CalendarDay>> = Vec::with_capacity(leading + days as usize);
    cells.resize(leading, None);
    cells.extend(first.iter_days().take(days as usize).map(|date| {
        Some(CalendarDay {
            date,
            day: date.day(),
            disabled: is_past_day(date, today),
        })
    }));

    Ok(MonthGrid {
        year,
        month,
        label: month_label(year, month)?,
        cells,
    })
}

/// Today's date at a fixed UTC offset.
pub fn today_at_offset(utc_offset_hours: i32) -> NaiveDate {
    date_at_offset(Utc::now(), utc_offset_hours)
}

pub fn date_at_offset(now: DateTime<Utc>, utc_offset_hours: i32) -> NaiveDate {
    match FixedOffset::east_opt(utc_offset_hours.saturating_mul(3600)) {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => {
            warn!(
                "UTC offset of {} hours is out of range, using UTC",
                utc_offset_hours
            );
            now.date_naive()
        }
    }
}
