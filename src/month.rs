//! Resolves the `month` query parameter into the half-open range of sale
//! dates that the month-scoped endpoints filter on.

use time::{Date, Month, OffsetDateTime, Time};
use time_tz::{OffsetDateTimeExt, PrimitiveDateTimeExt, Tz};

use crate::{Error, timezone::get_timezone};

/// A half-open range of date times, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first instant in the range.
    pub start: OffsetDateTime,
    /// The first instant after the range.
    pub end: OffsetDateTime,
}

impl DateRange {
    /// Whether `date_time` lies within the range.
    pub fn contains(&self, date_time: OffsetDateTime) -> bool {
        self.start <= date_time && date_time < self.end
    }
}

/// Parse an English month name, e.g. "March".
///
/// Only the capitalised full names are recognised. Anything else, including
/// a missing parameter, returns `None`.
pub fn parse_month(name: Option<&str>) -> Option<Month> {
    let month = match name? {
        "January" => Month::January,
        "February" => Month::February,
        "March" => Month::March,
        "April" => Month::April,
        "May" => Month::May,
        "June" => Month::June,
        "July" => Month::July,
        "August" => Month::August,
        "September" => Month::September,
        "October" => Month::October,
        "November" => Month::November,
        "December" => Month::December,
        _ => return None,
    };

    Some(month)
}

/// The range spanning `month` of `year` in `timezone`, from local midnight on
/// the first of the month up to local midnight on the first of the following
/// month.
///
/// Each end takes the UTC offset in force on its own date, so a month that
/// crosses a daylight saving change is an hour shorter or longer.
///
/// # Errors
/// Returns [Error::InvalidDate] if `year` (or the year after it, for December)
/// is outside the range supported by [time].
pub fn month_date_range(month: Month, year: i32, timezone: &Tz) -> Result<DateRange, Error> {
    let start = Date::from_calendar_date(year, month, 1)?;
    let end_year = if month == Month::December {
        year + 1
    } else {
        year
    };
    let end = Date::from_calendar_date(end_year, month.next(), 1)?;

    Ok(DateRange {
        start: local_midnight(start, timezone),
        end: local_midnight(end, timezone),
    })
}

fn local_midnight(date: Date, timezone: &Tz) -> OffsetDateTime {
    let midnight = date.with_time(Time::MIDNIGHT);

    // Midnight can be ambiguous or skipped around a DST change. A skipped
    // midnight takes the offset in force at that instant in UTC.
    midnight
        .assume_timezone(timezone)
        .take_first()
        .unwrap_or_else(|| midnight.assume_timezone_utc(timezone))
}

/// Resolve the raw `month` query parameter into a date range within the
/// current year of `local_timezone`.
///
/// Returns `Ok(None)` when the month is missing or not a month name. Callers
/// treat that as a filter that matches no records.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a
/// canonical timezone name.
pub(crate) fn resolve_month(
    month: Option<&str>,
    local_timezone: &str,
) -> Result<Option<DateRange>, Error> {
    let Some(parsed_month) = parse_month(month) else {
        tracing::warn!("unrecognised month {month:?}, no transactions will match");
        return Ok(None);
    };

    let timezone = get_timezone(local_timezone)?;
    let year = OffsetDateTime::now_utc().to_timezone(timezone).year();

    month_date_range(parsed_month, year, timezone).map(Some)
}
