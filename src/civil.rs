/*!
Calendar arithmetic on the proleptic Gregorian calendar.

Everything in this module is a pure function over primitive calendar
fields. There is deliberately no general date-time API here: the parser
needs just enough to turn an `UNTIL` column into an instant, and the
resolution engine needs just enough to turn a rule's yearly transition
date into an instant and to read the year back out of a candidate
instant. Both of those reduce to the handful of primitives below.

All conversions assume 86,400,000 milliseconds per day. Leap seconds do
not exist as far as this crate is concerned.
*/

use crate::error::Error;

/// The minimum supported year.
pub const MIN_YEAR: i16 = -9999;

/// The maximum supported year.
pub const MAX_YEAR: i16 = 9999;

/// The instant `-9999-01-01T00:00:00Z` in milliseconds since the Unix
/// epoch. No smaller instant can be resolved.
pub const MIN_EPOCH_MILLIS: i64 = -377_705_116_800_000;

/// The instant `9999-12-31T23:59:59.999Z` in milliseconds since the Unix
/// epoch. No bigger instant can be resolved.
pub const MAX_EPOCH_MILLIS: i64 = 253_402_300_799_999;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Returns true if and only if the year given is a Gregorian leap year.
///
/// # Example
///
/// ```
/// assert!(tzrule::civil::is_leap_year(2024));
/// assert!(!tzrule::civil::is_leap_year(1900));
/// ```
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the month given, accounting for leap
/// years.
///
/// # Panics
///
/// When `month` is not in the range `1..=12`. Data-driven callers are
/// expected to validate the month before calling this.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => panic!("invalid month (got {month}, expected 1..=12)"),
    }
}

/// Returns the day of the week for the date given, where `1` is Monday
/// and `7` is Sunday (ISO 8601 numbering).
///
/// This is Sakamoto's closed form congruence, with floor division so
/// that years before 1 behave. No platform calendar is consulted.
///
/// # Panics
///
/// When `month` is not in `1..=12`. The day is not checked against the
/// month's length; `day_of_week(2023, 2, 31)` answers for the fictitious
/// date as the congruence extends it.
///
/// # Example
///
/// ```
/// // The Unix epoch began on a Thursday.
/// assert_eq!(tzrule::civil::day_of_week(1970, 1, 1), 4);
/// ```
pub fn day_of_week(year: i16, month: i8, day: i8) -> i8 {
    const TABLE: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    assert!((1..=12).contains(&month), "invalid month (got {month})");

    let y = i64::from(year) - i64::from(month < 3);
    let w = (y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        + TABLE[usize::from(month as u8) - 1]
        + i64::from(day))
    .rem_euclid(7);
    // The congruence numbers Sunday as 0. Shift to ISO's 1..=7.
    if w == 0 {
        7
    } else {
        w as i8
    }
}

/// A Gregorian calendar date.
///
/// This is an internal carrier for the parser and the resolution engine.
/// It promises nothing beyond its fields being in range once constructed
/// via [`Date::new`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Date {
    pub(crate) year: i16,
    pub(crate) month: i8,
    pub(crate) day: i8,
}

impl Date {
    /// Creates a new date, failing fast when any field is out of range.
    pub(crate) fn new(year: i16, month: i8, day: i8) -> Result<Date, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::range("year", year, MIN_YEAR, MAX_YEAR));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let last = days_in_month(year, month);
        if !(1..=last).contains(&day) {
            return Err(Error::range("day", day, 1, last));
        }
        Ok(Date { year, month, day })
    }

    /// Converts this date to the number of days since the Unix epoch.
    ///
    /// These are the standard chronology-compatible civil calendar
    /// conversions, via 400-year eras anchored on March 1st.
    ///
    /// Ref: <https://howardhinnant.github.io/date_algorithms.html#days_from_civil>
    pub(crate) fn to_epoch_day(self) -> i32 {
        let y = i64::from(self.year) - i64::from(self.month <= 2);
        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let mp = (i64::from(self.month) + 9) % 12;
        let doy = (153 * mp + 2) / 5 + i64::from(self.day) - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        (era * 146_097 + doe - 719_468) as i32
    }

    /// Converts days since the Unix epoch to a date.
    ///
    /// Inverse of [`Date::to_epoch_day`]; same reference.
    pub(crate) fn from_epoch_day(epoch_day: i32) -> Date {
        let z = i64::from(epoch_day) + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as i8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as i8;
        Date { year: (y + i64::from(month <= 2)) as i16, month, day }
    }
}

/// Converts a date and a minute-of-day to milliseconds since the Unix
/// epoch, with no offset applied. The caller decides which clock the
/// result is expressed in.
pub(crate) fn to_epoch_millis(date: Date, minute: i32) -> i64 {
    i64::from(date.to_epoch_day()) * MILLIS_PER_DAY
        + i64::from(minute) * 60_000
}

/// Returns the date containing the instant given, with no offset applied.
///
/// The caller is responsible for keeping the instant within
/// [`MIN_EPOCH_MILLIS`]`..=`[`MAX_EPOCH_MILLIS`] (give or take a day of
/// slack for frame shifting).
pub(crate) fn date_of_epoch_millis(millis: i64) -> Date {
    Date::from_epoch_day(millis.div_euclid(MILLIS_PER_DAY) as i32)
}
