use crate::{civil, error::Error};

/// A day of the week.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Parses a three letter day name as it appears in the rule database,
    /// e.g., `Sun` in `lastSun` or `Sun>=22`. Case is ignored.
    pub(crate) fn from_abbrev(s: &str) -> Option<Weekday> {
        let mut abbrev = [0u8; 3];
        let bytes = s.as_bytes();
        if bytes.len() != 3 {
            return None;
        }
        for (dst, src) in abbrev.iter_mut().zip(bytes) {
            *dst = src.to_ascii_lowercase();
        }
        Some(match &abbrev {
            b"mon" => Weekday::Monday,
            b"tue" => Weekday::Tuesday,
            b"wed" => Weekday::Wednesday,
            b"thu" => Weekday::Thursday,
            b"fri" => Weekday::Friday,
            b"sat" => Weekday::Saturday,
            b"sun" => Weekday::Sunday,
            _ => return None,
        })
    }

    /// Returns this weekday as a number in `1..=7`, where `1` is Monday.
    /// This matches [`civil::day_of_week`].
    pub fn to_monday_one(self) -> i8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }
}

/// Which clock a rule's time-of-day is expressed against.
///
/// The database writes a transition boundary like `1:00u` or `2:00s` or
/// plain `2:00`, and the suffix decides which of three clocks the `2:00`
/// means. Getting this wrong produces offsets that are wrong by exactly
/// the standard offset or the daylight saving delta, which is why the
/// three frames are kept distinct rather than collapsed into two.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeReference {
    /// The local wall clock, including any daylight saving delta already
    /// in effect. This is the default when no suffix is present, and the
    /// meaning of an explicit `w`.
    Wall,
    /// The local standard clock, excluding any daylight saving delta.
    /// Written `s`.
    Standard,
    /// Universal time. Written `u`, `g` or `z`.
    Universal,
}

/// A rule's day-of-month specification: the `ON` column.
///
/// Exactly three forms exist. Anything else in the `ON` column is a parse
/// error.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DaySpec {
    /// A fixed day of the month, e.g., `4`.
    DayOfMonth(i8),
    /// The last occurrence of a weekday in the month, e.g., `lastSun`.
    LastWeekday(Weekday),
    /// The first occurrence of a weekday on or after a day of the month,
    /// e.g., `Sun>=22`.
    WeekdayOnOrAfter {
        /// The weekday to search for.
        weekday: Weekday,
        /// The day of the month the search starts from, inclusive.
        day: i8,
    },
}

impl DaySpec {
    /// Resolves this specification to a concrete day of the month for the
    /// year and month given.
    ///
    /// A fixed day out of range for the month, or an on-or-after search
    /// that runs off the end of the month, is an error: the real database
    /// contains no such rule, so hitting one means the model is corrupt.
    /// There is deliberately no spill into the following month.
    pub fn resolve(&self, year: i16, month: i8) -> Result<i8, Error> {
        let last = civil::days_in_month(year, month);
        match *self {
            DaySpec::DayOfMonth(day) => {
                if !(1..=last).contains(&day) {
                    return Err(Error::range("day", day, 1, last));
                }
                Ok(day)
            }
            DaySpec::LastWeekday(weekday) => {
                let target = weekday.to_monday_one();
                for day in (last - 6..=last).rev() {
                    if civil::day_of_week(year, month, day) == target {
                        return Ok(day);
                    }
                }
                // Seven consecutive days always cover every weekday, so
                // this is unreachable for a well formed calendar.
                Err(err!(
                    "no {weekday:?} found in {year:04}-{month:02}",
                ))
            }
            DaySpec::WeekdayOnOrAfter { weekday, day } => {
                if !(1..=last).contains(&day) {
                    return Err(Error::range("day", day, 1, last));
                }
                let target = weekday.to_monday_one();
                for day in day..=last {
                    if civil::day_of_week(year, month, day) == target {
                        return Ok(day);
                    }
                }
                Err(err!(
                    "no {weekday:?} on or after day {day} \
                     in {year:04}-{month:02}",
                ))
            }
        }
    }
}

/// A single recurring yearly transition, i.e., one `Rule` line.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub(crate) name: String,
    pub(crate) from_year: i16,
    pub(crate) to_year: Option<i16>,
    pub(crate) month: i8,
    pub(crate) day: DaySpec,
    pub(crate) at_minute: i32,
    pub(crate) at_reference: TimeReference,
    pub(crate) save_millis: i32,
    pub(crate) letter: String,
}

impl Rule {
    /// Returns the name of the rule set this rule belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first year, inclusive, in which this rule is active.
    pub fn from_year(&self) -> i16 {
        self.from_year
    }

    /// Returns the last year, inclusive, in which this rule is active, or
    /// `None` when the rule continues indefinitely (`max` in the
    /// database).
    pub fn to_year(&self) -> Option<i16> {
        self.to_year
    }

    /// Returns the month, in `1..=12`, of this rule's transition.
    pub fn month(&self) -> i8 {
        self.month
    }

    /// Returns the day specification of this rule's transition.
    pub fn day(&self) -> &DaySpec {
        &self.day
    }

    /// Returns the minute of the day, since midnight, at which this
    /// rule's transition occurs, in the clock given by
    /// [`Rule::at_reference`].
    pub fn at_minute(&self) -> i32 {
        self.at_minute
    }

    /// Returns the clock against which [`Rule::at_minute`] is expressed.
    pub fn at_reference(&self) -> TimeReference {
        self.at_reference
    }

    /// Returns the daylight saving delta, in milliseconds, that becomes
    /// active once this rule's transition is reached. Zero marks a
    /// reversion to standard time.
    pub fn save_millis(&self) -> i32 {
        self.save_millis
    }

    /// Returns the `LETTER/S` column verbatim (`-` included). This feeds
    /// `%s` expansion in a zone's format template and plays no part in
    /// offset resolution.
    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// Returns true when this rule is active in the year given.
    pub(crate) fn applies_to(&self, year: i16) -> bool {
        self.from_year <= year && self.to_year.map_or(true, |to| year <= to)
    }

    /// Computes this rule's transition boundary for the year given, as
    /// milliseconds since the epoch *in this rule's own reference frame*.
    /// The caller must compare it against a candidate instant shifted
    /// into the same frame.
    pub(crate) fn transition_millis(&self, year: i16) -> Result<i64, Error> {
        let day = self.day.resolve(year, self.month)?;
        let date = civil::Date::new(year, self.month, day)?;
        Ok(civil::to_epoch_millis(date, self.at_minute))
    }
}

/// A named, ordered collection of rules.
///
/// The order is the order of declaration in the database, and it is load
/// bearing: when several rules of a set match the same instant, the last
/// declared match wins.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet {
    pub(crate) name: String,
    pub(crate) rules: Vec<Rule>,
}

impl RuleSet {
    pub(crate) fn new(name: &str) -> RuleSet {
        RuleSet { name: String::from(name), rules: Vec::new() }
    }

    /// Returns the name of this rule set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rules of this set, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
