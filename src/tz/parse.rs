/*!
A parser for the textual IANA time zone rule database.

The input is line oriented. `Rule` lines each produce one [`Rule`].
`Zone` lines open a zone whose continuation lines each add one
[`ZoneOffsetPeriod`], until a period with no `UNTIL` column closes the
zone. `Link` lines and comments are ignored.

The database is big, old and heterogeneous, so the parser never gives up
on the whole input because of one bad line: a line that fails to parse is
skipped and reported as a [`Diagnostic`] with its line number, and
ingestion continues.
*/

use std::collections::BTreeMap;

use crate::{
    civil,
    error::Error,
    tz::{
        db::{Database, Parsed},
        rule::{DaySpec, Rule, RuleSet, TimeReference, Weekday},
        zone::{RuleRef, Zone, ZoneOffsetPeriod},
    },
};

/// A single skipped line of database text, with the reason it was
/// skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub(crate) line: usize,
    pub(crate) message: String,
}

impl Diagnostic {
    /// Returns the 1-based line number, within the text blob it came
    /// from, of the line this diagnostic is about.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns a human readable description of why the line was skipped.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Parses one database text blob. Called via [`Database::parse`].
pub(crate) fn parse(text: &str) -> Parsed {
    Parser {
        zones: BTreeMap::new(),
        rule_sets: BTreeMap::new(),
        diagnostics: Vec::new(),
        pending: None,
        line_number: 0,
    }
    .parse(text)
}

/// An in-progress zone: its name and the periods collected so far.
struct PendingZone {
    name: String,
    periods: Vec<ZoneOffsetPeriod>,
}

struct Parser {
    zones: BTreeMap<String, Zone>,
    rule_sets: BTreeMap<String, RuleSet>,
    diagnostics: Vec<Diagnostic>,
    pending: Option<PendingZone>,
    line_number: usize,
}

impl Parser {
    fn parse(mut self, text: &str) -> Parsed {
        for (i, raw) in text.lines().enumerate() {
            self.line_number = i + 1;
            self.line(raw);
        }
        if let Some(pending) = self.pending.take() {
            // The text ran out mid-zone. Keep what we have, but say so:
            // the zone's last period has an UNTIL, which means no period
            // covers the present.
            self.report(err!(
                "zone `{}` has no terminating period without an UNTIL \
                 column",
                pending.name,
            ));
            self.finish_zone(pending);
        }
        Parsed {
            database: Database::from_parts(self.zones, self.rule_sets),
            diagnostics: self.diagnostics,
        }
    }

    fn line(&mut self, raw: &str) {
        // Everything from the first `#` on is commentary, whether the
        // line is all comment or a rule with a trailing remark.
        let line = match raw.find('#') {
            Some(at) => &raw[..at],
            None => raw,
        };
        if self.pending.is_some() {
            if line.trim().is_empty() {
                // A zone is only still pending when every period so far
                // had an UNTIL, so ending it here leaves no period
                // covering the present.
                let pending = self.pending.take().unwrap();
                self.report(err!(
                    "zone `{}` has no terminating period without an UNTIL \
                     column",
                    pending.name,
                ));
                self.finish_zone(pending);
                return;
            }
            if line.starts_with("Zone") {
                // A new zone opening while the previous one never reached
                // its unbounded period.
                let pending = self.pending.take().unwrap();
                self.report(err!(
                    "zone `{}` has no terminating period without an UNTIL \
                     column",
                    pending.name,
                ));
                self.finish_zone(pending);
                self.zone_line(line);
                return;
            }
            match parse_period(&fields(line)) {
                Ok(period) => self.push_period(period),
                Err(err) => self.report(err.context(err!(
                    "failed to parse zone continuation line",
                ))),
            }
            return;
        }
        if line.trim().is_empty() {
            return;
        }
        if line.starts_with("Rule") {
            match parse_rule_line(line) {
                Ok(rule) => {
                    self.rule_sets
                        .entry(rule.name.clone())
                        .or_insert_with(|| RuleSet::new(&rule.name))
                        .rules
                        .push(rule);
                }
                Err(err) => self
                    .report(err.context(err!("failed to parse Rule line"))),
            }
        } else if line.starts_with("Zone") {
            self.zone_line(line);
        } else if line.starts_with("Link") {
            trace!(
                "ignoring Link line {} (links are not supported)",
                self.line_number,
            );
        } else {
            self.report(err!("unrecognized line"));
        }
    }

    fn zone_line(&mut self, line: &str) {
        let fields = fields(line);
        if fields.len() < 5 {
            self.report(err!(
                "failed to parse Zone line: expected at least 5 fields, \
                 got {}",
                fields.len(),
            ));
            return;
        }
        let name = fields[1];
        match parse_period(&fields[2..]) {
            Ok(period) => {
                self.pending = Some(PendingZone {
                    name: String::from(name),
                    periods: Vec::new(),
                });
                self.push_period(period);
            }
            Err(err) => self.report(
                err.context(err!("failed to parse Zone line for `{name}`")),
            ),
        }
    }

    /// Adds a period to the pending zone. A period with no UNTIL is the
    /// zone's last; it closes the zone on the spot.
    fn push_period(&mut self, period: ZoneOffsetPeriod) {
        let done = period.until_millis.is_none();
        let pending = self.pending.as_mut().expect("a zone is pending");
        pending.periods.push(period);
        if done {
            let pending = self.pending.take().unwrap();
            self.finish_zone(pending);
        }
    }

    fn finish_zone(&mut self, pending: PendingZone) {
        let PendingZone { name, periods } = pending;
        debug!(
            "loaded zone `{name}` with {count} periods",
            count = periods.len(),
        );
        let zone = Zone::new(name.clone(), periods);
        if self.zones.insert(name.clone(), zone).is_some() {
            debug!("replacing earlier definition of zone `{name}`");
        }
    }

    fn report(&mut self, err: Error) {
        warn!("skipping line {}: {err}", self.line_number);
        self.diagnostics.push(Diagnostic {
            line: self.line_number,
            message: err.to_string(),
        });
    }
}

fn fields(line: &str) -> Vec<&str> {
    line.split_ascii_whitespace().collect()
}

/// Parses one `Rule` line into a [`Rule`].
///
/// The columns are: `Rule NAME FROM TO TYPE IN ON AT SAVE LETTER/S`. The
/// deprecated `TYPE` column must be `-`.
fn parse_rule_line(line: &str) -> Result<Rule, Error> {
    let fields = fields(line);
    if fields.len() != 10 {
        return Err(err!(
            "expected 10 whitespace separated fields, got {}",
            fields.len(),
        ));
    }
    let name = fields[1];
    let from_year = parse_from_year(fields[2])?;
    let to_year = match fields[3] {
        "only" => Some(from_year),
        "max" => None,
        to => {
            let to = parse_year(to)
                .map_err(|e| e.context(err!("failed to parse TO year")))?;
            if to < from_year {
                return Err(err!(
                    "TO year {to} precedes FROM year {from_year}",
                ));
            }
            Some(to)
        }
    };
    if fields[4] != "-" {
        return Err(err!(
            "unsupported value `{}` in deprecated TYPE column",
            fields[4],
        ));
    }
    let month = parse_month(fields[5])?;
    let day = parse_day_spec(fields[6])?;
    let (at_minute, at_reference) = parse_day_time(fields[7])
        .map_err(|e| e.context(err!("failed to parse AT column")))?;
    let save_millis = parse_offset_seconds(fields[8])
        .map_err(|e| e.context(err!("failed to parse SAVE column")))?
        * 1_000;
    Ok(Rule {
        name: String::from(name),
        from_year,
        to_year,
        month,
        day,
        at_minute,
        at_reference,
        save_millis,
        letter: String::from(fields[9]),
    })
}

/// Parses one zone period: `STDOFF RULES FORMAT [UNTIL...]`.
fn parse_period(fields: &[&str]) -> Result<ZoneOffsetPeriod, Error> {
    if fields.len() < 3 {
        return Err(err!(
            "expected at least 3 fields in a zone period, got {}",
            fields.len(),
        ));
    }
    let std_offset_millis = parse_offset_seconds(fields[0])
        .map_err(|e| e.context(err!("failed to parse STDOFF column")))?
        * 1_000;
    let rules = parse_rule_ref(fields[1])?;
    let format = String::from(fields[2]);
    let until_millis = if fields.len() > 3 {
        Some(
            parse_until(&fields[3..])
                .map_err(|e| e.context(err!("failed to parse UNTIL date")))?,
        )
    } else {
        None
    };
    Ok(ZoneOffsetPeriod::new(std_offset_millis, rules, format, until_millis))
}

/// Classifies a `RULES` column: `-`, a literal save amount, or the name
/// of a rule set.
fn parse_rule_ref(field: &str) -> Result<RuleRef, Error> {
    if field == "-" {
        return Ok(RuleRef::None);
    }
    let numeric = match field.as_bytes() {
        [b'-' | b'+', second, ..] => second.is_ascii_digit(),
        [first, ..] => first.is_ascii_digit(),
        [] => false,
    };
    if numeric {
        let save = parse_offset_seconds(field).map_err(|e| {
            e.context(err!("failed to parse literal save in RULES column"))
        })?;
        return Ok(RuleRef::Fixed(save * 1_000));
    }
    Ok(RuleRef::Named(String::from(field)))
}

/// Parses an `UNTIL` tail: `YEAR [MONTH [DAY [TIME]]]`.
///
/// The day may be any of the three day-spec forms, since real UNTIL
/// columns use `lastSun` and `Sun>=1` freely. The time may carry a
/// reference suffix, but the resulting instant is resolved as UTC
/// regardless: callers needing exactness for wall or standard UNTIL
/// boundaries must shift by the zone's offsets themselves.
fn parse_until(fields: &[&str]) -> Result<i64, Error> {
    if fields.len() > 4 {
        return Err(err!(
            "expected at most 4 fields in an UNTIL date, got {}",
            fields.len(),
        ));
    }
    let year = parse_year(fields[0])?;
    let month = match fields.get(1) {
        None => 1,
        Some(field) => parse_month(field)?,
    };
    let day = match fields.get(2) {
        None => 1,
        Some(field) => parse_day_spec(field)?.resolve(year, month)?,
    };
    let minute = match fields.get(3) {
        None => 0,
        Some(field) => parse_day_time(field)?.0,
    };
    let date = civil::Date::new(year, month, day)?;
    Ok(civil::to_epoch_millis(date, minute))
}

fn parse_year(field: &str) -> Result<i16, Error> {
    let year: i16 = field
        .parse()
        .map_err(|_| err!("failed to parse `{field}` as a year"))?;
    if !(civil::MIN_YEAR..=civil::MAX_YEAR).contains(&year) {
        return Err(Error::range(
            "year",
            year,
            civil::MIN_YEAR,
            civil::MAX_YEAR,
        ));
    }
    Ok(year)
}

fn parse_from_year(field: &str) -> Result<i16, Error> {
    if field == "min" {
        return Ok(civil::MIN_YEAR);
    }
    parse_year(field)
        .map_err(|e| e.context(err!("failed to parse FROM year")))
}

/// Parses a three-or-more letter month name, e.g., `Jan` or `January`.
/// Only the first three letters decide.
fn parse_month(field: &str) -> Result<i8, Error> {
    const MONTHS: [&[u8; 3]; 12] = [
        b"jan", b"feb", b"mar", b"apr", b"may", b"jun", b"jul", b"aug",
        b"sep", b"oct", b"nov", b"dec",
    ];
    let bytes = field.as_bytes();
    if bytes.len() >= 3 {
        let abbrev = [
            bytes[0].to_ascii_lowercase(),
            bytes[1].to_ascii_lowercase(),
            bytes[2].to_ascii_lowercase(),
        ];
        for (i, month) in MONTHS.iter().enumerate() {
            if **month == abbrev {
                return Ok((i + 1) as i8);
            }
        }
    }
    Err(err!("failed to parse `{field}` as a month name"))
}

/// Parses an `ON` column day specification. Exactly three forms are
/// recognized: a bare day of the month, `last<Www>` and `<Www>>=<n>`.
fn parse_day_spec(field: &str) -> Result<DaySpec, Error> {
    if field.bytes().all(|b| b.is_ascii_digit()) && !field.is_empty() {
        let day: i8 = field
            .parse()
            .map_err(|_| err!("failed to parse `{field}` as a day"))?;
        if !(1..=31).contains(&day) {
            return Err(Error::range("day", day, 1, 31));
        }
        return Ok(DaySpec::DayOfMonth(day));
    }
    if let Some(rest) = field.strip_prefix("last") {
        let weekday = Weekday::from_abbrev(rest).ok_or_else(|| {
            err!("failed to parse `{rest}` as a weekday in `{field}`")
        })?;
        return Ok(DaySpec::LastWeekday(weekday));
    }
    if let Some((name, day)) = field.split_once(">=") {
        let weekday = Weekday::from_abbrev(name).ok_or_else(|| {
            err!("failed to parse `{name}` as a weekday in `{field}`")
        })?;
        let day: i8 = day
            .parse()
            .map_err(|_| err!("failed to parse `{day}` as a day"))?;
        if !(1..=31).contains(&day) {
            return Err(Error::range("day", day, 1, 31));
        }
        return Ok(DaySpec::WeekdayOnOrAfter { weekday, day });
    }
    if field.contains("<=") {
        return Err(err!(
            "unsupported `<=` day specification `{field}`",
        ));
    }
    Err(err!("unrecognized day specification `{field}`"))
}

/// Parses a time-of-day with an optional reference suffix, e.g., `2:00s`
/// or `1:00u` or `23:00`, to minutes since midnight plus the clock the
/// value is expressed in. No suffix means the wall clock.
///
/// Seconds are accepted and truncated: no rule in the supported
/// databases transitions on a sub-minute boundary.
fn parse_day_time(field: &str) -> Result<(i32, TimeReference), Error> {
    let (time, reference) = match field.as_bytes().last() {
        Some(suffix) if suffix.is_ascii_alphabetic() => {
            let reference = match suffix {
                b'w' => TimeReference::Wall,
                b's' => TimeReference::Standard,
                b'g' | b'u' | b'z' => TimeReference::Universal,
                _ => {
                    return Err(err!(
                        "unrecognized time reference suffix `{}` in \
                         `{field}`",
                        char::from(*suffix),
                    ))
                }
            };
            (&field[..field.len() - 1], reference)
        }
        _ => (field, TimeReference::Wall),
    };
    let mut parts = time.split(':');
    let hour = parts.next().unwrap_or("");
    let hour: i32 = hour
        .parse()
        .map_err(|_| err!("failed to parse `{hour}` as an hour"))?;
    if !(0..=24).contains(&hour) {
        return Err(Error::range("hour", hour, 0, 24));
    }
    let minute = match parts.next() {
        None => 0,
        Some(minute) => {
            let minute: i32 = minute.parse().map_err(|_| {
                err!("failed to parse `{minute}` as a minute")
            })?;
            if !(0..=59).contains(&minute) {
                return Err(Error::range("minute", minute, 0, 59));
            }
            minute
        }
    };
    if let Some(second) = parts.next() {
        let second: i32 = second
            .parse()
            .map_err(|_| err!("failed to parse `{second}` as a second"))?;
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if second != 0 {
            debug!("truncating sub-minute time of day `{field}`");
        }
    }
    if parts.next().is_some() {
        return Err(err!("too many `:` separated parts in `{field}`"));
    }
    Ok((hour * 60 + minute, reference))
}

/// Parses a signed offset, `[-]H[:MM[:SS]]`, to whole seconds. The sign
/// applies to the entire magnitude. Fractional seconds (which survive in
/// a few 19th century local-mean-time offsets) are truncated.
fn parse_offset_seconds(field: &str) -> Result<i32, Error> {
    let (sign, rest) = match field.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, field.strip_prefix('+').unwrap_or(field)),
    };
    let mut parts = rest.split(':');
    let hour = parts.next().unwrap_or("");
    let hour: i32 = hour
        .parse()
        .map_err(|_| err!("failed to parse `{hour}` as hours"))?;
    if !(0..=24).contains(&hour) {
        return Err(Error::range("hours", hour, 0, 24));
    }
    let mut seconds = hour * 3_600;
    if let Some(minute) = parts.next() {
        let minute: i32 = minute
            .parse()
            .map_err(|_| err!("failed to parse `{minute}` as minutes"))?;
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minutes", minute, 0, 59));
        }
        seconds += minute * 60;
    }
    if let Some(second) = parts.next() {
        let second = match second.split_once('.') {
            None => second,
            Some((whole, _frac)) => {
                debug!("truncating fractional seconds in offset `{field}`");
                whole
            }
        };
        let second: i32 = second
            .parse()
            .map_err(|_| err!("failed to parse `{second}` as seconds"))?;
        if !(0..=59).contains(&second) {
            return Err(Error::range("seconds", second, 0, 59));
        }
        seconds += second;
    }
    if parts.next().is_some() {
        return Err(err!("too many `:` separated parts in `{field}`"));
    }
    Ok(sign * seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_specs() {
        assert_eq!(parse_day_spec("4").unwrap(), DaySpec::DayOfMonth(4));
        assert_eq!(parse_day_spec("31").unwrap(), DaySpec::DayOfMonth(31));
        assert_eq!(
            parse_day_spec("lastSun").unwrap(),
            DaySpec::LastWeekday(Weekday::Sunday),
        );
        assert_eq!(
            parse_day_spec("lastFri").unwrap(),
            DaySpec::LastWeekday(Weekday::Friday),
        );
        assert_eq!(
            parse_day_spec("Sun>=22").unwrap(),
            DaySpec::WeekdayOnOrAfter { weekday: Weekday::Sunday, day: 22 },
        );
        assert!(parse_day_spec("0").is_err());
        assert!(parse_day_spec("32").is_err());
        assert!(parse_day_spec("lastSunday").is_err());
        assert!(parse_day_spec("Sun<=25").is_err());
        assert!(parse_day_spec("Sun>=0").is_err());
        assert!(parse_day_spec("").is_err());
    }

    #[test]
    fn day_times() {
        use TimeReference::*;

        assert_eq!(parse_day_time("2:00").unwrap(), (120, Wall));
        assert_eq!(parse_day_time("2:00w").unwrap(), (120, Wall));
        assert_eq!(parse_day_time("2:00s").unwrap(), (120, Standard));
        assert_eq!(parse_day_time("1:00u").unwrap(), (60, Universal));
        assert_eq!(parse_day_time("1:00g").unwrap(), (60, Universal));
        assert_eq!(parse_day_time("1:00z").unwrap(), (60, Universal));
        assert_eq!(parse_day_time("0:00").unwrap(), (0, Wall));
        assert_eq!(parse_day_time("0").unwrap(), (0, Wall));
        assert_eq!(parse_day_time("23:30").unwrap(), (1_410, Wall));
        assert_eq!(parse_day_time("24:00").unwrap(), (1_440, Wall));
        // Seconds are truncated to minute precision.
        assert_eq!(parse_day_time("2:00:30s").unwrap(), (120, Standard));

        assert!(parse_day_time("2:00x").is_err());
        assert!(parse_day_time("25:00").is_err());
        assert!(parse_day_time("2:61").is_err());
        assert!(parse_day_time("2:00:00:00").is_err());
        assert!(parse_day_time("s").is_err());
        assert!(parse_day_time("").is_err());
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_offset_seconds("0").unwrap(), 0);
        assert_eq!(parse_offset_seconds("1:00").unwrap(), 3_600);
        assert_eq!(parse_offset_seconds("-1:00").unwrap(), -3_600);
        assert_eq!(parse_offset_seconds("0:30").unwrap(), 1_800);
        assert_eq!(parse_offset_seconds("-0:01:15").unwrap(), -75);
        assert_eq!(parse_offset_seconds("1:19:20").unwrap(), 4_760);
        assert_eq!(parse_offset_seconds("5:30").unwrap(), 19_800);
        assert_eq!(parse_offset_seconds("+2:00").unwrap(), 7_200);
        // Amsterdam's 19th century local mean time, truncated.
        assert_eq!(parse_offset_seconds("0:19:32.13").unwrap(), 1_172);

        assert!(parse_offset_seconds("").is_err());
        assert!(parse_offset_seconds("-").is_err());
        assert!(parse_offset_seconds("1:60").is_err());
        assert!(parse_offset_seconds("25:00").is_err());
        assert!(parse_offset_seconds("1:00:00:00").is_err());
    }

    #[test]
    fn months() {
        assert_eq!(parse_month("Jan").unwrap(), 1);
        assert_eq!(parse_month("Dec").unwrap(), 12);
        assert_eq!(parse_month("october").unwrap(), 10);
        assert_eq!(parse_month("September").unwrap(), 9);
        assert!(parse_month("Ja").is_err());
        assert!(parse_month("Xxx").is_err());
    }

    #[test]
    fn until_dates() {
        let date = |y, m, d, minute| {
            civil::to_epoch_millis(civil::Date::new(y, m, d).unwrap(), minute)
        };
        assert_eq!(parse_until(&["1996"]).unwrap(), date(1996, 1, 1, 0));
        assert_eq!(
            parse_until(&["1968", "Oct", "27"]).unwrap(),
            date(1968, 10, 27, 0),
        );
        assert_eq!(
            parse_until(&["1847", "Dec", "1", "0:00s"]).unwrap(),
            date(1847, 12, 1, 0),
        );
        assert_eq!(
            parse_until(&["1971", "Oct", "31", "2:00u"]).unwrap(),
            date(1971, 10, 31, 120),
        );
        // A weekday day specification in an UNTIL date.
        assert_eq!(
            parse_until(&["1981", "Mar", "lastSun"]).unwrap(),
            date(1981, 3, 29, 0),
        );
        assert_eq!(
            parse_until(&["1994", "Oct", "Sun>=22", "1:00"]).unwrap(),
            date(1994, 10, 23, 60),
        );
        assert!(parse_until(&["800000"]).is_err());
        assert!(parse_until(&["1996", "Smarch"]).is_err());
        assert!(parse_until(&["1996", "Jan", "1", "0:00", "?"]).is_err());
    }

    #[test]
    fn rule_refs() {
        assert_eq!(parse_rule_ref("-").unwrap(), RuleRef::None);
        assert_eq!(
            parse_rule_ref("GB-Eire").unwrap(),
            RuleRef::Named(String::from("GB-Eire")),
        );
        assert_eq!(
            parse_rule_ref("EU").unwrap(),
            RuleRef::Named(String::from("EU")),
        );
        assert_eq!(parse_rule_ref("1:00").unwrap(), RuleRef::Fixed(3_600_000));
        assert_eq!(
            parse_rule_ref("-1:00").unwrap(),
            RuleRef::Fixed(-3_600_000),
        );
    }

    #[test]
    fn rule_lines() {
        let rule = parse_rule_line(
            "Rule\tGB-Eire\t1972\t1980\t-\tMar\tSun>=16\t2:00s\t1:00\tBST",
        )
        .unwrap();
        assert_eq!(rule.name(), "GB-Eire");
        assert_eq!(rule.from_year(), 1972);
        assert_eq!(rule.to_year(), Some(1980));
        assert_eq!(rule.month(), 3);
        assert_eq!(
            *rule.day(),
            DaySpec::WeekdayOnOrAfter { weekday: Weekday::Sunday, day: 16 },
        );
        assert_eq!(rule.at_minute(), 120);
        assert_eq!(rule.at_reference(), TimeReference::Standard);
        assert_eq!(rule.save_millis(), 3_600_000);
        assert_eq!(rule.letter(), "BST");

        let rule = parse_rule_line(
            "Rule EU 1981 max - Mar lastSun 1:00u 1:00 S",
        )
        .unwrap();
        assert_eq!(rule.to_year(), None);
        assert_eq!(rule.at_reference(), TimeReference::Universal);

        let rule = parse_rule_line(
            "Rule Albania 1980 only - May 3 0:00 1:00 S",
        )
        .unwrap();
        assert_eq!(rule.to_year(), Some(1980));
        assert_eq!(rule.at_reference(), TimeReference::Wall);

        // Ireland's negative daylight saving.
        let rule = parse_rule_line(
            "Rule Eire 1971 max - Oct lastSun 2:00u -1:00 -",
        )
        .unwrap();
        assert_eq!(rule.save_millis(), -3_600_000);
        assert_eq!(rule.letter(), "-");

        assert!(parse_rule_line("Rule EU 1981 max - Mar lastSun").is_err());
        assert!(parse_rule_line(
            "Rule EU 1990 1981 - Mar lastSun 1:00u 1:00 S",
        )
        .is_err());
        assert!(parse_rule_line(
            "Rule EU 1981 max odd Mar lastSun 1:00u 1:00 S",
        )
        .is_err());
    }

    #[test]
    fn zone_block() {
        let parsed = Database::parse(
            "# A fragment in the shape of the real file.\n\
             Zone\tEurope/London\t-0:01:15 -\tLMT\t1847 Dec  1 0:00s\n\
             \t\t\t0:00\tGB-Eire\t%s\t1968 Oct 27\n\
             \t\t\t1:00\t-\tBST\t1971 Oct 31 2:00u\n\
             \t\t\t0:00\tGB-Eire\t%s\t1996\n\
             \t\t\t0:00\tEU\tGMT/BST\n",
        );
        assert_eq!(parsed.diagnostics, vec![]);
        let zone = parsed.database.zone("Europe/London").unwrap();
        assert_eq!(zone.name(), "Europe/London");
        let periods = zone.periods();
        assert_eq!(periods.len(), 5);
        assert_eq!(periods[0].std_offset_millis(), -75_000);
        assert_eq!(*periods[0].rules(), RuleRef::None);
        assert_eq!(periods[0].format(), "LMT");
        assert_eq!(
            periods[1].rules(),
            &RuleRef::Named(String::from("GB-Eire")),
        );
        // Boundaries strictly increase and only the last is unbounded.
        let mut previous = i64::MIN;
        for period in &periods[..4] {
            let until = period.until_millis().unwrap();
            assert!(until > previous);
            previous = until;
        }
        assert_eq!(periods[4].until_millis(), None);
    }

    #[test]
    fn zone_terminated_by_blank_line() {
        let parsed = Database::parse(
            "Zone A/One 1:00 - ONE 1990\n\
             \t2:00 - TWO 1995\n\
             \n\
             Zone A/Two 3:00 - THREE\n",
        );
        // A/One never reached an unbounded period.
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].line(), 3);
        let one = parsed.database.zone("A/One").unwrap();
        assert_eq!(one.periods().len(), 2);
        let two = parsed.database.zone("A/Two").unwrap();
        assert_eq!(two.periods().len(), 1);
    }

    #[test]
    fn bad_lines_are_skipped_not_fatal() {
        let parsed = Database::parse(
            "Rule EU 1981 max - Mar lastSun 1:00u 1:00 S\n\
             Rule EU bogus max - Mar lastSun 1:00u 1:00 S\n\
             Rule EU 1996 max - Oct lastSun 1:00u 0 -\n\
             nonsense here\n\
             Zone Europe/Somewhere 0:00 EU %s\n",
        );
        assert_eq!(parsed.diagnostics.len(), 2);
        assert_eq!(parsed.diagnostics[0].line(), 2);
        assert!(parsed.diagnostics[0].message().contains("FROM year"));
        assert_eq!(parsed.diagnostics[1].line(), 4);
        // The good lines all made it in.
        let set = parsed.database.rule_set("EU").unwrap();
        assert_eq!(set.rules().len(), 2);
        assert!(parsed.database.zone("Europe/Somewhere").is_some());
        // Diagnostics render with their line number.
        assert!(parsed.diagnostics[1].to_string().starts_with("line 4:"));
    }

    #[test]
    fn comments_and_links_are_ignored() {
        let parsed = Database::parse(
            "# comment\n\
             Link Europe/London Europe/Jersey\n\
             Rule EU 1981 max - Mar lastSun 1:00u 1:00 S # trailing\n\
             \n\
             Zone Etc/GMT-1 1:00 - +01 # trailing too\n",
        );
        assert_eq!(parsed.diagnostics, vec![]);
        assert_eq!(parsed.database.rule_set("EU").unwrap().rules().len(), 1);
        let zone = parsed.database.zone("Etc/GMT-1").unwrap();
        assert_eq!(zone.periods()[0].std_offset_millis(), 3_600_000);
    }

    #[test]
    fn unterminated_zone_at_end_of_text() {
        let parsed =
            Database::parse("Zone A/One 1:00 - ONE 1990\n\t2:00 - TWO 1995");
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0]
            .message()
            .contains("no terminating period"));
        // The partial zone is still usable for the span it covers.
        assert!(parsed.database.zone("A/One").is_some());
    }

    #[test]
    fn duplicate_zone_last_wins() {
        let parsed = Database::parse(
            "Zone A/One 1:00 - OLD\n\
             Zone A/One 2:00 - NEW\n",
        );
        assert_eq!(parsed.diagnostics, vec![]);
        let zone = parsed.database.zone("A/One").unwrap();
        assert_eq!(zone.periods()[0].std_offset_millis(), 7_200_000);
    }

    #[test]
    fn fixed_save_in_rules_column() {
        let parsed = Database::parse("Zone Test/Fixed 1:00 1:00 CEST\n");
        assert_eq!(parsed.diagnostics, vec![]);
        let zone = parsed.database.zone("Test/Fixed").unwrap();
        assert_eq!(*zone.periods()[0].rules(), RuleRef::Fixed(3_600_000));
    }
}
