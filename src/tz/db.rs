use std::collections::BTreeMap;

use crate::{
    civil,
    error::Error,
    tz::{
        parse::{self, Diagnostic},
        rule::{RuleSet, TimeReference},
        zone::{RuleRef, Zone, ZoneOffsetPeriod},
    },
};

/// An immutable, queryable collection of zones and rule sets.
///
/// A `Database` is built once, by [`Database::parse`] (possibly several
/// times over, with the results [merged](Database::merge)), and then only
/// ever read. It has no interior mutability, so sharing one across
/// threads and resolving offsets concurrently needs no locking.
///
/// # Example
///
/// ```
/// use tzrule::Database;
///
/// static TZDATA: &str = "\
/// Rule  EU  1981  max  -  Mar  lastSun  1:00u  1:00  S
/// Rule  EU  1996  max  -  Oct  lastSun  1:00u  0     -
/// Zone  Europe/London  -0:01:15  -   LMT      1847 Dec  1 0:00s
///                       0:00     EU  GMT/BST
/// ";
///
/// let parsed = Database::parse(TZDATA);
/// assert!(parsed.diagnostics.is_empty());
/// let db = parsed.database;
/// // 2021-03-28T01:00:00Z, the instant British Summer Time began.
/// assert_eq!(db.resolve_offset("Europe/London", 1_616_893_200_000)?, 3_600_000);
/// // One millisecond earlier, the UK was still on GMT.
/// assert_eq!(db.resolve_offset("Europe/London", 1_616_893_199_999)?, 0);
/// # Ok::<(), tzrule::Error>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Database {
    pub(crate) zones: BTreeMap<String, Zone>,
    pub(crate) rule_sets: BTreeMap<String, RuleSet>,
}

impl Database {
    /// Creates an empty database. Useful as a seed for
    /// [`Database::merge`].
    pub fn new() -> Database {
        Database::default()
    }

    pub(crate) fn from_parts(
        zones: BTreeMap<String, Zone>,
        rule_sets: BTreeMap<String, RuleSet>,
    ) -> Database {
        Database { zones, rule_sets }
    }

    /// Parses one blob of IANA rule database text.
    ///
    /// This never fails wholesale. Lines that don't parse are skipped
    /// and reported in [`Parsed::diagnostics`], keyed by line number;
    /// everything that did parse is in [`Parsed::database`]. The real
    /// database ships as several regional files; parse each and combine
    /// them with [`Parsed::merge`] or [`Database::merge`].
    pub fn parse(text: &str) -> Parsed {
        parse::parse(text)
    }

    /// Folds another database into this one.
    ///
    /// A zone defined in both keeps the definition from `other`. Rule
    /// sets with the same name are concatenated, `other`'s rules after
    /// this database's, preserving declaration order within each.
    pub fn merge(&mut self, other: Database) {
        for (name, zone) in other.zones {
            if self.zones.insert(name, zone).is_some() {
                debug!("merge replaced an earlier zone definition");
            }
        }
        for (name, set) in other.rule_sets {
            self.rule_sets
                .entry(name)
                .and_modify(|existing| {
                    existing.rules.extend(set.rules.iter().cloned())
                })
                .or_insert(set);
        }
    }

    /// Returns the zone with the name given.
    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.get(name)
    }

    /// Returns the rule set with the name given.
    pub fn rule_set(&self, name: &str) -> Option<&RuleSet> {
        self.rule_sets.get(name)
    }

    /// Returns all zones, in lexicographic name order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    /// Returns all rule sets, in lexicographic name order.
    pub fn rule_sets(&self) -> impl Iterator<Item = &RuleSet> {
        self.rule_sets.values()
    }

    /// Returns the offset from UTC, in milliseconds, in effect in the
    /// zone given at the instant given (UTC milliseconds since the Unix
    /// epoch).
    ///
    /// The result combines the standard offset of the zone's offset
    /// period covering the instant with whatever daylight saving delta
    /// that period's rules put in effect at that instant.
    ///
    /// # Errors
    ///
    /// When the zone name isn't in this database, when the instant is
    /// outside the supported range (years -9999 through 9999), or when
    /// the model is corrupt (a period referring to a rule set that
    /// doesn't exist). An offset is never guessed.
    pub fn resolve_offset(
        &self,
        zone_name: &str,
        epoch_millis: i64,
    ) -> Result<i32, Error> {
        let zone = self
            .zones
            .get(zone_name)
            .ok_or_else(|| Error::zone_lookup(zone_name))?;
        if !(civil::MIN_EPOCH_MILLIS..=civil::MAX_EPOCH_MILLIS)
            .contains(&epoch_millis)
        {
            return Err(Error::range(
                "epoch millisecond",
                epoch_millis,
                civil::MIN_EPOCH_MILLIS,
                civil::MAX_EPOCH_MILLIS,
            ));
        }
        let period = zone.period_for(epoch_millis);
        self.evaluate(period, epoch_millis).map_err(|e| {
            e.context(err!(
                "failed to resolve offset for time zone `{zone_name}`",
            ))
        })
    }

    /// Like [`Database::resolve_offset`], but takes the instant in
    /// nanoseconds and returns the offset in nanoseconds.
    ///
    /// The instant is floored to the containing millisecond, so an
    /// instant a fraction of a millisecond before a transition still
    /// resolves to the offset before it.
    pub fn resolve_offset_nanos(
        &self,
        zone_name: &str,
        epoch_nanos: i64,
    ) -> Result<i64, Error> {
        let epoch_millis = epoch_nanos.div_euclid(1_000_000);
        let offset = self.resolve_offset(zone_name, epoch_millis)?;
        Ok(i64::from(offset) * 1_000_000)
    }

    /// Evaluates a period's rules at the instant given and returns the
    /// combined offset.
    fn evaluate(
        &self,
        period: &ZoneOffsetPeriod,
        epoch_millis: i64,
    ) -> Result<i32, Error> {
        let std = period.std_offset_millis;
        let set_name = match period.rules {
            RuleRef::None => return Ok(std),
            RuleRef::Fixed(save) => return Ok(std + save),
            RuleRef::Named(ref name) => name,
        };
        let set = self.rule_sets.get(set_name).ok_or_else(|| {
            err!("zone period refers to unknown rule set `{set_name}`")
        })?;
        let mut save: i32 = 0;
        // Every rule is visited, in declaration order, and a match
        // overwrites `save` without ending the scan: when several rules
        // of a set match the same instant, the last declared one wins.
        // Breaking early here changes observable offsets.
        for rule in &set.rules {
            // The rule's boundary is written against one of three
            // clocks. Shift the instant onto that clock before
            // comparing. A wall clock boundary includes the delta
            // currently in effect, which is whatever `save` has
            // accumulated so far in the scan.
            let shift = match rule.at_reference {
                TimeReference::Wall => i64::from(std) + i64::from(save),
                TimeReference::Standard => i64::from(std),
                TimeReference::Universal => 0,
            };
            let candidate = epoch_millis + shift;
            let year = civil::date_of_epoch_millis(candidate).year;
            if !rule.applies_to(year) {
                continue;
            }
            if candidate >= rule.transition_millis(year)? {
                save = rule.save_millis;
            }
        }
        Ok(std + save)
    }
}

/// The result of parsing one or more database text blobs: the usable
/// (possibly incomplete) database, plus a diagnostic for every line that
/// was skipped.
#[derive(Clone, Debug, Default)]
pub struct Parsed {
    /// Everything that parsed.
    pub database: Database,
    /// One entry per skipped line, in input order. Line numbers are
    /// relative to the text blob each line came from.
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    /// Combines two parse results: the databases are
    /// [merged](Database::merge) and the diagnostics concatenated.
    pub fn merge(mut self, other: Parsed) -> Parsed {
        self.database.merge(other.database);
        self.diagnostics.extend(other.diagnostics);
        self
    }
}
