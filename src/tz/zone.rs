/// What a zone period's `RULES` column refers to.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleRef {
    /// `-`: no daylight saving in this period. The period's standard
    /// offset applies alone.
    None,
    /// The name of a rule set, e.g., `GB-Eire`.
    Named(String),
    /// A literal daylight saving delta in milliseconds, e.g., a `1:00`
    /// written directly in the `RULES` column. It applies for the whole
    /// period, unconditionally.
    Fixed(i32),
}

/// One offset policy of a zone: a standard offset and a rule reference,
/// in effect until a boundary instant.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneOffsetPeriod {
    pub(crate) std_offset_millis: i32,
    pub(crate) rules: RuleRef,
    pub(crate) format: String,
    pub(crate) until_millis: Option<i64>,
}

impl ZoneOffsetPeriod {
    pub(crate) fn new(
        std_offset_millis: i32,
        rules: RuleRef,
        format: String,
        until_millis: Option<i64>,
    ) -> ZoneOffsetPeriod {
        ZoneOffsetPeriod { std_offset_millis, rules, format, until_millis }
    }

    /// Returns the offset from UTC, in milliseconds, applied during
    /// standard (non-daylight) time in this period.
    pub fn std_offset_millis(&self) -> i32 {
        self.std_offset_millis
    }

    /// Returns what this period's `RULES` column refers to.
    pub fn rules(&self) -> &RuleRef {
        &self.rules
    }

    /// Returns the display label template for this period, e.g., `GMT/BST`
    /// or `CE%sT`. The resolution engine never reads this; it is carried
    /// for formatting consumers.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the instant this period ends at, in UTC milliseconds since
    /// the epoch, or `None` for the final, unbounded period of a zone.
    pub fn until_millis(&self) -> Option<i64> {
        self.until_millis
    }
}

/// A named, historically ordered sequence of offset policies.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub(crate) name: String,
    pub(crate) periods: Vec<ZoneOffsetPeriod>,
}

impl Zone {
    pub(crate) fn new(name: String, periods: Vec<ZoneOffsetPeriod>) -> Zone {
        debug_assert!(!periods.is_empty(), "a zone has at least one period");
        Zone { name, periods }
    }

    /// Returns the name of this zone, e.g., `Europe/London`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the offset periods of this zone, ordered by increasing
    /// `until` boundary, final period unbounded.
    pub fn periods(&self) -> &[ZoneOffsetPeriod] {
        &self.periods
    }

    /// Returns the index of the period in effect at the instant given:
    /// the first period whose `until` is at or past the instant. The
    /// final period soaks up everything beyond the last boundary.
    ///
    /// Periods per zone are bounded by the historical legal record, so a
    /// linear scan is fine here.
    pub(crate) fn period_index(&self, epoch_millis: i64) -> usize {
        let mut idx = 0;
        while idx + 1 < self.periods.len() {
            match self.periods[idx].until_millis {
                Some(until) if until < epoch_millis => idx += 1,
                _ => break,
            }
        }
        idx
    }

    pub(crate) fn period_for(&self, epoch_millis: i64) -> &ZoneOffsetPeriod {
        &self.periods[self.period_index(epoch_millis)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> Zone {
        Zone::new(
            String::from("Test/Zone"),
            vec![
                ZoneOffsetPeriod::new(
                    -75_000,
                    RuleRef::None,
                    String::from("LMT"),
                    Some(-1_000),
                ),
                ZoneOffsetPeriod::new(
                    0,
                    RuleRef::Named(String::from("X")),
                    String::from("%s"),
                    Some(5_000),
                ),
                ZoneOffsetPeriod::new(
                    3_600_000,
                    RuleRef::None,
                    String::from("XST"),
                    None,
                ),
            ],
        )
    }

    #[test]
    fn period_selection() {
        let zone = zone();
        assert_eq!(zone.period_index(i64::MIN), 0);
        assert_eq!(zone.period_index(-2_000), 0);
        // An instant exactly on a boundary still belongs to the earlier
        // period.
        assert_eq!(zone.period_index(-1_000), 0);
        assert_eq!(zone.period_index(-999), 1);
        assert_eq!(zone.period_index(5_000), 1);
        assert_eq!(zone.period_index(5_001), 2);
        assert_eq!(zone.period_index(i64::MAX), 2);
    }

    #[test]
    fn period_selection_is_monotonic() {
        let zone = zone();
        let mut previous = 0;
        for millis in -3_000..7_000 {
            let idx = zone.period_index(millis);
            assert!(idx >= previous, "regressed at instant {millis}");
            previous = idx;
        }
    }
}
