/*!
The time zone rule database model and its parser.

The types here mirror the shape of the textual IANA database. A
[`Database`] holds [`Zone`]s and [`RuleSet`]s by name. A zone is a
historically ordered run of [`ZoneOffsetPeriod`]s, each pairing a
standard offset with a [`RuleRef`] saying where its daylight saving
delta comes from. A rule set is an ordered list of [`Rule`]s, each a
recurring yearly transition.

Parsing and offset resolution both live on [`Database`]:
[`Database::parse`] ingests database text with per-line error recovery,
and [`Database::resolve_offset`] answers the one question this crate
exists for: what was the total offset from UTC in a given zone at a
given instant.
*/

pub use self::{
    db::{Database, Parsed},
    parse::Diagnostic,
    rule::{DaySpec, Rule, RuleSet, TimeReference, Weekday},
    zone::{RuleRef, Zone, ZoneOffsetPeriod},
};

mod db;
mod parse;
mod rule;
#[cfg(test)]
mod testdata;
mod zone;
