/*!
A parser and offset resolver for the textual IANA time zone rule
database.

This crate ingests the raw rule database files (the `europe`,
`northamerica`, etc. files that ship in the `tzdata` distribution, not
the compiled TZif binaries) and answers one question: what was the
total offset from UTC in a given zone at a given instant?

# Example

This parses a fragment of the real database and resolves offsets on
either side of a daylight saving transition:

```
use tzrule::Database;

static TZDATA: &str = "\
Rule  EU  1981  max  -  Mar  lastSun  1:00u  1:00  S
Rule  EU  1996  max  -  Oct  lastSun  1:00u  0     -
Zone  Europe/London  -0:01:15  -   LMT      1847 Dec  1 0:00s
                      0:00     EU  GMT/BST
";

let parsed = Database::parse(TZDATA);
assert!(parsed.diagnostics.is_empty());

// 2021-03-28T01:00:00Z is the instant British Summer Time began.
let at = 1_616_893_200_000;
assert_eq!(parsed.database.resolve_offset("Europe/London", at)?, 3_600_000);
assert_eq!(parsed.database.resolve_offset("Europe/London", at - 1)?, 0);
# Ok::<(), tzrule::Error>(())
```

# Scope

The model is deliberately small. Zones, their offset periods and their
daylight saving rules are parsed in full, including all three time
reference suffixes (`w`, `s` and `u`/`g`/`z`) and all three day
specification forms (`4`, `lastSun`, `Sun>=22`). `Link` lines are
ignored: alias resolution is a name-to-name mapping that callers can
layer on top. Formatting local abbreviations (expanding a zone's
`GMT/BST` or `CE%sT` template) is carried in the model but not
interpreted.

Instants are milliseconds since the Unix epoch, UTC, and must fall in
years -9999 through 9999. Resolution never guesses: an unknown zone
name, an out of range instant or a dangling rule set reference is an
[`Error`], not a default offset.

# Crate features

* **serde** - Enables serialization and deserialization of [`Database`]
and everything it contains via [serde](https://serde.rs/).
* **logging** - Enables trace messages through the
[`log`](https://docs.rs/log) crate, mostly about skipped input lines.
This is a no-op when no logger is installed.
*/

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub use crate::{
    error::Error,
    tz::{Database, Parsed},
};

#[macro_use]
mod logging;
#[macro_use]
mod error;

pub mod civil;
pub mod tz;
