/*!
End-to-end checks through the public API only. Run with
`RUST_LOG=trace` and `--features logging` to watch ingestion decisions.
*/

use tzrule::Database;

static TZDATA: &str = "\
Rule  EU  1981  max  -  Mar  lastSun  1:00u  1:00  S
Rule  EU  1996  max  -  Oct  lastSun  1:00u  0     -
Zone  Europe/London  -0:01:15  -   LMT      1847 Dec  1 0:00s
                      0:00     EU  GMT/BST
Zone  Atlantic/Reykjavik  -1:28  -  LMT  1908
                          -1:00  -  WET  1968 Apr  7 1:00s
                           0:00  -  GMT
";

#[test]
fn parse_and_resolve() {
    let _ = env_logger::try_init();

    let parsed = Database::parse(TZDATA);
    assert!(parsed.diagnostics.is_empty());
    let db = parsed.database;
    assert_eq!(db.zones().count(), 2);

    // 2021-03-28T01:00:00Z, the instant British Summer Time began.
    let at = 1_616_893_200_000;
    assert_eq!(db.resolve_offset("Europe/London", at).unwrap(), 3_600_000);
    assert_eq!(db.resolve_offset("Europe/London", at - 1).unwrap(), 0);
    // Iceland had settled on year-round GMT well before the epoch.
    assert_eq!(db.resolve_offset("Atlantic/Reykjavik", 0).unwrap(), 0);

    let err = db.resolve_offset("Europe/Paris", 0).unwrap_err();
    assert!(err.is_zone_lookup());
    assert!(err.to_string().contains("Europe/Paris"));
}
