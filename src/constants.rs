/// Shared constants: defaults, upstream endpoints and the pitch-code table.
use once_cell::sync::Lazy;
use std::collections::HashMap;

// Fetch defaults
pub const DEFAULT_FETCH_ATTEMPTS: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 5_000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Game-type marker for regular-season games in the Statcast feed.
pub const REGULAR_SEASON: &str = "R";

// Upstream endpoints
pub const SAVANT_CSV_URL: &str = "https://baseballsavant.mlb.com/statcast_search/csv";
pub const MLB_PEOPLE_SEARCH_URL: &str = "https://statsapi.mlb.com/api/v1/people/search";

// Output file suffixes, appended to the subject name
pub const DETAIL_FILE_SUFFIX: &str = "_first_pitch.csv";
pub const SUMMARY_FILE_SUFFIX: &str = "_first_pitch_summary.csv";

/// Column names that have carried the lineup slot across feed revisions,
/// checked in order.
pub const BATTING_ORDER_COLUMNS: &[&str] = &["batting_order", "bat_order", "lineup_position", "bat_slot"];

/// Statcast pitch codes and their display names.
pub static PITCH_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("FF", "4-Seam Fastball"),
        ("FT", "2-Seam Fastball"),
        ("SI", "Sinker"),
        ("FC", "Cutter"),
        ("SL", "Slider"),
        ("ST", "Sweeper"),
        ("SV", "Slurve"),
        ("CU", "Curveball"),
        ("KC", "Knuckle Curve"),
        ("CS", "Slow Curve"),
        ("CH", "Changeup"),
        ("FS", "Split-Finger"),
        ("FO", "Forkball"),
        ("SC", "Screwball"),
        ("KN", "Knuckleball"),
        ("EP", "Eephus"),
        ("FA", "Other"),
        ("PO", "Pitch Out"),
        ("IN", "Intentional Ball"),
        ("AB", "Automatic Ball"),
    ])
});

/// Display name for a pitch code; unknown codes pass through verbatim.
pub fn pitch_name_for_code(code: &str) -> String {
    PITCH_NAMES
        .get(code)
        .map(|name| name.to_string())
        .unwrap_or_else(|| code.to_string())
}
