//! Spinoff guard: rejects sibling-franchise releases.
//!
//! A flagship series and its spinoffs share most of their name, so textual
//! similarity alone would happily match the wrong show. For every parent
//! franchise contained in the query, a candidate carrying one of the
//! franchise's spinoff markers (that the query itself did not ask for) is
//! rejected before any fuzzy or episode logic runs.

/// Parent franchise key → spinoff marker phrases, all in normalized form.
static SPINOFF_MARKERS: &[(&str, &[&str])] = &[
    ("dexter", &["new blood"]),
    (
        "the walking dead",
        &["dead city", "world beyond", "fear", "daryl"],
    ),
    ("breaking bad", &["better call saul"]),
    ("game of thrones", &["house of the dragon"]),
    ("csi", &["miami", "ny", "cyber", "vegas"]),
    ("ncis", &["los angeles", "new orleans", "hawaii", "sydney"]),
];

/// Whether the candidate belongs to a known spinoff of a franchise named by
/// the query. Both arguments must already be normalized titles.
pub fn is_unwanted_spinoff(query: &str, candidate: &str) -> bool {
    for (parent, markers) in SPINOFF_MARKERS {
        if !query.contains(parent) {
            continue;
        }
        for marker in *markers {
            if candidate.contains(marker) && !query.contains(marker) {
                return true;
            }
        }
    }
    false
}
