use super::{prefix_eq, HeuristicsConfig};

/// Comma-separated segments of an affiliation, trimmed
pub fn affiliation_segments(affiliation: &str) -> Vec<&str> {
    affiliation.split(',').map(str::trim).collect()
}

/// Decide whether two affiliation strings look like spellings of one place
///
/// Department (first segment), institution (second segment) and country
/// (last segment) must each agree on their configured prefix. Affiliations
/// with fewer than two segments never match.
pub fn affiliations_similar(a: &str, b: &str, config: &HeuristicsConfig) -> bool {
    let a = affiliation_segments(a);
    let b = affiliation_segments(b);

    if a.len() < 2 || b.len() < 2 {
        return false;
    }

    prefix_eq(a[0], b[0], config.affil_seg0_chars)
        && prefix_eq(a[1], b[1], config.affil_seg1_chars)
        && prefix_eq(a[a.len() - 1], b[b.len() - 1], config.affil_last_seg_chars)
}
