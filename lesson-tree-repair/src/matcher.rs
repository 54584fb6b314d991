/// Maximum length difference in characters (exclusive) between two final
/// path segments for a containment match to count.
pub const DEFAULT_LENGTH_TOLERANCE: usize = 6;

/// How closely a candidate identifier resembles a broken one.
///
/// Ordered best-first, so sorting by strength puts exact matches ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStrength {
    /// Final path segments are identical.
    Exact,
    /// One final segment contains the other, within the length tolerance.
    Contained,
}

/// Last path segment of an identifier, ignoring trailing slashes.
///
/// `https://example.org/a/b/` and `https://example.org/x/b` both end in `b`.
pub fn final_segment(id: &str) -> &str {
    let trimmed = id.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Compare a broken identifier with a live candidate.
///
/// The length tolerance only gates containment; identical final segments
/// always match. Identical identifiers and empty segments never match.
pub fn match_strength(bad_id: &str, candidate: &str, tolerance: usize) -> Option<MatchStrength> {
    if bad_id == candidate {
        return None;
    }

    let bad = final_segment(bad_id);
    let test = final_segment(candidate);
    if bad.is_empty() || test.is_empty() {
        return None;
    }

    if bad == test {
        return Some(MatchStrength::Exact);
    }

    let contained = test.contains(bad) || bad.contains(test);
    if contained && bad.chars().count().abs_diff(test.chars().count()) < tolerance {
        return Some(MatchStrength::Contained);
    }

    None
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
