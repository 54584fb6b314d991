use super::*;

#[test]
fn final_segment_ignores_trailing_slash() {
    assert_eq!(final_segment("https://example.org/a/b/"), "b");
    assert_eq!(final_segment("https://example.org/a/b"), "b");
    assert_eq!(final_segment("plain"), "plain");
    assert_eq!(final_segment(""), "");
}

#[test]
fn identical_segments_match_exactly() {
    assert_eq!(
        match_strength(
            "https://example.org/old/tanya-class",
            "https://example.org/new/tanya-class",
            DEFAULT_LENGTH_TOLERANCE,
        ),
        Some(MatchStrength::Exact)
    );
}

#[test]
fn containment_within_tolerance_matches() {
    assert_eq!(
        match_strength(
            "https://example.org/tanya",
            "https://example.org/tanya-2",
            DEFAULT_LENGTH_TOLERANCE,
        ),
        Some(MatchStrength::Contained)
    );
    // Either direction.
    assert_eq!(
        match_strength(
            "https://example.org/tanya-2",
            "https://example.org/tanya",
            DEFAULT_LENGTH_TOLERANCE,
        ),
        Some(MatchStrength::Contained)
    );
}

#[test]
fn tolerance_gates_containment() {
    // "tanya" vs "tanya-lessons" differ by 8 characters
    assert_eq!(
        match_strength(
            "https://example.org/tanya",
            "https://example.org/tanya-lessons",
            DEFAULT_LENGTH_TOLERANCE,
        ),
        None
    );
    // Exactly at the tolerance is still rejected
    assert_eq!(match_strength("a/abc", "a/abcdefghi", 6), None);
    assert_eq!(
        match_strength("a/abc", "a/abcdefgh", 6),
        Some(MatchStrength::Contained)
    );
}

#[test]
fn same_identifier_never_matches() {
    assert_eq!(match_strength("a/b", "a/b", DEFAULT_LENGTH_TOLERANCE), None);
}

#[test]
fn unrelated_segments_do_not_match() {
    assert_eq!(
        match_strength("x/chassidus", "x/halacha", DEFAULT_LENGTH_TOLERANCE),
        None
    );
}

#[test]
fn exact_sorts_before_contained() {
    let mut strengths = vec![MatchStrength::Contained, MatchStrength::Exact];
    strengths.sort();
    assert_eq!(strengths, vec![MatchStrength::Exact, MatchStrength::Contained]);
}

#[test]
fn tolerance_counts_characters_not_bytes() {
    // 4 characters apart, but 7 bytes apart in UTF-8.
    assert_eq!(
        match_strength(
            "https://example.org/שיעור",
            "https://example.org/שיעור-שני",
            DEFAULT_LENGTH_TOLERANCE,
        ),
        Some(MatchStrength::Contained)
    );
}
