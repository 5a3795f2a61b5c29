//! Property-based tests for pattern normalization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::patterns::{normalize_property, rewrite_separators, segment_matches};
    use proptest::prelude::*;

    // ============================================================================
    // rewrite_separators property tests
    // ============================================================================

    proptest! {
        /// Property: no backslash survives separator rewriting
        #[test]
        fn rewrite_never_leaves_backslashes(input in ".*") {
            prop_assert!(!rewrite_separators(&input).contains('\\'));
        }

        /// Property: rewriting is idempotent
        #[test]
        fn rewrite_is_idempotent(input in ".*") {
            let once = rewrite_separators(&input);
            let twice = rewrite_separators(&once);
            prop_assert_eq!(once, twice);
        }
    }

    // ============================================================================
    // normalize_property property tests
    // ============================================================================

    proptest! {
        /// Property: a record never carries empty or untrimmed patterns
        #[test]
        fn normalized_patterns_are_trimmed_and_non_empty(raw in "[ a-z*.\\\\\n]{0,64}") {
            if let Some(record) = normalize_property("dir", &raw) {
                prop_assert!(!record.patterns.is_empty());
                for pattern in &record.patterns {
                    prop_assert!(!pattern.is_empty());
                    prop_assert_eq!(pattern.trim(), pattern);
                }
            }
        }

        /// Property: every non-root entry carries the directory prefix
        #[test]
        fn non_root_entries_carry_directory_prefix(pattern in "[a-z][a-z0-9.*]{0,12}") {
            let record = normalize_property("src/lib", &pattern).unwrap();
            for entry in record.entries() {
                prop_assert!(entry.starts_with("src/lib/"));
            }
        }

        /// Property: normalization is deterministic (same input = same output)
        #[test]
        fn normalization_is_deterministic(raw in ".*") {
            prop_assert_eq!(normalize_property("d", &raw), normalize_property("d", &raw));
        }
    }

    // ============================================================================
    // segment_matches property tests
    // ============================================================================

    proptest! {
        /// Property: pattern "*" matches any single segment name
        #[test]
        fn star_matches_any_name(name in "[a-zA-Z0-9_.]+") {
            prop_assert!(segment_matches("*", &name));
        }

        /// Property: a literal pattern matches exactly itself
        #[test]
        fn literal_pattern_matches_itself(name in "[a-zA-Z0-9_]+") {
            prop_assert!(segment_matches(&name, &name));
        }
    }
}
