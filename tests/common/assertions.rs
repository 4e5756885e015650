//! Domain-specific assertion macros for fixrec harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! fixrec invariant that was violated.

// ---------------------------------------------------------------------------
// Identity assertions
// ---------------------------------------------------------------------------

/// Assert that no two items share an identity.
///
/// ```rust
/// assert_unique_identities!(collected.iter().map(|r| &r.identity));
/// ```
#[macro_export]
macro_rules! assert_unique_identities {
    ($identities:expr) => {{
        let mut seen = std::collections::HashSet::new();
        for identity in $identities {
            if !seen.insert(identity.clone()) {
                panic!("assert_unique_identities! failed: {} emitted twice", identity);
            }
        }
    }};
}

/// Assert that a scan report skipped exactly the given positions.
#[macro_export]
macro_rules! assert_skipped_positions {
    ($report:expr, $positions:expr) => {{
        let actual: Vec<usize> = $report.skipped.iter().map(|s| s.position).collect();
        let expected: Vec<usize> = $positions.to_vec();
        pretty_assertions::assert_eq!(actual, expected, "assert_skipped_positions! failed");
    }};
}

/// Assert that a canonical timestamp renders as `expected`.
pub fn assert_canonical(at: &fixrec::CanonicalTimestamp, expected: &str) {
    pretty_assertions::assert_eq!(at.to_string(), expected, "canonical text form");
}
