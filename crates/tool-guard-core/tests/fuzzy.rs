// tool-guard-core/tests/fuzzy.rs
// ============================================================================
// Module: Fuzzy Matcher Tests
// Description: Edit-distance and bounded-suggestion tests.
// Purpose: Ensure near-miss resolution is correct, bounded, and
//          deterministic.
// Dependencies: tool-guard-core, proptest
// ============================================================================
//! ## Overview
//! Validates the Levenshtein implementation, the distance bound, and the
//! first-wins tie-break over sorted enumeration, plus metric properties
//! under proptest.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use proptest::prelude::proptest;
use tool_guard_core::ToolName;
use tool_guard_core::runtime::fuzzy::levenshtein;
use tool_guard_core::suggest_tool_name;

fn names(values: &[&str]) -> Vec<ToolName> {
    values.iter().map(|value| ToolName::new(*value)).collect()
}

// ============================================================================
// SECTION: Edit Distance
// ============================================================================

/// Verifies textbook distances.
#[test]
fn fuzzy_known_distances() {
    assert_eq!(levenshtein("", ""), 0);
    assert_eq!(levenshtein("weather", "weather"), 0);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("abc", ""), 3);
    assert_eq!(levenshtein("wheather", "weather"), 1);
    assert_eq!(levenshtein("wether", "weather"), 1);
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}

// ============================================================================
// SECTION: Bounded Suggestion
// ============================================================================

/// Verifies a near-miss within the bound is suggested with its distance.
#[test]
fn fuzzy_suggests_within_bound() {
    let known = names(&["search", "transfer_money", "weather"]);
    let suggestion = suggest_tool_name("wheather", known.iter(), 2).unwrap();
    assert_eq!(suggestion.name.as_str(), "weather");
    assert_eq!(suggestion.distance, 1);
}

/// Verifies names beyond the bound yield no suggestion.
#[test]
fn fuzzy_no_suggestion_beyond_bound() {
    let known = names(&["search", "weather"]);
    assert!(suggest_tool_name("completely_unrelated", known.iter(), 2).is_none());
}

/// Verifies an empty registry yields no suggestion.
#[test]
fn fuzzy_empty_registry() {
    let known: Vec<ToolName> = Vec::new();
    assert!(suggest_tool_name("weather", known.iter(), 2).is_none());
}

/// Verifies ties keep the first candidate in enumeration order.
#[test]
fn fuzzy_tie_break_keeps_first() {
    // Both candidates are distance 1 from the input.
    let known = names(&["place", "plane"]);
    let suggestion = suggest_tool_name("plare", known.iter(), 2).unwrap();
    assert_eq!(suggestion.name.as_str(), "place");
    assert_eq!(suggestion.distance, 1);
}

/// Verifies an exact match is distance zero.
#[test]
fn fuzzy_exact_match() {
    let known = names(&["weather"]);
    let suggestion = suggest_tool_name("weather", known.iter(), 2).unwrap();
    assert_eq!(suggestion.distance, 0);
}

// ============================================================================
// SECTION: Metric Properties
// ============================================================================

proptest! {
    /// Distance is symmetric.
    #[test]
    fn fuzzy_symmetry(a in "[a-z_]{0,12}", b in "[a-z_]{0,12}") {
        assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    /// Identity of indiscernibles: zero distance exactly for equal strings.
    #[test]
    fn fuzzy_identity(a in "[a-z_]{0,12}", b in "[a-z_]{0,12}") {
        assert_eq!(levenshtein(&a, &b) == 0, a == b);
    }

    /// Distance never exceeds the longer string's length.
    #[test]
    fn fuzzy_upper_bound(a in "[a-z_]{0,12}", b in "[a-z_]{0,12}") {
        let distance = levenshtein(&a, &b);
        let chars_a = a.chars().count();
        let chars_b = b.chars().count();
        assert!(distance <= chars_a.max(chars_b));
        assert!(distance >= chars_a.abs_diff(chars_b));
    }
}
