// tool-guard-core/src/runtime/fuzzy.rs
// ============================================================================
// Module: Fuzzy Tool-Name Matcher
// Description: Bounded edit-distance lookup over registered tool names.
// Purpose: Propose a credible intended target for near-miss tool names.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Classic Levenshtein distance with unit insert/delete/substitute costs.
//! The scan keeps the first name at the minimum distance, so given the
//! registry's sorted enumeration the suggestion is identical across runs.
//! The matcher is stateless and pure.

use crate::core::call::ToolName;

// ============================================================================
// SECTION: Suggestion
// ============================================================================

/// Nearest known tool name within the distance bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzySuggestion {
    /// Suggested tool name.
    pub name: ToolName,
    /// Edit distance from the unknown input.
    pub distance: usize,
}

/// Returns the closest known name within `max_distance`, if any.
///
/// Ties keep the first candidate in enumeration order.
#[must_use]
pub fn suggest_tool_name<'a>(
    input: &str,
    known: impl Iterator<Item = &'a ToolName>,
    max_distance: usize,
) -> Option<FuzzySuggestion> {
    let mut best: Option<FuzzySuggestion> = None;

    for candidate in known {
        let distance = levenshtein(input, candidate.as_str());
        let improves = best.as_ref().is_none_or(|current| distance < current.distance);
        if improves {
            best = Some(FuzzySuggestion {
                name: candidate.clone(),
                distance,
            });
        }
    }

    best.filter(|suggestion| suggestion.distance <= max_distance)
}

// ============================================================================
// SECTION: Edit Distance
// ============================================================================

/// Computes the Levenshtein distance between two strings.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic program over the edit matrix.
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
