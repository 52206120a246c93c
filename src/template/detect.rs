use std::collections::HashSet;

use super::{PlaceholderSyntax, canonicalize};

/// Scan template text for placeholder markers across all four syntaxes and
/// return the canonical field names, deduplicated. Candidates whose
/// canonical form falls outside 2..=40 characters are dropped. Output order
/// is first-discovery order (syntaxes in their fixed order, text order
/// within each), so it is deterministic.
pub fn detect_placeholders(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for syntax in PlaceholderSyntax::ALL {
        for caps in syntax.regex().captures_iter(text) {
            let canonical = canonicalize(&caps[1]);
            if (2..=40).contains(&canonical.len()) && seen.insert(canonical.clone()) {
                names.push(canonical);
            }
        }
    }
    names
}
