/// Collapse whitespace runs (spaces, tabs, newlines) to single spaces and
/// trim the ends. Applied to corpus content before indexing and to queries
/// before embedding; the two sides must stay symmetric or similarity scores
/// silently degrade.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(normalize("  NDA\tbetween\n\n parties  "), "NDA between parties");
    }

    #[test]
    fn idempotent() {
        let once = normalize("a\n b\t\tc ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }
}
