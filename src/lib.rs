pub mod assistant;
pub mod config;
pub mod corpus;
pub mod embed;
pub mod index;
pub mod search;
pub mod store;
pub mod template;
pub mod text;

#[cfg(test)]
pub(crate) mod testutil;

// The surface consumed by CLI/API callers.
pub use search::{TemplateMatch, search_templates};
pub use template::detect::detect_placeholders;
pub use template::fill::fill_template;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemoryStore, MockEmbedder};
    use std::collections::HashMap;

    #[test]
    fn index_search_detect_fill_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("nda.txt"),
            "NDA between {party_a} and {party_b}.",
        )
        .unwrap();
        let embedder = MockEmbedder::new();
        let store = MemoryStore::new();

        let report = index::index_templates(dir.path(), "templates", &embedder, &store).unwrap();
        assert_eq!(report.templates_indexed, 1);

        let results =
            search_templates("non-disclosure agreement", 1, "templates", &embedder, &store)
                .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "nda.txt");
        assert_eq!(results[0].content, "NDA between {party_a} and {party_b}.");

        let placeholders = detect_placeholders(&results[0].content);
        assert_eq!(placeholders, vec!["party_a", "party_b"]);

        let values: HashMap<String, String> = [
            ("party_a".to_string(), "Acme".to_string()),
            ("party_b".to_string(), "Globex".to_string()),
        ]
        .into();
        assert_eq!(
            fill_template(&results[0].content, &values).unwrap(),
            "NDA between Acme and Globex."
        );
    }
}
