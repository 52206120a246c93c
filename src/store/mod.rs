pub mod qdrant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Payload stored alongside each template vector. Fields default when the
/// stored payload is partial so a degraded point degrades the result
/// instead of failing the whole search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplatePayload {
    pub template_id: String,
    pub content: String,
    pub content_hash: String,
    pub indexed_at: String,
}

#[derive(Debug, Clone)]
pub struct TemplatePoint {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: TemplatePayload,
}

#[derive(Debug, Clone)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f32,
    pub payload: Option<TemplatePayload>,
}

/// The vector-database operations the pipeline depends on. Calls go to a
/// remote service; failures surface as errors, never as empty results.
pub trait VectorStore: Send + Sync {
    /// `Ok(true)`/`Ok(false)` are confirmed answers; a failed check is
    /// `Err`, never treated as "absent".
    fn collection_exists(&self, name: &str) -> Result<bool>;
    /// Create a collection with cosine distance.
    fn create_collection(&self, name: &str, dimension: usize) -> Result<()>;
    /// Insert-or-overwrite keyed by point id; waits until applied.
    fn upsert(&self, name: &str, points: &[TemplatePoint]) -> Result<()>;
    /// k-nearest-neighbor search by cosine similarity, payloads included.
    fn search(&self, name: &str, vector: &[f32], limit: usize) -> Result<Vec<ScoredPoint>>;
}

/// Create the collection only on confirmed absence. An existing collection
/// is never dropped or recreated, and a failed existence check aborts
/// rather than triggering a destructive create.
pub fn ensure_collection(store: &dyn VectorStore, name: &str, dimension: usize) -> Result<()> {
    let exists = store
        .collection_exists(name)
        .with_context(|| format!("checking for collection '{name}'"))?;
    if exists {
        return Ok(());
    }
    info!(collection = name, dimension, "creating collection");
    store
        .create_collection(name, dimension)
        .with_context(|| format!("creating collection '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryStore;

    #[test]
    fn ensure_collection_creates_on_confirmed_absence() {
        let store = MemoryStore::new();
        assert!(!store.collection_exists("templates").unwrap());
        ensure_collection(&store, "templates", 4).unwrap();
        assert!(store.collection_exists("templates").unwrap());
    }

    #[test]
    fn ensure_collection_leaves_existing_data_alone() {
        let store = MemoryStore::new();
        ensure_collection(&store, "templates", 4).unwrap();
        let point = TemplatePoint {
            id: crate::corpus::ident::template_id("nda.txt"),
            vector: vec![1.0, 0.0, 0.0, 0.0],
            payload: TemplatePayload {
                template_id: "nda.txt".into(),
                content: "NDA body".into(),
                ..Default::default()
            },
        };
        store.upsert("templates", std::slice::from_ref(&point)).unwrap();

        ensure_collection(&store, "templates", 4).unwrap();
        let hits = store.search("templates", &[1.0, 0.0, 0.0, 0.0], 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload.as_ref().unwrap().content, "NDA body");
    }

    #[test]
    fn partial_payload_deserializes_with_defaults() {
        let payload: TemplatePayload =
            serde_json::from_str(r#"{"template_id":"nda.txt"}"#).unwrap();
        assert_eq!(payload.template_id, "nda.txt");
        assert_eq!(payload.content, "");
        assert_eq!(payload.content_hash, "");
    }
}
