//! In-crate test doubles: a deterministic embedder and an in-memory vector
//! store, so pipeline tests run without Ollama or Qdrant.

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Mutex;

use crate::embed::{Embedder, Embedding, cosine_similarity, l2_normalize};
use crate::store::{ScoredPoint, TemplatePoint, VectorStore};

/// Bag-of-words hash embedder: each token bumps one component, then the
/// vector is L2-normalized. Shared tokens between texts yield higher cosine
/// similarity, which is enough signal for retrieval tests.
pub struct MockEmbedder {
    pub dim: usize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self { dim: 16 }
    }
}

impl Embedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut v = vec![0.0f32; self.dim];
        for token in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            v[(hasher.finish() as usize) % self.dim] += 1.0;
        }
        if v.iter().all(|x| *x == 0.0) {
            v[0] = 1.0;
        }
        l2_normalize(&mut v);
        Ok(v)
    }

    fn dimension(&self) -> Result<usize> {
        Ok(self.dim)
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}

struct Collection {
    dimension: usize,
    points: HashMap<String, TemplatePoint>,
}

/// Exact cosine k-NN over points held in memory.
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }

    pub fn point_count(&self, name: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(name)
            .map_or(0, |c| c.points.len())
    }

    pub fn point(&self, name: &str, id: &str) -> Option<TemplatePoint> {
        self.collections
            .lock()
            .unwrap()
            .get(name)
            .and_then(|c| c.points.get(id).cloned())
    }
}

impl VectorStore for MemoryStore {
    fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.lock().unwrap().contains_key(name))
    }

    fn create_collection(&self, name: &str, dimension: usize) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        if collections.contains_key(name) {
            bail!("collection '{name}' already exists");
        }
        collections.insert(
            name.to_string(),
            Collection {
                dimension,
                points: HashMap::new(),
            },
        );
        Ok(())
    }

    fn upsert(&self, name: &str, points: &[TemplatePoint]) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        let Some(collection) = collections.get_mut(name) else {
            bail!("collection '{name}' not found");
        };
        for point in points {
            if point.vector.len() != collection.dimension {
                bail!(
                    "vector dimension {} does not match collection dimension {}",
                    point.vector.len(),
                    collection.dimension
                );
            }
            collection
                .points
                .insert(point.id.to_string(), point.clone());
        }
        Ok(())
    }

    fn search(&self, name: &str, vector: &[f32], limit: usize) -> Result<Vec<ScoredPoint>> {
        let collections = self.collections.lock().unwrap();
        let Some(collection) = collections.get(name) else {
            bail!("collection '{name}' not found");
        };
        let mut hits: Vec<ScoredPoint> = collection
            .points
            .values()
            .map(|p| ScoredPoint {
                id: p.id.to_string(),
                score: cosine_similarity(vector, &p.vector),
                payload: Some(p.payload.clone()),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }
}
