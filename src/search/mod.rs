pub mod select;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::embed::Embedder;
use crate::store::VectorStore;
use crate::text;

/// One ranked search hit. `id` is the logical template id (the source
/// filename) when the payload carries it, otherwise the store's point id.
#[derive(Debug, Clone)]
pub struct TemplateMatch {
    pub id: String,
    pub score: f32,
    pub content: String,
}

/// Embed a free-text query and return the `top_k` nearest templates by
/// cosine similarity, best first. An empty index yields `Ok(vec![])`;
/// malformed input is rejected before any remote call.
pub fn search_templates(
    query: &str,
    top_k: usize,
    collection: &str,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
) -> Result<Vec<TemplateMatch>> {
    let normalized = text::normalize(query);
    if normalized.is_empty() {
        bail!("query must not be empty");
    }
    if top_k < 1 {
        bail!("top_k must be at least 1");
    }

    let vector = embedder.embed(&normalized).context("embedding query")?;
    let hits = store
        .search(collection, &vector, top_k)
        .with_context(|| format!("searching collection '{collection}'"))?;
    debug!(query = %normalized, hits = hits.len(), "search complete");

    Ok(hits
        .into_iter()
        .map(|hit| {
            let payload = hit.payload.unwrap_or_default();
            TemplateMatch {
                id: if payload.template_id.is_empty() {
                    hit.id
                } else {
                    payload.template_id
                },
                score: hit.score,
                content: payload.content,
            }
        })
        .collect())
}
