use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

use crate::corpus::{self, hasher, ident};
use crate::embed::Embedder;
use crate::store::{self, TemplatePayload, TemplatePoint, VectorStore};
use crate::text;

#[derive(Debug)]
pub struct IndexReport {
    pub templates_indexed: usize,
    pub collection: String,
}

/// Build or refresh the template collection from a corpus directory.
///
/// Ids derive from filenames, so re-running with an unchanged corpus
/// reproduces the same index state, and a changed file keeps its id while
/// its vector and payload are overwritten. Fails fast, before anything is
/// upserted, when the directory is missing or holds no templates.
pub fn index_templates(
    dir: &Path,
    collection: &str,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
) -> Result<IndexReport> {
    let templates = corpus::read_templates(dir)?;
    if templates.is_empty() {
        bail!(
            "no templates found in '{}'; add .txt files or run the seed command",
            dir.display()
        );
    }

    let mut points = Vec::with_capacity(templates.len());
    let mut texts = Vec::with_capacity(templates.len());
    for template in &templates {
        let content = text::normalize(&template.content);
        let content_hash = hasher::fingerprint_file(&dir.join(&template.filename))
            .with_context(|| format!("fingerprinting {}", template.filename))?;
        texts.push(content.clone());
        points.push(TemplatePoint {
            id: ident::template_id(&template.filename),
            vector: Vec::new(),
            payload: TemplatePayload {
                template_id: template.filename.clone(),
                content,
                content_hash,
                indexed_at: String::new(),
            },
        });
    }

    let dimension = embedder.dimension()?;
    store::ensure_collection(store, collection, dimension)?;

    // One batch call over the whole corpus; order matches `points`.
    let text_refs: Vec<&str> = texts.iter().map(|t| t.as_str()).collect();
    let vectors = embedder
        .embed_batch(&text_refs)
        .context("embedding template corpus")?;
    if vectors.len() != points.len() {
        bail!(
            "embedder returned {} vectors for {} templates",
            vectors.len(),
            points.len()
        );
    }

    let indexed_at = chrono::Utc::now().to_rfc3339();
    for (point, vector) in points.iter_mut().zip(vectors) {
        point.vector = vector;
        point.payload.indexed_at = indexed_at.clone();
    }

    store
        .upsert(collection, &points)
        .with_context(|| format!("upserting templates into '{collection}'"))?;

    info!(
        collection,
        templates = points.len(),
        "indexed template corpus"
    );
    Ok(IndexReport {
        templates_indexed: points.len(),
        collection: collection.to_string(),
    })
}
