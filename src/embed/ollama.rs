use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::sync::Mutex;
use tracing::debug;

use super::{Embedder, Embedding, l2_normalize};

const MAX_TEXT_BYTES: usize = 8192;

/// Embedding backend speaking Ollama's `/api/embed` endpoint.
///
/// The vector dimension is fixed by the model but not published up front, so
/// it is probed lazily on first use and cached behind a mutex: a concurrent
/// first call performs exactly one probe and later callers block until the
/// cached value is ready.
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    batch_size: usize,
    dimension: Mutex<Option<usize>>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbedder {
    pub fn new(base_url: &str, model: &str, batch_size: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            batch_size: batch_size.max(1),
            dimension: Mutex::new(None),
        }
    }

    fn embed_chunk(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        let input: Vec<&str> = texts.iter().map(|t| prepare_text(t)).collect();
        let url = format!("{}/api/embed", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "input": input,
        });
        debug!(count = texts.len(), model = %self.model, "embedding batch");

        let result = ureq::post(&url).send_json(&body);
        let mut response = match result {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(code)) => {
                bail!("embedding server at {} returned HTTP {code}", self.base_url);
            }
            Err(e) => {
                return Err(anyhow::anyhow!(e).context("embedding request failed"));
            }
        };

        let resp: EmbedResponse = response
            .body_mut()
            .read_json()
            .context("parsing embedding response")?;

        if resp.embeddings.len() != texts.len() {
            bail!(
                "embedding server returned {} vectors for {} inputs",
                resp.embeddings.len(),
                texts.len()
            );
        }

        // Normalize client-side; the index/query symmetry must not depend on
        // server behavior.
        let mut vectors = resp.embeddings;
        for v in &mut vectors {
            l2_normalize(v);
        }
        Ok(vectors)
    }
}

/// Substitute a single space for empty input (the server rejects empty
/// strings) and truncate over-long texts at a char boundary.
fn prepare_text(text: &str) -> &str {
    if text.is_empty() {
        return " ";
    }
    if text.len() <= MAX_TEXT_BYTES {
        return text;
    }
    let mut end = MAX_TEXT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl Embedder for OllamaEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut vectors = self.embed_chunk(&[text])?;
        Ok(vectors.remove(0))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        // Chunking is a throughput hint only; output is identical for any
        // batch size.
        let mut out = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            out.extend(self.embed_chunk(chunk)?);
        }
        Ok(out)
    }

    fn dimension(&self) -> Result<usize> {
        let mut cached = self
            .dimension
            .lock()
            .map_err(|_| anyhow::anyhow!("dimension cache poisoned"))?;
        if let Some(dim) = *cached {
            return Ok(dim);
        }
        let probe = self.embed("dimension probe")?;
        *cached = Some(probe.len());
        Ok(probe.len())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_text_maps_empty_to_space() {
        assert_eq!(prepare_text(""), " ");
    }

    #[test]
    fn prepare_text_keeps_short_text() {
        assert_eq!(prepare_text("hello"), "hello");
    }

    #[test]
    fn prepare_text_truncates_at_char_boundary() {
        // 4-byte scalar straddling the cutoff must not be split.
        let mut s = "a".repeat(MAX_TEXT_BYTES - 2);
        s.push('\u{1F600}');
        let out = prepare_text(&s);
        assert!(out.len() <= MAX_TEXT_BYTES);
        assert_eq!(out, "a".repeat(MAX_TEXT_BYTES - 2));
    }
}
