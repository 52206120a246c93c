use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ScoredPoint, TemplatePayload, TemplatePoint, VectorStore};

/// Qdrant REST client. No internal retries or timeouts; transport defaults
/// govern and failures surface to the caller.
pub struct QdrantStore {
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug)]
pub struct CollectionInfo {
    pub points_count: u64,
    pub vector_size: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<RawHit>,
}

#[derive(Deserialize)]
struct RawHit {
    id: Value,
    score: f32,
    payload: Option<TemplatePayload>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct InfoResponse {
    result: InfoResult,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct InfoResult {
    points_count: u64,
    config: InfoConfig,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct InfoConfig {
    params: InfoParams,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct InfoParams {
    vectors: InfoVectors,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct InfoVectors {
    size: usize,
}

impl QdrantStore {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.to_string()),
        }
    }

    fn get(&self, path: &str) -> ureq::RequestBuilder<ureq::typestate::WithoutBody> {
        self.with_key(ureq::get(format!("{}{path}", self.base_url)))
    }

    fn put(&self, path: &str) -> ureq::RequestBuilder<ureq::typestate::WithBody> {
        self.with_key(ureq::put(format!("{}{path}", self.base_url)))
    }

    fn post(&self, path: &str) -> ureq::RequestBuilder<ureq::typestate::WithBody> {
        self.with_key(ureq::post(format!("{}{path}", self.base_url)))
    }

    fn with_key<B>(&self, req: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        match &self.api_key {
            Some(key) => req.header("api-key", key),
            None => req,
        }
    }

    /// Point count and vector size for the status command.
    pub fn collection_info(&self, name: &str) -> Result<CollectionInfo> {
        let mut response = self
            .get(&format!("/collections/{name}"))
            .call()
            .with_context(|| format!("fetching info for collection '{name}'"))?;
        let info: InfoResponse = response
            .body_mut()
            .read_json()
            .context("parsing collection info")?;
        Ok(CollectionInfo {
            points_count: info.result.points_count,
            vector_size: info.result.config.params.vectors.size,
        })
    }
}

impl VectorStore for QdrantStore {
    fn collection_exists(&self, name: &str) -> Result<bool> {
        match self.get(&format!("/collections/{name}")).call() {
            Ok(_) => Ok(true),
            // 404 is a confirmed "absent"; anything else is a failed check
            // and must not be mistaken for absence.
            Err(ureq::Error::StatusCode(404)) => Ok(false),
            Err(ureq::Error::StatusCode(code)) => {
                bail!("qdrant returned HTTP {code} checking collection '{name}'")
            }
            Err(e) => Err(anyhow::anyhow!(e).context("collection existence check failed")),
        }
    }

    fn create_collection(&self, name: &str, dimension: usize) -> Result<()> {
        let body = serde_json::json!({
            "vectors": { "size": dimension, "distance": "Cosine" }
        });
        self.put(&format!("/collections/{name}"))
            .send_json(&body)
            .with_context(|| format!("creating collection '{name}'"))?;
        Ok(())
    }

    fn upsert(&self, name: &str, points: &[TemplatePoint]) -> Result<()> {
        let body = serde_json::json!({
            "points": points
                .iter()
                .map(|p| serde_json::json!({
                    "id": p.id.to_string(),
                    "vector": p.vector,
                    "payload": p.payload,
                }))
                .collect::<Vec<_>>()
        });
        debug!(collection = name, count = points.len(), "upserting points");
        self.put(&format!("/collections/{name}/points?wait=true"))
            .send_json(&body)
            .with_context(|| format!("upserting {} points into '{name}'", points.len()))?;
        Ok(())
    }

    fn search(&self, name: &str, vector: &[f32], limit: usize) -> Result<Vec<ScoredPoint>> {
        let body = serde_json::json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });
        let mut response = self
            .post(&format!("/collections/{name}/points/search"))
            .send_json(&body)
            .with_context(|| format!("searching collection '{name}'"))?;
        let parsed: SearchResponse = response
            .body_mut()
            .read_json()
            .context("parsing search response")?;

        Ok(parsed
            .result
            .into_iter()
            .map(|hit| ScoredPoint {
                // Qdrant ids may come back as strings or integers.
                id: match hit.id {
                    Value::String(s) => s,
                    other => other.to_string(),
                },
                score: hit.score,
                payload: hit.payload,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_parses_string_and_int_ids() {
        let raw = r#"{"result":[
            {"id":"1d2c3a44-0000-5000-8000-000000000000","score":0.91,
             "payload":{"template_id":"nda.txt","content":"NDA body"}},
            {"id":42,"score":0.80}
        ]}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.result.len(), 2);
        assert_eq!(parsed.result[1].id, serde_json::json!(42));
        assert!(parsed.result[1].payload.is_none());
    }

    #[test]
    fn info_response_tolerates_missing_fields() {
        let parsed: InfoResponse = serde_json::from_str(r#"{"result":{}}"#).unwrap();
        assert_eq!(parsed.result.points_count, 0);
        assert_eq!(parsed.result.config.params.vectors.size, 0);
    }
}
