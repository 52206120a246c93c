use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub qdrant: QdrantConfig,
    pub embedding: EmbeddingConfig,
    pub templates: TemplatesConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub url: String,
    pub model: String,
    pub batch_size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Score gap below which the assistant asks instead of auto-selecting.
    pub closeness_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant: QdrantConfig {
                url: "http://localhost:6333".into(),
                api_key: None,
                collection: "legal_templates".into(),
            },
            embedding: EmbeddingConfig {
                url: "http://localhost:11434".into(),
                model: "all-minilm".into(),
                batch_size: 64,
            },
            templates: TemplatesConfig {
                dir: PathBuf::from("data/templates"),
            },
            search: SearchConfig {
                closeness_threshold: 0.03,
            },
        }
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Config::default().qdrant
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Config::default().embedding
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Config::default().templates
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Config::default().search
    }
}

impl Config {
    /// Load from a TOML file when it exists, falling back to defaults, then
    /// apply environment overrides and validate. Validation failures are
    /// fatal before any remote call is attempted.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("parsing config from {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Environment overrides, injected as a lookup so tests can script them.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get("QDRANT_URL") {
            self.qdrant.url = url;
        }
        if let Some(key) = get("QDRANT_API_KEY") {
            self.qdrant.api_key = if key.is_empty() { None } else { Some(key) };
        }
        if let Some(collection) = get("QDRANT_COLLECTION") {
            self.qdrant.collection = collection;
        }
        if let Some(url) = get("EMBEDDING_URL") {
            self.embedding.url = url;
        }
        if let Some(model) = get("EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Some(dir) = get("TEMPLATE_DIR") {
            self.templates.dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.qdrant.url.trim().is_empty() {
            bail!("qdrant.url must not be empty");
        }
        if self.qdrant.collection.trim().is_empty() {
            bail!("qdrant.collection must not be empty");
        }
        if self.embedding.url.trim().is_empty() {
            bail!("embedding.url must not be empty");
        }
        if self.embedding.model.trim().is_empty() {
            bail!("embedding.model must not be empty");
        }
        if self.embedding.batch_size < 1 {
            bail!("embedding.batch_size must be at least 1");
        }
        if self.search.closeness_threshold < 0.0 {
            bail!("search.closeness_threshold must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.qdrant.collection, "legal_templates");
        assert_eq!(config.embedding.batch_size, 64);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [qdrant]
            collection = "contracts"
            "#,
        )
        .unwrap();
        assert_eq!(config.qdrant.collection, "contracts");
        assert_eq!(config.qdrant.url, "http://localhost:6333");
        assert_eq!(config.embedding.model, "all-minilm");
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = Config::default();
        config.apply_env(|name| match name {
            "QDRANT_URL" => Some("http://qdrant.internal:6333".into()),
            "QDRANT_API_KEY" => Some("secret".into()),
            "EMBEDDING_MODEL" => Some("nomic-embed-text".into()),
            "TEMPLATE_DIR" => Some("/srv/templates".into()),
            _ => None,
        });
        assert_eq!(config.qdrant.url, "http://qdrant.internal:6333");
        assert_eq!(config.qdrant.api_key.as_deref(), Some("secret"));
        assert_eq!(config.embedding.model, "nomic-embed-text");
        assert_eq!(config.templates.dir, PathBuf::from("/srv/templates"));
        // Untouched fields keep their values.
        assert_eq!(config.qdrant.collection, "legal_templates");
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = Config::default();
        config.embedding.batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.qdrant.collection = " ".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.closeness_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("lexdraft.toml")).unwrap();
        assert_eq!(config.embedding.url, "http://localhost:11434");
    }
}
