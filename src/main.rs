use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lexdraft::assistant::{StdinPrompter, run_assistant, snippet};
use lexdraft::config::Config;
use lexdraft::corpus::{import, seed};
use lexdraft::embed::Embedder;
use lexdraft::embed::ollama::OllamaEmbedder;
use lexdraft::index::index_templates;
use lexdraft::search::select::SelectionPolicy;
use lexdraft::store::qdrant::QdrantStore;
use lexdraft::{detect_placeholders, fill_template, search_templates};

#[derive(Parser)]
#[command(name = "lexdraft", version, about = "Semantic search and filling for legal templates")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = "lexdraft.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build or refresh the template collection from the corpus directory
    Index {
        /// Corpus directory (overrides the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Semantic search over indexed templates
    Search {
        /// Search query
        query: String,
        /// Number of results
        #[arg(long, default_value_t = 3)]
        top_k: usize,
    },
    /// Interactive pipeline: search, choose, fill placeholders
    Assist {
        /// What the user wants, e.g. "rent agreement" or "NDA"
        query: String,
        /// Number of candidate templates
        #[arg(long, default_value_t = 5)]
        top_k: usize,
    },
    /// Print the placeholders detected in a template file
    Fields {
        /// Template file
        file: PathBuf,
    },
    /// Fill a template file non-interactively
    Fill {
        /// Template file
        file: PathBuf,
        /// Field values as key=value
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// Embed one text and print the vector dimension and a preview
    Embed {
        /// Text to embed
        text: String,
    },
    /// Import external .txt documents into the corpus directory
    Import {
        /// Root folder to scan for .txt files
        path: PathBuf,
        /// Cap on the number of files imported
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate a sample template corpus
    Seed {
        /// Number of templates to ensure
        #[arg(long, default_value_t = 100)]
        count: usize,
    },
    /// Show collection status
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexdraft=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Index { dir } => {
            let dir = dir.unwrap_or_else(|| config.templates.dir.clone());
            let embedder = embedder_from(&config);
            let store = store_from(&config);
            let report = index_templates(&dir, &config.qdrant.collection, &embedder, &store)?;
            println!(
                "Upserted {} templates into collection '{}'.",
                report.templates_indexed, report.collection
            );
        }
        Commands::Search { query, top_k } => {
            let embedder = embedder_from(&config);
            let store = store_from(&config);
            let results =
                search_templates(&query, top_k, &config.qdrant.collection, &embedder, &store)?;
            if results.is_empty() {
                println!("No matching templates found.");
            }
            for (i, r) in results.iter().enumerate() {
                println!("#{} | score={:.4} | id={}", i + 1, r.score, r.id);
                println!("{}", snippet(&r.content, 240));
                println!();
            }
        }
        Commands::Assist { query, top_k } => {
            let embedder = embedder_from(&config);
            let store = store_from(&config);
            let policy = SelectionPolicy {
                closeness_threshold: config.search.closeness_threshold,
            };
            let mut prompter = StdinPrompter;
            match run_assistant(
                &query,
                top_k,
                &policy,
                &config.qdrant.collection,
                &embedder,
                &store,
                &mut prompter,
            )? {
                None => println!("No matching templates found."),
                Some(outcome) if outcome.fields.is_empty() => {
                    println!("Template has no detectable placeholders; best match:");
                    println!("\n--- Template ---\n");
                    println!("{}", outcome.document);
                }
                Some(outcome) => {
                    println!("\n--- Generated Document ---\n");
                    println!("{}", outcome.document);
                }
            }
        }
        Commands::Fields { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading template {}", file.display()))?;
            for field in detect_placeholders(&text) {
                println!("{field}");
            }
        }
        Commands::Fill { file, set } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading template {}", file.display()))?;
            let mut values = HashMap::new();
            for pair in &set {
                let (key, value) = parse_set(pair)?;
                values.insert(key, value);
            }
            println!("{}", fill_template(&text, &values)?);
        }
        Commands::Embed { text } => {
            let embedder = embedder_from(&config);
            let vector = embedder.embed(&text)?;
            let preview: Vec<f32> = vector.iter().take(8).copied().collect();
            println!("dim={} preview={preview:?}", vector.len());
        }
        Commands::Import { path, limit } => {
            let copied = import::import_tree(&path, &config.templates.dir, limit)?;
            println!(
                "Imported {copied} file(s) into {}",
                config.templates.dir.display()
            );
        }
        Commands::Seed { count } => {
            let created = seed::seed_corpus(&config.templates.dir, count)?;
            println!(
                "Created {created} new templates in {}",
                config.templates.dir.display()
            );
        }
        Commands::Status => {
            let store = store_from(&config);
            let info = store.collection_info(&config.qdrant.collection)?;
            println!("collection: {}", config.qdrant.collection);
            println!("points: {}", info.points_count);
            println!("vector size: {}", info.vector_size);
        }
    }

    Ok(())
}

fn embedder_from(config: &Config) -> OllamaEmbedder {
    OllamaEmbedder::new(
        &config.embedding.url,
        &config.embedding.model,
        config.embedding.batch_size,
    )
}

fn store_from(config: &Config) -> QdrantStore {
    QdrantStore::new(&config.qdrant.url, config.qdrant.api_key.as_deref())
}

fn parse_set(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => bail!("invalid --set '{pair}', expected key=value"),
    }
}
