use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Write;
use tracing::info;

use crate::embed::Embedder;
use crate::search::select::{Selection, SelectionPolicy};
use crate::search::{TemplateMatch, search_templates};
use crate::store::VectorStore;
use crate::template::detect::detect_placeholders;
use crate::template::fill::fill_template;

/// Human-in-the-loop hooks for the assistant pipeline. Tests drive these
/// with a scripted implementation; the CLI uses stdin.
pub trait Prompter {
    /// Pick one of the candidate matches; returns a zero-based index.
    fn choose(&mut self, matches: &[TemplateMatch]) -> Result<usize>;
    /// Collect the value for one canonical field name.
    fn value_for(&mut self, field: &str) -> Result<String>;
}

pub struct AssistOutcome {
    pub chosen: TemplateMatch,
    pub fields: Vec<(String, String)>,
    pub document: String,
}

/// The full retrieval-and-fill pipeline: search, disambiguate, detect
/// placeholders, collect values, fill. Returns `None` when nothing matched.
pub fn run_assistant(
    query: &str,
    top_k: usize,
    policy: &SelectionPolicy,
    collection: &str,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
    prompter: &mut dyn Prompter,
) -> Result<Option<AssistOutcome>> {
    let matches = search_templates(query, top_k, collection, embedder, store)?;

    let chosen = match policy.decide(&matches) {
        Selection::NoMatch => return Ok(None),
        Selection::Auto(i) => matches[i].clone(),
        Selection::AskUser => {
            let i = prompter.choose(&matches)?;
            matches[i].clone()
        }
    };
    info!(template = %chosen.id, score = chosen.score, "template selected");

    let placeholders = detect_placeholders(&chosen.content);
    let mut fields = Vec::with_capacity(placeholders.len());
    for field in &placeholders {
        let value = prompter
            .value_for(field)
            .with_context(|| format!("collecting value for '{field}'"))?;
        fields.push((field.clone(), value));
    }

    let document = if fields.is_empty() {
        chosen.content.clone()
    } else {
        let values: HashMap<String, String> = fields.iter().cloned().collect();
        fill_template(&chosen.content, &values)?
    };

    Ok(Some(AssistOutcome {
        chosen,
        fields,
        document,
    }))
}

/// Interactive prompter over stdin/stdout. The read is the pipeline's only
/// suspension point and carries no internal timeout.
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .context("reading from stdin")?;
        Ok(line.trim().to_string())
    }
}

impl Prompter for StdinPrompter {
    fn choose(&mut self, matches: &[TemplateMatch]) -> Result<usize> {
        println!("Multiple relevant templates found. Please choose:");
        for (i, m) in matches.iter().enumerate() {
            println!("{}. {} | score={:.4} | {}", i + 1, m.id, m.score, snippet(&m.content, 120));
        }
        loop {
            print!("Enter choice [1-{}]: ", matches.len());
            std::io::stdout().flush().ok();
            if let Ok(idx) = self.read_line()?.parse::<usize>() {
                if (1..=matches.len()).contains(&idx) {
                    return Ok(idx - 1);
                }
            }
            println!("Invalid choice, try again.");
        }
    }

    fn value_for(&mut self, field: &str) -> Result<String> {
        print!("Enter {}: ", field.replace('_', " "));
        std::io::stdout().flush().ok();
        self.read_line()
    }
}

/// First `max` characters of `text`, with an ellipsis when truncated.
pub fn snippet(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}
