use anyhow::{Result, bail};
use std::collections::HashMap;

use super::PlaceholderSyntax;

struct Span<'a> {
    start: usize,
    end: usize,
    field: &'a str,
    needle: String,
    value: &'a str,
}

/// Substitute values into a template. For every canonical key the four
/// surface forms are regenerated and located as literal substrings of the
/// *original* text; all spans are planned up front and spliced in a single
/// pass, so the output never depends on map iteration order. Overlapping
/// spans (one key's literal form inside another's) are a collision and fail
/// with an error naming both fields.
pub fn fill_template(text: &str, values: &HashMap<String, String>) -> Result<String> {
    let mut keys: Vec<&str> = values.keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();

    let mut spans: Vec<Span> = Vec::new();
    for key in keys {
        let value = values[key].as_str();
        for syntax in PlaceholderSyntax::ALL {
            let needle = syntax.surface(key);
            if needle.is_empty() {
                continue;
            }
            for (start, _) in text.match_indices(&needle) {
                spans.push(Span {
                    start,
                    end: start + needle.len(),
                    field: key,
                    needle: needle.clone(),
                    value,
                });
            }
        }
    }

    spans.sort_by_key(|s| (s.start, s.end));
    for pair in spans.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if b.start < a.end {
            bail!(
                "placeholder collision: '{}' (field '{}') overlaps '{}' (field '{}') at byte {}",
                a.needle,
                a.field,
                b.needle,
                b.field,
                b.start
            );
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in &spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(span.value);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}
