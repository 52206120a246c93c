pub mod detect;
pub mod fill;

use regex::Regex;
use std::sync::LazyLock;

static BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z0-9_ ]{2,40})\}").unwrap());
static DOUBLE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[\s*([a-zA-Z0-9_ ]{2,40})\s*\]\]").unwrap());
static ANGLE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*([a-zA-Z0-9_ ]{2,40})\s*>").unwrap());
static ALL_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{3,}(?:_[A-Z]{3,})+)\b").unwrap());

/// The closed set of placeholder surface syntaxes: `{name}`, `[[name]]`,
/// `<name>`, and `ALL_CAPS_WITH_UNDERSCORES`. Detection and filling both
/// enumerate these variants, so a canonical field name can be mapped back
/// to every surface form it may take in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderSyntax {
    Braces,
    DoubleBrackets,
    AngleBrackets,
    AllCaps,
}

impl PlaceholderSyntax {
    pub const ALL: [PlaceholderSyntax; 4] = [
        PlaceholderSyntax::Braces,
        PlaceholderSyntax::DoubleBrackets,
        PlaceholderSyntax::AngleBrackets,
        PlaceholderSyntax::AllCaps,
    ];

    pub fn regex(&self) -> &'static Regex {
        match self {
            PlaceholderSyntax::Braces => &BRACES,
            PlaceholderSyntax::DoubleBrackets => &DOUBLE_BRACKETS,
            PlaceholderSyntax::AngleBrackets => &ANGLE_BRACKETS,
            PlaceholderSyntax::AllCaps => &ALL_CAPS,
        }
    }

    /// Regenerate the literal surface form of a canonical key under this
    /// syntax, for find-and-replace in the source text.
    pub fn surface(&self, key: &str) -> String {
        match self {
            PlaceholderSyntax::Braces => format!("{{{key}}}"),
            PlaceholderSyntax::DoubleBrackets => format!("[[{key}]]"),
            PlaceholderSyntax::AngleBrackets => format!("<{key}>"),
            PlaceholderSyntax::AllCaps => key.to_uppercase(),
        }
    }
}

/// Canonical field name: trimmed, lowercased, internal whitespace runs
/// joined with single underscores.
pub fn canonicalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
