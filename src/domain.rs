use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A card record from a catalog snapshot.
///
/// Only the fields the resolver needs are typed; everything else the
/// snapshot carries (prices, oracle text, image URLs, ...) lands in `extra`
/// and is passed through to reports unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "set")]
    pub set_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_at: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One decklist entry as handed to the resolution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub name: String,
    pub set_code: String,
    /// Original text of the decklist line, kept for diagnostics.
    pub source_line: String,
    pub line_number: usize,
}

/// How a match was found. Name-only and partial matches are both reported
/// as `Fallback`; the engine only distinguishes them in its diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Fallback,
}

/// A query that resolved to a catalog record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matched {
    pub query: Query,
    pub record: CatalogRecord,
    pub tier: MatchTier,
}

/// A query no tier could resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unmatched {
    pub query: Query,
}

/// The outcome of resolving a single query. Every query yields exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched(Matched),
    Unmatched(Unmatched),
}

/// Canonical comparison form for names and set codes. Display output always
/// uses the catalog record's original casing, never this.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
