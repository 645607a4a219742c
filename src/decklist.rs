use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::Query;
use crate::error::Result;

/// Matches `4 Lightning Bolt (LEA)`, `4x Lightning Bolt (LEA)`, and
/// `Lightning Bolt (LEA)`. The quantity is accepted and discarded;
/// resolution works per name, not per copy.
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)x?\s+)?(.+?)\s*\(([A-Za-z0-9]{2,6})\)\s*$").unwrap()
});

/// A decklist line that could not be turned into a query.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Parser output: the queries for the engine plus the lines it refused.
/// Blank lines and comments are dropped silently and appear in neither.
#[derive(Debug, Default)]
pub struct ParsedDecklist {
    pub queries: Vec<Query>,
    pub skipped: Vec<SkippedLine>,
}

pub fn parse_decklist_file(path: impl AsRef<Path>) -> Result<ParsedDecklist> {
    let content = fs::read_to_string(path)?;
    Ok(parse_decklist(&content))
}

/// Parse decklist text into queries, one per non-comment line. Malformed
/// lines are collected (and logged) rather than aborting the run.
pub fn parse_decklist(text: &str) -> ParsedDecklist {
    let mut parsed = ParsedDecklist::default();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        match LINE_PATTERN.captures(line) {
            Some(caps) => {
                let name = caps[2].trim().to_string();
                let set_code = caps[3].to_string();
                debug!("Parsed line {}: '{}' ({})", line_number, name, set_code);
                parsed.queries.push(Query {
                    name,
                    set_code,
                    source_line: raw_line.to_string(),
                    line_number,
                });
            }
            None => {
                warn!(
                    "Skipping malformed decklist line {}: '{}'",
                    line_number, raw_line
                );
                parsed.skipped.push(SkippedLine {
                    line_number,
                    content: raw_line.to_string(),
                    reason: "expected '<count> <name> (<set>)' or '<name> (<set>)'".to_string(),
                });
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_with_quantity() {
        let parsed = parse_decklist("4 Lightning Bolt (LEA)");
        assert_eq!(parsed.queries.len(), 1);
        assert_eq!(parsed.queries[0].name, "Lightning Bolt");
        assert_eq!(parsed.queries[0].set_code, "LEA");
        assert_eq!(parsed.queries[0].line_number, 1);
    }

    #[test]
    fn test_parse_line_with_x_quantity_and_without_quantity() {
        let parsed = parse_decklist("2x Counterspell (ICE)\nSwords to Plowshares (STA)");
        assert_eq!(parsed.queries.len(), 2);
        assert_eq!(parsed.queries[0].name, "Counterspell");
        assert_eq!(parsed.queries[1].name, "Swords to Plowshares");
        assert_eq!(parsed.queries[1].line_number, 2);
    }

    #[test]
    fn test_comments_and_blanks_are_ignored() {
        let text = "# Sideboard\n\n// lands\n4 Island (UNF)\n";
        let parsed = parse_decklist(text);
        assert_eq!(parsed.queries.len(), 1);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_malformed_line_is_skipped_with_position() {
        let parsed = parse_decklist("4 Lightning Bolt (LEA)\nno set code here\n");
        assert_eq!(parsed.queries.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line_number, 2);
        assert_eq!(parsed.skipped[0].content, "no set code here");
    }

    #[test]
    fn test_variant_suffix_stays_in_name() {
        // The trailing parenthesized token is the set code; an earlier one
        // belongs to the card name.
        let parsed = parse_decklist("1 Relentless Rats (Showcase) (M21)");
        assert_eq!(parsed.queries.len(), 1);
        assert_eq!(parsed.queries[0].name, "Relentless Rats (Showcase)");
        assert_eq!(parsed.queries[0].set_code, "M21");
    }

    #[test]
    fn test_multi_face_name_parses() {
        let parsed = parse_decklist("1 Ballista Watcher // Ballista Wielder (VOW)");
        assert_eq!(parsed.queries.len(), 1);
        assert_eq!(
            parsed.queries[0].name,
            "Ballista Watcher // Ballista Wielder"
        );
    }

    #[test]
    fn test_source_line_preserves_original_text() {
        let parsed = parse_decklist("  3 Brainstorm (MH2)  ");
        assert_eq!(parsed.queries[0].source_line, "  3 Brainstorm (MH2)  ");
    }
}
