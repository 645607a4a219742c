pub mod recency;

use tracing::{debug, info, warn};

use crate::catalog::CatalogIndex;
use crate::domain::{normalize, CatalogRecord, MatchOutcome, MatchTier, Matched, Query, Unmatched};

/// Resolves queries against one indexed catalog snapshot.
///
/// Tiers are tried in order and the first tier that yields a candidate
/// terminates the query: exact (name, set) lookup, then name-only lookup
/// with most-recent selection, then a full-snapshot substring scan. A miss
/// after all three is a first-class `Unmatched` outcome, never an error.
pub struct Resolver<'a> {
    index: &'a CatalogIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a CatalogIndex) -> Self {
        Self { index }
    }

    /// Resolve queries sequentially in input order. Resolutions are
    /// independent; order only matters for diagnostics and report layout.
    pub fn resolve_all(&self, queries: &[Query]) -> Vec<MatchOutcome> {
        queries.iter().map(|query| self.resolve(query)).collect()
    }

    pub fn resolve(&self, query: &Query) -> MatchOutcome {
        // Tier 1: exact (name, set) hit. First record in snapshot order
        // wins; a well-formed snapshot has one record per exact key, so no
        // recency selection here.
        let exact = self.index.lookup_exact(&query.name, &query.set_code);
        if let Some(record) = exact.first() {
            debug!(
                "Exact match for '{}' ({}) at line {}",
                query.name, query.set_code, query.line_number
            );
            return MatchOutcome::Matched(Matched {
                query: query.clone(),
                record: (*record).clone(),
                tier: MatchTier::Exact,
            });
        }

        // Tier 2: the name exists but under other sets. Prefer the most
        // recent printing.
        let same_name = self.index.lookup_by_name(&query.name);
        if !same_name.is_empty() {
            let record = recency::most_recent(&same_name);
            info!(
                "'{}' not found in set '{}' (line {}); using printing from '{}' released {}",
                query.name,
                query.set_code,
                query.line_number,
                record.set_code,
                record
                    .released_at
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            );
            return MatchOutcome::Matched(Matched {
                query: query.clone(),
                record: record.clone(),
                tier: MatchTier::Fallback,
            });
        }

        // Tier 3: naming drift (variant suffixes, multi-face separators).
        // Bidirectional containment over the whole snapshot, most recent
        // candidate wins.
        if let Some(record) = self.partial_match(query) {
            info!(
                "Partial name match for '{}' (line {}): matched catalog name '{}' from '{}'",
                query.name, query.line_number, record.name, record.set_code
            );
            return MatchOutcome::Matched(Matched {
                query: query.clone(),
                record: record.clone(),
                tier: MatchTier::Fallback,
            });
        }

        warn!(
            "No match for '{}' ({}) at line {}",
            query.name, query.set_code, query.line_number
        );
        MatchOutcome::Unmatched(Unmatched {
            query: query.clone(),
        })
    }

    /// Scan the entire snapshot for names containing the query name or
    /// contained by it. Equal names are excluded: tier 2 already failed, so
    /// an equal name here could only be a contains-but-not-equal artifact.
    fn partial_match(&self, query: &Query) -> Option<&'a CatalogRecord> {
        let query_name = normalize(&query.name);
        let candidates: Vec<&CatalogRecord> = self
            .index
            .records()
            .iter()
            .filter(|record| {
                let catalog_name = normalize(&record.name);
                catalog_name != query_name
                    && (catalog_name.contains(&query_name) || query_name.contains(&catalog_name))
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }
        Some(recency::most_recent(&candidates))
    }
}
