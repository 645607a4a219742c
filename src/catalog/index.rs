use std::collections::HashMap;
use tracing::debug;

use crate::domain::{normalize, CatalogRecord};

/// Separates the normalized name from the normalized set code in exact
/// keys. Applied after normalization, so it cannot collide with leading or
/// trailing input noise.
const KEY_SEP: char = '|';

/// Lookup structures over one catalog snapshot.
///
/// Built in a single pass and read-only afterwards. Both maps hold indices
/// into the same owned record vector, so a record listed under its exact
/// key and under its name key is the same instance, not a copy. Duplicate
/// keys are retained in snapshot order, not deduplicated.
pub struct CatalogIndex {
    records: Vec<CatalogRecord>,
    exact: HashMap<String, Vec<usize>>,
    by_name: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Index a catalog snapshot. An empty snapshot is fine; lookups will
    /// simply return nothing.
    pub fn build(records: Vec<CatalogRecord>) -> Self {
        let mut exact: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            exact
                .entry(exact_key(&record.name, &record.set_code))
                .or_default()
                .push(position);
            by_name
                .entry(normalize(&record.name))
                .or_default()
                .push(position);
        }

        debug!(
            "Indexed {} records into {} exact keys and {} name keys",
            records.len(),
            exact.len(),
            by_name.len()
        );

        Self {
            records,
            exact,
            by_name,
        }
    }

    /// Records whose (name, set code) both match the query, in snapshot order.
    pub fn lookup_exact(&self, name: &str, set_code: &str) -> Vec<&CatalogRecord> {
        self.resolve_positions(self.exact.get(&exact_key(name, set_code)))
    }

    /// Records sharing the query's name across any set, in snapshot order.
    pub fn lookup_by_name(&self, name: &str) -> Vec<&CatalogRecord> {
        self.resolve_positions(self.by_name.get(&normalize(name)))
    }

    /// The full snapshot, for scans the keyed maps cannot answer.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact keys that map to more than one record. Used by diagnostics;
    /// the resolver itself keeps first-in-snapshot-wins semantics.
    pub fn duplicate_exact_keys(&self) -> Vec<(&str, usize)> {
        let mut duplicates: Vec<(&str, usize)> = self
            .exact
            .iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(key, positions)| (key.as_str(), positions.len()))
            .collect();
        duplicates.sort();
        duplicates
    }

    fn resolve_positions(&self, positions: Option<&Vec<usize>>) -> Vec<&CatalogRecord> {
        positions
            .map(|positions| positions.iter().map(|&p| &self.records[p]).collect())
            .unwrap_or_default()
    }
}

fn exact_key(name: &str, set_code: &str) -> String {
    format!("{}{}{}", normalize(name), KEY_SEP, normalize(set_code))
}
