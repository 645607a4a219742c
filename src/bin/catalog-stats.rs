//! Catalog Snapshot Diagnostics
//!
//! Prints shape statistics for a catalog snapshot: record and set counts,
//! undated records, and exact (name, set) keys that occur more than once.
//! Duplicate keys are worth knowing about because the resolver picks the
//! first snapshot entry at the exact tier.
//!
//! Usage:
//!   cargo run --bin catalog-stats <snapshot.json>

use deck_resolver::catalog::CatalogIndex;
use deck_resolver::domain::CatalogRecord;
use std::collections::HashMap;
use std::env;
use std::fs;

fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "catalog/cards.json".to_string());

    let content = fs::read_to_string(&path).expect("Failed to read catalog snapshot");
    let records: Vec<CatalogRecord> =
        serde_json::from_str(&content).expect("Failed to parse catalog snapshot");

    let mut per_set: HashMap<&str, usize> = HashMap::new();
    let mut undated = 0usize;
    for record in &records {
        *per_set.entry(record.set_code.as_str()).or_default() += 1;
        if record.released_at.is_none() {
            undated += 1;
        }
    }

    println!("📚 Catalog: {}", path);
    println!("   Records: {}", records.len());
    println!("   Sets:    {}", per_set.len());
    println!("   Undated: {}", undated);

    let mut sets: Vec<(&str, usize)> = per_set.into_iter().collect();
    sets.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    println!("\n   Largest sets:");
    for (set_code, count) in sets.iter().take(10) {
        println!("   {:>6}  {}", set_code, count);
    }

    let index = CatalogIndex::build(records);
    let duplicates = index.duplicate_exact_keys();
    if duplicates.is_empty() {
        println!("\n✅ No duplicate (name, set) keys");
    } else {
        println!("\n⚠️  {} duplicate (name, set) keys:", duplicates.len());
        for (key, count) in duplicates.iter().take(20) {
            println!("   {}x  {}", count, key);
        }
        if duplicates.len() > 20 {
            println!("   ... and {} more", duplicates.len() - 20);
        }
    }
}
