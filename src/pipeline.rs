use chrono::Utc;
use serde::Serialize;
use std::fs;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::catalog::{CatalogIndex, CatalogSource};
use crate::decklist;
use crate::error::Result;
use crate::report::writers::{self, RunInfo};
use crate::report::{ResolutionReport, ResolutionSummary};
use crate::resolver::Resolver;

/// Result of a complete resolution run, returned to the CLI.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub catalog_records: usize,
    pub summary: ResolutionSummary,
    pub skipped_lines: usize,
    pub json_report: String,
    pub markdown_report: String,
}

pub struct ResolutionRun;

impl ResolutionRun {
    /// Run the whole flow: load the catalog, parse the decklist, resolve
    /// every query, and write the report artifacts.
    ///
    /// The catalog load is the only async step; resolution itself is
    /// synchronous and processes queries strictly in decklist order.
    #[instrument(skip(source), fields(decklist = %decklist_path))]
    pub async fn execute(
        source: Box<dyn CatalogSource>,
        decklist_path: &str,
        output_dir: &str,
    ) -> Result<RunResult> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("🚀 Starting resolution run {}", run_id);

        // Step 1: load the catalog snapshot
        info!("📚 Loading catalog from {}...", source.source_name());
        println!("📚 Loading catalog from {}...", source.source_name());
        let records = source.load().await?;
        println!("✅ Loaded {} catalog records", records.len());

        // Step 2: parse the decklist
        let parsed = decklist::parse_decklist(&fs::read_to_string(decklist_path)?);
        info!(
            "📄 Parsed {} queries from {} ({} lines skipped)",
            parsed.queries.len(),
            decklist_path,
            parsed.skipped.len()
        );
        println!(
            "📄 Parsed {} queries from {}",
            parsed.queries.len(),
            decklist_path
        );
        if !parsed.skipped.is_empty() {
            warn!("{} decklist lines were skipped", parsed.skipped.len());
        }

        // Step 3: index once, then resolve sequentially
        let catalog_records = records.len();
        let index = CatalogIndex::build(records);
        let resolver = Resolver::new(&index);

        info!("🔍 Resolving {} queries...", parsed.queries.len());
        println!("🔍 Resolving {} queries...", parsed.queries.len());
        let outcomes = resolver.resolve_all(&parsed.queries);
        let report = ResolutionReport::from_outcomes(outcomes);

        // Step 4: write artifacts
        let run = RunInfo {
            id: run_id,
            started_at,
            decklist: decklist_path.to_string(),
            catalog_source: source.source_name(),
            catalog_records,
        };
        let (json_report, markdown_report) =
            writers::write_reports(&run, &report, &parsed.skipped, output_dir)?;
        info!("💾 Saved reports to {} and {}", json_report, markdown_report);
        println!("💾 Saved reports to {} and {}", json_report, markdown_report);

        let summary = report.summary();
        writers::print_console_summary(&summary, parsed.skipped.len());

        Ok(RunResult {
            run_id,
            catalog_records,
            summary,
            skipped_lines: parsed.skipped.len(),
            json_report,
            markdown_report,
        })
    }
}
