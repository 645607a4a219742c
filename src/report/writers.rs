use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::decklist::SkippedLine;
use crate::error::Result;
use crate::report::{ResolutionReport, ResolutionSummary};

/// Identifies one resolution run in the emitted artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub decklist: String,
    pub catalog_source: String,
    pub catalog_records: usize,
}

/// The full JSON artifact: run identity, derived summary, both outcome
/// buckets, and the decklist lines the parser refused.
#[derive(Serialize)]
struct RunArtifact<'a> {
    run: &'a RunInfo,
    summary: &'a ResolutionSummary,
    #[serde(flatten)]
    report: &'a ResolutionReport,
    skipped_lines: &'a [SkippedLine],
}

/// Write the JSON and Markdown artifacts for a finished run. Returns the
/// two file paths. Both share one timestamped stem so they sort together
/// in the output directory.
pub fn write_reports(
    run: &RunInfo,
    report: &ResolutionReport,
    skipped: &[SkippedLine],
    output_dir: &str,
) -> Result<(String, String)> {
    fs::create_dir_all(output_dir)?;

    let summary = report.summary();
    let stem = format!("resolution_{}", run.started_at.format("%Y%m%d_%H%M%S"));

    let artifact = RunArtifact {
        run,
        summary: &summary,
        report,
        skipped_lines: skipped,
    };
    let json_path = Path::new(output_dir).join(format!("{stem}.json"));
    fs::write(&json_path, serde_json::to_string_pretty(&artifact)?)?;

    let markdown_path = Path::new(output_dir).join(format!("{stem}.md"));
    fs::write(&markdown_path, render_markdown(run, report, &summary, skipped))?;

    Ok((
        json_path.to_string_lossy().to_string(),
        markdown_path.to_string_lossy().to_string(),
    ))
}

fn render_markdown(
    run: &RunInfo,
    report: &ResolutionReport,
    summary: &ResolutionSummary,
    skipped: &[SkippedLine],
) -> String {
    let mut out = String::new();

    out.push_str("# Decklist Resolution Report\n\n");
    out.push_str(&format!("- Run: `{}`\n", run.id));
    out.push_str(&format!(
        "- Started: {}\n",
        run.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("- Decklist: `{}`\n", run.decklist));
    out.push_str(&format!(
        "- Catalog: `{}` ({} records)\n\n",
        run.catalog_source, run.catalog_records
    ));

    out.push_str("## Summary\n\n");
    out.push_str("| Queries | Exact | Fallback | Unmatched | Match rate |\n");
    out.push_str("|---|---|---|---|---|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {:.1}% |\n\n",
        summary.total_queries,
        summary.exact_matches,
        summary.fallback_matches,
        summary.unmatched,
        summary.match_rate
    ));

    out.push_str("## Matches\n\n");
    if report.matches.is_empty() {
        out.push_str("None.\n\n");
    } else {
        out.push_str("| Line | Requested | Resolved to | Set | Released | Tier |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for m in &report.matches {
            out.push_str(&format!(
                "| {} | {} ({}) | {} | {} | {} | {:?} |\n",
                m.query.line_number,
                m.query.name,
                m.query.set_code,
                m.record.name,
                m.record.set_code,
                m.record
                    .released_at
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                m.tier
            ));
        }
        out.push('\n');
    }

    out.push_str("## Unmatched\n\n");
    if report.unmatched.is_empty() {
        out.push_str("None.\n\n");
    } else {
        for u in &report.unmatched {
            out.push_str(&format!(
                "- Line {}: `{}`\n",
                u.query.line_number,
                u.query.source_line.trim()
            ));
        }
        out.push('\n');
    }

    if !skipped.is_empty() {
        out.push_str("## Skipped lines\n\n");
        for s in skipped {
            out.push_str(&format!(
                "- Line {}: `{}` ({})\n",
                s.line_number,
                s.content.trim(),
                s.reason
            ));
        }
        out.push('\n');
    }

    out
}

/// End-of-run console output, kept apart from tracing so it survives any
/// log filtering.
pub fn print_console_summary(summary: &ResolutionSummary, skipped_count: usize) {
    println!("\n📊 Resolution Results:");
    println!("   Queries:   {}", summary.total_queries);
    println!("   Exact:     {}", summary.exact_matches);
    println!("   Fallback:  {}", summary.fallback_matches);
    println!("   Unmatched: {}", summary.unmatched);
    println!("   Match rate: {:.1}%", summary.match_rate);
    if skipped_count > 0 {
        println!("   ⚠️  Skipped {} malformed decklist line(s)", skipped_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogRecord, MatchOutcome, MatchTier, Matched, Query, Unmatched};

    fn sample_run() -> RunInfo {
        RunInfo {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            decklist: "deck.txt".to_string(),
            catalog_source: "cards.json".to_string(),
            catalog_records: 2,
        }
    }

    fn sample_report() -> ResolutionReport {
        let record = CatalogRecord {
            id: Uuid::new_v4(),
            name: "Lightning Bolt".to_string(),
            set_code: "m20".to_string(),
            released_at: None,
            extra: serde_json::Map::new(),
        };
        ResolutionReport::from_outcomes(vec![
            MatchOutcome::Matched(Matched {
                query: Query {
                    name: "Lightning Bolt".to_string(),
                    set_code: "XXX".to_string(),
                    source_line: "4 Lightning Bolt (XXX)".to_string(),
                    line_number: 1,
                },
                record,
                tier: MatchTier::Fallback,
            }),
            MatchOutcome::Unmatched(Unmatched {
                query: Query {
                    name: "Ghost Card".to_string(),
                    set_code: "abc".to_string(),
                    source_line: "1 Ghost Card (ABC)".to_string(),
                    line_number: 2,
                },
            }),
        ])
    }

    #[test]
    fn test_markdown_lists_matches_and_misses() {
        let report = sample_report();
        let markdown = render_markdown(&sample_run(), &report, &report.summary(), &[]);

        assert!(markdown.contains("| 1 | Lightning Bolt (XXX) | Lightning Bolt | m20 |"));
        assert!(markdown.contains("- Line 2: `1 Ghost Card (ABC)`"));
        assert!(markdown.contains("| 2 | 0 | 1 | 1 | 50.0% |"));
        assert!(!markdown.contains("## Skipped lines"));
    }

    #[test]
    fn test_markdown_includes_skipped_section_when_present() {
        let report = sample_report();
        let skipped = vec![SkippedLine {
            line_number: 3,
            content: "bad line".to_string(),
            reason: "no set code".to_string(),
        }];
        let markdown = render_markdown(&sample_run(), &report, &report.summary(), &skipped);

        assert!(markdown.contains("## Skipped lines"));
        assert!(markdown.contains("- Line 3: `bad line` (no set code)"));
    }

    #[test]
    fn test_write_reports_emits_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let (json_path, markdown_path) = write_reports(
            &sample_run(),
            &report,
            &[],
            dir.path().to_str().unwrap(),
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["summary"]["total_queries"], 2);
        assert_eq!(json["matches"].as_array().unwrap().len(), 1);
        assert_eq!(json["unmatched"].as_array().unwrap().len(), 1);
        assert!(fs::read_to_string(&markdown_path)
            .unwrap()
            .starts_with("# Decklist Resolution Report"));
    }
}
