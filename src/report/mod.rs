pub mod writers;

use serde::Serialize;

use crate::domain::{MatchOutcome, MatchTier, Matched, Unmatched};

/// Accumulated outcomes for one resolution run. Matches and misses keep
/// the order their queries arrived in; no outcome is dropped or duplicated.
#[derive(Debug, Default, Serialize)]
pub struct ResolutionReport {
    pub matches: Vec<Matched>,
    pub unmatched: Vec<Unmatched>,
}

/// Derived counts for the console summary and the run artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionSummary {
    pub total_queries: usize,
    pub exact_matches: usize,
    pub fallback_matches: usize,
    pub unmatched: usize,
    /// Matched share of all queries, in percent. Zero for an empty run.
    pub match_rate: f64,
}

impl ResolutionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_outcomes(outcomes: impl IntoIterator<Item = MatchOutcome>) -> Self {
        let mut report = Self::new();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    /// File one outcome into its bucket. Pure accumulation; diagnostics
    /// around individual outcomes are the resolver's job.
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::Matched(matched) => self.matches.push(matched),
            MatchOutcome::Unmatched(unmatched) => self.unmatched.push(unmatched),
        }
    }

    pub fn summary(&self) -> ResolutionSummary {
        let exact_matches = self
            .matches
            .iter()
            .filter(|m| m.tier == MatchTier::Exact)
            .count();
        let fallback_matches = self.matches.len() - exact_matches;
        let total_queries = self.matches.len() + self.unmatched.len();

        let match_rate = if total_queries == 0 {
            0.0
        } else {
            self.matches.len() as f64 / total_queries as f64 * 100.0
        };

        ResolutionSummary {
            total_queries,
            exact_matches,
            fallback_matches,
            unmatched: self.unmatched.len(),
            match_rate,
        }
    }
}
