use crate::domain::CatalogRecord;

/// Pick the most recently released record from a non-empty candidate set.
///
/// A record without a release date is treated as older than any dated one.
/// Ties on the date keep the candidate that appears first in the sequence,
/// so selection is reproducible for a fixed snapshot order.
///
/// Calling this with no candidates is an invariant breach in the caller,
/// not a recoverable condition.
pub fn most_recent<'a>(candidates: &[&'a CatalogRecord]) -> &'a CatalogRecord {
    assert!(
        !candidates.is_empty(),
        "recency selection requires at least one candidate"
    );

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        // Strictly greater only: equal dates keep the earlier candidate.
        // Option ordering puts None before any Some, which is exactly the
        // "absent date sorts as earliest" rule.
        if candidate.released_at > best.released_at {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn record(set_code: &str, released_at: Option<&str>) -> CatalogRecord {
        CatalogRecord {
            id: Uuid::new_v4(),
            name: "Lightning Bolt".to_string(),
            set_code: set_code.to_string(),
            released_at: released_at.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_picks_latest_release() {
        let a = record("lea", Some("1993-08-05"));
        let b = record("m20", Some("2019-07-12"));
        let c = record("2x2", Some("2022-07-08"));

        let picked = most_recent(&[&a, &c, &b]);
        assert_eq!(picked.set_code, "2x2");
    }

    #[test]
    fn test_missing_date_never_beats_a_dated_record() {
        let undated = record("mystery", None);
        let dated = record("lea", Some("1993-08-05"));

        assert_eq!(most_recent(&[&undated, &dated]).set_code, "lea");
        assert_eq!(most_recent(&[&dated, &undated]).set_code, "lea");
    }

    #[test]
    fn test_all_undated_keeps_first_candidate() {
        let a = record("aaa", None);
        let b = record("bbb", None);

        assert_eq!(most_recent(&[&a, &b]).set_code, "aaa");
    }

    #[test]
    fn test_date_tie_keeps_earlier_candidate() {
        let a = record("first", Some("2019-07-12"));
        let b = record("second", Some("2019-07-12"));

        assert_eq!(most_recent(&[&a, &b]).set_code, "first");
        assert_eq!(most_recent(&[&b, &a]).set_code, "second");
    }

    #[test]
    #[should_panic(expected = "at least one candidate")]
    fn test_empty_candidates_panic() {
        most_recent(&[]);
    }
}
