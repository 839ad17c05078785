//! Priority scoring for triage ordering
//!
//! Combines severity, vote count, and recency into a single integer used to
//! sort issues. Deterministic and total: unknown severity scores as moderate
//! rather than failing, defending against partially-migrated legacy data.
//!
//! The formula is additive and deliberately unclamped:
//! `round(severity + min(votes, 20) + max(0, 10 - age_in_days))`, giving a
//! natural range of roughly [30, 100].

use cfx_common::models::Severity;
use chrono::{DateTime, Utc};

/// Votes beyond this cap contribute nothing further (anti-gaming)
pub const MAX_VOTE_SCORE: u32 = 20;
/// Recency bonus for a freshly created issue, decaying to 0 over 10 days
pub const MAX_AGE_SCORE: f64 = 10.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Severity weight; `None` (unknown/legacy stored value) scores as moderate.
fn severity_score(severity: Option<Severity>) -> f64 {
    match severity {
        Some(Severity::Critical) => 70.0,
        Some(Severity::Minor) => 30.0,
        Some(Severity::Moderate) | None => 50.0,
    }
}

/// Compute the triage priority for an issue.
///
/// Recomputed from scratch on every call — idempotent given the same inputs
/// and evaluation time. Age is measured with fractional-day precision; issues
/// older than 10 days get an age score of exactly 0, never a penalty.
pub fn compute_priority(
    severity: Option<Severity>,
    votes: u32,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> i64 {
    let vote_score = votes.min(MAX_VOTE_SCORE) as f64;

    let age_in_days = (now - created_at).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;
    let age_score = (MAX_AGE_SCORE - age_in_days).max(0.0);

    (severity_score(severity) + vote_score + age_score).round() as i64
}

/// Convenience wrapper for callers holding a stored severity string.
/// Unrecognized values fall through to the moderate weight.
pub fn priority_for_stored(
    severity: &str,
    votes: u32,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> i64 {
    compute_priority(Severity::parse_lenient(severity), votes, created_at, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fresh_critical_issue_without_votes() {
        let now = Utc::now();
        // 70 severity + 0 votes + 10 recency
        assert_eq!(compute_priority(Some(Severity::Critical), 0, now, now), 80);
    }

    #[test]
    fn test_old_minor_issue_with_capped_votes() {
        let now = Utc::now();
        let created = now - Duration::days(10);
        // 30 severity + 20 vote cap + 0 age
        assert_eq!(compute_priority(Some(Severity::Minor), 25, created, now), 50);
    }

    #[test]
    fn test_votes_monotonic_until_cap() {
        let now = Utc::now();
        let mut previous = i64::MIN;
        for votes in 0..=MAX_VOTE_SCORE {
            let priority = compute_priority(Some(Severity::Moderate), votes, now, now);
            assert!(priority >= previous);
            previous = priority;
        }

        // Saturates: no further increase past the cap
        let at_cap = compute_priority(Some(Severity::Moderate), MAX_VOTE_SCORE, now, now);
        for votes in [21, 50, 10_000] {
            assert_eq!(compute_priority(Some(Severity::Moderate), votes, now, now), at_cap);
        }
    }

    #[test]
    fn test_age_decays_over_ten_days_then_flattens() {
        let now = Utc::now();
        let mut previous = i64::MAX;
        for days in 0..=10 {
            let created = now - Duration::days(days);
            let priority = compute_priority(Some(Severity::Moderate), 0, created, now);
            assert!(priority < previous, "day {} should score below day {}", days, days - 1);
            previous = priority;
        }

        // Flat beyond day 10, never a penalty
        let day_10 = compute_priority(Some(Severity::Moderate), 0, now - Duration::days(10), now);
        let day_30 = compute_priority(Some(Severity::Moderate), 0, now - Duration::days(30), now);
        assert_eq!(day_10, day_30);
        assert_eq!(day_30, 50);
    }

    #[test]
    fn test_fractional_age_precision() {
        let now = Utc::now();
        // 12 hours old: 10 - 0.5 = 9.5 age score, 50 + 9.5 rounds to 60
        let created = now - Duration::hours(12);
        assert_eq!(compute_priority(Some(Severity::Moderate), 0, created, now), 60);
    }

    #[test]
    fn test_unknown_severity_scores_as_moderate() {
        let now = Utc::now();
        let moderate = compute_priority(Some(Severity::Moderate), 3, now, now);
        assert_eq!(compute_priority(None, 3, now, now), moderate);
        assert_eq!(priority_for_stored("urgent", 3, now, now), moderate);
        assert_eq!(priority_for_stored("", 3, now, now), moderate);
    }

    #[test]
    fn test_stored_severity_strings() {
        let now = Utc::now();
        assert_eq!(priority_for_stored("critical", 0, now, now), 80);
        assert_eq!(priority_for_stored("minor", 0, now, now), 40);
    }

    #[test]
    fn test_idempotent_for_fixed_evaluation_time() {
        let now = Utc::now();
        let created = now - Duration::days(3);
        let first = compute_priority(Some(Severity::Critical), 7, created, now);
        let second = compute_priority(Some(Severity::Critical), 7, created, now);
        assert_eq!(first, second);
    }
}
