//! Issue-side triage fields and write-triggered priority recompute
//!
//! Models the slice of an issue record this core owns. Priority is
//! recomputed at specific write points (creation, vote, severity change),
//! matching how the surrounding services persist it: the stored value's age
//! component is only as fresh as the last write. Callers that want a fresh
//! value without writing use [`TriageRecord::current_priority`].

use crate::priority::compute_priority;
use cfx_common::models::{Category, ClassificationResult, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Triage-owned fields of an issue record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRecord {
    pub category: Category,
    pub severity: Severity,
    /// Classification confidence at creation time (unnormalized scale)
    pub confidence: f64,
    /// Model or heuristic that produced the classification
    pub model: String,
    pub votes: u32,
    pub created_at: DateTime<Utc>,
    /// Priority as of the last write point
    pub priority: i64,
}

impl TriageRecord {
    /// Merge a classification into a new issue record and compute the
    /// initial priority.
    pub fn new(
        classification: &ClassificationResult,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut record = Self {
            category: classification.category,
            severity: classification.severity,
            confidence: classification.confidence,
            model: classification.model.clone(),
            votes: 0,
            created_at,
            priority: 0,
        };
        record.refresh_priority(now);
        record
    }

    /// Register an upvote and recompute priority.
    pub fn record_vote(&mut self, now: DateTime<Utc>) {
        self.votes += 1;
        self.refresh_priority(now);
    }

    /// Update severity, recomputing priority only when it actually changed.
    pub fn set_severity(&mut self, severity: Severity, now: DateTime<Utc>) {
        if self.severity != severity {
            self.severity = severity;
            self.refresh_priority(now);
        }
    }

    /// Recompute and store the priority as of `now`.
    pub fn refresh_priority(&mut self, now: DateTime<Utc>) {
        self.priority = compute_priority(Some(self.severity), self.votes, self.created_at, now);
    }

    /// Priority as of `now`, without touching the stored value.
    pub fn current_priority(&self, now: DateTime<Utc>) -> i64 {
        compute_priority(Some(self.severity), self.votes, self.created_at, now)
    }
}
