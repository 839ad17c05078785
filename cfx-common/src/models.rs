//! Shared domain models for CivicFix services
//!
//! These types form the contract between the triage core, the persistence
//! layer, and the HTTP layer: the enum string forms below are the forms
//! stored and exposed verbatim by those collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single prediction from the external image-label classifier.
///
/// Predictions arrive as an ordered sequence, highest score first. The
/// ordering is the classifier's own ranking and is trusted as-is; the triage
/// core never re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrediction {
    /// Free-form label text from the classifier (not civic-issue aware)
    pub label: String,
    /// Model confidence in [0, 1]
    pub score: f64,
}

impl LabelPrediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Closed civic-issue taxonomy.
///
/// Adding a category requires a matching keyword-table entry in the triage
/// configuration; the mapping algorithm itself is category-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pothole,
    Garbage,
    BrokenLight,
    WaterLeakage,
    Graffiti,
    Other,
}

impl Category {
    /// Stored/wire string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pothole => "pothole",
            Category::Garbage => "garbage",
            Category::BrokenLight => "broken_light",
            Category::WaterLeakage => "water_leakage",
            Category::Graffiti => "graffiti",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue severity, derived during classification.
///
/// Never user-supplied at classification time; authorized actors may edit it
/// later through the issue-update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Critical,
}

impl Severity {
    /// Stored/wire string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }

    /// Lenient parse for stored values. Returns `None` for anything
    /// unrecognized so callers can apply their own default (the priority
    /// scorer treats `None` as moderate, defending against legacy data).
    pub fn parse_lenient(value: &str) -> Option<Severity> {
        match value.trim().to_lowercase().as_str() {
            "minor" => Some(Severity::Minor),
            "moderate" => Some(Severity::Moderate),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one classification attempt.
///
/// A value object: built once per attempt and never mutated. Each
/// reclassification produces a fresh instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning category (or `other` when nothing cleared the threshold)
    pub category: Category,
    /// Accumulated position-and-confidence-weighted score. Additive and
    /// unnormalized, so it may exceed 1.0; it is not a probability.
    pub confidence: f64,
    /// Severity derived from the accumulated score
    pub severity: Severity,
    /// Top predictions copied verbatim, retained for audit
    pub raw_labels: Vec<LabelPrediction>,
    /// Identifier of the model (or fallback heuristic) that produced this
    pub model: String,
    /// Human-readable diagnostic note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
