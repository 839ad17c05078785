//! Category mapping from generic classifier labels
//!
//! Converts the ordered label output of a generic image classifier into one
//! of the fixed civic-issue categories, with an accumulated confidence score
//! and a derived severity. Pure function over its input and the configured
//! keyword table; no I/O, no shared mutable state.

use crate::config::TriageConfig;
use cfx_common::models::{Category, ClassificationResult, LabelPrediction, Severity};
use cfx_common::{Error, Result};
use tracing::debug;

/// Category mapper
///
/// Holds an immutable [`TriageConfig`] captured at construction. Safe to
/// share across concurrent request handlers.
pub struct CategoryMapper {
    config: TriageConfig,
}

impl CategoryMapper {
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    /// Classify an optional label source.
    ///
    /// `None` means the labeling collaborator itself failed (no output at
    /// all, as opposed to an empty prediction list) and surfaces as
    /// [`Error::NoLabelSource`] so the caller can route to the fallback
    /// resolver. `Some` delegates to [`classify`](Self::classify) and never
    /// fails.
    pub fn classify_source(
        &self,
        labels: Option<&[LabelPrediction]>,
    ) -> Result<ClassificationResult> {
        match labels {
            Some(labels) => Ok(self.classify(labels)),
            None => Err(Error::NoLabelSource(
                "image classifier produced no label output".to_string(),
            )),
        }
    }

    /// Map an ordered label sequence onto the civic-issue taxonomy.
    ///
    /// Only the top `top_predictions` entries are considered. For the
    /// prediction at zero-based rank `i` with confidence `s`, every keyword
    /// contained in its case-folded label text adds `s * max(0, 1 - i*0.15)`
    /// to that keyword's category. Matches are additive: a label containing
    /// several keywords of one category contributes once per keyword.
    ///
    /// The strictly highest accumulated score wins; exact ties resolve to
    /// the earlier-declared category in the keyword table. A winning score
    /// below `min_category_score` means no category is a good fit: the
    /// result is `other` with the top prediction's raw score reported as an
    /// informational confidence (0.0 for an empty sequence) and severity
    /// `moderate`.
    pub fn classify(&self, labels: &[LabelPrediction]) -> ClassificationResult {
        let top = &labels[..labels.len().min(self.config.top_predictions)];
        let scores = self.score_categories(top);

        // Strictly-greater comparison keeps the first-declared category on ties
        let mut best: Option<(Category, f64)> = None;
        for &(category, score) in &scores {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((category, score)),
            }
        }

        let (best_category, best_score) = match best {
            Some(found) => found,
            // Validation guarantees a non-empty table, but stay total
            None => (Category::Other, 0.0),
        };

        if best_score < self.config.min_category_score {
            let top_raw = top.first().map(|p| p.score).unwrap_or(0.0);
            debug!(best_score, "No category cleared the match threshold");
            return ClassificationResult {
                category: Category::Other,
                confidence: top_raw,
                severity: Severity::Moderate,
                raw_labels: top.to_vec(),
                model: self.config.model_id.clone(),
                note: Some("No matching civic issue category found".to_string()),
            };
        }

        let severity = self.severity_for(best_score);
        debug!(
            category = %best_category,
            score = best_score,
            severity = %severity,
            "Category match"
        );

        ClassificationResult {
            category: best_category,
            confidence: best_score,
            severity,
            raw_labels: top.to_vec(),
            model: self.config.model_id.clone(),
            note: Some(format!("Matched based on {:.2} confidence", best_score)),
        }
    }

    /// Accumulate per-category scores over the truncated prediction list,
    /// in keyword-table order.
    fn score_categories(&self, top: &[LabelPrediction]) -> Vec<(Category, f64)> {
        self.config
            .keyword_table
            .iter()
            .map(|entry| {
                let mut score = 0.0;
                for (rank, prediction) in top.iter().enumerate() {
                    let label = prediction.label.to_lowercase();
                    let position_weight =
                        (1.0 - rank as f64 * self.config.position_weight_step).max(0.0);
                    for keyword in &entry.keywords {
                        if label.contains(keyword.as_str()) {
                            let added = prediction.score * position_weight;
                            score += added;
                            debug!(
                                label = %prediction.label,
                                keyword = %keyword,
                                added,
                                "Keyword match"
                            );
                        }
                    }
                }
                (entry.category, score)
            })
            .collect()
    }

    /// Severity for an accumulated (possibly superunity) score.
    fn severity_for(&self, score: f64) -> Severity {
        for breakpoint in &self.config.severity_breakpoints {
            if score >= breakpoint.threshold {
                return breakpoint.severity;
            }
        }
        self.config.default_severity
    }
}
