//! End-to-end triage flow
//!
//! Wires the category mapper and fallback resolver behind a single call the
//! report-intake collaborator uses: hand over whatever the labeling service
//! returned (or `None` if it failed) plus a text hint, get back one
//! classification.

use crate::classifier::CategoryMapper;
use crate::config::TriageConfig;
use crate::fallback::FallbackResolver;
use cfx_common::models::{ClassificationResult, LabelPrediction};
use tracing::debug;

/// Triage engine
///
/// Both components share one immutable [`TriageConfig`] captured at
/// construction. Stateless and safe to share across concurrent handlers.
pub struct TriageEngine {
    mapper: CategoryMapper,
    fallback: FallbackResolver,
}

impl TriageEngine {
    pub fn new(config: TriageConfig) -> Self {
        Self {
            mapper: CategoryMapper::new(config.clone()),
            fallback: FallbackResolver::new(config),
        }
    }

    /// Classify a report.
    ///
    /// `labels` is the labeling collaborator's output: `None` when the call
    /// failed entirely, `Some` (possibly empty) when it ran. Only the failure
    /// path routes to the fallback resolver — a mapper result of `other` is a
    /// valid classification and is returned as-is. Total: always produces a
    /// result.
    pub fn triage(
        &self,
        labels: Option<&[LabelPrediction]>,
        hint: &str,
    ) -> ClassificationResult {
        match self.mapper.classify_source(labels) {
            Ok(result) => result,
            Err(err) => {
                debug!(error = %err, "Label source unavailable, using fallback resolver");
                self.fallback.classify(hint)
            }
        }
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new(TriageConfig::default())
    }
}
