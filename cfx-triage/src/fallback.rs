//! Fallback classification from a text hint
//!
//! Used only when the labeling collaborator failed outright (network/service
//! error, no label output) — not when the category mapper merely returned
//! `other`. Scans whatever text is available (typically the image URL or
//! filename) for category-indicative substrings.

use crate::config::TriageConfig;
use cfx_common::models::{Category, ClassificationResult, Severity};
use tracing::debug;

/// Model identifier reported when a fallback rule matched
const FALLBACK_MATCH_MODEL: &str = "fallback-url-based";
/// Model identifier reported when nothing matched
const FALLBACK_DEFAULT_MODEL: &str = "fallback-default";

/// Fallback resolver
///
/// A deliberately low-fidelity heuristic: rules are checked in declaration
/// order and the first substring match wins, so a hint naming several
/// categories resolves to the earliest-declared one.
pub struct FallbackResolver {
    config: TriageConfig,
}

impl FallbackResolver {
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    /// Classify from a case-folded text hint. Total: always produces a
    /// result, with `other` as the final default.
    pub fn classify(&self, hint: &str) -> ClassificationResult {
        let hint = hint.to_lowercase();

        for rule in &self.config.fallback_rules {
            if rule.terms.iter().any(|term| hint.contains(term.as_str())) {
                debug!(category = %rule.category, "Fallback rule matched hint");
                return ClassificationResult {
                    category: rule.category,
                    confidence: self.config.fallback_match_confidence,
                    severity: Severity::Moderate,
                    raw_labels: Vec::new(),
                    model: FALLBACK_MATCH_MODEL.to_string(),
                    note: Some("Classified based on URL keywords".to_string()),
                };
            }
        }

        debug!("No fallback rule matched hint");
        ClassificationResult {
            category: Category::Other,
            confidence: self.config.fallback_default_confidence,
            severity: Severity::Moderate,
            raw_labels: Vec::new(),
            model: FALLBACK_DEFAULT_MODEL.to_string(),
            note: Some("Unable to classify, using default".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> FallbackResolver {
        FallbackResolver::new(TriageConfig::default())
    }

    #[test]
    fn test_matches_pothole_terms() {
        let result = resolver().classify("https://img.example.com/uploads/road-damage-42.jpg");
        assert_eq!(result.category, Category::Pothole);
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.severity, Severity::Moderate);
        assert_eq!(result.model, "fallback-url-based");
        assert!(result.raw_labels.is_empty());
    }

    #[test]
    fn test_check_order_breaks_multi_category_hints() {
        // Contains both "road" (pothole) and "light" (broken_light);
        // pothole is checked first.
        let result = resolver().classify("road_light_photo.png");
        assert_eq!(result.category, Category::Pothole);
    }

    #[test]
    fn test_matches_later_rules() {
        let garbage = resolver().classify("TRASH_pile.jpeg");
        assert_eq!(garbage.category, Category::Garbage);

        let light = resolver().classify("broken-lamp.png");
        assert_eq!(light.category, Category::BrokenLight);

        let water = resolver().classify("leak-under-bridge.jpg");
        assert_eq!(water.category, Category::WaterLeakage);
    }

    #[test]
    fn test_no_match_returns_default() {
        let result = resolver().classify("IMG_20250812_093311.jpg");
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.severity, Severity::Moderate);
        assert_eq!(result.model, "fallback-default");
    }

    #[test]
    fn test_empty_hint_returns_default() {
        let result = resolver().classify("");
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.confidence, 0.5);
    }
}
