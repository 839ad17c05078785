//! Triage configuration: keyword table, fallback rules, and scoring constants
//!
//! All domain knowledge lives here; the mapping and scoring algorithms are
//! vocabulary-agnostic. The defaults reproduce the production constants, and
//! every field can be overridden from a TOML file without touching code.

use cfx_common::models::{Category, Severity};
use cfx_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Keyword phrases associated with one category.
///
/// Declaration order in the table matters: when two categories accumulate
/// exactly equal scores, the earlier-declared category wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: Category,
    /// Lowercase phrases matched by substring against label text
    pub keywords: Vec<String>,
}

/// One fallback rule: if the text hint contains any of `terms`, resolve to
/// `category`. Rules are checked in declaration order; first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub category: Category,
    pub terms: Vec<String>,
}

/// Severity breakpoint applied to the accumulated category score.
/// Checked in order; the first breakpoint with `score >= threshold` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityBreakpoint {
    pub threshold: f64,
    pub severity: Severity,
}

/// Configuration for the category mapper, fallback resolver, and their
/// shared vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// How many top predictions the mapper inspects (rest are ignored)
    pub top_predictions: usize,

    /// Per-rank linear decay step for the position weight:
    /// weight(i) = max(0, 1 - i * step)
    pub position_weight_step: f64,

    /// Winning scores below this resolve to `other`
    pub min_category_score: f64,

    /// Ordered severity breakpoints over the accumulated score. The score is
    /// unnormalized (it can exceed 1.0); thresholds apply to it directly.
    pub severity_breakpoints: Vec<SeverityBreakpoint>,

    /// Severity when no breakpoint is reached
    pub default_severity: Severity,

    /// Model identifier reported on mapper results
    pub model_id: String,

    /// Category keyword table, in tie-break priority order
    pub keyword_table: Vec<CategoryKeywords>,

    /// Fallback substring rules, in check order
    pub fallback_rules: Vec<FallbackRule>,

    /// Confidence reported when a fallback rule matches
    pub fallback_match_confidence: f64,

    /// Confidence reported when no fallback rule matches
    pub fallback_default_confidence: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            top_predictions: 5,
            position_weight_step: 0.15,
            min_category_score: 0.1,
            severity_breakpoints: vec![
                SeverityBreakpoint {
                    threshold: 0.7,
                    severity: Severity::Critical,
                },
                SeverityBreakpoint {
                    threshold: 0.4,
                    severity: Severity::Moderate,
                },
            ],
            default_severity: Severity::Minor,
            model_id: "google/vit-base-patch16-224".to_string(),
            keyword_table: default_keyword_table(),
            fallback_rules: default_fallback_rules(),
            fallback_match_confidence: 0.6,
            fallback_default_confidence: 0.5,
        }
    }
}

impl TriageConfig {
    /// Load configuration from a TOML file.
    ///
    /// Fields absent from the file keep their defaults, so a partial override
    /// (e.g. just a larger keyword table) is a valid config file. Keyword
    /// phrases and fallback terms are case-folded on load.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: TriageConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.normalize();
        config.validate()?;
        info!(path = %path.display(), categories = config.keyword_table.len(), "Loaded triage configuration");
        Ok(config)
    }

    /// Lowercase all keyword phrases and fallback terms. Matching is done
    /// against case-folded label text, so the table must be lowercase too.
    fn normalize(&mut self) {
        for entry in &mut self.keyword_table {
            for keyword in &mut entry.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        for rule in &mut self.fallback_rules {
            for term in &mut rule.terms {
                *term = term.to_lowercase();
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.top_predictions == 0 {
            return Err(Error::Config(
                "top_predictions must be at least 1".to_string(),
            ));
        }
        if self.keyword_table.is_empty() {
            return Err(Error::Config("keyword_table must not be empty".to_string()));
        }
        if self
            .keyword_table
            .iter()
            .any(|entry| entry.category == Category::Other)
        {
            return Err(Error::Config(
                "keyword_table must not contain the 'other' category".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default category vocabulary, in tie-break priority order.
fn default_keyword_table() -> Vec<CategoryKeywords> {
    fn entry(category: Category, keywords: &[&str]) -> CategoryKeywords {
        CategoryKeywords {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    vec![
        entry(
            Category::Pothole,
            &[
                "pothole",
                "hole",
                "crack",
                "asphalt",
                "pavement",
                "road damage",
                "concrete",
                "street",
                "road",
                "highway",
                "path",
                "sidewalk",
                "crater",
                "depression",
                "broken road",
                "damaged pavement",
                "tarmac",
                "bitumen",
                "pathway",
                "roadway",
                "thoroughfare",
            ],
        ),
        entry(
            Category::Garbage,
            &[
                "garbage",
                "trash",
                "waste",
                "litter",
                "rubbish",
                "bin",
                "dumpster",
                "plastic bag",
                "debris",
                "refuse",
                "junk",
                "dump",
                "landfill",
                "recycling",
                "waste basket",
                "waste container",
                "trash can",
                "bottle",
                "can",
                "wrapper",
                "paper",
                "cardboard",
                "waste bin",
            ],
        ),
        entry(
            Category::BrokenLight,
            &[
                "street light",
                "lamp",
                "light pole",
                "lamppost",
                "broken light",
                "street lamp",
                "light",
                "bulb",
                "fixture",
                "lighting",
                "pole",
                "post",
                "illumination",
                "dark",
                "unlit",
                "spotlight",
                "floodlight",
                "lantern",
                "beacon",
            ],
        ),
        entry(
            Category::WaterLeakage,
            &[
                "water",
                "leak",
                "pipe",
                "flooding",
                "puddle",
                "drain",
                "sewer",
                "wet",
                "moisture",
                "flood",
                "overflow",
                "burst pipe",
                "plumbing",
                "hydrant",
                "water main",
                "drainage",
                "sewage",
                "waterfall",
                "stream",
                "rain",
                "liquid",
                "fountain",
            ],
        ),
        entry(
            Category::Graffiti,
            &[
                "graffiti",
                "vandalism",
                "spray paint",
                "wall art",
                "writing",
                "painted",
                "tag",
                "mural",
                "defacement",
                "vandalized",
                "street art",
                "paint",
                "drawing",
                "inscription",
            ],
        ),
    ]
}

/// Default fallback rules. Check order determines tie outcomes: a hint
/// containing both "road" and "light" resolves to pothole.
fn default_fallback_rules() -> Vec<FallbackRule> {
    fn rule(category: Category, terms: &[&str]) -> FallbackRule {
        FallbackRule {
            category,
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    vec![
        rule(Category::Pothole, &["pothole", "hole", "road"]),
        rule(Category::Garbage, &["garbage", "trash", "waste"]),
        rule(Category::BrokenLight, &["light", "lamp"]),
        rule(Category::WaterLeakage, &["water", "leak", "flood"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_constants() {
        let config = TriageConfig::default();
        assert_eq!(config.top_predictions, 5);
        assert_eq!(config.position_weight_step, 0.15);
        assert_eq!(config.min_category_score, 0.1);
        assert_eq!(config.fallback_match_confidence, 0.6);
        assert_eq!(config.fallback_default_confidence, 0.5);
        assert_eq!(config.model_id, "google/vit-base-patch16-224");
        assert_eq!(config.keyword_table.len(), 5);
        assert_eq!(config.keyword_table[0].category, Category::Pothole);
        assert_eq!(config.fallback_rules[0].category, Category::Pothole);
    }

    #[test]
    fn test_default_severity_breakpoints() {
        let config = TriageConfig::default();
        assert_eq!(config.severity_breakpoints.len(), 2);
        assert_eq!(config.severity_breakpoints[0].threshold, 0.7);
        assert_eq!(config.severity_breakpoints[0].severity, Severity::Critical);
        assert_eq!(config.severity_breakpoints[1].threshold, 0.4);
        assert_eq!(config.severity_breakpoints[1].severity, Severity::Moderate);
        assert_eq!(config.default_severity, Severity::Minor);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TriageConfig = toml::from_str("top_predictions = 3").unwrap();
        assert_eq!(config.top_predictions, 3);
        // Everything else stays at defaults
        assert_eq!(config.position_weight_step, 0.15);
        assert_eq!(config.keyword_table.len(), 5);
    }

    #[test]
    fn test_load_from_file_normalizes_keywords() {
        let toml_content = r#"
            min_category_score = 0.2

            [[keyword_table]]
            category = "pothole"
            keywords = ["Pothole", "ROAD"]
        "#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = TriageConfig::load(file.path()).unwrap();
        assert_eq!(config.min_category_score, 0.2);
        assert_eq!(config.keyword_table.len(), 1);
        assert_eq!(config.keyword_table[0].keywords, vec!["pothole", "road"]);
    }

    #[test]
    fn test_load_rejects_zero_top_predictions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"top_predictions = 0").unwrap();

        let err = TriageConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("top_predictions"));
    }

    #[test]
    fn test_load_rejects_other_in_keyword_table() {
        let toml_content = r#"
            [[keyword_table]]
            category = "other"
            keywords = ["misc"]
        "#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        assert!(TriageConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = TriageConfig::load(Path::new("/nonexistent/triage.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
