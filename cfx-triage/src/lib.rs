//! # CivicFix Triage Core
//!
//! Stateless classification and priority scoring for citizen-submitted photo
//! reports:
//! - **Category mapper**: maps generic image-classifier labels onto the fixed
//!   civic-issue taxonomy, with an accumulated confidence score and derived
//!   severity
//! - **Fallback resolver**: text-hint heuristic used when the labeling
//!   collaborator failed outright
//! - **Priority scorer**: severity + votes + recency triage score
//!
//! The surrounding HTTP/persistence/upload plumbing lives in other services;
//! this crate is pure library code with no I/O beyond optional config loading.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod priority;
pub mod record;

pub use classifier::CategoryMapper;
pub use config::TriageConfig;
pub use engine::TriageEngine;
pub use fallback::FallbackResolver;
pub use priority::{compute_priority, priority_for_stored};
pub use record::TriageRecord;
