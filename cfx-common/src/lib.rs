//! # CivicFix Common Library
//!
//! Shared code for CivicFix services including:
//! - Domain model types (categories, severities, classification results)
//! - Common error types

pub mod error;
pub mod models;

pub use error::{Error, Result};
