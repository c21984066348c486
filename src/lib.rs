//! Benefit Matcher - recommends government and institutional benefits
//!
//! This library scores a catalog of benefit templates against a citizen's
//! self-reported profile, keeps the relevant ones through a dynamic cutoff,
//! personalizes them and merges in an optional model-produced ranking. It
//! also quality-gates and deduplicates freshly extracted benefits.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{reconcile, Catalog, Selection, Selector};
pub use models::{BenefitTemplate, ProfileInput, ScoredBenefit, ScoringPoints, SelectionPolicy, UserProfile};
