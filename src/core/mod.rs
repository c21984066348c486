// Core algorithm exports
pub mod catalog;
pub mod dedup;
pub mod filters;
pub mod ingest;
pub mod materialize;
pub mod quality;
pub mod reconcile;
pub mod scoring;
pub mod selector;

pub use catalog::{Catalog, CatalogError};
pub use dedup::{dedupe, normalize_title, Titled};
pub use filters::{declared, matches_dimension, shares_interest};
pub use ingest::{process_extracted, stamp_new, IngestOutcome, IngestSummary, QualifiedBenefit};
pub use materialize::{materialize, Placeholders};
pub use quality::{calculate_quality_score, passes_quality_gate, QUALITY_THRESHOLD};
pub use reconcile::{
    parse_external_ranking, parse_external_value, reconcile, reconcile_raw, ADDITIONAL_REASON,
    MATCHED_REASON,
};
pub use scoring::calculate_match_score;
pub use selector::{Selection, Selector};
