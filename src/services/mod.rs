// Service exports
pub mod cache;
pub mod ranking;
pub mod update_tracker;

pub use cache::{CacheError, CacheKey, RecommendationCache};
pub use ranking::{RankingClient, RankingError, RankingOptions};
pub use update_tracker::{UpdateGuard, UpdateTracker};
