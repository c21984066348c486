use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{parse_external_value, process_extracted, reconcile, reconcile_raw, stamp_new, Catalog, Selector};
use crate::models::{
    ErrorResponse, HealthResponse, IngestRequest, IngestResponse, RecommendRequest, RecommendResponse,
    ScoredBenefit, UpdateReport, UserProfile,
};
use crate::services::{CacheKey, RankingClient, RecommendationCache, UpdateTracker};

/// Number of benefits kept in the status preview of the last ingest run
const STATUS_PREVIEW_LEN: usize = 10;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub selector: Selector,
    pub ranking: Option<Arc<RankingClient>>,
    pub cache: Arc<RecommendationCache>,
    pub tracker: Arc<UpdateTracker>,
    pub strict_profile: bool,
}

/// Configure all benefit-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/benefits/recommend", web::post().to(recommend))
        .route("/benefits/ingest", web::post().to(ingest))
        .route("/benefits/ingest/status", web::get().to(ingest_status))
        .route("/benefits/catalog", web::get().to(catalog));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size: state.catalog.len(),
    })
}

fn recommendation(benefits: Vec<ScoredBenefit>, user_profile: UserProfile, cached: bool) -> HttpResponse {
    HttpResponse::Ok().json(RecommendResponse {
        total_count: benefits.len(),
        benefits,
        user_profile,
        cached,
    })
}

/// Recommend benefits for a profile
///
/// POST /api/v1/benefits/recommend
///
/// Request body:
/// ```json
/// {
///   "age": "20대",
///   "region": "서울",
///   "education": "대학교 졸업",
///   "income": "중위소득 80% 이하",
///   "maritalStatus": "미혼",
///   "hasChildren": "없음",
///   "supportParents": "없음",
///   "interests": ["주거 지원"],
///   "externalRanking": [{"id": "housing_001", "reason": "..."}]
/// }
/// ```
async fn recommend(state: web::Data<AppState>, req: web::Json<RecommendRequest>) -> impl Responder {
    let RecommendRequest { profile: input, external_ranking } = req.into_inner();

    let profile = if state.strict_profile {
        match input.validate() {
            Ok(profile) => profile,
            Err(e) => {
                tracing::info!("Rejected profile: {}", e);
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid profile".to_string(),
                    message: e.to_string(),
                    status_code: 400,
                });
            }
        }
    } else {
        input.into_lenient()
    };

    // A caller-supplied ranking is specific to this request
    if let Some(value) = external_ranking {
        let selection = state.selector.select(&state.catalog, &profile);
        let ranks = match parse_external_value(value) {
            Ok(ranks) => Some(ranks),
            Err(e) => {
                tracing::warn!("Malformed external ranking, using local order: {}", e);
                None
            }
        };
        let benefits = reconcile(selection.benefits, ranks.as_deref());
        return recommendation(benefits, profile, false);
    }

    let cache_key = match CacheKey::recommendation(&profile) {
        Ok(key) => Some(key),
        Err(e) => {
            tracing::warn!("Failed to build cache key, skipping cache: {}", e);
            None
        }
    };

    if let Some(key) = &cache_key {
        if let Some(hit) = state.cache.get(key).await {
            tracing::debug!("Serving {} cached recommendations", hit.len());
            return recommendation(hit.as_ref().clone(), profile, true);
        }
    }

    let selection = state.selector.select(&state.catalog, &profile);
    tracing::info!(
        "Selected {} of {} benefits (interests: {})",
        selection.benefits.len(),
        selection.total_candidates,
        profile.interest_labels()
    );

    let raw_ranking = match &state.ranking {
        Some(client) if !selection.is_empty() => match client.rank(&profile, &selection.benefits).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!("Ranking request failed, using local order: {}", e);
                None
            }
        },
        _ => None,
    };

    let benefits = reconcile_raw(selection.benefits, raw_ranking.as_deref());

    if let Some(key) = cache_key {
        state.cache.insert(key, benefits.clone()).await;
    }

    recommendation(benefits, profile, false)
}

/// Merge freshly extracted benefits
///
/// POST /api/v1/benefits/ingest
async fn ingest(state: web::Data<AppState>, req: web::Json<IngestRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for ingest request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let Some(_guard) = state.tracker.try_begin() else {
        return HttpResponse::TooManyRequests().json(ErrorResponse {
            error: "Update in progress".to_string(),
            message: "이미 업데이트가 진행 중입니다.".to_string(),
            status_code: 429,
        });
    };

    let IngestRequest { existing_titles, benefits } = req.into_inner();
    let timestamp = chrono::Utc::now();

    if benefits.is_empty() {
        return HttpResponse::Ok().json(IngestResponse {
            message: "새로운 데이터가 없습니다.".to_string(),
            data: UpdateReport {
                timestamp,
                total_extracted: 0,
                high_quality: 0,
                unique_new: 0,
                categories: Default::default(),
                benefits: vec![],
            },
        });
    }

    let known_titles = existing_titles
        .iter()
        .map(String::as_str)
        .chain(state.catalog.titles());
    let outcome = process_extracted(known_titles, stamp_new(benefits));

    let report = UpdateReport {
        timestamp,
        total_extracted: outcome.summary.total_extracted,
        high_quality: outcome.summary.high_quality,
        unique_new: outcome.summary.unique_new,
        categories: outcome.summary.categories,
        benefits: outcome.benefits,
    };

    let mut preview = report.clone();
    preview.benefits.truncate(STATUS_PREVIEW_LEN);
    state.tracker.record(preview).await;

    tracing::info!("Ingest finished: {} new benefits", report.unique_new);

    HttpResponse::Ok().json(IngestResponse {
        message: format!("{}개의 새로운 혜택을 발견했습니다.", report.unique_new),
        data: report,
    })
}

/// Status of the last ingest run
///
/// GET /api/v1/benefits/ingest/status
async fn ingest_status(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.tracker.status().await)
}

/// Loaded catalog templates
///
/// GET /api/v1/benefits/catalog
async fn catalog(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.templates())
}
