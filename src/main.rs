use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use benefit_matcher::config::Settings;
use benefit_matcher::core::{Catalog, Selector};
use benefit_matcher::routes::{self, AppState};
use benefit_matcher::services::{RankingClient, RecommendationCache, UpdateTracker};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT override the configured values
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| startup_error("Configuration error", e))?;

    init_logging(&settings);

    info!("Starting benefit matching service...");

    // Load the catalog; any structural problem is fatal
    let catalog = match &settings.catalog.path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::builtin(),
    }
    .map_err(|e| {
        error!("Failed to load catalog: {}", e);
        startup_error("Catalog error", e)
    })?;

    info!("Catalog loaded with {} templates", catalog.len());

    let selector = Selector::new(settings.scoring_points(), settings.selection_policy());

    info!("Selector initialized with policy: {:?}", selector.policy());

    // Ranking is optional - recommendations fall back to the local order
    let ranking = match settings.ranking.options() {
        Some(options) => match RankingClient::new(options) {
            Ok(client) => {
                info!("Ranking client initialized (model: {})", settings.ranking.model);
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("Failed to build ranking client ({}), using local order only", e);
                None
            }
        },
        None => {
            info!("Ranking disabled, using local order only");
            None
        }
    };

    let cache = Arc::new(RecommendationCache::new(settings.cache.capacity, settings.cache.ttl_secs));

    info!(
        "Recommendation cache initialized ({} entries, TTL: {}s)",
        settings.cache.capacity, settings.cache.ttl_secs
    );

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        selector,
        ranking,
        cache,
        tracker: Arc::new(UpdateTracker::new()),
        strict_profile: settings.matching.strict_profile,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
