// Route exports
pub mod benefits;

use actix_web::web;

pub use benefits::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(benefits::configure),
    );
}
