use crate::{
    api::{checkin, roster, session, transfer},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            // Kiosk surface
            .service(
                web::resource("/checkin")
                    .wrap(build_limiter(config.rate_checkin_per_min))
                    .route(web::post().to(checkin::check_in))
                    .route(web::delete().to(checkin::undo_check_in)),
            )
            .service(web::resource("/checkins").route(web::get().to(checkin::list_checkins)))
            // Admin surface
            .service(
                web::resource("/sessions")
                    .wrap(build_limiter(config.rate_admin_per_min))
                    .route(web::get().to(session::list_sessions))
                    .route(web::post().to(session::create_session)),
            )
            .service(
                web::resource("/clear")
                    .wrap(build_limiter(config.rate_admin_per_min))
                    .route(web::post().to(session::clear_session)),
            )
            .service(web::resource("/roster").route(web::get().to(roster::roster)))
            // Spreadsheet transfer; imports are expensive, keep the budget low
            .service(
                web::resource("/import")
                    .wrap(build_limiter(config.rate_import_per_min))
                    .route(web::post().to(transfer::import_sheet)),
            )
            .service(web::resource("/export").route(web::get().to(transfer::export_sheet))),
    );
}
