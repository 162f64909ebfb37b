// =====================================================
// FILE: src/server/mod.rs - ACTIX-WEB SITE SERVER
// =====================================================

pub mod api;
pub mod cookies;
pub mod pages;
pub mod types;

pub use cookies::CookieStore;
pub use types::SiteState;

use crate::contact::{FormRelay, HttpRelay};
use crate::core::prelude::*;
use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

/// Page patterns rendered per request; the `page` segment arrives percent-decoded.
const PAGE_ROUTES: &[&str] = &["/", "/{page:.*\\.html?}", "/{page:.+/}"];

/// Route table, shared by `run` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig, site_dir: &Path) {
    for pattern in PAGE_ROUTES {
        cfg.service(
            web::resource(*pattern)
                .route(web::get().to(pages::render_page))
                .route(web::head().to(pages::render_page)),
        );
    }
    cfg.route("/i18n/languages", web::get().to(api::languages))
        .route("/i18n/{lang}.json", web::get().to(api::translations))
        .route("/contact", web::post().to(api::submit_contact))
        .route("/api/health", web::get().to(api::health))
        // static assets last
        .service(Files::new("/", site_dir).use_last_modified(true));
}

pub fn site_state(config: &Config, catalog: Arc<Catalog>, relay: Arc<dyn FormRelay>) -> SiteState {
    SiteState::new(
        catalog,
        config.resolve_path(&config.server.site_dir),
        relay,
        config.contact.clone(),
    )
}

pub async fn run(config: &Config, catalog: Arc<Catalog>) -> Result<()> {
    let relay: Arc<dyn FormRelay> = Arc::new(HttpRelay::new()?);
    let state = web::Data::new(site_state(config, catalog, relay));

    if !state.site_dir.is_dir() {
        return Err(AppError::Config(format!(
            "Site directory not found: {}",
            state.site_dir.display()
        )));
    }

    let bind_addr = (config.server.host.clone(), config.server.port);
    log::info!(
        "Serving {} on http://{}:{}",
        state.site_dir.display(),
        bind_addr.0,
        bind_addr.1
    );

    let site_dir = state.site_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %b %Dms"))
            .app_data(state.clone())
            .configure(|cfg| configure(cfg, &site_dir))
    })
    .workers(config.server.workers)
    .bind(bind_addr.clone())
    .map_err(|e| {
        AppError::Validation(format!(
            "Bind {}:{} failed: {}",
            bind_addr.0, bind_addr.1, e
        ))
    })?
    .run()
    .await?;

    log::info!("Server stopped");
    Ok(())
}
