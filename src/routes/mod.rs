use actix_files as fs;
use actix_web::{web, HttpResponse, Responder, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::AppState;

/// Timing parameters the page needs to draw its progress bars
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigResponse {
    pub initial_ms: u64,
    pub tick_ms: u64,
    pub active_sessions: usize,
}

/// HTTP handler for the clock page
pub async fn index(app_state: web::Data<AppState>) -> Result<fs::NamedFile> {
    Ok(fs::NamedFile::open_async(app_state.static_dir.join("index.html")).await?)
}

/// HTTP handler for the clock configuration
pub async fn clock_config(app_state: web::Data<AppState>) -> impl Responder {
    let config = app_state.config;
    HttpResponse::Ok().json(ConfigResponse {
        initial_ms: u64::try_from(config.initial_duration().as_millis()).unwrap_or(u64::MAX),
        tick_ms: u64::try_from(config.tick_interval().as_millis()).unwrap_or(u64::MAX),
        active_sessions: app_state.session_count(),
    })
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/api/config").route(web::get().to(clock_config)))
        .service(web::resource("/").route(web::get().to(index)))
        .service(fs::Files::new("/static", static_dir));
}
