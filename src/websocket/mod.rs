use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::info;
use uuid::Uuid;

use crate::models::AppState;

pub mod commands;
pub mod driver;
pub mod handler;

pub use handler::ClockSession;

/// WebSocket connection handler: every page load gets its own clock
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let id = Uuid::new_v4().to_string();
    info!("New WebSocket connection: {}", id);

    ws::start(ClockSession::new(id, app_state), &req, stream)
}
