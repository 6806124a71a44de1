use actix::Arbiter;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use log::info;
use std::io;

mod clock;
mod config;
mod error;
mod models;
mod routes;
mod websocket;

use config::Args;
use models::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    let config = args
        .clock_config()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Every session's tick source runs here, off the HTTP workers
    let timers = Arbiter::new();

    let app_state = web::Data::new(AppState::new(
        config,
        args.static_dir.clone(),
        timers.handle(),
    ));

    info!(
        "Clock set to {:?} per side, ticking every {:?}",
        config.initial_duration(),
        config.tick_interval()
    );
    info!("Starting chess clock at http://{}:{}", args.host, args.port);

    let static_dir = args.static_dir.clone();
    let result = HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(move |cfg| routes::configure_routes(cfg, &static_dir))
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await;

    timers.stop();
    if timers.join().is_err() {
        log::warn!("Timer arbiter panicked during shutdown");
    }
    result
}
