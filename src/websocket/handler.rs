use actix::*;
use actix_web::web;
use actix_web_actors::ws;
use log::{debug, info, warn};

use crate::clock::utils::game_status;
use crate::clock::{Tick, TickSource};
use crate::models::{AppState, ClientMessage, ServerMessage};
use crate::websocket::driver::ClockDriver;

/// One page load: owns a clock and the tick source that drives it.
///
/// Client frames and ticks both arrive through this actor's mailbox, so every
/// change to the clock is applied one message at a time, in arrival order.
pub struct ClockSession {
    pub id: String,
    pub app_state: web::Data<AppState>,
    pub driver: ClockDriver,
}

impl ClockSession {
    pub fn new(id: String, app_state: web::Data<AppState>) -> Self {
        let driver = ClockDriver::new(app_state.config);
        Self {
            id,
            app_state,
            driver,
        }
    }

    fn send_all(&self, messages: Vec<ServerMessage>, ctx: &mut ws::WebsocketContext<Self>) {
        for msg in &messages {
            self.send(msg, ctx);
        }
    }

    fn send(&self, msg: &ServerMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("Failed to serialize {} message: {}", msg.message_type, e);
                ctx.text("{\"message_type\": \"error\", \"error\": \"Internal server error\"}");
            }
        }
    }
}

impl Actor for ClockSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        // Tick source lives on the timer arbiter and reports back to us
        let recipient = ctx.address().recipient::<Tick>();
        let ticker = TickSource::start_in_arbiter(&self.app_state.timer_arbiter, move |_| {
            TickSource::new(recipient)
        });
        self.driver.attach(ticker);

        let total_sessions = self.app_state.register(&self.id);
        info!("Clock session started: {}", self.id);
        info!("Total active sessions: {}", total_sessions);

        self.send(&self.driver.state_message(), ctx);
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        self.driver.shutdown();

        let total_sessions = self.app_state.unregister(&self.id);
        info!(
            "Clock session closed: {} ({})",
            self.id,
            game_status(self.driver.clock().state())
        );
        info!("Total active sessions: {}", total_sessions);

        Running::Stop
    }
}

impl Handler<Tick> for ClockSession {
    type Result = ();

    fn handle(&mut self, tick: Tick, ctx: &mut Self::Context) {
        let out = self.driver.handle_tick(tick);
        self.send_all(out, ctx);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClockSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                debug!("Received text message on {}: {}", self.id, text);
                match serde_json::from_str::<ClientMessage>(text.as_ref()) {
                    Ok(client_msg) => {
                        let out = self.driver.handle_message(client_msg);
                        self.send_all(out, ctx);
                    }
                    Err(e) => {
                        warn!("Error parsing client message: {}", e);
                        self.send(&ServerMessage::error(format!("Invalid message format: {}", e)), ctx);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
                self.send(&ServerMessage::error("Binary messages are not supported"), ctx);
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(e) => {
                warn!("WebSocket protocol error on {}: {}", self.id, e);
                ctx.stop();
            }
        }
    }
}
