use actix::Addr;
use log::{debug, info, warn};

use crate::clock::{Arm, ChessClock, Disarm, Effects, Tick, TickSource, TimerCommand};
use crate::config::ClockConfig;
use crate::models::{ClientMessage, ServerMessage};
use crate::websocket::commands::to_command;

/// Connects one clock to its tick source and renders what the page should see.
///
/// The owner feeds it client messages and ticks strictly one at a time and
/// sends the returned messages on, in order.
pub struct ClockDriver {
    clock: ChessClock,
    muted: bool,
    ticker: Option<Addr<TickSource>>,
    /// Generation of the schedule currently armed, if any
    armed: Option<u64>,
    generation: u64,
}

impl ClockDriver {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            clock: ChessClock::new(config),
            muted: false,
            ticker: None,
            armed: None,
            generation: 0,
        }
    }

    pub fn attach(&mut self, ticker: Addr<TickSource>) {
        self.ticker = Some(ticker);
    }

    pub fn clock(&self) -> &ChessClock {
        &self.clock
    }

    pub fn state_message(&self) -> ServerMessage {
        ServerMessage::state(&self.clock, self.muted)
    }

    pub fn handle_message(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        let mut out = Vec::new();

        if let ClientMessage::Mute { muted } = msg {
            info!("Sound {}", if muted { "muted" } else { "on" });
            self.muted = muted;
        }

        match to_command(&msg) {
            Ok(Some(command)) => {
                let effects = self.clock.handle(command);
                self.apply(effects, &mut out);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Rejected message: {}", e);
                out.push(ServerMessage::error(e));
                return out;
            }
        }

        out.push(self.state_message());
        out
    }

    pub fn handle_tick(&mut self, tick: Tick) -> Vec<ServerMessage> {
        if self.armed != Some(tick.generation) {
            debug!(
                "Dropping tick from generation {} (armed: {:?})",
                tick.generation, self.armed
            );
            return Vec::new();
        }

        let effects = self.clock.tick();
        if effects.is_empty() && !self.clock.state().is_running() {
            return Vec::new();
        }

        let mut out = Vec::new();
        self.apply(effects, &mut out);
        out.push(self.state_message());
        out
    }

    /// Disarm and let go of the tick source. Once the owner is gone the
    /// source has no consumer and cannot be re-armed.
    pub fn shutdown(&mut self) {
        self.armed = None;
        if let Some(ticker) = self.ticker.take() {
            ticker.do_send(Disarm);
        }
    }

    fn apply(&mut self, effects: Effects, out: &mut Vec<ServerMessage>) {
        match effects.timer {
            Some(TimerCommand::Arm(interval)) => {
                self.generation += 1;
                self.armed = Some(self.generation);
                if let Some(ticker) = &self.ticker {
                    ticker.do_send(Arm {
                        interval,
                        generation: self.generation,
                    });
                }
            }
            Some(TimerCommand::Disarm) => {
                self.armed = None;
                if let Some(ticker) = &self.ticker {
                    ticker.do_send(Disarm);
                }
            }
            None => {}
        }

        if let Some(notification) = effects.notification {
            out.push(ServerMessage::notification(notification, self.muted));
        }
    }
}
