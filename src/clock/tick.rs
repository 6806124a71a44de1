//! Background tick source.
//!
//! `TickSource` is an actix actor that emits [`Tick`] to a single recipient at
//! a fixed interval while armed. It has no idea what the ticks are for. It is
//! normally started on a dedicated timer arbiter so its schedule keeps running
//! while the consumer is busy; the consumer receives ticks through its own
//! mailbox, which orders them with every other message it handles.
//!
//! Every schedule carries the generation number it was armed with, and each
//! tick is stamped with it. A consumer that re-arms can then tell ticks from
//! the current schedule apart from ones the previous schedule had already
//! queued before it was cancelled.

use actix::prelude::*;
use log::{debug, info, warn};
use std::time::Duration;

/// One tick interval has elapsed on the schedule armed as `generation`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
#[rtype(result = "()")]
pub struct Tick {
    pub generation: u64,
}

/// Start emitting ticks, replacing any schedule already running.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Arm {
    pub interval: Duration,
    pub generation: u64,
}

/// Stop emitting ticks. A no-op when already disarmed.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Disarm;

/// Ask whether a schedule is active.
#[cfg(test)]
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "bool")]
pub struct IsArmed;

pub struct TickSource {
    target: Recipient<Tick>,
    schedule: Option<SpawnHandle>,
}

impl TickSource {
    pub fn new(target: Recipient<Tick>) -> Self {
        Self {
            target,
            schedule: None,
        }
    }

    fn cancel(&mut self, ctx: &mut Context<Self>) -> bool {
        match self.schedule.take() {
            Some(handle) => ctx.cancel_future(handle),
            None => false,
        }
    }
}

impl Actor for TickSource {
    type Context = Context<Self>;

    fn stopped(&mut self, _: &mut Self::Context) {
        debug!("Tick source stopped");
    }
}

impl Handler<Arm> for TickSource {
    type Result = ();

    fn handle(&mut self, msg: Arm, ctx: &mut Self::Context) {
        if msg.interval.is_zero() {
            warn!("Refusing to arm tick source with a zero interval");
            return;
        }

        self.cancel(ctx);
        let generation = msg.generation;
        let handle = ctx.run_interval(msg.interval, move |act, ctx| {
            // The consumer is gone: nobody can re-arm us, so shut down for good
            if !act.target.connected() {
                info!("Tick consumer disconnected, stopping tick source");
                ctx.stop();
                return;
            }
            act.target.do_send(Tick { generation });
        });
        self.schedule = Some(handle);
        debug!(
            "Tick source armed every {:?} (generation {})",
            msg.interval, generation
        );
    }
}

impl Handler<Disarm> for TickSource {
    type Result = ();

    fn handle(&mut self, _: Disarm, ctx: &mut Self::Context) {
        if self.cancel(ctx) {
            debug!("Tick source disarmed");
        }
    }
}

#[cfg(test)]
impl Handler<IsArmed> for TickSource {
    type Result = bool;

    fn handle(&mut self, _: IsArmed, _: &mut Self::Context) -> bool {
        self.schedule.is_some()
    }
}
