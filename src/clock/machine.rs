//! Game rules for a two-sided countdown clock.
//!
//! [`ChessClock`] is synchronous and knows nothing about wall-clock time. It
//! consumes commands and parameterless ticks and answers each one with the
//! [`Effects`] the caller must carry out: arming or disarming the tick source,
//! and notifications for the page.

use chess::{Color, NUM_COLORS};
use log::{debug, info};
use std::time::Duration;

use crate::config::ClockConfig;

/// One of the two clocks. White moves first.
pub type PlayerSide = Color;

/// Result of the game so far. Terminal once it leaves `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(PlayerSide),
    /// Never produced by the current rules; kept so the result type is complete.
    #[allow(dead_code)]
    Draw,
}

/// Coarse lifecycle phase derived from [`ClockState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Inbound commands from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Tap(PlayerSide),
    Reset,
}

/// Instruction for the tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Arm(Duration),
    Disarm,
}

/// Fire-and-forget notice for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The turn passed; carries the side whose clock now runs.
    TurnChanged(PlayerSide),
    /// A flag fell; carries the side that ran out of time.
    Expired(PlayerSide),
}

/// Side effects requested by a single command or tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub timer: Option<TimerCommand>,
    pub notification: Option<Notification>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    fn timer(command: TimerCommand) -> Self {
        Self {
            timer: Some(command),
            notification: None,
        }
    }

    fn notify(notification: Notification) -> Self {
        Self {
            timer: None,
            notification: Some(notification),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timer.is_none() && self.notification.is_none()
    }
}

/// Full snapshot of both clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    remaining: [Duration; NUM_COLORS],
    active_side: Option<PlayerSide>,
    running: bool,
    outcome: Outcome,
}

impl ClockState {
    fn idle(initial: Duration) -> Self {
        Self {
            remaining: [initial; NUM_COLORS],
            active_side: None,
            running: false,
            outcome: Outcome::InProgress,
        }
    }

    pub fn remaining(&self, side: PlayerSide) -> Duration {
        self.remaining[side.to_index()]
    }

    pub fn active_side(&self) -> Option<PlayerSide> {
        self.active_side
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    pub fn phase(&self) -> Phase {
        if self.is_finished() {
            Phase::Finished
        } else if self.running {
            Phase::Running
        } else if self.active_side.is_some() {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    /// The side that lost on time, if any.
    pub fn loser(&self) -> Option<PlayerSide> {
        match self.outcome {
            Outcome::Won(winner) => Some(!winner),
            _ => None,
        }
    }
}

/// The authoritative clock for one game session.
#[derive(Debug, Clone)]
pub struct ChessClock {
    config: ClockConfig,
    state: ClockState,
}

impl ChessClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            state: ClockState::idle(config.initial_duration()),
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn handle(&mut self, command: Command) -> Effects {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Toggle => self.toggle(),
            Command::Tap(side) => self.tap(side),
            Command::Reset => self.reset(),
        }
    }

    /// Starts the game, or resumes the side that was running before a pause.
    pub fn start(&mut self) -> Effects {
        if self.state.is_finished() || self.state.running {
            return Effects::none();
        }
        let side = *self.state.active_side.get_or_insert(Color::White);
        self.state.running = true;
        info!("Clock running for {:?}", side);
        Effects::timer(TimerCommand::Arm(self.config.tick_interval()))
    }

    pub fn pause(&mut self) -> Effects {
        if self.state.is_finished() || !self.state.running {
            return Effects::none();
        }
        self.state.running = false;
        info!("Clock paused with {:?} to move", self.state.active_side);
        Effects::timer(TimerCommand::Disarm)
    }

    /// Single play/pause button: pause when running, otherwise start.
    pub fn toggle(&mut self) -> Effects {
        if self.state.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// A player hits their own clock to hand the move to the opponent.
    pub fn tap(&mut self, side: PlayerSide) -> Effects {
        if self.state.is_finished() || !self.state.running {
            return Effects::none();
        }
        if self.state.active_side != Some(side) {
            debug!("Ignoring tap from {:?}: not their clock", side);
            return Effects::none();
        }
        let next = !side;
        self.state.active_side = Some(next);
        debug!("Turn passed from {:?} to {:?}", side, next);
        Effects::notify(Notification::TurnChanged(next))
    }

    /// Applies one tick quantum to the running side.
    pub fn tick(&mut self) -> Effects {
        if !self.state.running || self.state.is_finished() {
            return Effects::none();
        }
        let Some(side) = self.state.active_side else {
            return Effects::none();
        };

        let slot = &mut self.state.remaining[side.to_index()];
        let left = slot.saturating_sub(self.config.tick_interval());
        *slot = left;
        if !left.is_zero() {
            return Effects::none();
        }

        self.state.running = false;
        self.state.outcome = Outcome::Won(!side);
        info!("{:?} ran out of time, {:?} wins", side, !side);
        Effects {
            timer: Some(TimerCommand::Disarm),
            notification: Some(Notification::Expired(side)),
        }
    }

    /// Back to the idle state with both clocks full. Always allowed.
    pub fn reset(&mut self) -> Effects {
        self.state = ClockState::idle(self.config.initial_duration());
        info!("Clock reset to {:?} per side", self.config.initial_duration());
        Effects::timer(TimerCommand::Disarm)
    }
}
