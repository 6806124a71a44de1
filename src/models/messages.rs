use serde::{Deserialize, Serialize};

use crate::clock::utils::{color_to_string, format_time, game_status, progress};
use crate::clock::{ChessClock, Notification, PlayerSide};

/// Message sent from the page to its session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum ClientMessage {
    Start,
    Pause,
    /// The single play/pause button
    Toggle,
    Tap { side: String },
    Reset,
    Mute { muted: bool },
    /// Request a fresh state snapshot
    Sync,
}

/// Message sent from a session to its page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerMessage {
    pub message_type: String,
    pub white: Option<SideView>,
    pub black: Option<SideView>,
    pub active_color: Option<String>,
    pub running: Option<bool>,
    pub game_status: Option<String>,
    pub muted: Option<bool>,
    pub color: Option<String>,
    pub cue: Option<String>,
    pub error: Option<String>,
}

/// What one half of the clock face shows
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SideView {
    pub remaining_ms: u64,
    pub display: String,
    pub progress: f64,
    pub is_active: bool,
    pub is_loser: bool,
}

impl SideView {
    fn new(clock: &ChessClock, side: PlayerSide) -> Self {
        let state = clock.state();
        let remaining = state.remaining(side);
        Self {
            remaining_ms: u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
            display: format_time(remaining),
            progress: progress(remaining, clock.config().initial_duration()),
            is_active: state.active_side() == Some(side) && !state.is_finished(),
            is_loser: state.loser() == Some(side),
        }
    }
}

impl ServerMessage {
    fn empty(message_type: &str) -> Self {
        Self {
            message_type: message_type.to_string(),
            white: None,
            black: None,
            active_color: None,
            running: None,
            game_status: None,
            muted: None,
            color: None,
            cue: None,
            error: None,
        }
    }

    /// Snapshot of the whole clock
    pub fn state(clock: &ChessClock, muted: bool) -> Self {
        let state = clock.state();
        Self {
            white: Some(SideView::new(clock, PlayerSide::White)),
            black: Some(SideView::new(clock, PlayerSide::Black)),
            active_color: state.active_side().map(color_to_string),
            running: Some(state.is_running()),
            game_status: Some(game_status(state)),
            muted: Some(muted),
            ..Self::empty("state")
        }
    }

    /// Turn change or flag fall. Muted sessions get the event without a sound cue.
    pub fn notification(notification: Notification, muted: bool) -> Self {
        let (message_type, side, cue) = match notification {
            Notification::TurnChanged(side) => ("turn_changed", side, "click"),
            Notification::Expired(side) => ("expired", side, "alarm"),
        };
        Self {
            color: Some(color_to_string(side)),
            cue: (!muted).then(|| cue.to_string()),
            ..Self::empty(message_type)
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty("error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockConfig;
    use chess::Color;

    #[test]
    fn parses_client_messages() {
        let tap: ClientMessage =
            serde_json::from_str(r#"{"message_type":"tap","side":"white"}"#).unwrap();
        assert_eq!(
            tap,
            ClientMessage::Tap {
                side: "white".to_string()
            }
        );

        let mute: ClientMessage =
            serde_json::from_str(r#"{"message_type":"mute","muted":true}"#).unwrap();
        assert_eq!(mute, ClientMessage::Mute { muted: true });

        let toggle: ClientMessage = serde_json::from_str(r#"{"message_type":"toggle"}"#).unwrap();
        assert_eq!(toggle, ClientMessage::Toggle);
    }

    #[test]
    fn rejects_unknown_or_incomplete_messages() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"message_type":"resign"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"message_type":"tap"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>("not json").is_err());
    }

    #[test]
    fn idle_state_snapshot() {
        let clock = ChessClock::new(ClockConfig::default());
        let msg = ServerMessage::state(&clock, false);
        assert_eq!(msg.message_type, "state");
        assert_eq!(msg.active_color, None);
        assert_eq!(msg.running, Some(false));
        assert_eq!(msg.game_status.as_deref(), Some("idle"));

        let white = msg.white.unwrap();
        assert_eq!(white.remaining_ms, 600_000);
        assert_eq!(white.display, "10:00");
        assert_eq!(white.progress, 1.0);
        assert!(!white.is_active);
        assert!(!white.is_loser);
    }

    #[test]
    fn finished_state_marks_the_loser() {
        let mut clock = ChessClock::new(ClockConfig::new(0.1, 100).unwrap());
        clock.start();
        clock.tick();
        let msg = ServerMessage::state(&clock, true);
        assert_eq!(msg.game_status.as_deref(), Some("black_wins"));
        assert_eq!(msg.muted, Some(true));

        let white = msg.white.unwrap();
        assert!(white.is_loser);
        assert!(!white.is_active);
        assert_eq!(white.display, "00:00");
        assert_eq!(white.progress, 0.0);
        assert!(!msg.black.unwrap().is_loser);
    }

    #[test]
    fn notifications_carry_cues_unless_muted() {
        let turn = ServerMessage::notification(Notification::TurnChanged(Color::Black), false);
        assert_eq!(turn.message_type, "turn_changed");
        assert_eq!(turn.color.as_deref(), Some("black"));
        assert_eq!(turn.cue.as_deref(), Some("click"));

        let flag = ServerMessage::notification(Notification::Expired(Color::White), false);
        assert_eq!(flag.message_type, "expired");
        assert_eq!(flag.color.as_deref(), Some("white"));
        assert_eq!(flag.cue.as_deref(), Some("alarm"));

        let muted = ServerMessage::notification(Notification::Expired(Color::White), true);
        assert_eq!(muted.cue, None);
    }

    #[test]
    fn serializes_with_message_type() {
        let json = serde_json::to_value(ServerMessage::error("bad side")).unwrap();
        assert_eq!(json["message_type"], "error");
        assert_eq!(json["error"], "bad side");
    }
}
