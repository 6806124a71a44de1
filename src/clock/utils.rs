use chess::Color;
use std::time::Duration;

use crate::clock::machine::{ClockState, Outcome, Phase};

/// Convert a chess color to a string
pub fn color_to_string(color: Color) -> String {
    match color {
        Color::White => "white".to_string(),
        Color::Black => "black".to_string(),
    }
}

/// Parse a side name sent by the page
pub fn color_from_str(name: &str) -> Option<Color> {
    match name.trim().to_ascii_lowercase().as_str() {
        "white" => Some(Color::White),
        "black" => Some(Color::Black),
        _ => None,
    }
}

/// Get the clock status as a string
pub fn game_status(state: &ClockState) -> String {
    match state.outcome() {
        Outcome::Won(Color::White) => "white_wins".to_string(),
        Outcome::Won(Color::Black) => "black_wins".to_string(),
        Outcome::Draw => "draw".to_string(),
        Outcome::InProgress => match state.phase() {
            Phase::Idle => "idle".to_string(),
            Phase::Running => "running".to_string(),
            Phase::Paused => "paused".to_string(),
            Phase::Finished => "finished".to_string(),
        },
    }
}

/// Render remaining time the way the clock face shows it.
///
/// Ten seconds and above read `MM:SS`; below that the face switches to
/// seconds and a single tenth digit. Fractions are truncated, never rounded,
/// so the display does not reach zero before the flag falls.
pub fn format_time(remaining: Duration) -> String {
    if remaining.is_zero() {
        return "00:00".to_string();
    }

    let total_secs = remaining.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let tenths = remaining.subsec_millis() / 100;

    if total_secs < 10 {
        return format!("{}.{}", seconds, tenths);
    }
    format!("{:02}:{:02}", minutes, seconds)
}

/// Fraction of the starting time still on a clock, in `[0, 1]`.
pub fn progress(remaining: Duration, initial: Duration) -> f64 {
    if initial.is_zero() {
        return 0.0;
    }
    (remaining.as_secs_f64() / initial.as_secs_f64()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::machine::ChessClock;
    use crate::config::ClockConfig;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(Duration::from_secs(600)), "10:00");
        assert_eq!(format_time(Duration::from_millis(599_500)), "09:59");
        assert_eq!(format_time(Duration::from_secs(61)), "01:01");
        assert_eq!(format_time(Duration::from_millis(10_000)), "00:10");
    }

    #[test]
    fn formats_tenths_under_ten_seconds() {
        assert_eq!(format_time(Duration::from_millis(9_999)), "9.9");
        assert_eq!(format_time(Duration::from_millis(4_250)), "4.2");
        assert_eq!(format_time(Duration::from_millis(50)), "0.0");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_time(Duration::ZERO), "00:00");
    }

    #[test]
    fn progress_is_a_clamped_fraction() {
        let initial = Duration::from_secs(600);
        assert_eq!(progress(initial, initial), 1.0);
        assert_eq!(progress(Duration::from_secs(300), initial), 0.5);
        assert_eq!(progress(Duration::ZERO, initial), 0.0);
        assert_eq!(progress(Duration::from_secs(900), initial), 1.0);
    }

    #[test]
    fn parses_side_names() {
        assert_eq!(color_from_str("white"), Some(Color::White));
        assert_eq!(color_from_str(" Black "), Some(Color::Black));
        assert_eq!(color_from_str("red"), None);
        assert_eq!(color_to_string(Color::Black), "black");
    }

    #[test]
    fn status_follows_the_clock() {
        let mut clock = ChessClock::new(ClockConfig::new(0.1, 100).unwrap());
        assert_eq!(game_status(clock.state()), "idle");
        clock.start();
        assert_eq!(game_status(clock.state()), "running");
        clock.pause();
        assert_eq!(game_status(clock.state()), "paused");
        clock.start();
        clock.tick();
        assert_eq!(game_status(clock.state()), "black_wins");
    }
}
