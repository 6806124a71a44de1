use crate::clock::utils::color_from_str;
use crate::clock::Command;
use crate::models::ClientMessage;

/// Map a page message onto a clock command. `Ok(None)` covers session-level
/// messages that never reach the clock.
pub fn to_command(msg: &ClientMessage) -> Result<Option<Command>, String> {
    let command = match msg {
        ClientMessage::Start => Command::Start,
        ClientMessage::Pause => Command::Pause,
        ClientMessage::Toggle => Command::Toggle,
        ClientMessage::Reset => Command::Reset,
        ClientMessage::Tap { side } => match color_from_str(side) {
            Some(color) => Command::Tap(color),
            None => return Err(format!("Unknown side: {}", side)),
        },
        ClientMessage::Mute { .. } | ClientMessage::Sync => return Ok(None),
    };
    Ok(Some(command))
}
