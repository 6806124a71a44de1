use actix::ArbiterHandle;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::ClockConfig;

/// Application state shared between connections
pub struct AppState {
    pub config: ClockConfig,
    pub static_dir: PathBuf,
    /// Arbiter that hosts every session's tick source
    pub timer_arbiter: ArbiterHandle,
    /// Ids of the live clock sessions
    pub sessions: Mutex<HashSet<String>>,
}

impl AppState {
    pub fn new(config: ClockConfig, static_dir: PathBuf, timer_arbiter: ArbiterHandle) -> Self {
        Self {
            config,
            static_dir,
            timer_arbiter,
            sessions: Mutex::new(HashSet::new()),
        }
    }

    /// Register a session and return the number of live sessions.
    pub fn register(&self, id: &str) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(id.to_string());
        sessions.len()
    }

    /// Drop a session and return the number still live.
    pub fn unregister(&self, id: &str) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.remove(id);
        sessions.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix::Arbiter;

    #[actix_rt::test]
    async fn counts_live_sessions() {
        let state = AppState::new(ClockConfig::default(), PathBuf::from("./static"), Arbiter::current());
        assert_eq!(state.register("a"), 1);
        assert_eq!(state.register("b"), 2);
        assert_eq!(state.register("a"), 2);
        assert_eq!(state.unregister("a"), 1);
        assert_eq!(state.unregister("missing"), 1);
        assert_eq!(state.session_count(), 1);
    }
}
