pub mod machine;
pub mod tick;
pub mod utils;

// Re-export important types
pub use machine::*;
pub use tick::{Arm, Disarm, Tick, TickSource};
