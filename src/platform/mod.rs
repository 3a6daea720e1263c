//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (wall clock in ms for tap timestamps)
//! - Tick scheduling (fixed-timestep accumulator scoped to the active round)
//! - Host shell callbacks (continue / back)

pub mod session;
pub mod time;
pub mod timer;

pub use session::{RoundHost, RoundSession};
pub use time::{ManualTime, TimeSource, WallTime};
pub use timer::TickTimer;
