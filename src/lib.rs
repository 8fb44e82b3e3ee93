//! Countdown core for a Pomodoro dial.
//!
//! A [`TimerSession`] turns drag gestures on a circular dial into a remaining
//! time and counts it down against a wall-clock deadline. Rendering, sound and
//! haptics belong to the host; the core only asks for [`Feedback`].

pub mod config;
pub mod dial;
pub mod duration;
pub mod error;
pub mod feedback;
pub mod session;
pub mod ticker;
pub mod timer;

pub use config::Config;
pub use error::{Error, Result};
pub use feedback::Feedback;
pub use session::{Snapshot, TimerSession};
pub use ticker::TickSource;
pub use timer::TickOutcome;
