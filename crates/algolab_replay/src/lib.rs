//! ALGOLAB Replay
//!
//! Playback over generated traces. [`PlaybackController`] is the state
//! machine; [`VirtualClock`] and [`Player`] are the two ways of driving its
//! timer, the first over simulated milliseconds and the second on tokio.
//! [`LabSession`] is the control surface a UI talks to.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assistant;
pub mod clock;
pub mod config;
pub mod controller;
pub mod player;
pub mod session;

pub use assistant::{AssistantError, CodeAssistant, CodeRequest};
pub use clock::VirtualClock;
pub use config::{ConfigError, LabConfig, PlaybackConfig};
pub use controller::{
    ActiveTimer, PlaybackController, PlaybackState, PlaybackStatus, TickOutcome, TimerEpoch,
};
pub use player::{Player, PlayerError, PlayerHandle};
pub use session::{Action, LabSession, ReadModel, SessionError};
