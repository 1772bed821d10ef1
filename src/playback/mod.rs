//! Playback control and the frame pull loop
//!
//! This module owns everything between the external toggle command and the
//! display sink:
//! - `state`: the two-state play/stop machine
//! - `scheduler`: the single-flight pull loop and its control surface
//! - `health`: counters the loop updates and observers read
//!
//! The loop runs as one async task; stopping is cooperative and takes
//! effect at the loop's next decision point, never mid-request.

pub mod health;
pub mod scheduler;
pub mod state;

pub use health::{FeedHealth, HealthSummary};
pub use scheduler::FrameScheduler;
pub use state::PlaybackState;
