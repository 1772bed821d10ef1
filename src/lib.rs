//! Live-view core for a camera calibration rig
//!
//! Pulls one complete JPEG frame per request from a fixed HTTP endpoint,
//! encodes the bytes to base64 and hands the text to a display sink,
//! driven by a two-state play/stop control that never lets more than one
//! fetch be in flight.

pub mod assets;
pub mod codec;
pub mod config;
pub mod display;
pub mod fetch;
pub mod playback;
