//! Lemongrass core: subsystem lifecycle, frame scheduling, and
//! gameplay random utilities.

pub mod clock;
pub mod config;
pub mod error;
pub mod host;
pub mod instance;
pub mod overlay;
pub mod ready;
pub mod registry;
pub mod rng;
pub mod schedule;
pub mod screen_log_subsystem;
pub mod subsystem;
pub mod tooltip_subsystem;
pub mod types;
pub mod weighted;
