//! Club Tracker Service Library
//!
//! Configuration, logging setup, per-club pipeline orchestration and terminal
//! rendering for the `club-tracker` binary.

pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod render;

pub use cli::{Cli, CliHandler, Commands};
pub use config::{load_config, ClubConfig, LoggingConfig, TrackerConfig};
pub use logging::initialize_logging;
pub use pipeline::{run_clubs, ClubPipeline, ClubSummary};
