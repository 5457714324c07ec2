// src/engine/mod.rs

//! Live-rebuild engine.
//!
//! This module ties together:
//! - the build coordinator that serializes builder invocations and decides
//!   the run's outcome
//! - the live-build entry point that wires detectors, channels and teardown
//! - named build steps, used by build scripts as their builder body

pub mod coordinator;
pub mod live;
pub mod steps;

pub use coordinator::Coordinator;
pub use live::{LiveBuildOptions, live_build};
pub use steps::{BuildStep, run_steps};
