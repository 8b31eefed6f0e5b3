//! Scenario test harness for the voxcull engine.
//!
//! Builds small worlds around a fixed test camera and runs whole frames
//! through the culler, so tests can assert on render flags and on how often
//! each entity's behavior actually ran.

pub mod harness;

pub use harness::{create_test_camera, TestScene, UpdateCounter};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error("engine error: {0}")]
    Engine(#[from] voxcull_core::Error),
    #[error("scenario failed: {0}")]
    Scenario(String),
}

pub type Result<T> = std::result::Result<T, TestError>;
