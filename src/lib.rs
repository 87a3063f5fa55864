//! A tabular Q-learning agent that learns to walk a grid maze
//!
//! An [`Episode`](episode::Episode) owns the agent's position and its Q-table and advances
//! one greedy step per [`tick`](episode::Episode::tick). A [`Driver`](driver::Driver) repeats
//! ticks until the goal is reached and reports each one to an [`Observer`](observer::Observer).

/// Learning agents
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Grid position to state index mapping
pub mod codec;

/// Episode configuration
pub mod config;

/// Pacing and cancellation around an episode
pub mod driver;

/// Environment
pub mod env;

/// The learning loop
pub mod episode;

/// Error types
pub mod error;

/// Transitions
pub mod exp;

/// Environments
pub mod gym;

/// Maze grids and built-in layouts
pub mod maze;

/// Episode observers
pub mod observer;

/// Actions and movement
pub mod policy;

/// Reward function
pub mod reward;

/// Terminal visualizer
#[cfg(feature = "viz")]
pub mod viz;

mod util;
