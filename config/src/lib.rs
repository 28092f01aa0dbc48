//! # Config Crate
//!
//! Centralized configuration constants for the mesh modeling kernel.
//! Every tolerance, threshold and editor default used by the topology
//! operations is defined here so the kernel never scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DEFAULT_EXTRUDE_DISTANCE};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 1e-11;
//! assert!(value.abs() < EPSILON);
//!
//! // Editor defaults seed the tool panels
//! assert!(DEFAULT_EXTRUDE_DISTANCE > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: [`constants::ModelerConfig`] rejects nonsense values
//! - **Editor Compatible**: Defaults match the level editor's tool panels

pub mod constants;

#[cfg(test)]
mod tests;
