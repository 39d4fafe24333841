// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Superoperator evolution engine for two-qubit open systems.
//!
//! This crate evolves a two-qubit system under piecewise-constant control
//! pulses in the vectorised (Liouville) picture, where the state is a 16-entry
//! vector and every generator is a 16 × 16 superoperator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         CLI / experiment sweep           │
//! ├─────────────────────────────────────────┤
//! │  Integrator (exact | differentiable)     │
//! ├──────────────────┬──────────────────────┤
//! │  Model library   │  Matrix exponential  │
//! ├──────────────────┴──────────────────────┤
//! │           Operator algebra               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`operators`]: Pauli matrices, Kronecker products, superoperator lift
//! - [`models`]: Noise model library
//! - [`evolution`]: Exponentials, integrator, fidelity scorer, batches
//! - [`sweep`]: Experiment index tables
//! - [`sampling`]: Random pulse sequences
//! - [`config`]: Configuration management
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod evolution;
pub mod models;
pub mod operators;
pub mod sampling;
pub mod sweep;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use evolution::{fidelity_error, integrate, NumericMode};
pub use models::{build_model, select_model, NoiseModel};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
