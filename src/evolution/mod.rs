// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Superoperator evolution under piecewise-constant control pulses.
//!
//! The engine has two numeric paths sharing one integrator and one scorer:
//!
//! - **exact**: every slot propagator uses the Padé(13) exponential;
//! - **differentiable**: every slot propagator uses a fixed-order truncated
//!   Taylor series, so the whole evolution is a composition of products, sums
//!   and scalar divisions of the pulse amplitudes.
//!
//! # Example
//!
//! ```no_run
//! use ndarray::Array2;
//! use superop_sim::evolution::{fidelity_error, integrate, NumericMode};
//! use superop_sim::models::{select_model, HILBERT_DIM};
//!
//! let model = select_model("left-mixing")?;
//! let pulses = Array2::zeros((32, model.num_controls()));
//!
//! let exact = integrate(&pulses, &[0.2, 0.6], 32, 6.0, model, NumericMode::Exact)?;
//! let fast = integrate(&pulses, &[0.2, 0.6], 32, 6.0, model, NumericMode::differentiable())?;
//! let err = fidelity_error(&exact, &fast, HILBERT_DIM, NumericMode::Exact)?;
//! assert!(err < 1e-10);
//! # Ok::<(), superop_sim::Error>(())
//! ```

pub mod batch;
pub mod expm;
pub mod fidelity;
pub mod integrate;
pub mod types;

pub use batch::{evolve_batch, score_batch};
pub use expm::{exp_approx, matrix_exp, MatrixExponential, PadeExponential, TruncatedSeries};
pub use fidelity::fidelity_error;
pub use integrate::{chain_propagators, compute_propagators, integrate, integrate_bundle};
pub use types::{NumericMode, DEFAULT_SERIES_ORDER};
