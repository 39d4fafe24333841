// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parallel evaluation of independent pulse sequences.
//!
//! Each item builds its own model bundle and accumulator, so items share no
//! mutable state and rayon can spread them over the global pool.

use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;
use tracing::debug;

use super::fidelity::fidelity_error;
use super::integrate::integrate;
use super::types::NumericMode;
use crate::error::{Result, ValidationError};
use crate::models::{NoiseModel, HILBERT_DIM};

/// Integrate every pulse sequence in `batch`; output order follows input order.
///
/// The first failing item aborts the batch.
pub fn evolve_batch(
    batch: &[Array2<f64>],
    params: &[f64],
    n_ts: usize,
    evo_time: f64,
    model: NoiseModel,
    mode: NumericMode,
) -> Result<Vec<Array2<Complex64>>> {
    debug!(
        batch_size = batch.len(),
        model = model.alias(),
        mode = mode.name(),
        "Evolving batch"
    );
    batch
        .par_iter()
        .map(|pulses| integrate(pulses, params, n_ts, evo_time, model, mode))
        .collect()
}

/// Fidelity error of every pulse sequence in `batch` against its target.
///
/// # Errors
/// A `DimensionMismatch` if `targets` and `batch` differ in length, plus any
/// error from [`integrate`] or [`fidelity_error`].
pub fn score_batch(
    batch: &[Array2<f64>],
    targets: &[Array2<Complex64>],
    params: &[f64],
    n_ts: usize,
    evo_time: f64,
    model: NoiseModel,
    mode: NumericMode,
) -> Result<Vec<f64>> {
    if batch.len() != targets.len() {
        return Err(ValidationError::DimensionMismatch {
            what: "targets per pulse sequence".into(),
            expected: batch.len(),
            actual: targets.len(),
        }
        .into());
    }

    batch
        .par_iter()
        .zip(targets.par_iter())
        .map(|(pulses, target)| {
            let generated = integrate(pulses, params, n_ts, evo_time, model, mode)?;
            fidelity_error(target, &generated, HILBERT_DIM, mode)
        })
        .collect()
}
