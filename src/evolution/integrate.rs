// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Propagator integrator for piecewise-constant control pulses.
//!
//! For slot k of length dt = T / n_ts the generator is
//! G_k = dt · (drift + Σ_j u_j(k) ctrl_j) and the short-time propagator is
//! P_k = exp(G_k). The full evolution is composed in time order with the most
//! recent slot leftmost: A = P_{n−1} · … · P_1 · P_0.

use ndarray::Array2;
use num_complex::Complex64;
use tracing::debug;

use super::expm::MatrixExponential;
use super::types::NumericMode;
use crate::error::Result;
use crate::models::{ModelBundle, NoiseModel};
use crate::validation::{validate_evolution_window, validate_pulse_sequence};

/// Integrate a pulse sequence into the superoperator of the full evolution.
///
/// # Arguments
/// * `pulses`: amplitudes of shape (n_ts, n_ctrls); row k holds slot k.
/// * `params`: physical parameters in the model's order.
/// * `n_ts`: number of time slots.
/// * `evo_time`: total evolution time.
/// * `model`: noise model (see [`crate::models::select_model`]).
/// * `mode`: exact or differentiable exponential.
///
/// # Errors
/// `InvalidParameterArity` if `params` does not fit `model`,
/// `DimensionMismatch` if `pulses` is not (n_ts, n_ctrls), and field
/// validation errors for a non-positive `n_ts`/`evo_time`, non-finite
/// amplitudes or a zero truncation order.
pub fn integrate(
    pulses: &Array2<f64>,
    params: &[f64],
    n_ts: usize,
    evo_time: f64,
    model: NoiseModel,
    mode: NumericMode,
) -> Result<Array2<Complex64>> {
    validate_evolution_window(n_ts, evo_time)?;
    let bundle = model.build(params)?;
    validate_pulse_sequence(pulses, n_ts, bundle.num_controls())?;
    let expm = mode.exponential()?;

    debug!(
        model = model.alias(),
        mode = mode.name(),
        n_ts,
        evo_time,
        "Integrating pulse sequence"
    );

    integrate_bundle(pulses, &bundle, evo_time / n_ts as f64, expm.as_ref())
}

/// Integrate an already-built bundle with a given exponential.
///
/// One slot per row of `pulses`.
///
/// # Errors
/// `DimensionMismatch` if `pulses` does not have exactly
/// `bundle.num_controls()` columns, plus any exponential failure.
pub fn integrate_bundle(
    pulses: &Array2<f64>,
    bundle: &ModelBundle,
    dt: f64,
    expm: &dyn MatrixExponential,
) -> Result<Array2<Complex64>> {
    let propagators = compute_propagators(pulses, bundle, dt, expm)?;
    Ok(chain_propagators(&propagators, bundle.dim()))
}

/// Short-time propagators P_k = exp(dt · (drift + Σ_j u_j(k) ctrl_j)), one per slot.
///
/// # Errors
/// `DimensionMismatch` if `pulses` does not have exactly
/// `bundle.num_controls()` columns, plus any exponential failure.
pub fn compute_propagators(
    pulses: &Array2<f64>,
    bundle: &ModelBundle,
    dt: f64,
    expm: &dyn MatrixExponential,
) -> Result<Vec<Array2<Complex64>>> {
    validate_pulse_sequence(pulses, pulses.nrows(), bundle.num_controls())?;
    pulses
        .rows()
        .into_iter()
        .map(|slot| expm.exp(&(bundle.generator(slot) * Complex64::new(dt, 0.0))))
        .collect()
}

/// Chain propagators: A = P_{n−1} · … · P_1 · P_0.
///
/// An empty slice yields the `dim × dim` identity.
pub fn chain_propagators(propagators: &[Array2<Complex64>], dim: usize) -> Array2<Complex64> {
    propagators.iter().fold(
        Array2::from_diag_elem(dim, Complex64::new(1.0, 0.0)),
        |acc, p| p.dot(&acc),
    )
}
