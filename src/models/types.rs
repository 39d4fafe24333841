// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model bundle and parameter types.

use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;

/// Dimension of the two-qubit Hilbert space.
pub const HILBERT_DIM: usize = 4;

/// Dimension of the superoperator space (`HILBERT_DIM²`).
pub const SUPEROP_SIZE: usize = HILBERT_DIM * HILBERT_DIM;

/// Number of control channels shared by every model (X and Z on the left qubit).
pub const NUM_CONTROLS: usize = 2;

/// Control and drift generators of a model, expressed on the superoperator
/// space and already multiplied by `-i`.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    /// Control generators, one per pulse channel.
    pub ctrls: Vec<Array2<Complex64>>,
    /// Drift generator.
    pub drift: Array2<Complex64>,
}

impl ModelBundle {
    /// Number of control channels.
    pub fn num_controls(&self) -> usize {
        self.ctrls.len()
    }

    /// Side length of every generator in the bundle.
    pub fn dim(&self) -> usize {
        self.drift.nrows()
    }

    /// Instantaneous generator `drift + Σ_j amplitudes[j] · ctrls[j]`.
    ///
    /// # Panics
    /// Panics if `amplitudes` is shorter than the number of controls.
    pub fn generator(&self, amplitudes: ArrayView1<f64>) -> Array2<Complex64> {
        self.ctrls
            .iter()
            .enumerate()
            .fold(self.drift.clone(), |acc, (j, ctrl)| {
                acc + ctrl * Complex64::new(amplitudes[j], 0.0)
            })
    }
}

/// Physical parameters of a noise model, in engine order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingParams {
    /// Mixing weight of the X-type component.
    pub alpha: f64,
    /// Noise coupling strength.
    pub gamma: f64,
    /// Mixing weight of the Y⊗Y component (spin-chain mixing model only).
    pub beta: Option<f64>,
}

impl MixingParams {
    /// Flatten back into an engine-order tuple `(alpha, gamma[, beta])`.
    pub fn to_vec(&self) -> Vec<f64> {
        match self.beta {
            Some(beta) => vec![self.alpha, self.gamma, beta],
            None => vec![self.alpha, self.gamma],
        }
    }
}
