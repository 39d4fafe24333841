// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Random control-pulse sequences.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pulse sequence of shape (n_ts, n_ctrls) with amplitudes uniform in
/// `[-max_amplitude, max_amplitude]`.
///
/// # Panics
/// Panics if `max_amplitude` is negative or not finite.
pub fn random_pulses<R: Rng + ?Sized>(
    rng: &mut R,
    n_ts: usize,
    n_ctrls: usize,
    max_amplitude: f64,
) -> Array2<f64> {
    if max_amplitude == 0.0 {
        return Array2::zeros((n_ts, n_ctrls));
    }
    Array2::from_shape_simple_fn((n_ts, n_ctrls), || {
        rng.gen_range(-max_amplitude..=max_amplitude)
    })
}

/// Deterministic generator when `seed` is given, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
