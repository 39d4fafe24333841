// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for integration and scoring requests.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Result, ValidationError};

/// Validate the time discretisation of an evolution window.
pub fn validate_evolution_window(n_ts: usize, evo_time: f64) -> Result<()> {
    if n_ts == 0 {
        return Err(ValidationError::Field {
            field: "n_ts".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if !evo_time.is_finite() || evo_time <= 0.0 {
        return Err(ValidationError::Field {
            field: "evo_time".into(),
            message: format!("must be finite and greater than 0, got {}", evo_time),
        }
        .into());
    }

    Ok(())
}

/// Validate a pulse sequence against the slot count and control count.
pub fn validate_pulse_sequence(pulses: &Array2<f64>, n_ts: usize, n_ctrls: usize) -> Result<()> {
    let (rows, cols) = pulses.dim();

    if rows != n_ts {
        return Err(ValidationError::DimensionMismatch {
            what: "pulse time slots".into(),
            expected: n_ts,
            actual: rows,
        }
        .into());
    }

    if cols != n_ctrls {
        return Err(ValidationError::DimensionMismatch {
            what: "control amplitudes per slot".into(),
            expected: n_ctrls,
            actual: cols,
        }
        .into());
    }

    if let Some(((slot, ctrl), val)) = pulses.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ValidationError::Field {
            field: "pulses".into(),
            message: format!("non-finite amplitude {} at slot {}, control {}", val, slot, ctrl),
        }
        .into());
    }

    Ok(())
}

/// Validate that a superoperator is square with side `expected`.
pub fn validate_superoperator(name: &str, m: &Array2<Complex64>, expected: usize) -> Result<()> {
    let (rows, cols) = m.dim();
    for (axis, actual) in [("rows", rows), ("columns", cols)] {
        if actual != expected {
            return Err(ValidationError::DimensionMismatch {
                what: format!("{} {}", name, axis),
                expected,
                actual,
            }
            .into());
        }
    }
    Ok(())
}
