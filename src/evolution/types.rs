// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Numeric mode selection.

use serde::{Deserialize, Serialize};

use super::expm::{MatrixExponential, PadeExponential, TruncatedSeries};
use crate::error::{Result, ValidationError};

/// Truncation order used by the differentiable path unless configured otherwise.
pub const DEFAULT_SERIES_ORDER: usize = 20;

/// Which matrix-exponential path the integrator uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum NumericMode {
    /// Reference path: Padé(13) scaling-and-squaring exponential.
    #[default]
    Exact,
    /// Gradient-friendly path: truncated Taylor series of fixed order.
    Differentiable {
        /// Number of series terms (including the identity).
        order: usize,
    },
}

impl NumericMode {
    /// Differentiable mode with the default truncation order.
    pub fn differentiable() -> Self {
        NumericMode::Differentiable {
            order: DEFAULT_SERIES_ORDER,
        }
    }

    /// Short name for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            NumericMode::Exact => "exact",
            NumericMode::Differentiable { .. } => "differentiable",
        }
    }

    /// Exponential implementation for this mode.
    pub fn exponential(&self) -> Result<Box<dyn MatrixExponential>> {
        match *self {
            NumericMode::Exact => Ok(Box::new(PadeExponential)),
            NumericMode::Differentiable { order } => {
                if order == 0 {
                    return Err(ValidationError::Field {
                        field: "order".into(),
                        message: "truncation order must be > 0".into(),
                    }
                    .into());
                }
                Ok(Box::new(TruncatedSeries::new(order)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_exact() {
        assert_eq!(NumericMode::default(), NumericMode::Exact);
        assert_eq!(NumericMode::default().name(), "exact");
    }

    #[test]
    fn test_differentiable_default_order() {
        assert_eq!(
            NumericMode::differentiable(),
            NumericMode::Differentiable { order: 20 }
        );
    }

    #[test]
    fn test_zero_order_rejected() {
        assert!(NumericMode::Differentiable { order: 0 }.exponential().is_err());
        assert!(NumericMode::Differentiable { order: 1 }.exponential().is_ok());
    }

    #[test]
    fn test_exponential_names() {
        assert_eq!(NumericMode::Exact.exponential().unwrap().name(), "pade13");
        assert_eq!(
            NumericMode::differentiable().exponential().unwrap().name(),
            "truncated-series"
        );
    }

    #[test]
    fn test_serde_round_trip_shape() {
        let yaml = serde_yaml::to_string(&NumericMode::Differentiable { order: 12 }).unwrap();
        assert!(yaml.contains("differentiable"));
        assert!(yaml.contains("12"));
        let back: NumericMode = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, NumericMode::Differentiable { order: 12 });
    }
}
