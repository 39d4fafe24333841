// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hamiltonian model library.
//!
//! Every model describes the same two-qubit system: controls act on the left
//! qubit (X and Z channels), the qubits are coupled by an isotropic exchange
//! interaction, and a noise term of strength `gamma` mixes in a fixed
//! direction. Models differ only in where the noise term acts:
//!
//! | Model                | noise term                                      | params                 |
//! |----------------------|-------------------------------------------------|------------------------|
//! | `RightQubitMixing`   | `I ⊗ (αX + (1−α)Y)`                             | `(alpha, gamma)`       |
//! | `LeftQubitMixing`    | `(αX + (1−α)Y) ⊗ I`                             | `(alpha, gamma)`       |
//! | `SpinChainMixing`    | `αX⊗X + βY⊗Y + (1−α−β)Z⊗Z`                      | `(alpha, gamma, beta)` |
//!
//! All generators are returned on the superoperator space (see
//! [`crate::operators::lift`]) and already carry the `-i` factor, so the
//! short-time propagator of a slot is simply `exp(dt · (drift + Σ u_j ctrl_j))`.

pub mod types;

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ModelError, Result, ValidationError};
use crate::operators::{
    exchange_coupling, kron, lift, on_left, on_right, sigma_x, sigma_y, sigma_z,
};

pub use types::{MixingParams, ModelBundle, HILBERT_DIM, NUM_CONTROLS, SUPEROP_SIZE};

/// The supported noise models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseModel {
    /// Single-qubit noise mixing on the right (uncontrolled) qubit.
    RightQubitMixing,
    /// Single-qubit noise mixing on the left (controlled) qubit.
    LeftQubitMixing,
    /// Two-qubit anisotropic spin-chain noise.
    SpinChainMixing,
}

impl NoiseModel {
    /// All models, in declaration order.
    pub const ALL: [NoiseModel; 3] = [
        NoiseModel::RightQubitMixing,
        NoiseModel::LeftQubitMixing,
        NoiseModel::SpinChainMixing,
    ];

    /// Canonical model identifier used by the experiment tables.
    pub fn id(&self) -> &'static str {
        match self {
            NoiseModel::RightQubitMixing => "id_aSxbSy_spinChain_2x1",
            NoiseModel::LeftQubitMixing => "aSxbSy_id_spinChain_dim_2x1",
            NoiseModel::SpinChainMixing => "spinChainDrift_spinChain_dim_2x1",
        }
    }

    /// Short kebab-case alias.
    pub fn alias(&self) -> &'static str {
        match self {
            NoiseModel::RightQubitMixing => "right-mixing",
            NoiseModel::LeftQubitMixing => "left-mixing",
            NoiseModel::SpinChainMixing => "spin-chain-mixing",
        }
    }

    /// Number of physical parameters the model expects.
    pub fn num_params(&self) -> usize {
        match self {
            NoiseModel::RightQubitMixing | NoiseModel::LeftQubitMixing => 2,
            NoiseModel::SpinChainMixing => 3,
        }
    }

    /// Number of control channels (pulse amplitudes per time slot).
    pub fn num_controls(&self) -> usize {
        NUM_CONTROLS
    }

    /// Check the parameter tuple length and unpack it in engine order.
    pub fn parse_params(&self, params: &[f64]) -> Result<MixingParams> {
        if params.len() != self.num_params() {
            return Err(ModelError::InvalidParameterArity {
                model: self.alias().to_string(),
                expected: self.num_params(),
                actual: params.len(),
            }
            .into());
        }
        if let Some((k, v)) = params.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::Field {
                field: "params".into(),
                message: format!("non-finite value {} at position {}", v, k),
            }
            .into());
        }
        Ok(MixingParams {
            alpha: params[0],
            gamma: params[1],
            beta: params.get(2).copied(),
        })
    }

    /// Build the control and drift generators for the given parameters.
    pub fn build(&self, params: &[f64]) -> Result<ModelBundle> {
        let p = self.parse_params(params)?;
        trace!(model = self.alias(), ?p, "Building model generators");

        let noise = match self {
            NoiseModel::RightQubitMixing => on_right(&single_qubit_mixing(p.alpha)),
            NoiseModel::LeftQubitMixing => on_left(&single_qubit_mixing(p.alpha)),
            NoiseModel::SpinChainMixing => match p.beta {
                Some(beta) => spin_chain_mixing(p.alpha, beta),
                None => {
                    return Err(ModelError::InvalidParameterArity {
                        model: self.alias().to_string(),
                        expected: self.num_params(),
                        actual: 2,
                    }
                    .into())
                }
            },
        };

        let drift = superop_generator(&noise) * Complex64::new(p.gamma, 0.0)
            + superop_generator(&exchange_coupling());

        Ok(ModelBundle {
            ctrls: control_generators(),
            drift,
        })
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias())
    }
}

impl FromStr for NoiseModel {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        NoiseModel::ALL
            .into_iter()
            .find(|m| m.id() == name || m.alias() == name)
            .ok_or_else(|| ModelError::UnsupportedModel(name.to_string()))
    }
}

/// Select a model by canonical identifier or alias.
pub fn select_model(name: &str) -> Result<NoiseModel> {
    Ok(name.parse::<NoiseModel>()?)
}

/// Build the generators of `model` for `params`.
pub fn build_model(model: NoiseModel, params: &[f64]) -> Result<ModelBundle> {
    model.build(params)
}

/// `-i · lift(h)`: Liouvillian generator of the Hamiltonian term `h`.
fn superop_generator(h: &Array2<Complex64>) -> Array2<Complex64> {
    lift(h) * Complex64::new(0.0, -1.0)
}

/// Control generators `[-i·lift(X⊗I), -i·lift(Z⊗I)]`.
fn control_generators() -> Vec<Array2<Complex64>> {
    vec![
        superop_generator(&on_left(&sigma_x())),
        superop_generator(&on_left(&sigma_z())),
    ]
}

/// `αX + (1−α)Y`.
fn single_qubit_mixing(alpha: f64) -> Array2<Complex64> {
    sigma_x() * Complex64::new(alpha, 0.0) + sigma_y() * Complex64::new(1.0 - alpha, 0.0)
}

/// `αX⊗X + βY⊗Y + (1−α−β)Z⊗Z`.
fn spin_chain_mixing(alpha: f64, beta: f64) -> Array2<Complex64> {
    kron(&sigma_x(), &sigma_x()) * Complex64::new(alpha, 0.0)
        + kron(&sigma_y(), &sigma_y()) * Complex64::new(beta, 0.0)
        + kron(&sigma_z(), &sigma_z()) * Complex64::new(1.0 - alpha - beta, 0.0)
}
