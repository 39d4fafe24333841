// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Experiment sweep tables.
//!
//! A numeric experiment index selects both the noise model and one entry of
//! that model's parameter table:
//!
//! | index range | model              | table                                   |
//! |-------------|--------------------|-----------------------------------------|
//! | `0..100`    | `LeftQubitMixing`  | γ ∈ {0.6, 0.8} × α ∈ {0.0, 0.2}         |
//! | `100..200`  | `RightQubitMixing` | γ ∈ {0.6, 0.8} × α ∈ {0.0, 0.2}         |
//! | `200..300`  | `SpinChainMixing`  | γ ∈ {0.6, 0.8} × α ∈ {0, 0.1, 0.2} × β ∈ {1.0, 0.8, 0.6} |
//!
//! Tables are enumerated with γ outermost. The offset inside a block is the
//! index minus the block start.

use serde::Serialize;

use crate::error::{Error, ModelError, Result};
use crate::models::{MixingParams, NoiseModel};

const GAMMAS: [f64; 2] = [0.6, 0.8];
const ALPHAS: [f64; 2] = [0.0, 0.2];
const SPIN_CHAIN_ALPHAS: [f64; 3] = [0.0, 0.1, 0.2];
const SPIN_CHAIN_BETAS: [f64; 3] = [1.0, 0.8, 0.6];

/// Width of each model's index block.
pub const INDEX_BLOCK: usize = 100;

/// One resolved experiment: model plus physical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Experiment {
    /// Experiment index this entry was resolved from.
    pub index: usize,
    /// Noise model.
    pub model: NoiseModel,
    /// Mixing weight α.
    pub alpha: f64,
    /// Noise strength γ.
    pub gamma: f64,
    /// Y⊗Y weight β (spin-chain mixing only).
    pub beta: Option<f64>,
}

impl Experiment {
    /// Resolve an experiment index.
    ///
    /// # Errors
    /// `UnsupportedModel` for an index past the last block, `Config` for an
    /// offset past the end of the model's table.
    pub fn from_index(index: usize) -> Result<Self> {
        let model = match index / INDEX_BLOCK {
            0 => NoiseModel::LeftQubitMixing,
            1 => NoiseModel::RightQubitMixing,
            2 => NoiseModel::SpinChainMixing,
            _ => {
                return Err(ModelError::UnsupportedModel(format!(
                    "no model for experiment index {}",
                    index
                ))
                .into())
            }
        };
        let offset = index % INDEX_BLOCK;
        let table = parameter_table(model);
        let p = table.get(offset).copied().ok_or_else(|| {
            Error::Config(format!(
                "experiment index {} selects entry {} of {}, which has {} entries",
                index,
                offset,
                model,
                table.len()
            ))
        })?;

        Ok(Self {
            index,
            model,
            alpha: p.alpha,
            gamma: p.gamma,
            beta: p.beta,
        })
    }

    /// Parameter tuple in engine order `(alpha, gamma[, beta])`.
    pub fn params(&self) -> Vec<f64> {
        MixingParams {
            alpha: self.alpha,
            gamma: self.gamma,
            beta: self.beta,
        }
        .to_vec()
    }
}

/// Index of the first experiment of `model`.
pub fn block_start(model: NoiseModel) -> usize {
    match model {
        NoiseModel::LeftQubitMixing => 0,
        NoiseModel::RightQubitMixing => INDEX_BLOCK,
        NoiseModel::SpinChainMixing => 2 * INDEX_BLOCK,
    }
}

/// Parameter table of `model`, γ outermost.
pub fn parameter_table(model: NoiseModel) -> Vec<MixingParams> {
    match model {
        NoiseModel::RightQubitMixing | NoiseModel::LeftQubitMixing => GAMMAS
            .iter()
            .flat_map(|&gamma| {
                ALPHAS.iter().map(move |&alpha| MixingParams {
                    alpha,
                    gamma,
                    beta: None,
                })
            })
            .collect(),
        NoiseModel::SpinChainMixing => GAMMAS
            .iter()
            .flat_map(|&gamma| {
                SPIN_CHAIN_ALPHAS.iter().flat_map(move |&alpha| {
                    SPIN_CHAIN_BETAS.iter().map(move |&beta| MixingParams {
                        alpha,
                        gamma,
                        beta: Some(beta),
                    })
                })
            })
            .collect(),
    }
}

/// Every experiment of `model`, in index order.
pub fn experiments(model: NoiseModel) -> Vec<Experiment> {
    let start = block_start(model);
    parameter_table(model)
        .into_iter()
        .enumerate()
        .map(|(k, p)| Experiment {
            index: start + k,
            model,
            alpha: p.alpha,
            gamma: p.gamma,
            beta: p.beta,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(parameter_table(NoiseModel::LeftQubitMixing).len(), 4);
        assert_eq!(parameter_table(NoiseModel::RightQubitMixing).len(), 4);
        assert_eq!(parameter_table(NoiseModel::SpinChainMixing).len(), 18);
    }

    #[test]
    fn test_index_zero() {
        let e = Experiment::from_index(0).unwrap();
        assert_eq!(e.model, NoiseModel::LeftQubitMixing);
        assert_eq!((e.gamma, e.alpha), (0.6, 0.0));
        assert_eq!(e.params(), vec![0.0, 0.6]);
    }

    #[test]
    fn test_gamma_is_outermost() {
        let e = Experiment::from_index(101).unwrap();
        assert_eq!(e.model, NoiseModel::RightQubitMixing);
        assert_eq!((e.gamma, e.alpha), (0.6, 0.2));
        let e = Experiment::from_index(102).unwrap();
        assert_eq!((e.gamma, e.alpha), (0.8, 0.0));
    }

    #[test]
    fn test_spin_chain_entries() {
        let e = Experiment::from_index(200).unwrap();
        assert_eq!(e.model, NoiseModel::SpinChainMixing);
        assert_eq!(e.params(), vec![0.0, 0.6, 1.0]);

        // γ = 0.8, α = 0.1, β = 0.6 → 9 + 3 + 2
        let e = Experiment::from_index(214).unwrap();
        assert_eq!(e.params(), vec![0.1, 0.8, 0.6]);

        let e = Experiment::from_index(217).unwrap();
        assert_eq!(e.params(), vec![0.2, 0.8, 0.6]);
    }

    #[test]
    fn test_params_fit_model_arity() {
        for model in NoiseModel::ALL {
            for e in experiments(model) {
                assert_eq!(e.params().len(), model.num_params());
                assert_eq!(Experiment::from_index(e.index).unwrap(), e);
            }
        }
    }

    #[test]
    fn test_offset_past_table_is_config_error() {
        assert!(matches!(Experiment::from_index(10), Err(Error::Config(_))));
        assert!(matches!(Experiment::from_index(218), Err(Error::Config(_))));
    }

    #[test]
    fn test_index_past_last_block_is_unsupported() {
        assert!(matches!(
            Experiment::from_index(300),
            Err(Error::Model(ModelError::UnsupportedModel(_)))
        ));
    }
}
