//!
//! Calculate state/transition usage frequencies from the result of
//! Forward/Backward.
//!
//! - **State probs** (for each t and each state)
//!     `g[t][i] = P(in state i at t | x)`
//!
//! - **Trans probs** (for each t and each pair of states)
//!     `s[t][i][j] = P(in state i at t and in state j at t+1 | x)`
//!
//! - **Trans freqs** (for each pair of states)
//!     The expected number of `i -> j` transitions, `sum_t s[t][i][j]`
//!
use super::FBOutput;
use crate::common::{StatePath, Symbol};
use crate::error::{HmmError, Result};
use crate::model::Model;
use crate::prob::{argmax, Prob};
use ndarray::{Array2, Axis};

impl FBOutput {
    ///
    /// `g[t][i]` as a T x N table, each row normalized to sum to 1
    ///
    pub fn to_state_probs(&self) -> Array2<f64> {
        let mut gamma = self.alpha() * self.beta();
        for mut row in gamma.axis_iter_mut(Axis(0)) {
            let sum = row.sum();
            if sum > 0.0 {
                row /= sum;
            }
        }
        gamma
    }
    ///
    /// `s[t]` for `t = 0..T-1` (T-1 tables of N x N), each normalized to sum to 1
    ///
    /// The model and observations must be the ones that produced this output.
    /// A model with another number of states or observations of another
    /// length is `InvalidDimension`.
    ///
    pub fn to_trans_probs(
        &self,
        model: &Model,
        observations: &[Symbol],
    ) -> Result<Vec<Array2<f64>>> {
        self.check_inputs(model, observations)?;
        Ok((0..self.n_steps().saturating_sub(1))
            .map(|t| self.trans_probs_at(model, observations, t))
            .collect())
    }
    ///
    /// Expected transition counts `sum_t s[t][i][j]` (N x N)
    ///
    pub fn to_trans_freqs(&self, model: &Model, observations: &[Symbol]) -> Result<Array2<f64>> {
        self.check_inputs(model, observations)?;
        let n = self.n_states();
        let freqs = (0..self.n_steps().saturating_sub(1)).fold(Array2::zeros((n, n)), |acc, t| {
            acc + self.trans_probs_at(model, observations, t)
        });
        Ok(freqs)
    }
    ///
    /// The most probable state of each step on its own (argmax of `g[t]`).
    /// Unlike Viterbi, the path may contain impossible transitions.
    ///
    pub fn to_posterior_path(&self) -> StatePath {
        self.to_state_probs()
            .axis_iter(Axis(0))
            .map(|row| {
                argmax(row.iter().map(|&x| Prob::from_prob(x)))
                    .map_or(0, |(i, _)| i)
            })
            .collect()
    }
    ///
    /// Check the model and observations fit the size of this output.
    ///
    fn check_inputs(&self, model: &Model, observations: &[Symbol]) -> Result<()> {
        if model.n_states() != self.n_states() {
            return Err(HmmError::InvalidDimension(format!(
                "model has {} states, forward/backward has {}",
                model.n_states(),
                self.n_states()
            )));
        }
        if observations.len() != self.n_steps() {
            return Err(HmmError::InvalidDimension(format!(
                "{} observations for {} forward/backward steps",
                observations.len(),
                self.n_steps()
            )));
        }
        model.validate_observations(observations)
    }
    ///
    /// ```text
    /// s[t][i][j] ~ A[t][i] a_ij e_j(x[t+1]) B[t+1][j]
    /// ```
    ///
    fn trans_probs_at(&self, model: &Model, observations: &[Symbol], t: usize) -> Array2<f64> {
        let alpha = self.alpha().row(t);
        let next = &self.beta().row(t + 1) * &model.emit().column(observations[t + 1]);
        let trans = model.trans();
        let mut xi = Array2::from_shape_fn((self.n_states(), self.n_states()), |(i, j)| {
            alpha[i] * trans[[i, j]] * next[j]
        });
        let sum = xi.sum();
        if sum > 0.0 {
            xi /= sum;
        }
        xi
    }
}
