//!
//! Baum-Welch training of transition/emission matrices
//!
//! * takes a Model and a single observation sequence as input
//! * E-step: run forward/backward and calculate the state/transition usage
//! * M-step: re-estimate the transition and emission matrices from the usage
//! * iterate E/M-steps and returns the improved Model
//!
//! The initial distribution is kept fixed.
//!
use crate::common::Symbol;
use crate::error::Result;
use crate::model::Model;
use itertools::izip;
use log::{debug, info};
use ndarray::{s, Array2, Axis};

///
/// Parameters of the Baum-Welch iteration
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaumWelchParams {
    ///
    /// maximum number of E/M iterations
    pub n_iter: usize,
    ///
    /// stop when the log-likelihood improves less than this.
    /// `None` always runs `n_iter` iterations.
    pub tolerance: Option<f64>,
}

impl BaumWelchParams {
    /// exactly `n_iter` iterations
    pub fn fixed(n_iter: usize) -> Self {
        BaumWelchParams {
            n_iter,
            tolerance: None,
        }
    }
    /// at most `n_max_iter` iterations, stopping early on convergence
    pub fn until_converged(n_max_iter: usize, tolerance: f64) -> Self {
        BaumWelchParams {
            n_iter: n_max_iter,
            tolerance: Some(tolerance),
        }
    }
}

impl Default for BaumWelchParams {
    fn default() -> Self {
        BaumWelchParams::fixed(100)
    }
}

impl std::fmt::Display for BaumWelchParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.tolerance {
            Some(tol) => write!(f, "n_iter={} tolerance={}", self.n_iter, tol),
            None => write!(f, "n_iter={}", self.n_iter),
        }
    }
}

///
/// Usage frequencies calculated in E-step
///
#[derive(Debug, Clone)]
pub struct EStepResult {
    /// `g[t][i]` (T x N)
    pub state_probs: Array2<f64>,
    /// `sum_t s[t][i][j]` (N x N)
    pub trans_freqs: Array2<f64>,
    /// `log P(x | model)`
    pub log_likelihood: f64,
}

///
/// Result of `Model::train`
///
#[derive(Debug, Clone)]
pub struct EMResult {
    /// the trained model
    pub model: Model,
    /// log-likelihood of the model at the start of each iteration
    pub log_likelihoods: Vec<f64>,
    /// the number of M-steps applied
    pub n_iter: usize,
    /// iteration stopped by the tolerance
    pub is_converged: bool,
}

///
/// Run forward/backward and calculate the state probs and transition freqs
///
pub fn e_step(model: &Model, observations: &[Symbol]) -> Result<EStepResult> {
    let o = model.forward_backward(observations)?;
    Ok(EStepResult {
        state_probs: o.to_state_probs(),
        trans_freqs: o.to_trans_freqs(model, observations)?,
        log_likelihood: o.log_likelihood(),
    })
}

///
/// Re-estimate the transition and emission matrices
///
/// ```text
/// a_ij = sum_{t<T-1} s[t][i][j] / sum_{t<T-1} g[t][i]
/// e_ik = sum_{t: x[t]=k} g[t][i] / sum_t g[t][i]
/// ```
///
/// A state with zero expected usage (zero denominator) keeps its row of the
/// current model.
///
pub fn m_step(
    model: &Model,
    observations: &[Symbol],
    e: &EStepResult,
) -> (Array2<f64>, Array2<f64>) {
    let n_trans = observations.len().saturating_sub(1);
    let gamma = &e.state_probs;

    // transition
    let mut trans = model.trans().clone();
    let trans_denoms = gamma.slice(s![..n_trans, ..]).sum_axis(Axis(0));
    for (i, (mut row, &denom)) in trans
        .axis_iter_mut(Axis(0))
        .zip(trans_denoms.iter())
        .enumerate()
    {
        if denom > 0.0 {
            row.assign(&(&e.trans_freqs.row(i) / denom));
        } else {
            debug!("state {} has no transition usage, keep its transitions", i);
        }
    }

    // emission
    let mut counts = Array2::<f64>::zeros(model.emit().dim());
    for (g, &symbol) in izip!(gamma.axis_iter(Axis(0)), observations) {
        let mut column = counts.column_mut(symbol);
        column += &g;
    }
    let emit_denoms = gamma.sum_axis(Axis(0));
    let mut emit = model.emit().clone();
    for (i, (mut row, &denom)) in emit
        .axis_iter_mut(Axis(0))
        .zip(emit_denoms.iter())
        .enumerate()
    {
        if denom > 0.0 {
            row.assign(&(&counts.row(i) / denom));
        } else {
            debug!("state {} has no usage, keep its emissions", i);
        }
    }

    (trans, emit)
}

impl Model {
    ///
    /// Run Baum-Welch `n_iter` times and return the re-estimated
    /// `(trans, emit)`. The initial distribution is not updated.
    ///
    /// `n_iter = 0` returns the current matrices.
    ///
    pub fn baum_welch(
        &self,
        observations: &[Symbol],
        n_iter: usize,
    ) -> Result<(Array2<f64>, Array2<f64>)> {
        let r = self.train(observations, &BaumWelchParams::fixed(n_iter))?;
        let (_, trans, emit) = r.model.into_parts();
        Ok((trans, emit))
    }
    ///
    /// Run e-step and m-step iteratively
    ///
    pub fn train(&self, observations: &[Symbol], params: &BaumWelchParams) -> Result<EMResult> {
        self.validate_observations(observations)?;
        let mut model = self.clone();
        let mut log_likelihoods: Vec<f64> = Vec::with_capacity(params.n_iter);
        let mut is_converged = false;

        for i in 0..params.n_iter {
            let e = e_step(&model, observations)?;
            info!("#{} log_likelihood={}", i, e.log_likelihood);

            let improvement = log_likelihoods.last().map(|&prev| e.log_likelihood - prev);
            log_likelihoods.push(e.log_likelihood);
            if let (Some(tolerance), Some(improvement)) = (params.tolerance, improvement) {
                if improvement < tolerance {
                    info!("converged at #{} (improvement={})", i, improvement);
                    is_converged = true;
                    break;
                }
            }

            let (trans, emit) = m_step(&model, observations, &e);
            model = model.with_params(trans, emit)?;
            debug!("#{} model\n{}", i, model);
        }

        let n_iter = if is_converged {
            log_likelihoods.len() - 1
        } else {
            log_likelihoods.len()
        };
        Ok(EMResult {
            model,
            log_likelihoods,
            n_iter,
            is_converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HmmError;
    use crate::model::mocks::*;
    use crate::model::new_model;
    use crate::model::validate::is_row_stochastic;

    fn training_sequence() -> Vec<usize> {
        [0, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 0, 0, 0, 0, 1].repeat(5)
    }

    #[test]
    fn baum_welch_zero_iteration_is_identity() {
        let m = new_model(2, 2, 42).unwrap();
        let (trans, emit) = m.baum_welch(&training_sequence(), 0).unwrap();
        assert_eq!(&trans, m.trans());
        assert_eq!(&emit, m.emit());
    }
    #[test]
    fn baum_welch_keeps_stochastic() {
        let m = new_model(2, 2, 42).unwrap();
        let (trans, emit) = m.baum_welch(&training_sequence(), 1).unwrap();
        assert!(is_row_stochastic(trans.view(), 1e-9));
        assert!(is_row_stochastic(emit.view(), 1e-9));
        assert_ne!(&trans, m.trans());

        let (trans, emit) = m.baum_welch(&training_sequence(), 100).unwrap();
        assert!(is_row_stochastic(trans.view(), 1e-9));
        assert!(is_row_stochastic(emit.view(), 1e-9));
    }
    #[test]
    fn baum_welch_likelihood_increases() {
        let m = new_model(2, 2, 42).unwrap();
        let r = m
            .train(&training_sequence(), &BaumWelchParams::fixed(30))
            .unwrap();
        assert_eq!(r.log_likelihoods.len(), 30);
        assert_eq!(r.n_iter, 30);
        assert!(!r.is_converged);
        for w in r.log_likelihoods.windows(2) {
            assert!(w[1] >= w[0] - 1e-9, "{} -> {}", w[0], w[1]);
        }
        // pi is never updated
        assert_eq!(r.model.init(), m.init());
    }
    #[test]
    fn baum_welch_zero_occupancy_keeps_row() {
        // state 1 is unreachable
        let m = Model::from_rows(
            vec![1.0, 0.0],
            vec![vec![1.0, 0.0], vec![0.5, 0.5]],
            vec![vec![0.5, 0.5], vec![0.2, 0.8]],
        )
        .unwrap();
        let (trans, emit) = m.baum_welch(&[0, 1, 1, 1], 3).unwrap();
        assert!(trans.iter().chain(emit.iter()).all(|x| x.is_finite()));
        assert_eq!(trans.row(1), m.trans().row(1));
        assert_eq!(emit.row(1), m.emit().row(1));
        assert_abs_diff_eq!(trans[[0, 0]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(emit[[0, 0]], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(emit[[0, 1]], 0.75, epsilon = 1e-12);
    }
    #[test]
    fn baum_welch_single_observation() {
        // no transitions are observed, so the transition matrix is kept
        let m = mock_two_state();
        let (trans, emit) = m.baum_welch(&[1], 1).unwrap();
        assert_eq!(&trans, m.trans());
        assert_abs_diff_eq!(emit[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(emit[[1, 1]], 1.0, epsilon = 1e-12);
    }
    #[test]
    fn baum_welch_until_converged() {
        let m = new_model(2, 2, 42).unwrap();
        let params = BaumWelchParams::until_converged(5000, 1e-2);
        let r = m.train(&training_sequence(), &params).unwrap();
        assert!(r.is_converged);
        assert!(r.n_iter < 5000);
        assert_eq!(r.log_likelihoods.len(), r.n_iter + 1);
        let n = r.log_likelihoods.len();
        assert!(r.log_likelihoods[n - 1] - r.log_likelihoods[n - 2] < 1e-2);
    }
    #[test]
    fn baum_welch_invalid_input() {
        let m = mock_two_state();
        assert!(matches!(
            m.baum_welch(&[], 1),
            Err(HmmError::EmptySequence)
        ));
        assert!(matches!(
            m.baum_welch(&[0, 5], 0),
            Err(HmmError::OutOfRangeSymbol { t: 1, .. })
        ));
        let m = Model::from_rows(
            vec![1.0, 0.0],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        )
        .unwrap();
        assert!(matches!(
            m.baum_welch(&[0, 1], 1),
            Err(HmmError::ZeroLikelihood { t: 1 })
        ));
    }
    #[test]
    fn params_display() {
        assert_eq!(BaumWelchParams::fixed(3).to_string(), "n_iter=3");
        assert_eq!(
            BaumWelchParams::until_converged(3, 0.5).to_string(),
            "n_iter=3 tolerance=0.5"
        );
        assert_eq!(BaumWelchParams::default().n_iter, 100);
    }
}
