//!
//! Viterbi algorithm: the most probable hidden state path
//!
//! ```text
//! d[0][i] = pi[i] e_i(x[0])
//! d[t][j] = max_i (d[t-1][i] a_ij) e_j(x[t])
//! p[t][j] = argmax_i (d[t-1][i] a_ij)
//! ```
//!
//! The table is calculated in log space with `Prob`, so `log 0 = -inf` never
//! wins the max against a possible transition and long sequences do not
//! underflow. Ties are broken by the lowest state index, both in the
//! backpointers and in the final state.
//!
use crate::common::{State, StatePath, Symbol};
use crate::error::{HmmError, Result};
use crate::model::Model;
use crate::prob::{argmax, Prob};
use ndarray::Array2;
use rayon::prelude::*;

///
/// Most probable path and its joint log probability
/// `log P(path, observations)`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ViterbiResult {
    pub path: StatePath,
    pub log_prob: f64,
}

impl Model {
    ///
    /// Decode the most probable state path of the observations.
    ///
    /// The returned path has the same length as `observations`.
    /// Fails with `EmptySequence` or `OutOfRangeSymbol` before the table is
    /// allocated.
    ///
    pub fn viterbi(&self, observations: &[Symbol]) -> Result<StatePath> {
        self.viterbi_with_score(observations).map(|r| r.path)
    }
    ///
    /// `viterbi` that also returns the log probability of the best path.
    ///
    /// If no path can emit the observations, `log_prob` is `-inf` and the
    /// path is the lowest-index one.
    ///
    pub fn viterbi_with_score(&self, observations: &[Symbol]) -> Result<ViterbiResult> {
        self.validate_observations(observations)?;
        let trans = self.trans().mapv(Prob::from_prob);
        let emit = self.emit().mapv(Prob::from_prob);

        let delta0: Vec<Prob> = (0..self.n_states())
            .map(|i| self.p_init(i) * emit[[i, observations[0]]])
            .collect();
        let (delta, backpointers) = observations[1..].iter().fold(
            (delta0, Vec::with_capacity(observations.len() - 1)),
            |(delta, mut backpointers), &symbol| {
                let (delta_next, pointers) = v_step(&trans, &emit, &delta, symbol);
                backpointers.push(pointers);
                (delta_next, backpointers)
            },
        );

        let (last, score) = argmax(delta.iter().copied()).ok_or_else(|| {
            HmmError::InvalidDimension("n_states must be > 0".to_string())
        })?;
        Ok(ViterbiResult {
            path: backtrace(last, &backpointers),
            log_prob: score.to_log_value(),
        })
    }
    ///
    /// Decode each of the independent sequences, in parallel.
    ///
    /// The i-th path corresponds to the i-th sequence. If any sequence is
    /// invalid, the error of the first invalid one is returned.
    ///
    pub fn viterbi_all<S>(&self, sequences: &[S]) -> Result<Vec<StatePath>>
    where
        S: AsRef<[Symbol]> + Sync,
    {
        sequences
            .iter()
            .try_for_each(|seq| self.validate_observations(seq.as_ref()))?;
        sequences
            .par_iter()
            .map(|seq| self.viterbi(seq.as_ref()))
            .collect()
    }
}

///
/// Calculate `d[t]` and `p[t]` from `d[t-1]`
///
fn v_step(
    trans: &Array2<Prob>,
    emit: &Array2<Prob>,
    delta: &[Prob],
    symbol: Symbol,
) -> (Vec<Prob>, Vec<State>) {
    (0..delta.len())
        .map(|j| {
            let (i, best) = argmax(delta.iter().enumerate().map(|(i, &d)| d * trans[[i, j]]))
                .unwrap_or((0, Prob::zero()));
            (best * emit[[j, symbol]], i)
        })
        .unzip()
}

///
/// Follow the backpointers from the final state `last` to `t=0`.
///
/// `backpointers[t-1][j]` is the best previous state of `j` at time `t`.
///
fn backtrace(last: State, backpointers: &[Vec<State>]) -> StatePath {
    let mut path = vec![last; backpointers.len() + 1];
    for t in (0..backpointers.len()).rev() {
        path[t] = backpointers[t][path[t + 1]];
    }
    path
}
