//!
//! Forward algorithm definitions
//!
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::model::Model;
use ndarray::{Array1, Array2};

///
/// Scaled forward table
///
#[derive(Debug, Clone)]
pub struct ForwardResult {
    /// `alpha[t][i]`, each row normalized to sum to 1 (T x N)
    pub alpha: Array2<f64>,
    /// `scales[t]` is the sum of the row `t` before normalization
    pub scales: Array1<f64>,
}

impl ForwardResult {
    ///
    /// `log P(x) = sum_t log c[t]`
    ///
    pub fn log_likelihood(&self) -> f64 {
        self.scales.iter().map(|c| c.ln()).sum()
    }
}

impl Model {
    ///
    /// Run Forward algorithm to the observations
    ///
    /// ```text
    /// a[0][j] = pi[j] e_j(x[0])
    /// a[t][j] = (sum_i A[t-1][i] a_ij) e_j(x[t])
    /// ```
    ///
    /// then the row is divided by its sum `c[t]`.
    ///
    /// If `c[t] = 0`, that is `x[0..=t]` cannot be emitted by the model,
    /// fails with `ZeroLikelihood { t }`.
    ///
    pub fn forward(&self, observations: &[Symbol]) -> Result<ForwardResult> {
        self.validate_observations(observations)?;
        let n_steps = observations.len();
        let mut alpha = Array2::zeros((n_steps, self.n_states()));
        let mut scales = Array1::zeros(n_steps);

        for (t, &symbol) in observations.iter().enumerate() {
            let mut row = if t == 0 {
                self.init().clone()
            } else {
                alpha.row(t - 1).dot(self.trans())
            };
            row *= &self.emit().column(symbol);

            let c = row.sum();
            if !(c > 0.0) {
                return Err(HmmError::ZeroLikelihood { t });
            }
            row /= c;
            alpha.row_mut(t).assign(&row);
            scales[t] = c;
        }

        Ok(ForwardResult { alpha, scales })
    }
    ///
    /// `log P(x | model)` of the observations
    ///
    pub fn log_likelihood(&self, observations: &[Symbol]) -> Result<f64> {
        self.forward(observations).map(|r| r.log_likelihood())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mocks::*;

    #[test]
    fn forward_two_state() {
        let m = mock_two_state();
        let r = m.forward(&[0, 1]).unwrap();
        // a[0] = [0.18, 0.24], c[0] = 0.42
        assert_abs_diff_eq!(r.scales[0], 0.42, epsilon = 1e-12);
        assert_abs_diff_eq!(r.alpha[[0, 0]], 0.18 / 0.42, epsilon = 1e-12);
        // a[1][0] = (0.18*0.7 + 0.24*0.4) * 0.1 = 0.0222
        // a[1][1] = (0.18*0.3 + 0.24*0.6) * 0.7 = 0.1386
        // P(x) = 0.1608
        assert_abs_diff_eq!(r.log_likelihood(), 0.1608f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(r.alpha[[1, 0]], 0.0222 / 0.1608, epsilon = 1e-12);
        for row in r.alpha.rows() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
        }
    }
    #[test]
    fn forward_single_state() {
        // each step emits with p=1/4
        let m = mock_single_state(4);
        let ll = m.log_likelihood(&[0, 1, 2, 3, 3]).unwrap();
        assert_abs_diff_eq!(ll, 5.0 * 0.25f64.ln(), epsilon = 1e-12);
    }
    #[test]
    fn forward_long_sequence() {
        let m = mock_casino();
        let obs: Vec<usize> = (0..5000).map(|i| (i * 7 + i / 3) % 6).collect();
        let ll = m.log_likelihood(&obs).unwrap();
        assert!(ll.is_finite());
        assert!(ll < 0.0);
    }
    #[test]
    fn forward_zero_likelihood() {
        let m = Model::from_rows(
            vec![1.0, 0.0],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        )
        .unwrap();
        assert!(m.forward(&[0, 0]).is_ok());
        assert!(matches!(
            m.forward(&[0, 0, 1]),
            Err(HmmError::ZeroLikelihood { t: 2 })
        ));
    }
}
