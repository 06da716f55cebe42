//!
//! Backward algorithm definitions
//!
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::model::Model;
use ndarray::{Array1, Array2};

impl Model {
    ///
    /// Run Backward algorithm to the observations, scaled with the forward
    /// scale factors `scales` (from `Model::forward` of the same observations).
    /// Every scale must be positive and finite, otherwise `InvalidScale`.
    ///
    /// ```text
    /// b[T-1][i] = 1
    /// b[t][i]   = sum_j a_ij e_j(x[t+1]) b[t+1][j] / c[t+1]
    /// ```
    ///
    pub fn backward(&self, observations: &[Symbol], scales: &Array1<f64>) -> Result<Array2<f64>> {
        self.validate_observations(observations)?;
        let n_steps = observations.len();
        if scales.len() != n_steps {
            return Err(HmmError::InvalidDimension(format!(
                "{} scale factors for {} observations",
                scales.len(),
                n_steps
            )));
        }
        if let Some((t, &value)) = scales
            .iter()
            .enumerate()
            .find(|(_, &c)| !(c > 0.0 && c.is_finite()))
        {
            return Err(HmmError::InvalidScale { t, value });
        }
        let mut beta = Array2::zeros((n_steps, self.n_states()));
        beta.row_mut(n_steps - 1).fill(1.0);

        for t in (0..n_steps - 1).rev() {
            let next = &beta.row(t + 1) * &self.emit().column(observations[t + 1]);
            let row = self.trans().dot(&next) / scales[t + 1];
            beta.row_mut(t).assign(&row);
        }

        Ok(beta)
    }
}
