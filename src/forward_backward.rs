//!
//! Forward/Backward algorithm with per-step scaling
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[T-1] : Observations of length T
//!
//! Forward
//! a[t][i] = P(emits x[0..=t] and in state i at t)
//!
//! Backward
//! b[t][i] = P(emits x[t+1..T] | in state i at t)
//!
//! Both are stored scaled. With `c[t]` the sum of the unscaled forward row
//! at `t` (given the scaled row at `t-1`),
//!
//! ```text
//! A[t][i] = a[t][i] / (c[0] ... c[t])        (sum_i A[t][i] = 1)
//! B[t][i] = b[t][i] / (c[t+1] ... c[T-1])    (B[T-1][i] = 1)
//! log P(x) = sum_t log c[t]
//! ```
//!
//! so that `A[t][i] B[t][i] = P(in state i at t | x)` without ever forming
//! the underflowing products.
//!
pub mod backward;
pub mod forward;
pub mod posterior;

pub use forward::ForwardResult;

use crate::common::Symbol;
use crate::error::Result;
use crate::model::Model;
use ndarray::{Array1, Array2};

///
/// Struct for storing the scaled forward and backward tables
///
#[derive(Debug, Clone)]
pub struct FBOutput {
    /// scaled forward table and scale factors
    pub forward: ForwardResult,
    /// scaled backward table (T x N)
    pub backward: Array2<f64>,
}

impl Model {
    ///
    /// Run Forward and Backward for the observations.
    ///
    pub fn forward_backward(&self, observations: &[Symbol]) -> Result<FBOutput> {
        let forward = self.forward(observations)?;
        let backward = self.backward(observations, &forward.scales)?;
        Ok(FBOutput { forward, backward })
    }
}

impl FBOutput {
    ///
    /// The number of observations T
    ///
    pub fn n_steps(&self) -> usize {
        self.backward.nrows()
    }
    ///
    /// The number of states N
    ///
    pub fn n_states(&self) -> usize {
        self.backward.ncols()
    }
    ///
    /// Scaled forward table (T x N), each row sums to 1
    ///
    pub fn alpha(&self) -> &Array2<f64> {
        &self.forward.alpha
    }
    ///
    /// Scaled backward table (T x N)
    ///
    pub fn beta(&self) -> &Array2<f64> {
        &self.backward
    }
    ///
    /// Scale factor `c[t]` of each step
    ///
    pub fn scales(&self) -> &Array1<f64> {
        &self.forward.scales
    }
    ///
    /// `log P(x | model)`
    ///
    pub fn log_likelihood(&self) -> f64 {
        self.forward.log_likelihood()
    }
}
