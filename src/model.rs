//!
//! Discrete-emission HMM parameters
//!
//! * `init[i]     = P(state at t=0 is i)`            (pi, length N)
//! * `trans[i][j] = P(next state is j | state is i)` (A, NxN)
//! * `emit[i][k]  = P(emits symbol k | state is i)`  (B, NxM)
//!
//! Every constructor validates the shapes and the row-stochasticity, so a
//! `Model` always holds a well-formed parameter triple. The number of states
//! N and symbols M never change; a differently shaped model is a new `Model`.
//!
pub mod mocks;
pub mod random;
pub mod validate;

pub use random::new_model;

use crate::common::{Symbol, PROB_TOLERANCE};
use crate::error::{Component, HmmError, Result};
use crate::prob::Prob;
use ndarray::{Array1, Array2};
use validate::{check_shapes, check_stochastic, check_stochastic_vec, is_row_stochastic};

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    init: Array1<f64>,
    trans: Array2<f64>,
    emit: Array2<f64>,
}

//
// constructors
//
impl Model {
    ///
    /// Create a model from the initial distribution, transition matrix and
    /// emission matrix.
    ///
    /// Fails with `InvalidDimension` on inconsistent shapes and with
    /// `NotStochastic`/`InvalidProbability` if any row is not a distribution.
    ///
    pub fn new(init: Array1<f64>, trans: Array2<f64>, emit: Array2<f64>) -> Result<Model> {
        check_shapes(&init, &trans, &emit)?;
        check_stochastic_vec(Component::Init, &init)?;
        check_stochastic(Component::Trans, trans.view())?;
        check_stochastic(Component::Emit, emit.view())?;
        Ok(Model { init, trans, emit })
    }
    ///
    /// Create a model after rescaling every row to sum to 1.
    ///
    /// Rows needing a rescale are reported with `warn!`. Shapes are checked
    /// as in `Model::new`, and an all-zero row is still an error.
    ///
    pub fn new_normalized(
        mut init: Array1<f64>,
        mut trans: Array2<f64>,
        mut emit: Array2<f64>,
    ) -> Result<Model> {
        check_shapes(&init, &trans, &emit)?;
        validate::normalize_vec(Component::Init, &mut init)?;
        validate::normalize_rows(Component::Trans, &mut trans)?;
        validate::normalize_rows(Component::Emit, &mut emit)?;
        Model::new(init, trans, emit)
    }
    ///
    /// Create a model from nested `Vec`s (one inner `Vec` per row).
    ///
    pub fn from_rows(init: Vec<f64>, trans: Vec<Vec<f64>>, emit: Vec<Vec<f64>>) -> Result<Model> {
        let init = Array1::from(init);
        let trans = rows_to_array(Component::Trans, trans)?;
        let emit = rows_to_array(Component::Emit, emit)?;
        Model::new(init, trans, emit)
    }
    ///
    /// Model whose every row is uniform.
    ///
    pub fn uniform(n_states: usize, n_symbols: usize) -> Result<Model> {
        validate::check_counts(n_states, n_symbols)?;
        Model::new(
            Array1::from_elem(n_states, 1.0 / n_states as f64),
            Array2::from_elem((n_states, n_states), 1.0 / n_states as f64),
            Array2::from_elem((n_states, n_symbols), 1.0 / n_symbols as f64),
        )
    }
    ///
    /// Random row-stochastic model, deterministic for the `seed`.
    /// See `random::new_model`.
    ///
    pub fn random(n_states: usize, n_symbols: usize, seed: u64) -> Result<Model> {
        new_model(n_states, n_symbols, seed)
    }
    ///
    /// New model with the same initial distribution and the given
    /// transition/emission matrices (e.g. the output of Baum-Welch).
    ///
    pub fn with_params(&self, trans: Array2<f64>, emit: Array2<f64>) -> Result<Model> {
        if emit.ncols() != self.n_symbols() {
            return Err(HmmError::InvalidDimension(format!(
                "emission matrix has {} columns, expected {}",
                emit.ncols(),
                self.n_symbols()
            )));
        }
        Model::new(self.init.clone(), trans, emit)
    }
    ///
    /// New model with the same initial distribution and transition matrix and
    /// a new emission matrix of possibly different number of symbols.
    ///
    /// Adding a symbol to the alphabet is done by creating a new model this
    /// way; an existing model is never reshaped.
    ///
    pub fn with_emissions(&self, emit: Array2<f64>) -> Result<Model> {
        Model::new(self.init.clone(), self.trans.clone(), emit)
    }
    ///
    /// Create a model without validation.
    /// Only for parameters known to be valid (mocks and re-estimates).
    ///
    pub(crate) fn new_unchecked(init: Array1<f64>, trans: Array2<f64>, emit: Array2<f64>) -> Model {
        debug_assert!(check_shapes(&init, &trans, &emit).is_ok());
        debug_assert!(is_row_stochastic(trans.view(), PROB_TOLERANCE));
        debug_assert!(is_row_stochastic(emit.view(), PROB_TOLERANCE));
        Model { init, trans, emit }
    }
}

///
/// Convert nested rows into a 2D array, rejecting ragged rows.
///
fn rows_to_array(component: Component, rows: Vec<Vec<f64>>) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, |row| row.len());
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
        return Err(HmmError::InvalidDimension(format!(
            "{} row {} has {} columns, expected {}",
            component,
            i,
            row.len(),
            n_cols
        )));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| HmmError::InvalidDimension(format!("{}: {}", component, e)))
}

//
// accessors
//
impl Model {
    ///
    /// The number of hidden states N
    ///
    pub fn n_states(&self) -> usize {
        self.init.len()
    }
    ///
    /// The number of observation symbols M
    ///
    pub fn n_symbols(&self) -> usize {
        self.emit.ncols()
    }
    pub fn init(&self) -> &Array1<f64> {
        &self.init
    }
    pub fn trans(&self) -> &Array2<f64> {
        &self.trans
    }
    pub fn emit(&self) -> &Array2<f64> {
        &self.emit
    }
    ///
    /// Split into `(init, trans, emit)`
    ///
    pub fn into_parts(self) -> (Array1<f64>, Array2<f64>, Array2<f64>) {
        (self.init, self.trans, self.emit)
    }
    ///
    /// `P(state at t=0 is i)` in log space
    ///
    pub fn p_init(&self, i: usize) -> Prob {
        Prob::from_prob(self.init[i])
    }
    ///
    /// `P(i -> j)` in log space
    ///
    pub fn p_trans(&self, i: usize, j: usize) -> Prob {
        Prob::from_prob(self.trans[[i, j]])
    }
    ///
    /// `P(emits k | i)` in log space
    ///
    pub fn p_emit(&self, i: usize, k: Symbol) -> Prob {
        Prob::from_prob(self.emit[[i, k]])
    }
    ///
    /// Check the observations are non-empty and every symbol is in
    /// `[0, n_symbols)`. All algorithms call this before any computation.
    ///
    pub fn validate_observations(&self, observations: &[Symbol]) -> Result<()> {
        if observations.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        let n_symbols = self.n_symbols();
        match observations
            .iter()
            .enumerate()
            .find(|(_, &symbol)| symbol >= n_symbols)
        {
            Some((t, &symbol)) => Err(HmmError::OutOfRangeSymbol {
                t,
                symbol,
                n_symbols,
            }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "n_states: {}", self.n_states())?;
        writeln!(f, "n_symbols: {}", self.n_symbols())?;
        writeln!(f, "init: {}", self.init)?;
        writeln!(f, "trans:\n{}", self.trans)?;
        write!(f, "emit:\n{}", self.emit)
    }
}
