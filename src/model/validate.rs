//!
//! Shape and row-stochasticity checks of model parameters
//!
use crate::common::PROB_TOLERANCE;
use crate::error::{Component, HmmError, Result};
use log::warn;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

///
/// Check that `n_states >= 1` and `n_symbols >= 1`.
///
pub fn check_counts(n_states: usize, n_symbols: usize) -> Result<()> {
    if n_states == 0 {
        return Err(HmmError::InvalidDimension("n_states must be > 0".to_string()));
    }
    if n_symbols == 0 {
        return Err(HmmError::InvalidDimension("n_symbols must be > 0".to_string()));
    }
    Ok(())
}

///
/// Check `init` is length N, `trans` is NxN and `emit` is NxM with N, M > 0.
///
pub fn check_shapes(init: &Array1<f64>, trans: &Array2<f64>, emit: &Array2<f64>) -> Result<()> {
    let n = init.len();
    check_counts(n, emit.ncols())?;
    if trans.dim() != (n, n) {
        return Err(HmmError::InvalidDimension(format!(
            "transition matrix is {}x{}, expected {}x{}",
            trans.nrows(),
            trans.ncols(),
            n,
            n
        )));
    }
    if emit.nrows() != n {
        return Err(HmmError::InvalidDimension(format!(
            "emission matrix has {} rows, expected {}",
            emit.nrows(),
            n
        )));
    }
    Ok(())
}

///
/// Check every entry of the row is a finite non-negative number.
///
fn check_entries(component: Component, row_index: usize, row: ArrayView1<f64>) -> Result<()> {
    match row
        .iter()
        .enumerate()
        .find(|(_, &x)| !x.is_finite() || x < 0.0)
    {
        Some((col, &value)) => Err(HmmError::InvalidProbability {
            component,
            row: row_index,
            col,
            value,
        }),
        None => Ok(()),
    }
}

///
/// Check each row of `matrix` is a probability distribution
/// (non-negative entries summing to 1 within `PROB_TOLERANCE`).
///
pub fn check_stochastic(component: Component, matrix: ArrayView2<f64>) -> Result<()> {
    for (i, row) in matrix.axis_iter(Axis(0)).enumerate() {
        check_entries(component, i, row)?;
        let sum = row.sum();
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(HmmError::NotStochastic {
                component,
                row: i,
                sum,
            });
        }
    }
    Ok(())
}

///
/// Check the vector is a probability distribution.
///
pub fn check_stochastic_vec(component: Component, vector: &Array1<f64>) -> Result<()> {
    check_stochastic(component, vector.view().insert_axis(Axis(0)))
}

///
/// Rescale each row of `matrix` so that it sums to 1.
///
/// Rows off by more than `PROB_TOLERANCE` are reported with `warn!`.
/// A row summing to zero cannot be rescaled and is `NotStochastic`.
///
pub fn normalize_rows(component: Component, matrix: &mut Array2<f64>) -> Result<()> {
    for (i, mut row) in matrix.axis_iter_mut(Axis(0)).enumerate() {
        check_entries(component, i, row.view())?;
        let sum = row.sum();
        if sum <= 0.0 {
            return Err(HmmError::NotStochastic {
                component,
                row: i,
                sum,
            });
        }
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            warn!("{} row {} sums to {}, normalized", component, i, sum);
        }
        row.mapv_inplace(|x| x / sum);
    }
    Ok(())
}

///
/// `normalize_rows` for a vector
///
pub fn normalize_vec(component: Component, vector: &mut Array1<f64>) -> Result<()> {
    let mut matrix = vector.clone().insert_axis(Axis(0));
    normalize_rows(component, &mut matrix)?;
    *vector = matrix.index_axis_move(Axis(0), 0);
    Ok(())
}

///
/// Is every row of `matrix` summing to 1 within `tolerance`?
///
pub fn is_row_stochastic(matrix: ArrayView2<f64>, tolerance: f64) -> bool {
    matrix
        .axis_iter(Axis(0))
        .all(|row| row.iter().all(|&x| x >= 0.0) && (row.sum() - 1.0).abs() <= tolerance)
}
