//!
//! Random initialization of models
//!
use super::validate::check_counts;
use super::Model;
use crate::error::Result;
use ndarray::{Array1, Array2, Axis};
use rand::distributions::Open01;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Create a random model with `n_states` states and `n_symbols` symbols.
///
/// Every entry is drawn from `(0, 1)` and each row is divided by its sum,
/// so pi, A and B are exactly row-stochastic (up to rounding) and no
/// parameter starts at zero. The values are drawn in the order pi, A, B
/// from a `Xoshiro256PlusPlus` seeded by `seed`.
///
pub fn new_model(n_states: usize, n_symbols: usize, seed: u64) -> Result<Model> {
    check_counts(n_states, n_symbols)?;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let init = random_distribution(&mut rng, n_states);
    let trans = random_rows(&mut rng, n_states, n_states);
    let emit = random_rows(&mut rng, n_states, n_symbols);
    Model::new(init, trans, emit)
}

fn random_rows<R: Rng>(rng: &mut R, n_rows: usize, n_cols: usize) -> Array2<f64> {
    let mut m = Array2::from_shape_simple_fn((n_rows, n_cols), || rng.sample::<f64, _>(Open01));
    for mut row in m.axis_iter_mut(Axis(0)) {
        let sum = row.sum();
        row.mapv_inplace(|x| x / sum);
    }
    m
}

///
/// Random distribution over `n` items
///
fn random_distribution<R: Rng>(rng: &mut R, n: usize) -> Array1<f64> {
    random_rows(rng, 1, n).index_axis_move(Axis(0), 0)
}
