//!
//! Common types shared by the models and algorithms
//!

///
/// Index of a hidden state, in `[0, n_states)`
///
pub type State = usize;

///
/// Index of an observation symbol, in `[0, n_symbols)`
///
pub type Symbol = usize;

///
/// Sequence of observed symbols `x[0], ..., x[T-1]`
///
pub type Observations = Vec<Symbol>;

///
/// Sequence of hidden states, one for each observation
///
pub type StatePath = Vec<State>;

///
/// Maximum allowed deviation of a row sum from 1.0 when a model is validated
///
pub const PROB_TOLERANCE: f64 = 1e-6;

///
/// convert a symbol/state sequence into the space-separated text format
/// used by the cli (`0 1 1 0`)
///
pub fn sequence_to_string(xs: &[usize]) -> String {
    xs.iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
