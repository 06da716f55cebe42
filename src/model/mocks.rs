//!
//! Mock models for testing
//!
use super::Model;
use ndarray::{arr1, arr2, Array2};

///
/// Two sticky states, each preferring one of two symbols.
///
/// ```text
/// pi = [0.2, 0.8]
/// A  = [[0.7, 0.3],    B = [[0.9, 0.1],
///       [0.4, 0.6]]         [0.3, 0.7]]
/// ```
///
/// Viterbi path of `[0, 0, 1, 1, 0]` is `[0, 0, 1, 1, 0]`.
///
pub fn mock_two_state() -> Model {
    Model::new_unchecked(
        arr1(&[0.2, 0.8]),
        arr2(&[[0.7, 0.3], [0.4, 0.6]]),
        arr2(&[[0.9, 0.1], [0.3, 0.7]]),
    )
}

///
/// `mock_two_state` with a third symbol added to the alphabet
///
/// ```text
/// B = [[0.80, 0.10, 0.10],
///      [0.30, 0.65, 0.05]]
/// ```
///
pub fn mock_three_symbol() -> Model {
    let m = mock_two_state();
    Model::new_unchecked(
        m.init().clone(),
        m.trans().clone(),
        arr2(&[[0.80, 0.10, 0.10], [0.30, 0.65, 0.05]]),
    )
}

///
/// Always starts at state 0, and state 1 is absorbing.
///
/// ```text
/// pi = [1.0, 0.0]
/// A  = [[0.5, 0.5],    B = [[0.9, 0.1],
///       [0.0, 1.0]]         [0.1, 0.9]]
/// ```
///
pub fn mock_absorbing() -> Model {
    Model::new_unchecked(
        arr1(&[1.0, 0.0]),
        arr2(&[[0.5, 0.5], [0.0, 1.0]]),
        arr2(&[[0.9, 0.1], [0.1, 0.9]]),
    )
}

///
/// Occasionally dishonest casino: state 0 is a fair die and state 1 is a
/// loaded die that rolls the last face (symbol 5) half of the time.
///
pub fn mock_casino() -> Model {
    let mut emit = Array2::from_elem((2, 6), 1.0 / 6.0);
    for k in 0..5 {
        emit[[1, k]] = 0.1;
    }
    emit[[1, 5]] = 0.5;
    Model::new_unchecked(arr1(&[0.5, 0.5]), arr2(&[[0.95, 0.05], [0.1, 0.9]]), emit)
}

///
/// Single state model emitting `n_symbols` symbols uniformly.
///
pub fn mock_single_state(n_symbols: usize) -> Model {
    Model::new_unchecked(
        arr1(&[1.0]),
        arr2(&[[1.0]]),
        Array2::from_elem((1, n_symbols), 1.0 / n_symbols as f64),
    )
}
