//!
//! Discrete-emission Hidden Markov Models
//!
//! * `model`: initial distribution, transition and emission matrices
//! * `viterbi`: most probable hidden state path
//! * `forward_backward`: scaled forward/backward, state/transition posteriors
//! * `baum_welch`: EM re-estimation of the transition/emission matrices
//!
#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod baum_welch;
pub mod cli;
pub mod common;
pub mod error;
pub mod forward_backward;
pub mod io;
pub mod model;
pub mod prob;
pub mod sample;
pub mod viterbi;

pub use error::{HmmError, Result};
pub use model::{new_model, Model};
