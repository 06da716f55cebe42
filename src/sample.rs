//!
//! Sampling hidden states and observations from the Model
//!
use crate::common::{Observations, StatePath};
use crate::error::{HmmError, Result};
use crate::model::Model;
use ndarray::ArrayView1;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Struct for storing sampling results from HMM
///
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    /// hidden state at each step
    pub states: StatePath,
    /// symbol emitted at each step
    pub observations: Observations,
}

impl Model {
    ///
    /// Sample `length` steps of hidden states and their emissions.
    /// Deterministic for the `seed`.
    ///
    pub fn sample(&self, length: usize, seed: u64) -> Result<History> {
        if length == 0 {
            return Err(HmmError::EmptySequence);
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut states = Vec::with_capacity(length);
        let mut observations = Vec::with_capacity(length);

        let mut state = pick_with_prob(&mut rng, self.init().view())?;
        for t in 0..length {
            if t > 0 {
                state = pick_with_prob(&mut rng, self.trans().row(state))?;
            }
            let symbol = pick_with_prob(&mut rng, self.emit().row(state))?;
            states.push(state);
            observations.push(symbol);
        }

        Ok(History {
            states,
            observations,
        })
    }
}

///
/// pick an index randomly with its own probability.
///
fn pick_with_prob<R: Rng>(rng: &mut R, probs: ArrayView1<f64>) -> Result<usize> {
    let dist = WeightedIndex::new(probs.iter())?;
    Ok(dist.sample(rng))
}

//
// Display
//
impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (state, symbol) in self.states.iter().zip(self.observations.iter()) {
            writeln!(f, "{} -> {}", state, symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mocks::*;

    #[test]
    fn sample_is_deterministic() {
        let m = mock_casino();
        let h1 = m.sample(100, 5).unwrap();
        let h2 = m.sample(100, 5).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.states.len(), 100);
        assert_eq!(h1.observations.len(), 100);
        assert!(h1.states.iter().all(|&s| s < 2));
        assert!(h1.observations.iter().all(|&x| x < 6));
        assert_ne!(h1, m.sample(100, 6).unwrap());
    }
    #[test]
    fn sample_respects_zero_probs() {
        let m = mock_absorbing();
        let h = m.sample(200, 0).unwrap();
        // pi = [1, 0]
        assert_eq!(h.states[0], 0);
        // once in state 1, never back to 0
        if let Some(t) = h.states.iter().position(|&s| s == 1) {
            assert!(h.states[t..].iter().all(|&s| s == 1));
        }
    }
    #[test]
    fn sample_empirical_frequencies() {
        let m = mock_single_state(2);
        let h = m.sample(10000, 1).unwrap();
        let n_ones = h.observations.iter().filter(|&&x| x == 1).count();
        assert!((n_ones as f64 / 10000.0 - 0.5).abs() < 0.05);
    }
    #[test]
    fn sample_empty() {
        let m = mock_two_state();
        assert!(matches!(m.sample(0, 0), Err(HmmError::EmptySequence)));
    }
    #[test]
    fn history_display() {
        let h = History {
            states: vec![0, 1],
            observations: vec![2, 3],
        };
        assert_eq!(h.to_string(), "0 -> 2\n1 -> 3\n");
    }
}
