//!
//! Forward sampling of state/observation sequences from the model
//!
//! Generates test inputs for the decoder: the initial state comes
//! from the prior, then each step draws the next state from the
//! transition row and an observation from the emission row.
//!
use crate::error::{HmmError, Result};
use crate::model::{HmmModel, ObsLike, StateLike};
use crate::prob::Prob;
use log::trace;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Draw one value from weighted `(value, Prob)` choices.
///
/// `what` names the distribution in the error when all weights are zero.
///
pub fn pick_with_prob<R: Rng, T: Clone>(
    rng: &mut R,
    choices: &[(T, Prob)],
    what: &'static str,
) -> Result<T> {
    let total: Prob = choices.iter().map(|(_, p)| *p).sum();
    if total.is_zero() {
        return Err(HmmError::DegenerateDistribution(what));
    }
    let picked = choices
        .choose_weighted(rng, |item| item.1.to_value())
        .map_err(|_| HmmError::DegenerateDistribution(what))?;
    Ok(picked.0.clone())
}

impl<S: StateLike, O: ObsLike> HmmModel<S, O> {
    ///
    /// Sample a `(states, observations)` pair of the given length,
    /// reproducibly from `seed`.
    ///
    pub fn sample(&self, length: usize, seed: u64) -> Result<(Vec<S>, Vec<O>)> {
        if length == 0 {
            return Err(HmmError::EmptyObservations);
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut states = Vec::with_capacity(length);
        let mut observations = Vec::with_capacity(length);

        let mut now = self.sample_initial(&mut rng)?;
        for i in 0..length {
            if i > 0 {
                now = self.sample_transition(&mut rng, &now)?;
            }
            let observation = self.sample_emission(&mut rng, &now)?;
            trace!("iter {} state={:?} obs={:?}", i, now, observation);
            states.push(now.clone());
            observations.push(observation);
        }
        Ok((states, observations))
    }
    ///
    /// Initial state drawn from the prior.
    ///
    fn sample_initial<R: Rng>(&self, rng: &mut R) -> Result<S> {
        let choices = self
            .states()
            .iter()
            .map(|x| Ok((x.clone(), self.init_prob(x)?)))
            .collect::<Result<Vec<_>>>()?;
        pick_with_prob(rng, &choices, "prior")
    }
    ///
    /// Next state drawn from the transition row of `x`.
    ///
    fn sample_transition<R: Rng>(&self, rng: &mut R, x: &S) -> Result<S> {
        let choices = self
            .states()
            .iter()
            .map(|y| Ok((y.clone(), self.trans_prob(x, y)?)))
            .collect::<Result<Vec<_>>>()?;
        pick_with_prob(rng, &choices, "transition")
    }
    ///
    /// Observation drawn from the emission row of `x`.
    ///
    fn sample_emission<R: Rng>(&self, rng: &mut R, x: &S) -> Result<O> {
        let choices: Vec<(O, Prob)> = self
            .emit_row(x)?
            .iter()
            .map(|(o, p)| (o.clone(), *p))
            .collect();
        pick_with_prob(rng, &choices, "emission")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{mock_bsc, mock_ring3};
    use crate::model::HmmModel;

    #[test]
    fn sample_has_requested_length() {
        let m = mock_ring3();
        let (states, observations) = m.sample(100, 0).unwrap();
        assert_eq!(states.len(), 100);
        assert_eq!(observations.len(), 100);
    }

    #[test]
    fn sample_is_reproducible_from_seed() {
        let m = mock_bsc(0.2, 0.2);
        let a = m.sample(50, 7).unwrap();
        let b = m.sample(50, 7).unwrap();
        assert_eq!(a, b);
        let c = m.sample(50, 8).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn near_deterministic_model_stays_put() {
        // alpha = 0 pins the chain to its initial state
        let m = mock_bsc(0.0, 0.0);
        let (states, observations) = m.sample(20, 1).unwrap();
        assert!(states.windows(2).all(|w| w[0] == w[1]));
        let expected = if states[0] == 'a' { 0u8 } else { 1u8 };
        assert!(observations.iter().all(|&o| o == expected));
    }

    #[test]
    fn zero_length_is_an_error() {
        let m = mock_bsc(0.1, 0.1);
        assert!(matches!(
            m.sample(0, 0),
            Err(HmmError::EmptyObservations)
        ));
    }

    #[test]
    fn all_zero_prior_is_degenerate() {
        let m: HmmModel<char, u8> = HmmModel::from_probs(
            &['a', 'b'],
            &[('a', 0.0), ('b', 0.0)],
            &[('a', 'a', 1.0), ('b', 'b', 1.0)],
            &[('a', 0, 1.0), ('b', 0, 1.0)],
        )
        .unwrap();
        assert!(matches!(
            m.sample(5, 0),
            Err(HmmError::DegenerateDistribution("prior"))
        ));
    }
}
