//!
//! Viterbi decoding
//!
//! Finds the hidden state sequence with the maximum posterior
//! probability for a given observation sequence, by dynamic
//! programming over negative log probabilities ("distances").
//!
//! The recurrence `V(m, x)` is the cheapest way to finish the sequence
//! from time `m+1` to the end, given that the chain is in state `x` at
//! time `m`. It is filled backward, one time slice per step, so each
//! `(m, x)` subproblem is computed exactly once and the whole decode is
//! `O(n * |states|^2)`.
//!
use crate::error::{HmmError, Result};
use crate::model::{HmmModel, ObsLike, StateLike};
use crate::prob::Prob;
use std::ops::Add;

///
/// A candidate path together with its accumulated cost `-ln p`.
///
/// Ordering and equality look at the cost only; the path is the argmin
/// carried along with it. Addition concatenates the paths (left
/// operand's states first) and sums the costs, so a step prepended to
/// an optimal continuation keeps the path in forward time order.
///
/// A zero-probability step gives `cost = +inf`. Such a candidate is a
/// valid loser of every comparison against a finite one, which lets
/// the minimum route around impossible transitions and emissions.
///
#[derive(Debug, Clone)]
pub struct CostPath<S> {
    path: Vec<S>,
    cost: f64,
}

impl<S> CostPath<S> {
    ///
    /// Single-state candidate for one step of probability `p`.
    ///
    pub(crate) fn step(x: S, p: Prob) -> CostPath<S> {
        CostPath {
            path: vec![x],
            cost: p.neg_log(),
        }
    }
    ///
    /// Accumulated cost `-ln p` of this candidate.
    ///
    pub fn cost(&self) -> f64 {
        self.cost
    }
    ///
    /// States of this candidate, in forward time order.
    ///
    pub fn path(&self) -> &[S] {
        &self.path
    }
}

impl<S> PartialEq for CostPath<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<S> PartialOrd for CostPath<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.cost.partial_cmp(&other.cost)
    }
}

/// ORDERING OF OPERANDS IS VERY IMPORTANT: `self`'s states come before
/// `rhs`'s states in the combined path.
impl<S> Add for CostPath<S> {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self {
        self.path.extend(rhs.path);
        CostPath {
            path: self.path,
            cost: self.cost + rhs.cost,
        }
    }
}

///
/// Stable minimum: the incumbent survives a tie, so the first
/// candidate in iteration order wins among equals.
///
fn min_first<S>(best: Option<CostPath<S>>, candidate: CostPath<S>) -> Option<CostPath<S>> {
    match best {
        Some(b) if b.cost <= candidate.cost => Some(b),
        _ => Some(candidate),
    }
}

///
/// One decode invocation: the model, the observations and the
/// memoized `V(m, x)` rows. The rows live exactly as long as the call.
///
struct Viterbi<'a, S: StateLike, O: ObsLike> {
    model: &'a HmmModel<S, O>,
    obs: &'a [O],
    /// `V(m, x)` rows, pushed backward from `m = n-2` down to `m = 0`;
    /// the last pushed row always belongs to the `m+1` currently
    /// being consumed. One entry per state, in model state order.
    tables: Vec<Vec<CostPath<S>>>,
}

impl<'a, S: StateLike, O: ObsLike> Viterbi<'a, S, O> {
    fn new(model: &'a HmmModel<S, O>, obs: &'a [O]) -> Self {
        Viterbi {
            model,
            obs,
            tables: Vec::with_capacity(obs.len().saturating_sub(1)),
        }
    }
    ///
    /// Instantaneous cost of stepping into `x_prime`.
    ///
    /// * `x = Some(..)`: transition at time `m -> m+1`,
    ///   `-ln( emit(x', obs[m+1]) * trans(x, x') )`
    /// * `x = None`: initial step at time 0,
    ///   `-ln( emit(x', obs[0]) * prior(x') )`
    ///
    fn step_cost(&self, m: usize, x_prime: &S, x: Option<&S>) -> Result<CostPath<S>> {
        let p = match x {
            Some(x) => {
                self.model.emit_prob(x_prime, &self.obs[m + 1])?
                    * self.model.trans_prob(x, x_prime)?
            }
            None => self.model.emit_prob(x_prime, &self.obs[m])? * self.model.init_prob(x_prime)?,
        };
        Ok(CostPath::step(x_prime.clone(), p))
    }
    ///
    /// Compute the `V(m, *)` row from the `V(m+1, *)` row.
    ///
    /// Base case `m == n-2`: a single-step lookahead folding the last
    /// observation, with no recursive term.
    ///
    fn fill_row(&self, m: usize) -> Result<Vec<CostPath<S>>> {
        let n = self.obs.len();
        let states = self.model.states();
        let mut row = Vec::with_capacity(states.len());
        for x in states {
            let mut best = None;
            for (j, x_prime) in states.iter().enumerate() {
                let step = self.step_cost(m, x_prime, Some(x))?;
                let candidate = if m == n - 2 {
                    step
                } else {
                    step + self.tables.last().unwrap()[j].clone()
                };
                best = min_first(best, candidate);
            }
            // states is non-empty, the inner loop always ran
            row.push(best.unwrap());
        }
        Ok(row)
    }
    ///
    /// Fill all rows backward, then fold in the prior at time 0 and
    /// pick the global optimum.
    ///
    fn run(mut self) -> Result<Vec<S>> {
        let n = self.obs.len();
        for m in (0..n.saturating_sub(1)).rev() {
            let row = self.fill_row(m)?;
            self.tables.push(row);
        }
        let states = self.model.states();
        let mut best = None;
        for (j, x) in states.iter().enumerate() {
            let head = self.step_cost(0, x, None)?;
            let candidate = match self.tables.last() {
                Some(row) => head + row[j].clone(),
                // degenerate n == 1: the initial step is the whole path
                None => head,
            };
            best = min_first(best, candidate);
        }
        let best = best.ok_or(HmmError::EmptyStates)?;
        if !best.cost.is_finite() {
            return Err(HmmError::NoFeasiblePath);
        }
        debug_assert_eq!(best.path.len(), n);
        Ok(best.path)
    }
}

impl<S: StateLike, O: ObsLike> HmmModel<S, O> {
    ///
    /// Decode the most likely hidden state sequence for `observations`.
    ///
    /// The returned sequence has the same length as `observations`.
    /// Ties are broken toward the state appearing earlier in the
    /// model's state list, so the output is deterministic.
    ///
    /// # Errors
    ///
    /// * [`HmmError::EmptyObservations`] when there is nothing to decode
    /// * `Missing*` when a needed table entry does not exist
    /// * [`HmmError::NoFeasiblePath`] when every complete path has
    ///   probability zero
    ///
    pub fn decode(&self, observations: &[O]) -> Result<Vec<S>> {
        if observations.is_empty() {
            return Err(HmmError::EmptyObservations);
        }
        Viterbi::new(self, observations).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{mock_bsc, mock_uniform2, mock_weather};
    use crate::model::HmmModel;
    use crate::prob::{p, Prob};

    /// total probability of one complete path, for brute-force checks
    fn path_prob(
        m: &HmmModel<&'static str, &'static str>,
        path: &[&'static str],
        obs: &[&'static str],
    ) -> Prob {
        let mut prob = m.init_prob(&path[0]).unwrap() * m.emit_prob(&path[0], &obs[0]).unwrap();
        for i in 1..path.len() {
            prob *= m.trans_prob(&path[i - 1], &path[i]).unwrap()
                * m.emit_prob(&path[i], &obs[i]).unwrap();
        }
        prob
    }

    #[test]
    fn cost_path_add_keeps_forward_order() {
        let head = CostPath::step('a', p(0.5));
        let tail = CostPath::step('b', p(0.5)) + CostPath::step('c', p(1.0));
        let joined = head + tail;
        assert_eq!(joined.path(), &['a', 'b', 'c']);
        assert_relative_eq!(joined.cost(), 2.0 * 2f64.ln());
    }

    #[test]
    fn cost_path_orders_by_cost_only() {
        let x = CostPath::step('a', p(0.5));
        let y = CostPath::step('b', p(0.5));
        let z = CostPath::step('c', p(0.1));
        assert!(x == y);
        assert!(x < z);
    }

    #[test]
    fn infinite_cost_always_loses() {
        let dead = CostPath::step('a', p(0.0));
        let alive = CostPath::step('b', p(1e-300));
        assert!(dead.cost().is_infinite());
        let best = min_first(Some(dead), alive);
        assert_eq!(best.unwrap().path(), &['b']);
    }

    #[test]
    fn all_ties_pick_first_state() {
        // every probability is 0.5, so every path costs the same and
        // the first supplied state must win at every level
        let m = mock_uniform2();
        assert_eq!(m.decode(&[0, 0]).unwrap(), vec!['a', 'a']);
        assert_eq!(m.decode(&[0, 1, 0, 1]).unwrap(), vec!['a', 'a', 'a', 'a']);
    }

    #[test]
    fn tie_break_follows_supplied_state_order() {
        // same uniform model with the state list reversed: b now wins
        let m: HmmModel<char, u8> = HmmModel::from_probs(
            &['b', 'a'],
            &[('a', 0.5), ('b', 0.5)],
            &[
                ('a', 'a', 0.5),
                ('a', 'b', 0.5),
                ('b', 'a', 0.5),
                ('b', 'b', 0.5),
            ],
            &[('a', 0, 0.5), ('a', 1, 0.5), ('b', 0, 0.5), ('b', 1, 0.5)],
        )
        .unwrap();
        assert_eq!(m.decode(&[0, 0]).unwrap(), vec!['b', 'b']);
    }

    #[test]
    fn single_observation_maximizes_prior_times_emission() {
        let m = mock_weather();
        // P(rainy) * P(walk | rainy) = 0.6 * 0.1 = 0.06
        // P(sunny) * P(walk | sunny) = 0.4 * 0.6 = 0.24
        assert_eq!(m.decode(&["walk"]).unwrap(), vec!["sunny"]);
        assert_eq!(m.decode(&["clean"]).unwrap(), vec!["rainy"]);
    }

    #[test]
    fn beats_every_brute_force_path() {
        let m = mock_weather();
        let obs = ["walk", "shop", "clean"];
        let decoded = m.decode(&obs).unwrap();
        let decoded_cost = path_prob(&m, &decoded, &obs).neg_log();

        let states = ["rainy", "sunny"];
        let mut n_paths = 0;
        for &x0 in &states {
            for &x1 in &states {
                for &x2 in &states {
                    let cost = path_prob(&m, &[x0, x1, x2], &obs).neg_log();
                    assert!(decoded_cost <= cost);
                    n_paths += 1;
                }
            }
        }
        assert_eq!(n_paths, 8);
        // the textbook answer for this model
        assert_eq!(decoded, vec!["sunny", "rainy", "rainy"]);
    }

    #[test]
    fn decode_is_deterministic() {
        let m = mock_bsc(0.3, 0.2);
        let obs = vec![0u8, 1, 1, 0, 1, 0, 0, 1];
        let first = m.decode(&obs).unwrap();
        for _ in 0..5 {
            assert_eq!(m.decode(&obs).unwrap(), first);
        }
    }

    #[test]
    fn output_length_equals_observation_count() {
        let m = mock_bsc(0.1, 0.1);
        for n in [1usize, 2, 3, 10, 50] {
            let obs: Vec<u8> = (0..n).map(|i| (i % 2) as u8).collect();
            assert_eq!(m.decode(&obs).unwrap().len(), n);
        }
    }

    #[test]
    fn zero_probability_branch_is_routed_around() {
        // state a can never emit 1, so a 1 in the middle must be
        // explained by b even though a is otherwise favoured
        let m: HmmModel<char, u8> = HmmModel::from_probs(
            &['a', 'b'],
            &[('a', 0.9), ('b', 0.1)],
            &[
                ('a', 'a', 0.8),
                ('a', 'b', 0.2),
                ('b', 'a', 0.2),
                ('b', 'b', 0.8),
            ],
            &[('a', 0, 1.0), ('a', 1, 0.0), ('b', 0, 0.5), ('b', 1, 0.5)],
        )
        .unwrap();
        let path = m.decode(&[0, 1, 0]).unwrap();
        assert_eq!(path[1], 'b');
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn no_feasible_path_is_an_error() {
        // nothing can emit 1
        let m: HmmModel<char, u8> = HmmModel::from_probs(
            &['a', 'b'],
            &[('a', 0.5), ('b', 0.5)],
            &[
                ('a', 'a', 0.5),
                ('a', 'b', 0.5),
                ('b', 'a', 0.5),
                ('b', 'b', 0.5),
            ],
            &[('a', 0, 1.0), ('a', 1, 0.0), ('b', 0, 1.0), ('b', 1, 0.0)],
        )
        .unwrap();
        assert!(matches!(
            m.decode(&[0, 1, 0]),
            Err(HmmError::NoFeasiblePath)
        ));
        // the all-zeros sequence is still fine
        assert_eq!(m.decode(&[0, 0, 0]).unwrap().len(), 3);
    }

    #[test]
    fn missing_table_entry_is_an_error() {
        // b's transition row is absent entirely
        let m: HmmModel<char, u8> = HmmModel::from_probs(
            &['a', 'b'],
            &[('a', 0.5), ('b', 0.5)],
            &[('a', 'a', 0.5), ('a', 'b', 0.5)],
            &[('a', 0, 1.0), ('b', 0, 1.0)],
        )
        .unwrap();
        assert!(matches!(
            m.decode(&[0, 0]),
            Err(HmmError::MissingTransition(_, _))
        ));
    }

    #[test]
    fn empty_observations_is_an_error() {
        let m = mock_bsc(0.1, 0.1);
        let obs: Vec<u8> = Vec::new();
        assert!(matches!(
            m.decode(&obs),
            Err(HmmError::EmptyObservations)
        ));
    }
}
