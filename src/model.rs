//!
//! Discrete HMM parameter tables
//!
//! A model is three probability tables (prior, transition, emission)
//! over an ordered list of state labels. The list order is meaningful:
//! it decides which state wins when decoding costs tie.
//!
use crate::error::{HmmError, Result};
use crate::prob::{p, Prob};
use fnv::FnvHashMap as HashMap;
use std::fmt::Debug;
use std::hash::Hash;

///
/// Opaque hidden-state label.
///
pub trait StateLike: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> StateLike for T {}

///
/// Opaque observation symbol emitted at one time step.
///
pub trait ObsLike: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> ObsLike for T {}

///
/// Discrete-state, discrete-observation HMM.
///
/// * `states` is the fixed label list, in tie-break precedence order
/// * `prior[x]` is the initial probability of state `x`
/// * `trans[x][y]` is the probability of moving `x -> y` in one step
/// * `emit[x][o]` is the probability of observing `o` while in `x`
///
#[derive(Debug, Clone)]
pub struct HmmModel<S: StateLike, O: ObsLike> {
    states: Vec<S>,
    prior: HashMap<S, Prob>,
    trans: HashMap<S, HashMap<S, Prob>>,
    emit: HashMap<S, HashMap<O, Prob>>,
}

impl<S: StateLike, O: ObsLike> HmmModel<S, O> {
    ///
    /// Create a model from already-built probability tables.
    ///
    /// Table misses are not checked here. They surface as `Missing*`
    /// errors from the lookup that first needs the absent entry.
    ///
    pub fn new(
        states: Vec<S>,
        prior: HashMap<S, Prob>,
        trans: HashMap<S, HashMap<S, Prob>>,
        emit: HashMap<S, HashMap<O, Prob>>,
    ) -> Result<Self> {
        if states.is_empty() {
            return Err(HmmError::EmptyStates);
        }
        Ok(HmmModel {
            states,
            prior,
            trans,
            emit,
        })
    }
    ///
    /// Create a model from flat `(key, probability)` lists.
    ///
    /// ```
    /// use vithmm::model::HmmModel;
    /// let m: HmmModel<char, u8> = HmmModel::from_probs(
    ///     &['a', 'b'],
    ///     &[('a', 0.5), ('b', 0.5)],
    ///     &[('a', 'a', 0.9), ('a', 'b', 0.1), ('b', 'a', 0.1), ('b', 'b', 0.9)],
    ///     &[('a', 0, 1.0), ('b', 1, 1.0)],
    /// )
    /// .unwrap();
    /// assert_eq!(m.n_states(), 2);
    /// ```
    ///
    pub fn from_probs(
        states: &[S],
        prior: &[(S, f64)],
        trans: &[(S, S, f64)],
        emit: &[(S, O, f64)],
    ) -> Result<Self> {
        let mut prior_map = HashMap::default();
        for (x, p_x) in prior {
            prior_map.insert(x.clone(), p(*p_x));
        }
        let mut trans_map: HashMap<S, HashMap<S, Prob>> = HashMap::default();
        for (x, y, p_xy) in trans {
            trans_map
                .entry(x.clone())
                .or_insert_with(HashMap::default)
                .insert(y.clone(), p(*p_xy));
        }
        let mut emit_map: HashMap<S, HashMap<O, Prob>> = HashMap::default();
        for (x, o, p_xo) in emit {
            emit_map
                .entry(x.clone())
                .or_insert_with(HashMap::default)
                .insert(o.clone(), p(*p_xo));
        }
        HmmModel::new(states.to_vec(), prior_map, trans_map, emit_map)
    }
    ///
    /// State labels in tie-break precedence order.
    ///
    pub fn states(&self) -> &[S] {
        &self.states
    }
    ///
    /// Return the number of states of the model
    ///
    pub fn n_states(&self) -> usize {
        self.states.len()
    }
    ///
    /// Initial probability of state `x`.
    ///
    pub fn init_prob(&self, x: &S) -> Result<Prob> {
        self.prior
            .get(x)
            .copied()
            .ok_or_else(|| HmmError::MissingPrior(format!("{:?}", x)))
    }
    ///
    /// Transition probability from state `x` to state `y`.
    ///
    pub fn trans_prob(&self, x: &S, y: &S) -> Result<Prob> {
        self.trans
            .get(x)
            .and_then(|row| row.get(y))
            .copied()
            .ok_or_else(|| {
                HmmError::MissingTransition(format!("{:?}", x), format!("{:?}", y))
            })
    }
    ///
    /// Probability of observing `o` while in state `x`.
    ///
    pub fn emit_prob(&self, x: &S, o: &O) -> Result<Prob> {
        self.emit
            .get(x)
            .and_then(|row| row.get(o))
            .copied()
            .ok_or_else(|| {
                HmmError::MissingEmission(format!("{:?}", x), format!("{:?}", o))
            })
    }
    ///
    /// Whole emission table of state `x` (for sampling).
    ///
    pub(crate) fn emit_row(&self, x: &S) -> Result<&HashMap<O, Prob>> {
        self.emit
            .get(x)
            .ok_or_else(|| HmmError::MissingEmissionRow(format!("{:?}", x)))
    }
}
