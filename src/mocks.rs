//!
//! Ready-made models for tests, benches and demos
//!
use crate::model::HmmModel;

///
/// Two-state binary symmetric channel.
///
/// States `a`/`b` flip with probability `alpha`; the channel reports
/// the wrong bit with probability `epsilon`; uniform prior.
///
/// ```text
///   a --alpha--> b        a emits 0 (1-epsilon) / 1 (epsilon)
///   b --alpha--> a        b emits 1 (1-epsilon) / 0 (epsilon)
/// ```
///
pub fn mock_bsc(alpha: f64, epsilon: f64) -> HmmModel<char, u8> {
    HmmModel::from_probs(
        &['a', 'b'],
        &[('a', 0.5), ('b', 0.5)],
        &[
            ('a', 'a', 1.0 - alpha),
            ('a', 'b', alpha),
            ('b', 'a', alpha),
            ('b', 'b', 1.0 - alpha),
        ],
        &[
            ('a', 0, 1.0 - epsilon),
            ('a', 1, epsilon),
            ('b', 0, epsilon),
            ('b', 1, 1.0 - epsilon),
        ],
    )
    .unwrap()
}

///
/// The fully uniform two-state channel: every probability is 0.5, so
/// every candidate path ties and decoding exercises tie-breaking only.
///
pub fn mock_uniform2() -> HmmModel<char, u8> {
    mock_bsc(0.5, 0.5)
}

///
/// Small asymmetric model: what the weather was, given what was done.
///
pub fn mock_weather() -> HmmModel<&'static str, &'static str> {
    HmmModel::from_probs(
        &["rainy", "sunny"],
        &[("rainy", 0.6), ("sunny", 0.4)],
        &[
            ("rainy", "rainy", 0.7),
            ("rainy", "sunny", 0.3),
            ("sunny", "rainy", 0.4),
            ("sunny", "sunny", 0.6),
        ],
        &[
            ("rainy", "walk", 0.1),
            ("rainy", "shop", 0.4),
            ("rainy", "clean", 0.5),
            ("sunny", "walk", 0.6),
            ("sunny", "shop", 0.3),
            ("sunny", "clean", 0.1),
        ],
    )
    .unwrap()
}

///
/// Three-state ring with noisy self-identifying emissions, for
/// scaling tests on longer sequences.
///
pub fn mock_ring3() -> HmmModel<u8, u8> {
    let states = [0u8, 1, 2];
    let mut trans = Vec::new();
    let mut emit = Vec::new();
    for &x in &states {
        trans.push((x, x, 0.8));
        trans.push((x, (x + 1) % 3, 0.15));
        trans.push((x, (x + 2) % 3, 0.05));
        for &o in &states {
            emit.push((x, o, if o == x { 0.9 } else { 0.05 }));
        }
    }
    let third = 1.0 / 3.0;
    HmmModel::from_probs(
        &states,
        &[(0, third), (1, third), (2, third)],
        &trans,
        &emit,
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mocks_have_expected_shape() {
        assert_eq!(mock_bsc(0.1, 0.1).n_states(), 2);
        assert_eq!(mock_uniform2().n_states(), 2);
        assert_eq!(mock_weather().n_states(), 2);
        assert_eq!(mock_ring3().n_states(), 3);
    }
}
