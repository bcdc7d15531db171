pub mod accuracy;
pub mod error;
pub mod io;
pub mod mocks;
pub mod model;
pub mod prelude;
pub mod prob;
pub mod sampler;
pub mod utils;
pub mod viterbi;

#[macro_use]
extern crate approx;
