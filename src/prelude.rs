//!
//! globally-available parts
//!
pub use crate::error::{HmmError, Result};
pub use crate::model::{HmmModel, ObsLike, StateLike};
pub use crate::prob::{p, Prob};
