//!
//! JSON model files
//!
//! On-disk models keep raw `f64` probabilities keyed by string labels;
//! they are converted to an [`HmmModel`] on load.
//!
use crate::error::Result;
use crate::model::HmmModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

///
/// Serializable model definition.
///
/// `states` carries the tie-break order; the maps are sorted so files
/// written back are stable.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub states: Vec<String>,
    pub prior: BTreeMap<String, f64>,
    pub trans: BTreeMap<String, BTreeMap<String, f64>>,
    pub emit: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ModelFile {
    ///
    ///
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<ModelFile> {
        let file = File::open(path)?;
        let model_file = serde_json::from_reader(file)?;
        Ok(model_file)
    }
    ///
    ///
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
    ///
    /// Build the in-memory model from the file contents.
    ///
    pub fn to_model(&self) -> Result<HmmModel<String, String>> {
        let prior: Vec<(String, f64)> = self
            .prior
            .iter()
            .map(|(x, p)| (x.clone(), *p))
            .collect();
        let trans: Vec<(String, String, f64)> = self
            .trans
            .iter()
            .flat_map(|(x, row)| {
                row.iter()
                    .map(move |(y, p)| (x.clone(), y.clone(), *p))
            })
            .collect();
        let emit: Vec<(String, String, f64)> = self
            .emit
            .iter()
            .flat_map(|(x, row)| {
                row.iter()
                    .map(move |(o, p)| (x.clone(), o.clone(), *p))
            })
            .collect();
        HmmModel::from_probs(&self.states, &prior, &trans, &emit)
    }
}
