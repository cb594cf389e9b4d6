//! Risk model crate: a bagged-decision-tree binary classifier for
//! loan-default and farm-failure prediction.
//!
//! Models are fit fresh from the sample store and held in memory for the
//! rest of the run; new data triggers a full refit. An optional JSON
//! checkpoint supports the load-if-present persistence rule.

mod forest;
mod pipeline;
mod scorer;

pub use forest::{ForestParams, RiskForest, ShapeError, TrainingError};
pub use pipeline::{PipelineState, RiskPipeline};
pub use scorer::{round4, score_record, timestamp_now, RiskScore};
