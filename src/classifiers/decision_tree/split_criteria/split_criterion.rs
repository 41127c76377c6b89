use crate::classifiers::decision_tree::split_criteria::{
    GiniSplitCriterion, InfoGainSplitCriterion,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub trait SplitCriterion {
    /// Higher is better. Scoring the unsplit distribution as a single branch
    /// gives the baseline a split has to beat.
    fn get_merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>])
    -> f64;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SplitCriterionKind {
    #[default]
    Gini,
    InfoGain,
}

impl SplitCriterionKind {
    pub fn build(self) -> Box<dyn SplitCriterion> {
        match self {
            SplitCriterionKind::Gini => Box::new(GiniSplitCriterion::new()),
            SplitCriterionKind::InfoGain => Box::new(InfoGainSplitCriterion::new()),
        }
    }
}
