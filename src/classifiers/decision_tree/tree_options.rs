use crate::classifiers::decision_tree::split_criteria::SplitCriterionKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_max_depth() -> Option<usize> {
    Some(16)
}

fn default_min_samples_split() -> usize {
    2
}

fn default_min_samples_leaf() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeOptions {
    #[serde(default = "default_max_depth")]
    #[schemars(
        title = "Max Depth",
        description = "Deepest level a split may be placed at (None = unbounded)",
        range(min = 1)
    )]
    pub max_depth: Option<usize>,

    #[serde(default = "default_min_samples_split")]
    #[schemars(
        title = "Min Samples Split",
        description = "Nodes with fewer samples become leaves",
        range(min = 2)
    )]
    pub min_samples_split: usize,

    #[serde(default = "default_min_samples_leaf")]
    #[schemars(
        title = "Min Samples Leaf",
        description = "Every branch of a split must receive at least this many samples",
        range(min = 1)
    )]
    pub min_samples_leaf: usize,

    #[serde(default)]
    #[schemars(title = "Split Criterion", description = "gini / info-gain")]
    pub split_criterion: SplitCriterionKind,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            split_criterion: SplitCriterionKind::default(),
        }
    }
}
