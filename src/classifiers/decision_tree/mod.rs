mod decision_tree;
pub mod instance_conditional_test;
pub mod nodes;
pub mod split_criteria;
mod tree_options;

pub use decision_tree::DecisionTree;
pub use tree_options::TreeOptions;
