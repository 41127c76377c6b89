use crate::classifiers::classifier::majority_class;
use crate::classifiers::decision_tree::nodes::node::{Node, num_non_zero_entries};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::fmt::Write;

pub struct LeafNode {
    observed_class_distribution: Vec<f64>,
}

impl LeafNode {
    pub fn new(observed_class_distribution: Vec<f64>) -> Self {
        Self {
            observed_class_distribution,
        }
    }
}

impl Node for LeafNode {
    fn get_observed_class_distribution(&self) -> &[f64] {
        &self.observed_class_distribution
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn filter_instance_to_leaf(&self, _instance: &dyn Instance) -> &dyn Node {
        self
    }

    fn get_class_votes(&self, _instance: &dyn Instance) -> Vec<f64> {
        self.observed_class_distribution.clone()
    }

    fn observed_class_distribution_is_pure(&self) -> bool {
        num_non_zero_entries(&self.observed_class_distribution) < 2
    }

    fn subtree_depth(&self) -> usize {
        0
    }

    fn count_decision_nodes(&self) -> usize {
        0
    }

    fn count_leaves(&self) -> usize {
        1
    }

    fn collect_split_attributes(&self, _out: &mut Vec<usize>) {}

    fn describe_subtree(&self, _header: &InstanceHeader, indent: usize, out: &mut String) {
        let label = majority_class(&self.observed_class_distribution);
        let _ = writeln!(
            out,
            "{:indent$}Leaf = {} {:?}",
            "",
            label.display_name(),
            self.observed_class_distribution,
            indent = indent
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_distribution_is_pure() {
        let leaf = LeafNode::new(vec![0.0; 6]);
        assert!(leaf.observed_class_distribution_is_pure());
    }

    #[test]
    fn describe_names_majority_label() {
        let leaf = LeafNode::new(vec![0.0, 0.0, 0.0, 2.0, 1.0, 0.0]);
        let mut out = String::new();
        leaf.describe_subtree(&InstanceHeader::new("r".into(), vec![]), 2, &mut out);
        assert_eq!(out, "  Leaf = Metal [0.0, 0.0, 0.0, 2.0, 1.0, 0.0]\n");
    }

    #[test]
    fn leaf_counts_itself() {
        let leaf = LeafNode::new(vec![1.0, 0.0]);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.count_leaves(), 1);
        assert_eq!(leaf.count_decision_nodes(), 0);
        assert_eq!(leaf.subtree_depth(), 0);
    }
}
