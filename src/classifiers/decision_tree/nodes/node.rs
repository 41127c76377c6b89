use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;

pub trait Node {
    fn get_observed_class_distribution(&self) -> &[f64];
    fn is_leaf(&self) -> bool;
    fn filter_instance_to_leaf(&self, instance: &dyn Instance) -> &dyn Node;
    fn get_class_votes(&self, instance: &dyn Instance) -> Vec<f64>;
    fn observed_class_distribution_is_pure(&self) -> bool;
    /// Edges on the longest path from this node down to a leaf.
    fn subtree_depth(&self) -> usize;
    fn count_decision_nodes(&self) -> usize;
    fn count_leaves(&self) -> usize;
    fn collect_split_attributes(&self, out: &mut Vec<usize>);
    fn describe_subtree(&self, header: &InstanceHeader, indent: usize, out: &mut String);
}

pub(crate) fn num_non_zero_entries(dist: &[f64]) -> usize {
    dist.iter().filter(|&&x| x != 0.0).count()
}
