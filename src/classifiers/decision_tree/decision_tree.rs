use crate::classifiers::Classifier;
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::decision_tree::instance_conditional_test::{
    InstanceConditionalTest, NumericAttributeBinaryTest,
};
use crate::classifiers::decision_tree::nodes::{LeafNode, Node, SplitNode};
use crate::classifiers::decision_tree::split_criteria::SplitCriterion;
use crate::classifiers::decision_tree::tree_options::TreeOptions;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::core::material_class::MaterialClass;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, trace};

/// Merit gains at or below this are treated as no improvement.
const MIN_MERIT_GAIN: f64 = 1e-12;

/// Batch CART-style classification tree over numeric attributes. Every call to
/// [`Classifier::train_on_instances`] rebuilds the tree from scratch.
pub struct DecisionTree {
    tree_root: Option<Box<dyn Node>>,
    header: Option<Arc<InstanceHeader>>,
    split_criterion_option: Box<dyn SplitCriterion>,
    max_depth_option: Option<usize>,
    min_samples_split_option: usize,
    min_samples_leaf_option: usize,
    training_weight_seen_by_model: f64,
}

impl DecisionTree {
    pub fn new(options: &TreeOptions) -> Self {
        Self {
            tree_root: None,
            header: None,
            split_criterion_option: options.split_criterion.build(),
            max_depth_option: options.max_depth,
            min_samples_split_option: options.min_samples_split.max(2),
            min_samples_leaf_option: options.min_samples_leaf.max(1),
            training_weight_seen_by_model: 0.0,
        }
    }

    pub fn root(&self) -> Option<&dyn Node> {
        self.tree_root.as_deref()
    }

    pub fn training_weight_seen_by_model(&self) -> f64 {
        self.training_weight_seen_by_model
    }

    pub fn decision_node_count(&self) -> usize {
        self.root().map_or(0, |r| r.count_decision_nodes())
    }

    pub fn leaf_count(&self) -> usize {
        self.root().map_or(0, |r| r.count_leaves())
    }

    pub fn depth(&self) -> usize {
        self.root().map_or(0, |r| r.subtree_depth())
    }

    /// Projected attribute indices used by at least one split, ascending.
    pub fn attributes_used(&self) -> Vec<usize> {
        let mut atts = Vec::new();
        if let Some(root) = self.root() {
            root.collect_split_attributes(&mut atts);
        }
        atts.sort_unstable();
        atts.dedup();
        atts
    }

    pub fn describe(&self) -> String {
        let mut out = String::new();
        match (self.root(), self.header.as_deref()) {
            (Some(root), Some(header)) => root.describe_subtree(header, 0, &mut out),
            _ => out.push_str("<untrained>\n"),
        }
        out
    }

    fn observed_class_distribution(instances: &[&dyn Instance], indices: &[usize]) -> Vec<f64> {
        let mut dist = vec![0.0; MaterialClass::COUNT];
        for &i in indices {
            if let Some(class) = instances[i].class_value() {
                dist[class.index()] += instances[i].weight();
            }
        }
        dist
    }

    fn should_stop(&self, dist: &[f64], n: usize, depth: usize) -> bool {
        let distinct = dist.iter().filter(|&&w| w > 0.0).count();
        distinct < 2
            || n < self.min_samples_split_option
            || self.max_depth_option.is_some_and(|max| depth >= max)
    }

    fn build_node(
        &self,
        instances: &[&dyn Instance],
        indices: &[usize],
        depth: usize,
    ) -> Box<dyn Node> {
        let dist = Self::observed_class_distribution(instances, indices);
        if self.should_stop(&dist, indices.len(), depth) {
            return Box::new(LeafNode::new(dist));
        }

        let Some(mut best) = self.get_best_split_suggestion(instances, indices, &dist) else {
            return Box::new(LeafNode::new(dist));
        };
        let Some(split_test) = best.take_split_test() else {
            return Box::new(LeafNode::new(dist));
        };

        let mut branches: Vec<Vec<usize>> = vec![Vec::new(); split_test.max_branches()];
        for &i in indices {
            if let Some(b) = split_test.branch_for_instance(instances[i]) {
                branches[b].push(i);
            }
        }

        if let Some(header) = self.header.as_deref() {
            trace!(
                depth,
                condition = %split_test.describe_condition_for_branch(0, header),
                merit = best.get_merit(),
                "split"
            );
        }

        let mut node = SplitNode::new(split_test, dist);
        for (b, branch) in branches.iter().enumerate() {
            node.set_child(b, self.build_node(instances, branch, depth + 1));
        }
        Box::new(node)
    }

    /// Best binary split over all attributes, or `None` if no admissible
    /// split improves on the unsplit merit.
    fn get_best_split_suggestion(
        &self,
        instances: &[&dyn Instance],
        indices: &[usize],
        dist: &[f64],
    ) -> Option<AttributeSplitSuggestion> {
        let num_attributes = instances[indices[0]].number_of_attributes();
        let mut suggestions: Vec<AttributeSplitSuggestion> = (0..num_attributes)
            .filter_map(|att| self.best_split_for_attribute(instances, indices, att, dist))
            .collect();

        suggestions.sort_by(AttributeSplitSuggestion::compare_merit);
        let best = suggestions.pop()?;

        let criterion = self.split_criterion_option.as_ref();
        let baseline = criterion.get_merit_of_split(dist, &[dist.to_vec()]);
        if best.get_merit().is_nan() || best.get_merit() - baseline <= MIN_MERIT_GAIN {
            return None;
        }
        Some(best)
    }

    fn best_split_for_attribute(
        &self,
        instances: &[&dyn Instance],
        indices: &[usize],
        att: usize,
        dist: &[f64],
    ) -> Option<AttributeSplitSuggestion> {
        let mut points: Vec<(f64, usize, f64)> = indices
            .iter()
            .filter(|&&i| !instances[i].is_missing_at_index(att))
            .filter_map(|&i| {
                let inst = instances[i];
                let value = inst.value_at_index(att)?;
                let class = inst.class_value()?;
                Some((value, class.index(), inst.weight()))
            })
            .collect();
        points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let criterion = self.split_criterion_option.as_ref();
        let min_leaf = self.min_samples_leaf_option;
        let n = points.len();

        let mut left = vec![0.0; dist.len()];
        let mut best: Option<(f64, f64, Vec<Vec<f64>>)> = None;

        for k in 0..n.saturating_sub(1) {
            let (value, class, weight) = points[k];
            left[class] += weight;

            let next = points[k + 1].0;
            if value >= next {
                continue;
            }
            let left_count = k + 1;
            if left_count < min_leaf || n - left_count < min_leaf {
                continue;
            }

            let right: Vec<f64> = dist.iter().zip(&left).map(|(t, l)| t - l).collect();
            let post = vec![left.clone(), right];
            let merit = criterion.get_merit_of_split(dist, &post);

            if best.as_ref().is_none_or(|(m, _, _)| merit >= *m) {
                best = Some((merit, split_point(value, next), post));
            }
        }

        best.map(|(merit, threshold, post)| {
            let test: Box<dyn InstanceConditionalTest> =
                Box::new(NumericAttributeBinaryTest::new(att, threshold));
            AttributeSplitSuggestion::new(Some(test), post, merit)
        })
    }
}

/// Midpoint between two distinct sorted values that still keeps `lower` on
/// the left and `upper` on the right under a `<=` test.
fn split_point(lower: f64, upper: f64) -> f64 {
    let mid = lower / 2.0 + upper / 2.0;
    if mid >= upper || mid < lower { lower } else { mid }
}

impl Classifier for DecisionTree {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        match &self.tree_root {
            Some(root) => root
                .filter_instance_to_leaf(instance)
                .get_class_votes(instance),
            None => vec![0.0; instance.number_of_classes()],
        }
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.header = Some(header);
    }

    fn train_on_instances(&mut self, instances: &[&dyn Instance]) {
        self.training_weight_seen_by_model = instances.iter().map(|i| i.weight()).sum();

        if instances.is_empty() {
            self.tree_root = None;
            return;
        }

        let indices: Vec<usize> = (0..instances.len()).collect();
        let root = self.build_node(instances, &indices, 0);
        self.tree_root = Some(root);

        debug!(
            instances = instances.len(),
            criterion = self.split_criterion_option.name(),
            decision_nodes = self.decision_node_count(),
            leaves = self.leaf_count(),
            depth = self.depth(),
            "decision tree built"
        );
    }
}
