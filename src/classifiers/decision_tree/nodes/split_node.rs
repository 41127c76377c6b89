use crate::classifiers::decision_tree::instance_conditional_test::InstanceConditionalTest;
use crate::classifiers::decision_tree::nodes::node::{Node, num_non_zero_entries};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::fmt::Write;

pub struct SplitNode {
    observed_class_distribution: Vec<f64>,
    split_test: Box<dyn InstanceConditionalTest>,
    children: Vec<Option<Box<dyn Node>>>,
}

impl SplitNode {
    pub fn new(
        split_test: Box<dyn InstanceConditionalTest>,
        observed_class_distribution: Vec<f64>,
    ) -> Self {
        let children = (0..split_test.max_branches()).map(|_| None).collect();
        Self {
            observed_class_distribution,
            split_test,
            children,
        }
    }

    pub fn set_child(&mut self, index: usize, child: Box<dyn Node>) {
        if index >= self.children.len() {
            self.children.resize_with(index + 1, || None);
        }
        self.children[index] = Some(child);
    }

    pub fn get_child(&self, index: usize) -> Option<&dyn Node> {
        self.children.get(index).and_then(|c| c.as_deref())
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    fn instance_child_index(&self, instance: &dyn Instance) -> Option<usize> {
        self.split_test.branch_for_instance(instance)
    }

    fn present_children(&self) -> impl Iterator<Item = &dyn Node> {
        self.children.iter().filter_map(|c| c.as_deref())
    }
}

impl Node for SplitNode {
    fn get_observed_class_distribution(&self) -> &[f64] {
        &self.observed_class_distribution
    }

    fn is_leaf(&self) -> bool {
        false
    }

    fn filter_instance_to_leaf(&self, instance: &dyn Instance) -> &dyn Node {
        match self
            .instance_child_index(instance)
            .and_then(|idx| self.get_child(idx))
        {
            Some(child) => child.filter_instance_to_leaf(instance),
            None => self,
        }
    }

    fn get_class_votes(&self, _instance: &dyn Instance) -> Vec<f64> {
        self.observed_class_distribution.clone()
    }

    fn observed_class_distribution_is_pure(&self) -> bool {
        num_non_zero_entries(&self.observed_class_distribution) < 2
    }

    fn subtree_depth(&self) -> usize {
        1 + self
            .present_children()
            .map(|c| c.subtree_depth())
            .max()
            .unwrap_or(0)
    }

    fn count_decision_nodes(&self) -> usize {
        1 + self
            .present_children()
            .map(|c| c.count_decision_nodes())
            .sum::<usize>()
    }

    fn count_leaves(&self) -> usize {
        self.present_children().map(|c| c.count_leaves()).sum()
    }

    fn collect_split_attributes(&self, out: &mut Vec<usize>) {
        out.extend(self.split_test.get_atts_test_depends_on());
        for child in self.present_children() {
            child.collect_split_attributes(out);
        }
    }

    fn describe_subtree(&self, header: &InstanceHeader, indent: usize, out: &mut String) {
        for (branch, child) in self.children.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:indent$}if {}:",
                "",
                self.split_test.describe_condition_for_branch(branch, header),
                indent = indent
            );
            match child {
                Some(c) => c.describe_subtree(header, indent + 2, out),
                None => {
                    let _ = writeln!(out, "{:indent$}<empty>", "", indent = indent + 2);
                }
            }
        }
    }
}
