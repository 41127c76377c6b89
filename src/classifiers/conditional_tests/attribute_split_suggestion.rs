use crate::classifiers::decision_tree::instance_conditional_test::InstanceConditionalTest;
use std::cmp::Ordering;

/// A candidate split together with the class distributions it would produce.
pub struct AttributeSplitSuggestion {
    split_test: Option<Box<dyn InstanceConditionalTest>>,
    resulting_class_distributions: Vec<Vec<f64>>,
    merit: f64,
}

impl AttributeSplitSuggestion {
    pub fn new(
        split_test: Option<Box<dyn InstanceConditionalTest>>,
        resulting_class_distributions: Vec<Vec<f64>>,
        merit: f64,
    ) -> Self {
        Self {
            split_test,
            resulting_class_distributions,
            merit,
        }
    }

    pub fn number_of_splits(&self) -> usize {
        self.resulting_class_distributions.len()
    }

    pub fn resulting_class_distribution_from_split(&self, split_index: usize) -> Vec<f64> {
        self.resulting_class_distributions[split_index].clone()
    }

    pub fn get_split_test(&self) -> Option<&dyn InstanceConditionalTest> {
        self.split_test.as_deref()
    }

    pub fn take_split_test(&mut self) -> Option<Box<dyn InstanceConditionalTest>> {
        self.split_test.take()
    }

    pub fn get_merit(&self) -> f64 {
        self.merit
    }

    /// Ascending by merit; NaN sorts first so it never wins.
    pub fn compare_merit(a: &Self, b: &Self) -> Ordering {
        match (a.merit.is_nan(), b.merit.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.merit.partial_cmp(&b.merit).unwrap_or(Ordering::Equal),
        }
    }
}
