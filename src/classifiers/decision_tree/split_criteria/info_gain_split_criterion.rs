use crate::classifiers::decision_tree::split_criteria::split_criterion::SplitCriterion;

/// Entropy reduction, in bits.
#[derive(Debug, Default)]
pub struct InfoGainSplitCriterion {}

impl InfoGainSplitCriterion {
    pub fn new() -> Self {
        Self {}
    }

    pub fn compute_entropy(distribution: &[f64]) -> f64 {
        let sum: f64 = distribution.iter().sum();
        if sum <= 0.0 {
            return 0.0;
        }
        distribution
            .iter()
            .filter(|&&d| d > 0.0)
            .map(|&d| {
                let p = d / sum;
                -p * p.log2()
            })
            .sum()
    }

    pub fn compute_entropy_of_split(dists: &[Vec<f64>]) -> f64 {
        let weights: Vec<f64> = dists.iter().map(|d| d.iter().sum()).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        dists
            .iter()
            .zip(&weights)
            .map(|(d, w)| (w / total) * Self::compute_entropy(d))
            .sum()
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        Self::compute_entropy(pre_split_distribution)
            - Self::compute_entropy_of_split(post_split_dists)
    }

    fn name(&self) -> &'static str {
        "info-gain"
    }
}
