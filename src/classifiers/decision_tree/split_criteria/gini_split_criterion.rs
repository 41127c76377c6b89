use crate::classifiers::decision_tree::split_criteria::split_criterion::SplitCriterion;

#[derive(Debug, Default)]
pub struct GiniSplitCriterion {}

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self {}
    }

    pub fn compute_gini(&self, distribution: &[f64], distribution_sum_of_weights: f64) -> f64 {
        let mut gini = 1.0;
        for i in distribution {
            let rel_freq = i / distribution_sum_of_weights;
            gini -= rel_freq.powf(2.0);
        }
        gini
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn get_merit_of_split(
        &self,
        _pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        let mut total_weight = 0.0;
        let mut dist_weights = Vec::with_capacity(post_split_dists.len());

        for dist in post_split_dists.iter() {
            let w: f64 = dist.iter().sum();
            dist_weights.push(w);
            total_weight += w;
        }

        let mut gini = 0.0;
        for (i, dist) in post_split_dists.iter().enumerate() {
            if total_weight > 0.0 && dist_weights[i] > 0.0 {
                gini += (dist_weights[i] / total_weight) * self.compute_gini(dist, dist_weights[i]);
            }
        }

        1.0 - gini
    }

    fn name(&self) -> &'static str {
        "gini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn compute_gini_of_pure_distribution_is_zero() {
        let c = GiniSplitCriterion::new();
        assert!(c.compute_gini(&[0.0, 4.0, 0.0], 4.0).abs() < EPS);
    }

    #[test]
    fn compute_gini_of_even_binary_distribution_is_half() {
        let c = GiniSplitCriterion::new();
        assert!((c.compute_gini(&[2.0, 2.0], 4.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn perfect_split_has_merit_one() {
        let c = GiniSplitCriterion::new();
        let merit = c.get_merit_of_split(&[2.0, 2.0], &[vec![2.0, 0.0], vec![0.0, 2.0]]);
        assert!((merit - 1.0).abs() < EPS);
    }

    #[test]
    fn baseline_merit_is_one_minus_parent_gini() {
        let c = GiniSplitCriterion::new();
        let pre = vec![1.0, 1.0, 2.0];
        let baseline = c.get_merit_of_split(&pre, &[pre.clone()]);
        let expected = 1.0 - c.compute_gini(&pre, 4.0);
        assert!((baseline - expected).abs() < EPS);
    }

    #[test]
    fn empty_branch_does_not_poison_merit() {
        let c = GiniSplitCriterion::new();
        let merit = c.get_merit_of_split(&[2.0, 2.0], &[vec![2.0, 2.0], vec![0.0, 0.0]]);
        assert!((merit - 0.5).abs() < EPS);
    }
}
