use crate::classifiers::decision_tree::{DecisionTree, TreeOptions};
use crate::classifiers::projection::FeatureProjection;
use crate::classifiers::{Classifier, majority_class};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::core::material_class::MaterialClass;
use crate::core::sample::{Features, Sample};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use tracing::info;

/// Builds decision-tree models over a sample set under a fixed projection.
///
/// Training is a full rebuild; cost grows roughly quadratically with the
/// number of samples, which is fine for a manually curated set but not for
/// bulk ingestion.
#[derive(Debug, Clone)]
pub struct ClassifierEngine {
    projection: FeatureProjection,
    options: TreeOptions,
}

impl ClassifierEngine {
    pub fn new(projection: FeatureProjection, options: TreeOptions) -> Self {
        Self {
            projection,
            options,
        }
    }

    pub fn projection(&self) -> FeatureProjection {
        self.projection
    }

    pub fn train(&self, samples: &[Sample]) -> Model {
        let header = Arc::new(self.projection.header());
        let instances: Vec<DenseInstance> = samples
            .iter()
            .map(|s| {
                DenseInstance::new(
                    Arc::clone(&header),
                    self.projection.project(&s.features),
                    Some(s.label),
                    1.0,
                )
            })
            .collect();
        let refs: Vec<&dyn Instance> = instances.iter().map(|i| i as &dyn Instance).collect();

        let mut tree = DecisionTree::new(&self.options);
        tree.set_model_context(Arc::clone(&header));
        tree.train_on_instances(&refs);

        let distinct_labels = samples
            .iter()
            .map(|s| s.label)
            .collect::<BTreeSet<_>>()
            .len();
        let summary = ModelSummary {
            projection: self.projection,
            samples: samples.len(),
            distinct_labels,
            decision_nodes: tree.decision_node_count(),
            leaves: tree.leaf_count(),
            depth: tree.depth(),
        };

        if distinct_labels == 1 {
            info!(%summary, "training set has a single label; model always predicts it");
        } else {
            info!(%summary, "model retrained");
        }

        Model {
            projection: self.projection,
            header,
            tree,
            summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSummary {
    pub projection: FeatureProjection,
    pub samples: usize,
    pub distinct_labels: usize,
    pub decision_nodes: usize,
    pub leaves: usize,
    pub depth: usize,
}

impl Display for ModelSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "projection={}, samples={}, labels={}, splits={}, leaves={}, depth={}",
            self.projection,
            self.samples,
            self.distinct_labels,
            self.decision_nodes,
            self.leaves,
            self.depth
        )
    }
}

/// A trained tree bound to the projection it was trained under.
pub struct Model {
    projection: FeatureProjection,
    header: Arc<InstanceHeader>,
    tree: DecisionTree,
    summary: ModelSummary,
}

impl Model {
    /// Always yields a label. An untrained (empty) model answers `Unknown`.
    pub fn predict(&self, features: &Features) -> MaterialClass {
        let instance =
            DenseInstance::unlabeled(Arc::clone(&self.header), self.projection.project(features));
        majority_class(&self.tree.get_votes_for_instance(&instance))
    }

    /// Exactly one distinct label was present at training time.
    pub fn is_degenerate(&self) -> bool {
        self.summary.distinct_labels == 1
    }

    pub fn projection(&self) -> FeatureProjection {
        self.projection
    }

    pub fn summary(&self) -> ModelSummary {
        self.summary
    }

    /// Names of the projected attributes the tree actually splits on.
    pub fn attributes_used(&self) -> Vec<&str> {
        self.tree
            .attributes_used()
            .into_iter()
            .filter_map(|i| self.header.attribute_at_index(i).map(|a| a.name()))
            .collect()
    }

    pub fn describe(&self) -> String {
        self.tree.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::bootstrap_samples;

    fn engine(projection: FeatureProjection) -> ClassifierEngine {
        ClassifierEngine::new(projection, TreeOptions::default())
    }

    #[test]
    fn full_projection_recovers_every_bootstrap_label() {
        let samples = bootstrap_samples();
        let model = engine(FeatureProjection::Full).train(&samples);
        for s in &samples {
            assert_eq!(model.predict(&s.features), s.label);
        }
        assert_eq!(model.summary().leaves, 5);
        assert!(!model.is_degenerate());
    }

    #[test]
    fn conductivity_only_classifies_exact_paper_reading() {
        let model = engine(FeatureProjection::ConductivityOnly).train(&bootstrap_samples());
        let probe = Features::new(0.0, 0.0, 0.0, 0.05);
        assert_eq!(model.predict(&probe), MaterialClass::Paper);
        assert_eq!(model.attributes_used(), vec!["conductivity"]);
    }

    #[test]
    fn conductivity_only_ignores_other_fields() {
        let model = engine(FeatureProjection::ConductivityOnly).train(&bootstrap_samples());
        let a = Features::new(1.0, 1.0, 1.0, 0.7);
        let b = Features::new(999.0, -5.0, 0.0, 0.7);
        assert_eq!(model.predict(&a), MaterialClass::Metal);
        assert_eq!(model.predict(&b), MaterialClass::Metal);
    }

    #[test]
    fn out_of_distribution_input_still_gets_a_label() {
        let model = engine(FeatureProjection::Full).train(&bootstrap_samples());
        let far = Features::new(1e9, -1e9, 1e12, 1e6);
        assert_ne!(model.predict(&far), MaterialClass::Unknown);
    }

    #[test]
    fn single_label_training_set_is_degenerate() {
        let samples: Vec<Sample> = bootstrap_samples()
            .into_iter()
            .map(|s| Sample::new(s.features, MaterialClass::Organic))
            .collect();
        let model = engine(FeatureProjection::Full).train(&samples);
        assert!(model.is_degenerate());
        assert_eq!(model.summary().leaves, 1);
        assert_eq!(
            model.predict(&Features::new(0.0, 0.0, 0.0, 0.0)),
            MaterialClass::Organic
        );
    }

    #[test]
    fn empty_training_set_predicts_unknown() {
        let model = engine(FeatureProjection::Full).train(&[]);
        assert_eq!(
            model.predict(&Features::new(1.0, 2.0, 3.0, 4.0)),
            MaterialClass::Unknown
        );
        assert_eq!(model.summary().samples, 0);
        assert!(!model.is_degenerate());
    }

    #[test]
    fn predictions_are_repeatable() {
        let model = engine(FeatureProjection::Full).train(&bootstrap_samples());
        let x = Features::new(11.0, 7.0, 40.0, 0.25);
        assert_eq!(model.predict(&x), model.predict(&x));
    }
}
