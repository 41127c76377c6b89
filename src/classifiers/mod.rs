pub mod classifier;
pub mod conditional_tests;
pub mod decision_tree;
pub mod engine;
pub mod projection;

pub use classifier::{Classifier, majority_class};
pub use engine::{ClassifierEngine, Model, ModelSummary};
pub use projection::FeatureProjection;
