use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::core::material_class::MaterialClass;
use std::sync::Arc;

pub trait Classifier {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64>;
    fn set_model_context(&mut self, header: Arc<InstanceHeader>);
    /// Discards any previous model and induces a new one from `instances`.
    fn train_on_instances(&mut self, instances: &[&dyn Instance]);
}

/// Heaviest vote wins; ties go to the lowest class id. An all-zero or empty
/// vote vector yields `Unknown`.
pub fn majority_class(votes: &[f64]) -> MaterialClass {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in votes.iter().enumerate() {
        if v > 0.0 && best.is_none_or(|(_, bv)| v > bv) {
            best = Some((i, v));
        }
    }
    best.and_then(|(i, _)| MaterialClass::from_index(i))
        .unwrap_or(MaterialClass::Unknown)
}
