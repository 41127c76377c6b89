use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::core::material_class::MaterialClass;
use std::sync::Arc;

/// A projected feature vector, optionally labeled.
#[derive(Debug, Clone)]
pub struct DenseInstance {
    header: Arc<InstanceHeader>,
    values: Vec<f64>,
    class_value: Option<MaterialClass>,
    weight: f64,
}

impl DenseInstance {
    pub fn new(
        header: Arc<InstanceHeader>,
        values: Vec<f64>,
        class_value: Option<MaterialClass>,
        weight: f64,
    ) -> Self {
        debug_assert_eq!(
            header.number_of_attributes(),
            values.len(),
            "instance arity does not match header"
        );
        Self {
            header,
            values,
            class_value,
            weight,
        }
    }

    pub fn unlabeled(header: Arc<InstanceHeader>, values: Vec<f64>) -> Self {
        Self::new(header, values, None, 1.0)
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn is_missing_at_index(&self, index: usize) -> bool {
        self.values.get(index).is_none_or(|v| v.is_nan())
    }

    fn number_of_attributes(&self) -> usize {
        self.values.len()
    }

    fn class_value(&self) -> Option<MaterialClass> {
        self.class_value
    }

    fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }
}
