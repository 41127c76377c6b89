use crate::core::material_class::MaterialClass;

pub trait Instance {
    fn weight(&self) -> f64;
    fn value_at_index(&self, index: usize) -> Option<f64>;
    fn is_missing_at_index(&self, index: usize) -> bool;
    fn number_of_attributes(&self) -> usize;
    fn class_value(&self) -> Option<MaterialClass>;
    fn number_of_classes(&self) -> usize;
}
