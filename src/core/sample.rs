use crate::core::material_class::MaterialClass;
use serde::{Deserialize, Serialize};

/// The four measured values of a physical object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub length: f64,
    pub width: f64,
    pub weight: f64,
    pub conductivity: f64,
}

impl Features {
    pub const NAMES: [&'static str; 4] = ["length", "width", "weight", "conductivity"];

    pub fn new(length: f64, width: f64, weight: f64, conductivity: f64) -> Self {
        Self {
            length,
            width,
            weight,
            conductivity,
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.length, self.width, self.weight, self.conductivity]
    }

    /// Returns the first field holding a non-finite value, if any.
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        Self::NAMES
            .iter()
            .zip(self.to_array())
            .find(|(_, v)| !v.is_finite())
            .map(|(name, v)| (*name, v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Features,
    pub label: MaterialClass,
}

impl Sample {
    pub fn new(features: Features, label: MaterialClass) -> Self {
        Self { features, label }
    }
}

/// Rows used when no persisted sample file exists, one per class 0..=4.
pub fn bootstrap_samples() -> Vec<Sample> {
    vec![
        Sample::new(Features::new(10.0, 5.0, 50.0, 0.2), MaterialClass::Glass),
        Sample::new(Features::new(15.0, 10.0, 30.0, 0.05), MaterialClass::Paper),
        Sample::new(Features::new(8.0, 4.0, 20.0, 0.03), MaterialClass::Plastic),
        Sample::new(Features::new(12.0, 6.0, 80.0, 0.7), MaterialClass::Metal),
        Sample::new(Features::new(10.0, 8.0, 25.0, 0.3), MaterialClass::Organic),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_finite_reports_field_name() {
        let f = Features::new(1.0, f64::NAN, f64::INFINITY, 0.1);
        let (name, value) = f.first_non_finite().unwrap();
        assert_eq!(name, "width");
        assert!(value.is_nan());
    }

    #[test]
    fn finite_features_pass() {
        assert!(Features::new(1.0, 2.0, 3.0, 0.0).first_non_finite().is_none());
    }

    #[test]
    fn bootstrap_covers_known_classes_in_order() {
        let labels: Vec<MaterialClass> = bootstrap_samples().iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                MaterialClass::Glass,
                MaterialClass::Paper,
                MaterialClass::Plastic,
                MaterialClass::Metal,
                MaterialClass::Organic,
            ]
        );
    }
}
