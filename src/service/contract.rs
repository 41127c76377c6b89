use std::collections::BTreeMap;

use crate::core::material_class::MaterialClass;
use crate::core::sample::{Features, Sample};
use crate::service::classification_service::ClassificationService;
use crate::service::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub updated_counts: BTreeMap<MaterialClass, u64>,
}

/// What a front end may ask of the classifier. Front ends hold a reference to
/// an implementor and nothing else.
pub trait MaterialClassifierApi {
    fn submit_sample(
        &mut self,
        length: f64,
        width: f64,
        weight: f64,
        conductivity: f64,
        class_id: i64,
    ) -> Result<SubmitOutcome, ServiceError>;

    fn classify(
        &self,
        length: f64,
        width: f64,
        weight: f64,
        conductivity: f64,
    ) -> Result<MaterialClass, ServiceError>;

    fn get_samples(&self) -> Vec<Sample>;

    fn get_statistics(&self) -> BTreeMap<MaterialClass, u64>;
}

impl MaterialClassifierApi for ClassificationService {
    fn submit_sample(
        &mut self,
        length: f64,
        width: f64,
        weight: f64,
        conductivity: f64,
        class_id: i64,
    ) -> Result<SubmitOutcome, ServiceError> {
        let updated_counts =
            self.add_sample(Features::new(length, width, weight, conductivity), class_id)?;
        Ok(SubmitOutcome { updated_counts })
    }

    fn classify(
        &self,
        length: f64,
        width: f64,
        weight: f64,
        conductivity: f64,
    ) -> Result<MaterialClass, ServiceError> {
        ClassificationService::classify(self, &Features::new(length, width, weight, conductivity))
    }

    fn get_samples(&self) -> Vec<Sample> {
        self.list_samples().to_vec()
    }

    fn get_statistics(&self) -> BTreeMap<MaterialClass, u64> {
        self.list_statistics()
    }
}
