use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::core::material_class::MaterialClass;
use crate::core::sample::{Features, Sample};
use crate::service::{MaterialClassifierApi, ServiceError, SubmitOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Submit { features: Features, class_id: i64 },
    Classify { features: Features },
    Samples,
    Statistics,
}

/// Records every contract call. Submissions with a valid class are counted;
/// classification always answers `Unknown`.
#[derive(Default)]
pub struct ApiSpy {
    calls: RefCell<Vec<ApiCall>>,
    counts: BTreeMap<MaterialClass, u64>,
}

impl ApiSpy {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
    }

    fn snapshot(&self) -> BTreeMap<MaterialClass, u64> {
        MaterialClass::ALL
            .iter()
            .map(|&c| (c, self.counts.get(&c).copied().unwrap_or(0)))
            .collect()
    }
}

impl MaterialClassifierApi for ApiSpy {
    fn submit_sample(
        &mut self,
        length: f64,
        width: f64,
        weight: f64,
        conductivity: f64,
        class_id: i64,
    ) -> Result<SubmitOutcome, ServiceError> {
        self.record(ApiCall::Submit {
            features: Features::new(length, width, weight, conductivity),
            class_id,
        });
        let class =
            MaterialClass::try_from(class_id).map_err(|_| ServiceError::InvalidClass(class_id))?;
        *self.counts.entry(class).or_insert(0) += 1;
        Ok(SubmitOutcome {
            updated_counts: self.snapshot(),
        })
    }

    fn classify(
        &self,
        length: f64,
        width: f64,
        weight: f64,
        conductivity: f64,
    ) -> Result<MaterialClass, ServiceError> {
        self.record(ApiCall::Classify {
            features: Features::new(length, width, weight, conductivity),
        });
        Ok(MaterialClass::Unknown)
    }

    fn get_samples(&self) -> Vec<Sample> {
        self.record(ApiCall::Samples);
        Vec::new()
    }

    fn get_statistics(&self) -> BTreeMap<MaterialClass, u64> {
        self.record(ApiCall::Statistics);
        self.snapshot()
    }
}
