pub mod classification_service;
pub mod config;
pub mod contract;
pub mod error;

pub use classification_service::ClassificationService;
pub use config::{ServiceConfig, StatsMode};
pub use contract::{MaterialClassifierApi, SubmitOutcome};
pub use error::ServiceError;
