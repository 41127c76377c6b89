pub mod attributes;
pub mod instance_header;
pub mod instances;
pub mod material_class;
pub mod sample;

pub use material_class::{MaterialClass, UnknownClassId};
pub use sample::{Features, Sample, bootstrap_samples};
