pub mod atomic_file;
pub mod error;
pub mod lock;
pub mod sample_store;
pub mod stats_register;

pub use error::StorageError;
pub use lock::StorageLock;
pub use sample_store::SampleStore;
pub use stats_register::{StatsError, StatsRegister};
