pub mod classifiers;
pub mod core;
pub mod logging;
pub mod service;
pub mod storage;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
