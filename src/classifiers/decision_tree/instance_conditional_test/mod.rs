
pub use instance_conditional_test::InstanceConditionalTest;
pub use numeric_attribute_binary_test::NumericAttributeBinaryTest;
