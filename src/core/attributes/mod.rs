mod numeric_attribute;

pub use numeric_attribute::NumericAttribute;
