use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericAttribute {
    pub name: String,
}

impl NumericAttribute {
    pub fn new(name: impl Into<String>) -> NumericAttribute {
        NumericAttribute { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NumericAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} numeric", self.name)
    }
}
