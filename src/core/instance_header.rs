use crate::core::attributes::NumericAttribute;
use crate::core::material_class::MaterialClass;
use std::fmt;

/// Describes the projected attributes a learner is trained on. The class
/// attribute is implicit and always spans the full material class table.
pub struct InstanceHeader {
    relation_name: String,
    pub attributes: Vec<NumericAttribute>,
}

impl InstanceHeader {
    pub fn new(relation_name: String, attributes: Vec<NumericAttribute>) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
        }
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&NumericAttribute> {
        self.attributes.get(index)
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    pub fn number_of_classes(&self) -> usize {
        MaterialClass::COUNT
    }
}

impl fmt::Debug for InstanceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceHeader")
            .field("relation_name", &self.relation_name)
            .field(
                "attributes",
                &self.attributes.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
