use crate::core::attributes::NumericAttribute;
use crate::core::instance_header::InstanceHeader;
use crate::core::sample::Features;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Which measured fields of a sample are fed to the classifier.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FeatureProjection {
    #[default]
    #[strum(
        message = "Full",
        detailed_message = "Length, width, weight and conductivity."
    )]
    Full,
    #[strum(
        message = "Conductivity only",
        detailed_message = "Conductivity alone."
    )]
    ConductivityOnly,
}

impl FeatureProjection {
    pub fn attribute_names(self) -> &'static [&'static str] {
        match self {
            FeatureProjection::Full => &Features::NAMES,
            FeatureProjection::ConductivityOnly => &["conductivity"],
        }
    }

    pub fn project(self, features: &Features) -> Vec<f64> {
        match self {
            FeatureProjection::Full => features.to_array().to_vec(),
            FeatureProjection::ConductivityOnly => vec![features.conductivity],
        }
    }

    pub fn header(self) -> InstanceHeader {
        let key: &'static str = self.into();
        InstanceHeader::new(
            format!("materials-{key}"),
            self.attribute_names()
                .iter()
                .map(|n| NumericAttribute::new(*n))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_projection_keeps_field_order() {
        let f = Features::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(FeatureProjection::Full.project(&f), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn conductivity_only_projects_single_value() {
        let f = Features::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(FeatureProjection::ConductivityOnly.project(&f), vec![4.0]);
        let header = FeatureProjection::ConductivityOnly.header();
        assert_eq!(header.number_of_attributes(), 1);
        assert_eq!(header.relation_name(), "materials-conductivity-only");
    }

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            "conductivity-only".parse::<FeatureProjection>(),
            Ok(FeatureProjection::ConductivityOnly)
        );
        assert_eq!("full".parse::<FeatureProjection>(), Ok(FeatureProjection::Full));
    }
}
