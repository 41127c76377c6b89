use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};
use thiserror::Error;

/// Raw class id that does not belong to the fixed class table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown material class id {0}")]
pub struct UnknownClassId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
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
pub enum MaterialClass {
    #[strum(message = "Glass")]
    Glass = 0,
    #[strum(message = "Paper")]
    Paper = 1,
    #[strum(message = "Plastic")]
    Plastic = 2,
    #[strum(message = "Metal")]
    Metal = 3,
    #[strum(message = "Organic")]
    Organic = 4,
    /// Reserved; never produced by the bootstrap dataset.
    #[strum(message = "Unknown")]
    Unknown = 5,
}

impl MaterialClass {
    pub const COUNT: usize = 6;

    pub const ALL: [MaterialClass; Self::COUNT] = [
        MaterialClass::Glass,
        MaterialClass::Paper,
        MaterialClass::Plastic,
        MaterialClass::Metal,
        MaterialClass::Organic,
        MaterialClass::Unknown,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MaterialClass::Glass => "Glass",
            MaterialClass::Paper => "Paper",
            MaterialClass::Plastic => "Plastic",
            MaterialClass::Metal => "Metal",
            MaterialClass::Organic => "Organic",
            MaterialClass::Unknown => "Unknown",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl TryFrom<i64> for MaterialClass {
    type Error = UnknownClassId;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(Self::from_index)
            .ok_or(UnknownClassId(id))
    }
}
