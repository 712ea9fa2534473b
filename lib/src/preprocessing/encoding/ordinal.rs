//! Ordinal code tables for the categorical attributes.
//!
//! The codes are part of the contract with the pretrained model: they are the
//! integers the model saw during training. Each table is an exhaustive `match`
//! so adding a variant without a code does not compile.

use crate::error::CategoryError;
use serde::{Deserialize, Serialize};

/// A closed categorical attribute with a fixed ordinal code per variant.
pub trait OrdinalCategory: Copy + Eq + 'static {
    /// Input field this category is read from.
    const FIELD: &'static str;

    /// Every variant, ordered by code.
    const ALL: &'static [Self];

    /// Canonical label (`JUST_RENOVATED`, `A++`, ...).
    fn label(self) -> &'static str;

    /// Ordinal code the model was trained on.
    fn code(self) -> u32;
}

/// Kind of property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "APARTMENT")]
    Apartment,
    #[serde(rename = "HOUSE")]
    House,
}

impl OrdinalCategory for PropertyType {
    const FIELD: &'static str = "property_type";
    const ALL: &'static [Self] = &[PropertyType::Apartment, PropertyType::House];

    fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "APARTMENT",
            PropertyType::House => "HOUSE",
        }
    }

    fn code(self) -> u32 {
        match self {
            PropertyType::Apartment => 0,
            PropertyType::House => 1,
        }
    }
}

/// Condition of the building.
///
/// Codes follow the training data, which is not ordered by quality:
/// `GOOD` sits between `TO_BE_DONE_UP` and `TO_RENOVATE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingState {
    #[serde(rename = "NEW")]
    New,
    #[serde(rename = "JUST_RENOVATED", alias = "JUST RENOVATED")]
    JustRenovated,
    #[serde(rename = "TO_BE_DONE_UP", alias = "TO BE DONE UP")]
    ToBeDoneUp,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "TO_RENOVATE", alias = "TO RENOVATE")]
    ToRenovate,
    #[serde(rename = "TO_RESTORE", alias = "TO RESTORE")]
    ToRestore,
}

impl OrdinalCategory for BuildingState {
    const FIELD: &'static str = "building_state";
    const ALL: &'static [Self] = &[
        BuildingState::New,
        BuildingState::JustRenovated,
        BuildingState::ToBeDoneUp,
        BuildingState::Good,
        BuildingState::ToRenovate,
        BuildingState::ToRestore,
    ];

    fn label(self) -> &'static str {
        match self {
            BuildingState::New => "NEW",
            BuildingState::JustRenovated => "JUST_RENOVATED",
            BuildingState::ToBeDoneUp => "TO_BE_DONE_UP",
            BuildingState::Good => "GOOD",
            BuildingState::ToRenovate => "TO_RENOVATE",
            BuildingState::ToRestore => "TO_RESTORE",
        }
    }

    fn code(self) -> u32 {
        match self {
            BuildingState::New => 0,
            BuildingState::JustRenovated => 1,
            BuildingState::ToBeDoneUp => 2,
            BuildingState::Good => 3,
            BuildingState::ToRenovate => 4,
            BuildingState::ToRestore => 5,
        }
    }
}

/// EPC energy label, best (`A++`) to worst (`G`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyLabel {
    #[serde(rename = "A++")]
    APlusPlus,
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl OrdinalCategory for EnergyLabel {
    const FIELD: &'static str = "energy_label";
    const ALL: &'static [Self] = &[
        EnergyLabel::APlusPlus,
        EnergyLabel::APlus,
        EnergyLabel::A,
        EnergyLabel::B,
        EnergyLabel::C,
        EnergyLabel::D,
        EnergyLabel::E,
        EnergyLabel::F,
        EnergyLabel::G,
    ];

    fn label(self) -> &'static str {
        match self {
            EnergyLabel::APlusPlus => "A++",
            EnergyLabel::APlus => "A+",
            EnergyLabel::A => "A",
            EnergyLabel::B => "B",
            EnergyLabel::C => "C",
            EnergyLabel::D => "D",
            EnergyLabel::E => "E",
            EnergyLabel::F => "F",
            EnergyLabel::G => "G",
        }
    }

    fn code(self) -> u32 {
        match self {
            EnergyLabel::APlusPlus => 0,
            EnergyLabel::APlus => 1,
            EnergyLabel::A => 2,
            EnergyLabel::B => 3,
            EnergyLabel::C => 4,
            EnergyLabel::D => 5,
            EnergyLabel::E => 6,
            EnergyLabel::F => 7,
            EnergyLabel::G => 8,
        }
    }
}

/// Bidirectional mapping between labels, variants and ordinal codes.
///
/// There is no fallback: a label or code missing from a table is an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct CategoryCodec;

impl CategoryCodec {
    /// Parse a label into its variant.
    ///
    /// Accepts the canonical label and the same label with spaces in place of
    /// underscores (`JUST RENOVATED`). Matching is otherwise exact.
    pub fn parse<C: OrdinalCategory>(label: &str) -> Result<C, CategoryError> {
        C::ALL
            .iter()
            .copied()
            .find(|c| label_matches(label, c.label()))
            .ok_or_else(|| CategoryError::UnknownCategory {
                field: C::FIELD,
                label: label.to_string(),
            })
    }

    pub fn encode<C: OrdinalCategory>(value: C) -> u32 {
        value.code()
    }

    /// Parse and encode in one step.
    pub fn encode_label<C: OrdinalCategory>(label: &str) -> Result<u32, CategoryError> {
        Self::parse::<C>(label).map(C::code)
    }

    pub fn decode<C: OrdinalCategory>(code: u32) -> Result<C, CategoryError> {
        C::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or(CategoryError::UnknownCode {
                field: C::FIELD,
                code,
            })
    }

    /// Canonical labels in code order.
    pub fn labels<C: OrdinalCategory>() -> Vec<&'static str> {
        C::ALL.iter().map(|c| c.label()).collect()
    }
}

fn label_matches(input: &str, canonical: &str) -> bool {
    input.len() == canonical.len()
        && input
            .bytes()
            .zip(canonical.bytes())
            .all(|(i, c)| i == c || (c == b'_' && i == b' '))
}
