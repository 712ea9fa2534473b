//! Property records at each stage of the pipeline.
//!
//! ```text
//! PropertyRecord --validate--> ValidatedRecord --impute--> CompleteRecord
//!     (raw)                    (typed, optionals open)     (every field set)
//! ```
//!
//! Each stage is a distinct type, so encoding cannot be reached with a record
//! that skipped validation or imputation.

use crate::error::ValidationError;
use crate::preprocessing::encoding::{BuildingState, EnergyLabel, PropertyType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest Belgian postal code.
pub const POSTAL_CODE_MIN: u16 = 1000;
/// Highest Belgian postal code.
pub const POSTAL_CODE_MAX: u16 = 9992;

/// Postal code as sent by the client, either a JSON number or a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZipCodeInput {
    Number(i64),
    Text(String),
}

impl fmt::Display for ZipCodeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZipCodeInput::Number(n) => write!(f, "{}", n),
            ZipCodeInput::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ZipCodeInput {
    fn from(value: i64) -> Self {
        ZipCodeInput::Number(value)
    }
}

impl From<i32> for ZipCodeInput {
    fn from(value: i32) -> Self {
        ZipCodeInput::Number(i64::from(value))
    }
}

impl From<u16> for ZipCodeInput {
    fn from(value: u16) -> Self {
        ZipCodeInput::Number(i64::from(value))
    }
}

impl From<&str> for ZipCodeInput {
    fn from(value: &str) -> Self {
        ZipCodeInput::Text(value.to_string())
    }
}

/// A Belgian postal code: four digits within `1000..=9992`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PostalCode(u16);

impl PostalCode {
    /// Check format (exactly four ASCII digits) and then range.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPostalCode {
                value: text.to_string(),
            });
        }
        let code: u16 = text
            .parse()
            .map_err(|_| ValidationError::InvalidPostalCode {
                value: text.to_string(),
            })?;
        if !(POSTAL_CODE_MIN..=POSTAL_CODE_MAX).contains(&code) {
            return Err(ValidationError::PostalCodeOutOfRange { code });
        }
        Ok(PostalCode(code))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<&ZipCodeInput> for PostalCode {
    type Error = ValidationError;

    fn try_from(input: &ZipCodeInput) -> Result<Self, Self::Error> {
        match input {
            ZipCodeInput::Number(n) => PostalCode::parse(&n.to_string()),
            ZipCodeInput::Text(s) => PostalCode::parse(s),
        }
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Raw input record, as delivered by the API layer.
///
/// Categories are kept as strings here; the validator decides membership.
/// Unknown JSON fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub rooms_number: i64,
    pub area: f64,
    pub zip_code: ZipCodeInput,
    #[serde(alias = "property-type")]
    pub property_type: String,
    #[serde(default, alias = "building-state")]
    pub building_state: Option<String>,
    #[serde(default)]
    pub lift: Option<bool>,
    #[serde(default)]
    pub garden: Option<bool>,
    #[serde(default, alias = "swimming-pool")]
    pub swimming_pool: Option<bool>,
    #[serde(default)]
    pub terrace: Option<bool>,
    #[serde(default)]
    pub parking: Option<bool>,
    #[serde(default, alias = "equipped-kitchen")]
    pub equipped_kitchen: Option<bool>,
    #[serde(default, alias = "energy-label")]
    pub energy_label: Option<String>,
}

impl PropertyRecord {
    /// Record with the required fields set and every optional field absent.
    pub fn new(
        rooms_number: i64,
        area: f64,
        zip_code: impl Into<ZipCodeInput>,
        property_type: &str,
    ) -> Self {
        Self {
            rooms_number,
            area,
            zip_code: zip_code.into(),
            property_type: property_type.to_string(),
            building_state: None,
            lift: None,
            garden: None,
            swimming_pool: None,
            terrace: None,
            parking: None,
            equipped_kitchen: None,
            energy_label: None,
        }
    }

    pub fn with_building_state(mut self, state: &str) -> Self {
        self.building_state = Some(state.to_string());
        self
    }

    pub fn with_energy_label(mut self, label: &str) -> Self {
        self.energy_label = Some(label.to_string());
        self
    }
}

/// Record that passed validation. Optional attributes may still be absent.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedRecord {
    pub rooms_number: u32,
    pub area: f64,
    pub postal_code: PostalCode,
    pub property_type: PropertyType,
    pub building_state: Option<BuildingState>,
    pub lift: Option<bool>,
    pub garden: Option<bool>,
    pub swimming_pool: Option<bool>,
    pub terrace: Option<bool>,
    pub parking: Option<bool>,
    pub equipped_kitchen: Option<bool>,
    pub energy_label: Option<EnergyLabel>,
}

/// Validated record with every optional attribute filled in.
#[derive(Clone, Debug, PartialEq)]
pub struct CompleteRecord {
    pub rooms_number: u32,
    pub area: f64,
    pub postal_code: PostalCode,
    pub property_type: PropertyType,
    pub building_state: BuildingState,
    pub lift: bool,
    pub garden: bool,
    pub swimming_pool: bool,
    pub terrace: bool,
    pub parking: bool,
    pub equipped_kitchen: bool,
    pub energy_label: EnergyLabel,
}
