//! Structural and domain checks on the raw record.

use tracing::debug;

use crate::error::{PipelineError, ValidationError};
use crate::preprocessing::encoding::{
    BuildingState, CategoryCodec, EnergyLabel, OrdinalCategory, PropertyType,
};
use crate::preprocessing::traits::RecordTransformer;
use crate::record::{PostalCode, PropertyRecord, ValidatedRecord};

/// Minimum floor area in m², exclusive.
pub const MIN_AREA: f64 = 10.0;

/// Validates a raw [`PropertyRecord`] into a typed [`ValidatedRecord`].
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. postal code format, then range
/// 2. property type
/// 3. building state, when given
/// 4. energy label, when given
/// 5. floor area, then room count
#[derive(Clone, Copy, Debug, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, record: &PropertyRecord) -> Result<ValidatedRecord, ValidationError> {
        let postal_code = PostalCode::try_from(&record.zip_code)?;

        let property_type = parse_category::<PropertyType>(&record.property_type)
            .ok_or_else(|| ValidationError::InvalidPropertyType {
                value: record.property_type.clone(),
            })?;

        let building_state = match record.building_state.as_deref() {
            Some(label) => Some(parse_category::<BuildingState>(label).ok_or_else(|| {
                ValidationError::InvalidBuildingState {
                    value: label.to_string(),
                }
            })?),
            None => None,
        };

        let energy_label = match record.energy_label.as_deref() {
            Some(label) => Some(parse_category::<EnergyLabel>(label).ok_or_else(|| {
                ValidationError::InvalidEnergyLabel {
                    value: label.to_string(),
                }
            })?),
            None => None,
        };

        if !record.area.is_finite() || record.area <= 0.0 {
            return Err(ValidationError::NotPositive {
                field: "area",
                value: record.area,
            });
        }
        if record.area <= MIN_AREA {
            return Err(ValidationError::AreaTooSmall { value: record.area });
        }

        let rooms_number = u32::try_from(record.rooms_number)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(ValidationError::NotPositive {
                field: "rooms_number",
                value: record.rooms_number as f64,
            })?;

        debug!(%postal_code, ?property_type, "record validated");
        Ok(ValidatedRecord {
            rooms_number,
            area: record.area,
            postal_code,
            property_type,
            building_state,
            lift: record.lift,
            garden: record.garden,
            swimming_pool: record.swimming_pool,
            terrace: record.terrace,
            parking: record.parking,
            equipped_kitchen: record.equipped_kitchen,
            energy_label,
        })
    }
}

fn parse_category<C: OrdinalCategory>(label: &str) -> Option<C> {
    CategoryCodec::parse::<C>(label).ok()
}

impl RecordTransformer for InputValidator {
    type Input = PropertyRecord;
    type Output = ValidatedRecord;

    fn transform(&self, input: &Self::Input) -> Result<Self::Output, PipelineError> {
        Ok(self.validate(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> PropertyRecord {
        PropertyRecord::new(4, 120.0, 1000, "HOUSE")
    }

    #[test]
    fn test_valid_record_passes() {
        let validated = InputValidator::new().validate(&house()).unwrap();
        assert_eq!(validated.rooms_number, 4);
        assert_eq!(validated.postal_code.value(), 1000);
        assert_eq!(validated.property_type, PropertyType::House);
        assert_eq!(validated.building_state, None);
        assert_eq!(validated.garden, None);
    }

    #[test]
    fn test_short_zip_code_names_field() {
        let mut record = house();
        record.zip_code = 99.into();
        let err = InputValidator::new().validate(&record).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPostalCode { .. }));
        assert_eq!(err.field(), "zip_code");
    }

    #[test]
    fn test_zip_code_out_of_range() {
        let mut record = house();
        record.zip_code = 9999.into();
        let err = InputValidator::new().validate(&record).unwrap_err();
        assert_eq!(err, ValidationError::PostalCodeOutOfRange { code: 9999 });
    }

    #[test]
    fn test_unknown_property_type() {
        let mut record = house();
        record.property_type = "CASTLE".to_string();
        let err = InputValidator::new().validate(&record).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidPropertyType {
                value: "CASTLE".to_string()
            }
        );
        assert_eq!(err.field(), "property_type");
    }

    #[test]
    fn test_unknown_building_state() {
        let record = house().with_building_state("RUINED");
        let err = InputValidator::new().validate(&record).unwrap_err();
        assert_eq!(err.field(), "building_state");
    }

    #[test]
    fn test_unknown_energy_label() {
        let record = house().with_energy_label("H");
        let err = InputValidator::new().validate(&record).unwrap_err();
        assert_eq!(err.field(), "energy_label");
    }

    #[test]
    fn test_postal_code_checked_before_category() {
        let mut record = house();
        record.zip_code = 12.into();
        record.property_type = "CASTLE".to_string();
        let err = InputValidator::new().validate(&record).unwrap_err();
        assert_eq!(err.field(), "zip_code");
    }

    #[test]
    fn test_area_constraints() {
        let validator = InputValidator::new();

        let mut record = house();
        record.area = 10.0;
        assert_eq!(
            validator.validate(&record).unwrap_err(),
            ValidationError::AreaTooSmall { value: 10.0 }
        );

        record.area = -5.0;
        assert_eq!(validator.validate(&record).unwrap_err().field(), "area");

        record.area = f64::NAN;
        assert_eq!(validator.validate(&record).unwrap_err().field(), "area");

        record.area = 10.5;
        assert!(validator.validate(&record).is_ok());
    }

    #[test]
    fn test_rooms_must_be_positive() {
        let validator = InputValidator::new();
        for rooms in [0, -1, i64::from(u32::MAX) + 1] {
            let mut record = house();
            record.rooms_number = rooms;
            let err = validator.validate(&record).unwrap_err();
            assert_eq!(err.field(), "rooms_number");
        }
    }

    #[test]
    fn test_explicit_false_is_kept() {
        let mut record = house();
        record.garden = Some(false);
        let validated = InputValidator::new().validate(&record).unwrap();
        assert_eq!(validated.garden, Some(false));
    }

    #[test]
    fn test_transform_wraps_validation_error() {
        let mut record = house();
        record.property_type = "CASTLE".to_string();
        let err = InputValidator::new().transform(&record).unwrap_err();
        assert!(err.is_client_error());
    }
}
