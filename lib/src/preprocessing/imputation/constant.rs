//! Constant-default imputer.

use crate::error::PipelineError;
use crate::preprocessing::schema::Defaults;
use crate::preprocessing::traits::RecordTransformer;
use crate::record::{CompleteRecord, ValidatedRecord};

/// Fills every absent optional attribute with its default.
///
/// A supplied value always wins, including an explicit `false`.
#[derive(Clone, Debug, Default)]
pub struct Imputer {
    defaults: Defaults,
}

impl Imputer {
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn impute(&self, record: &ValidatedRecord) -> CompleteRecord {
        let d = &self.defaults;
        CompleteRecord {
            rooms_number: record.rooms_number,
            area: record.area,
            postal_code: record.postal_code,
            property_type: record.property_type,
            building_state: record.building_state.unwrap_or(d.building_state),
            lift: record.lift.unwrap_or(d.lift),
            garden: record.garden.unwrap_or(d.garden),
            swimming_pool: record.swimming_pool.unwrap_or(d.swimming_pool),
            terrace: record.terrace.unwrap_or(d.terrace),
            parking: record.parking.unwrap_or(d.parking),
            equipped_kitchen: record.equipped_kitchen.unwrap_or(d.equipped_kitchen),
            energy_label: record.energy_label.unwrap_or(d.energy_label),
        }
    }
}

impl RecordTransformer for Imputer {
    type Input = ValidatedRecord;
    type Output = CompleteRecord;

    fn transform(&self, input: &Self::Input) -> Result<Self::Output, PipelineError> {
        Ok(self.impute(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::encoding::{BuildingState, EnergyLabel, PropertyType};
    use crate::record::PostalCode;

    fn sparse_record() -> ValidatedRecord {
        ValidatedRecord {
            rooms_number: 2,
            area: 75.0,
            postal_code: PostalCode::parse("9000").unwrap(),
            property_type: PropertyType::Apartment,
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

    #[test]
    fn test_absent_fields_get_defaults() {
        let complete = Imputer::default().impute(&sparse_record());
        assert!(!complete.lift);
        assert!(!complete.garden);
        assert!(!complete.swimming_pool);
        assert!(!complete.terrace);
        assert!(!complete.parking);
        assert!(!complete.equipped_kitchen);
        assert_eq!(complete.building_state, BuildingState::Good);
        assert_eq!(complete.energy_label, EnergyLabel::E);
    }

    #[test]
    fn test_supplied_values_are_never_overridden() {
        let defaults = Defaults {
            garden: true,
            terrace: true,
            ..Defaults::default()
        };
        let mut record = sparse_record();
        record.garden = Some(false);
        record.terrace = Some(false);
        record.building_state = Some(BuildingState::New);
        record.energy_label = Some(EnergyLabel::APlus);

        let complete = Imputer::new(defaults).impute(&record);
        assert!(!complete.garden);
        assert!(!complete.terrace);
        assert_eq!(complete.building_state, BuildingState::New);
        assert_eq!(complete.energy_label, EnergyLabel::APlus);
    }

    #[test]
    fn test_required_fields_pass_through() {
        let record = sparse_record();
        let complete = Imputer::default().transform(&record).unwrap();
        assert_eq!(complete.rooms_number, record.rooms_number);
        assert_eq!(complete.area, record.area);
        assert_eq!(complete.postal_code, record.postal_code);
        assert_eq!(complete.property_type, record.property_type);
    }
}
