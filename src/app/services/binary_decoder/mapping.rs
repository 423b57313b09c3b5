//! Raw record to public model mapping
//!
//! The binary layout carries ~111 fields; the public [`Plant`] carries far
//! fewer. This mapping is written out field by field so that what is kept
//! and what is dropped stays visible and testable, instead of relying on
//! positional coincidence between the two shapes.
//!
//! Dropped on purpose, in addition to the reserved range the layout never
//! decodes:
//! - `volume_elevation_poly`, `volume_area_poly` - the registry-level curve
//!   collections are a text-format concept; binary registries carry them
//!   empty by structure
//! - `evaporation` - same
//! - `num_unit_sets`, `units_per_set`, `set_capacity` - same

use crate::app::models::Plant;

use super::layout::RawPlantRecord;

impl RawPlantRecord {
    /// Produce the public view of this record.
    ///
    /// Zero in a self-reference field means "no such plant"; those map to
    /// `None` rather than a dangling id 0.
    pub fn to_plant(&self) -> Plant {
        Plant {
            plant_num: self.plant_num,
            name: self.name.clone(),
            subsystem: Some(self.subsystem),
            gauge_station: Some(self.gauge_station),
            company: Some(self.company),
            downstream_plant: optional_reference(self.downstream_plant),
            diversion_plant: optional_reference(self.diversion_plant),
            min_volume: f64::from(self.min_volume),
            max_volume: f64::from(self.max_volume),
            spillway_volume: Some(f64::from(self.spillway_volume)),
            diversion_volume: Some(f64::from(self.diversion_volume)),
            min_elevation: Some(f64::from(self.min_elevation)),
            max_elevation: Some(f64::from(self.max_elevation)),
            installed_capacity: f64::from(self.installed_capacity),
            productivity: f64::from(self.productivity),
            // Text-only attributes: never present in the binary layout
            min_discharge: None,
            regulation: None,
        }
    }
}

fn optional_reference(plant_num: i32) -> Option<i32> {
    if plant_num == 0 { None } else { Some(plant_num) }
}
