//! Per-block data line parsing
//!
//! One parser per block type, each reading its fixed column layout from
//! [`crate::constants::columns`] through the field extractor. Required
//! columns reject blanks; optional columns use blank-as-null. Self-reference
//! columns additionally treat an explicit 0 as "no such plant".

use crate::app::models::{
    EvaporationCoefficients, Plant, PolynomialCurve, TravelTime, UnitSet,
};
use crate::app::services::field_extract::{extract, parse_float, parse_int, parse_string};
use crate::constants::{EVAPORATION_MONTHS, columns};
use crate::error::Result;

/// Parse one `CADUSIH` plant registration line.
pub fn parse_plant_line(line: &str) -> Result<Plant> {
    use columns::plants as col;

    let plant_num = parse_int(extract(line, col::PLANT_NUM), false)?.unwrap_or_default();
    let name = parse_string(line, col::NAME).unwrap_or_default();
    let subsystem = parse_int(extract(line, col::SUBSYSTEM), true)?;
    let downstream_plant = optional_reference(extract(line, col::DOWNSTREAM_PLANT))?;
    let diversion_plant = optional_reference(extract(line, col::DIVERSION_PLANT))?;
    let min_volume = parse_float(extract(line, col::MIN_VOLUME), false)?.unwrap_or_default();
    let max_volume = parse_float(extract(line, col::MAX_VOLUME), false)?.unwrap_or_default();
    let installed_capacity =
        parse_float(extract(line, col::INSTALLED_CAPACITY), false)?.unwrap_or_default();
    let productivity = parse_float(extract(line, col::PRODUCTIVITY), false)?.unwrap_or_default();
    let min_discharge = parse_float(extract(line, col::MIN_DISCHARGE), true)?;
    let regulation = parse_string(line, col::REGULATION);

    Ok(Plant {
        plant_num,
        name,
        subsystem,
        gauge_station: None,
        company: None,
        downstream_plant,
        diversion_plant,
        min_volume,
        max_volume,
        spillway_volume: None,
        diversion_volume: None,
        min_elevation: None,
        max_elevation: None,
        installed_capacity,
        productivity,
        min_discharge,
        regulation,
    })
}

/// Parse one `CADCONJ` generating unit set line.
pub fn parse_unit_set_line(line: &str) -> Result<UnitSet> {
    use columns::unit_sets as col;

    Ok(UnitSet {
        plant_num: parse_int(extract(line, col::PLANT_NUM), false)?.unwrap_or_default(),
        set_num: parse_int(extract(line, col::SET_NUM), false)?.unwrap_or_default(),
        num_units: parse_int(extract(line, col::NUM_UNITS), false)?.unwrap_or_default(),
        unit_capacity: parse_float(extract(line, col::UNIT_CAPACITY), false)?.unwrap_or_default(),
    })
}

/// Parse one `TVIAG` travel time line.
pub fn parse_travel_time_line(line: &str) -> Result<TravelTime> {
    use columns::travel_times as col;

    Ok(TravelTime {
        from_plant: parse_int(extract(line, col::FROM_PLANT), false)?.unwrap_or_default(),
        to_plant: parse_int(extract(line, col::TO_PLANT), false)?.unwrap_or_default(),
        hours: parse_float(extract(line, col::HOURS), false)?.unwrap_or_default(),
    })
}

/// Parse one polynomial line, shared by `POLCOTVOL`, `POLCOTARE` and
/// `POLVAZJUS`. Blank coefficient columns are omitted from the curve.
pub fn parse_polynomial_line(line: &str) -> Result<PolynomialCurve> {
    use columns::polynomial as col;

    let plant_num = parse_int(extract(line, col::PLANT_NUM), false)?.unwrap_or_default();
    let mut coefficients = Vec::with_capacity(col::COEFFICIENTS.len());
    for range in col::COEFFICIENTS {
        if let Some(value) = parse_float(extract(line, range), true)? {
            coefficients.push(value);
        }
    }

    Ok(PolynomialCurve {
        plant_num,
        coefficients,
    })
}

/// Parse one `COEFEVAP` line: plant number plus twelve monthly columns.
/// Blank months read as 0.
pub fn parse_evaporation_line(line: &str) -> Result<EvaporationCoefficients> {
    use columns::evaporation as col;

    let plant_num = parse_int(extract(line, col::PLANT_NUM), false)?.unwrap_or_default();
    let mut monthly = [0i32; EVAPORATION_MONTHS];
    for (m, slot) in monthly.iter_mut().enumerate() {
        *slot = parse_int(extract(line, col::month(m)), true)?.unwrap_or(0);
    }

    Ok(EvaporationCoefficients { plant_num, monthly })
}

/// Optional plant self-reference: blank or 0 both mean none.
fn optional_reference(raw: &str) -> Result<Option<i32>> {
    Ok(parse_int(raw, true)?.filter(|&num| num != 0))
}
