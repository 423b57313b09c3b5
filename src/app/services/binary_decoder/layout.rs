//! Raw binary record layout
//!
//! Decodes one fixed 792-byte chunk into a [`RawPlantRecord`] carrying every
//! documented field. Decoding is mechanical byte reinterpretation at the
//! offsets in [`crate::constants::binary_offsets`]; no value is validated
//! here. The reserved range (per-set turbine data, loss tables, operating
//! constraints) is skipped without interpretation.

use crate::constants::{
    EVAPORATION_MONTHS, MAX_UNIT_SETS, POLY_COEFFICIENT_COUNT, RECORD_SIZE, binary_offsets as off,
};

/// Every decoded field of one binary plant record.
///
/// This is the full on-disk field set; the public [`crate::Plant`] view is
/// produced by the explicit mapping in [`super::mapping`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlantRecord {
    pub plant_num: i32,
    pub name: String,
    pub gauge_station: i64,
    pub subsystem: i32,
    pub company: i32,
    pub downstream_plant: i32,
    pub diversion_plant: i32,
    pub min_volume: f32,
    pub max_volume: f32,
    pub spillway_volume: f32,
    pub diversion_volume: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub volume_elevation_poly: [f32; POLY_COEFFICIENT_COUNT],
    pub volume_area_poly: [f32; POLY_COEFFICIENT_COUNT],
    pub evaporation: [i32; EVAPORATION_MONTHS],
    pub num_unit_sets: i32,
    pub units_per_set: [i32; MAX_UNIT_SETS],
    pub set_capacity: [f32; MAX_UNIT_SETS],
    pub installed_capacity: f32,
    pub productivity: f32,
}

impl RawPlantRecord {
    /// Decode a full record chunk. Each field is independently byte-located,
    /// so one odd value never invalidates its siblings.
    pub fn decode(chunk: &[u8; RECORD_SIZE]) -> Self {
        Self {
            plant_num: read_i32(chunk, off::PLANT_NUM),
            name: read_string(chunk, off::NAME, off::NAME_LEN),
            gauge_station: read_i64(chunk, off::GAUGE_STATION),
            subsystem: read_i32(chunk, off::SUBSYSTEM),
            company: read_i32(chunk, off::COMPANY),
            downstream_plant: read_i32(chunk, off::DOWNSTREAM_PLANT),
            diversion_plant: read_i32(chunk, off::DIVERSION_PLANT),
            min_volume: read_f32(chunk, off::MIN_VOLUME),
            max_volume: read_f32(chunk, off::MAX_VOLUME),
            spillway_volume: read_f32(chunk, off::SPILLWAY_VOLUME),
            diversion_volume: read_f32(chunk, off::DIVERSION_VOLUME),
            min_elevation: read_f32(chunk, off::MIN_ELEVATION),
            max_elevation: read_f32(chunk, off::MAX_ELEVATION),
            volume_elevation_poly: read_f32_array(chunk, off::VOLUME_ELEVATION_POLY),
            volume_area_poly: read_f32_array(chunk, off::VOLUME_AREA_POLY),
            evaporation: read_i32_array(chunk, off::EVAPORATION),
            num_unit_sets: read_i32(chunk, off::NUM_UNIT_SETS),
            units_per_set: read_i32_array(chunk, off::UNITS_PER_SET),
            set_capacity: read_f32_array(chunk, off::SET_CAPACITY),
            installed_capacity: read_f32(chunk, off::INSTALLED_CAPACITY),
            productivity: read_f32(chunk, off::PRODUCTIVITY),
            // off::RESERVED_START..off::RESERVED_END intentionally skipped
        }
    }
}

fn read_i32(chunk: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(chunk[offset..offset + 4].try_into().unwrap())
}

fn read_i64(chunk: &[u8], offset: usize) -> i64 {
    i64::from_le_bytes(chunk[offset..offset + 8].try_into().unwrap())
}

fn read_f32(chunk: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(chunk[offset..offset + 4].try_into().unwrap())
}

fn read_i32_array<const N: usize>(chunk: &[u8], offset: usize) -> [i32; N] {
    std::array::from_fn(|i| read_i32(chunk, offset + 4 * i))
}

fn read_f32_array<const N: usize>(chunk: &[u8], offset: usize) -> [f32; N] {
    std::array::from_fn(|i| read_f32(chunk, offset + 4 * i))
}

/// Fixed-length byte range decoded as a string with trailing NUL and space
/// padding trimmed. Non-UTF8 bytes are replaced rather than failing the
/// record.
fn read_string(chunk: &[u8], offset: usize, len: usize) -> String {
    String::from_utf8_lossy(&chunk[offset..offset + len])
        .trim_end_matches(['\0', ' '])
        .to_string()
}
