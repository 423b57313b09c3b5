//! Plant registry aggregate
//!
//! One [`PlantRegistry`] holds everything decoded from a single registry
//! file: the plant list plus the auxiliary collections that only exist in
//! the text layout, indexed for O(1) lookup by plant number. The index is
//! built once at construction and collections are read-only afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::app::models::{
    EvaporationCoefficients, Plant, PolynomialCurve, SourceFormat, TravelTime, UnitSet,
};
use crate::app::services::text_decoder::DecodedBlocks;
use crate::error::{RegistryError, Result};

pub mod loader;

pub use loader::parse_registry_file;

/// Complete decoded content of one registry file.
#[derive(Debug, Clone)]
pub struct PlantRegistry {
    source_format: SourceFormat,
    plants: Vec<Plant>,
    unit_sets: Vec<UnitSet>,
    travel_times: Vec<TravelTime>,
    volume_elevation_curves: Vec<PolynomialCurve>,
    volume_area_curves: Vec<PolynomialCurve>,
    tailrace_curves: Vec<PolynomialCurve>,
    evaporation: Vec<EvaporationCoefficients>,

    /// Positive plant number -> position in `plants`. Placeholder rows
    /// (number 0) are kept in the list but never indexed.
    index: HashMap<i32, usize>,
}

impl PlantRegistry {
    /// Build a registry from a binary decode, which produces plants only.
    pub fn from_plants(plants: Vec<Plant>, source_format: SourceFormat) -> Result<Self> {
        Self::build(plants, DecodedBlocks::default(), source_format)
    }

    /// Build a registry from a text decode with its auxiliary blocks.
    pub fn from_blocks(mut blocks: DecodedBlocks, source_format: SourceFormat) -> Result<Self> {
        let plants = std::mem::take(&mut blocks.plants);
        Self::build(plants, blocks, source_format)
    }

    fn build(
        plants: Vec<Plant>,
        blocks: DecodedBlocks,
        source_format: SourceFormat,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(plants.len());
        for (position, plant) in plants.iter().enumerate() {
            if plant.plant_num <= 0 {
                continue;
            }
            if index.insert(plant.plant_num, position).is_some() {
                return Err(RegistryError::DuplicatePlant {
                    plant_num: plant.plant_num,
                });
            }
        }

        debug!(
            format = %source_format,
            plants = plants.len(),
            indexed = index.len(),
            "registry built"
        );

        Ok(Self {
            source_format,
            plants,
            unit_sets: blocks.unit_sets,
            travel_times: blocks.travel_times,
            volume_elevation_curves: blocks.volume_elevation_curves,
            volume_area_curves: blocks.volume_area_curves,
            tailrace_curves: blocks.tailrace_curves,
            evaporation: blocks.evaporation,
            index,
        })
    }

    /// Which on-disk layout this registry was decoded from.
    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    /// Every decoded plant, placeholders included, in file order.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Look up a plant by its positive plant number.
    pub fn plant(&self, plant_num: i32) -> Option<&Plant> {
        self.index.get(&plant_num).map(|&pos| &self.plants[pos])
    }

    /// Like [`plant`](Self::plant) but missing plants are an error.
    pub fn require_plant(&self, plant_num: i32) -> Result<&Plant> {
        self.plant(plant_num)
            .ok_or(RegistryError::PlantNotFound { plant_num })
    }

    /// Number of non-placeholder plants.
    pub fn plant_count(&self) -> usize {
        self.index.len()
    }

    pub fn unit_sets(&self) -> &[UnitSet] {
        &self.unit_sets
    }

    pub fn travel_times(&self) -> &[TravelTime] {
        &self.travel_times
    }

    pub fn volume_elevation_curves(&self) -> &[PolynomialCurve] {
        &self.volume_elevation_curves
    }

    pub fn volume_area_curves(&self) -> &[PolynomialCurve] {
        &self.volume_area_curves
    }

    pub fn tailrace_curves(&self) -> &[PolynomialCurve] {
        &self.tailrace_curves
    }

    pub fn evaporation(&self) -> &[EvaporationCoefficients] {
        &self.evaporation
    }

    /// Whether any auxiliary (text-only) collection is populated.
    pub fn has_auxiliary_data(&self) -> bool {
        !self.unit_sets.is_empty()
            || !self.travel_times.is_empty()
            || !self.volume_elevation_curves.is_empty()
            || !self.volume_area_curves.is_empty()
            || !self.tailrace_curves.is_empty()
            || !self.evaporation.is_empty()
    }
}
