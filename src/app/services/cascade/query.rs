//! Cascade traversal queries
//!
//! Walks along downstream edges. Every walk carries a visited set: plant
//! registries are hand-edited production inputs and a cycle in the
//! downstream references would otherwise loop forever.

use std::collections::HashSet;

use serde::Serialize;

use crate::app::services::registry::PlantRegistry;
use crate::error::{RegistryError, Result};

use super::CascadeGraph;

/// Summed storage bounds over a downstream chain, in hm3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StorageAggregate {
    pub min_volume: f64,
    pub max_volume: f64,

    /// Plants that contributed to the sums
    pub plants: usize,
}

impl CascadeGraph {
    /// The chain of plants from `plant_num` down to the basin outlet,
    /// starting plant included. A dangling downstream reference ends the
    /// chain at the last decoded plant.
    pub fn downstream_chain(&self, plant_num: i32) -> Result<Vec<i32>> {
        if !self.contains(plant_num) {
            return Err(RegistryError::PlantNotFound { plant_num });
        }

        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = plant_num;

        loop {
            if !visited.insert(current) {
                return Err(RegistryError::CycleDetected {
                    plant_num: current,
                    chain,
                });
            }
            chain.push(current);

            match self.downstream_of(current) {
                Some(next) if self.contains(next) => current = next,
                _ => return Ok(chain),
            }
        }
    }

    /// Sum the storage bounds of every plant on the downstream chain of
    /// `plant_num`, the plant itself included.
    pub fn aggregate_storage(
        &self,
        registry: &PlantRegistry,
        plant_num: i32,
    ) -> Result<StorageAggregate> {
        let chain = self.downstream_chain(plant_num)?;

        let mut aggregate = StorageAggregate {
            min_volume: 0.0,
            max_volume: 0.0,
            plants: chain.len(),
        };
        for num in chain {
            let plant = registry.require_plant(num)?;
            aggregate.min_volume += plant.min_volume;
            aggregate.max_volume += plant.max_volume;
        }
        Ok(aggregate)
    }
}
