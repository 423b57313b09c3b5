//! Cascade topology over a decoded registry
//!
//! Builds the river network implied by the `downstream_plant` references:
//! each plant points at most at one downstream neighbor, so the cascade is a
//! forest of inverted trees draining toward the outlets. The graph holds
//! plant numbers only and borrows nothing from the registry after
//! construction. Dangling downstream references (a neighbor that was never
//! decoded) are kept as edges; traversal simply stops there.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::app::services::registry::PlantRegistry;

pub mod query;

pub use query::StorageAggregate;

/// Directed cascade topology, one node per positive plant number.
#[derive(Debug, Clone)]
pub struct CascadeGraph {
    /// plant -> its downstream neighbor, edges with an explicit target only
    downstream: HashMap<i32, i32>,

    /// plant -> plants draining directly into it
    upstream: HashMap<i32, Vec<i32>>,

    /// Plants named as someone's downstream neighbor
    referenced: HashSet<i32>,

    /// All positive plant numbers, sorted
    plant_nums: Vec<i32>,
}

impl CascadeGraph {
    /// Build the topology from every non-placeholder plant in the registry.
    pub fn from_registry(registry: &PlantRegistry) -> Self {
        let mut downstream = HashMap::new();
        let mut upstream: HashMap<i32, Vec<i32>> = HashMap::new();
        let mut referenced = HashSet::new();
        let mut plant_nums = Vec::new();

        for plant in registry.plants() {
            if plant.plant_num <= 0 {
                continue;
            }
            plant_nums.push(plant.plant_num);

            if let Some(next) = plant.downstream_plant {
                downstream.insert(plant.plant_num, next);
                upstream.entry(next).or_default().push(plant.plant_num);
                referenced.insert(next);
            }
        }

        plant_nums.sort_unstable();
        for upstream_list in upstream.values_mut() {
            upstream_list.sort_unstable();
        }

        debug!(
            plants = plant_nums.len(),
            edges = downstream.len(),
            "cascade graph built"
        );

        Self {
            downstream,
            upstream,
            referenced,
            plant_nums,
        }
    }

    /// Headwater plants: decoded plants no other plant drains into.
    ///
    /// Every plant in the graph is reachable by walking downstream from some
    /// root (an isolated plant is its own root).
    pub fn roots(&self) -> Vec<i32> {
        self.plant_nums
            .iter()
            .copied()
            .filter(|num| !self.referenced.contains(num))
            .collect()
    }

    /// Outlet plants: plants whose discharge leaves the modeled basin.
    pub fn outlets(&self) -> Vec<i32> {
        self.plant_nums
            .iter()
            .copied()
            .filter(|num| !self.downstream.contains_key(num))
            .collect()
    }

    /// Plants draining directly into `plant_num`, sorted.
    pub fn upstream_of(&self, plant_num: i32) -> &[i32] {
        self.upstream
            .get(&plant_num)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The downstream neighbor of `plant_num`, if it names one.
    pub fn downstream_of(&self, plant_num: i32) -> Option<i32> {
        self.downstream.get(&plant_num).copied()
    }

    /// Whether `plant_num` is a node of this graph.
    pub fn contains(&self, plant_num: i32) -> bool {
        self.plant_nums.binary_search(&plant_num).is_ok()
    }

    /// All plant numbers in the graph, sorted.
    pub fn plant_nums(&self) -> &[i32] {
        &self.plant_nums
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Plant, SourceFormat};

    fn plant(plant_num: i32, downstream: Option<i32>) -> Plant {
        Plant {
            plant_num,
            name: format!("PLANT{plant_num}"),
            subsystem: Some(1),
            gauge_station: None,
            company: None,
            downstream_plant: downstream,
            diversion_plant: None,
            min_volume: 10.0,
            max_volume: 100.0,
            spillway_volume: None,
            diversion_volume: None,
            min_elevation: None,
            max_elevation: None,
            installed_capacity: 50.0,
            productivity: 0.009,
            min_discharge: None,
            regulation: None,
        }
    }

    fn registry(plants: Vec<Plant>) -> PlantRegistry {
        PlantRegistry::from_plants(plants, SourceFormat::Text).unwrap()
    }

    /// C -> B -> A, A is the outlet.
    fn chain_registry() -> PlantRegistry {
        registry(vec![
            plant(1, None),
            plant(2, Some(1)),
            plant(3, Some(2)),
        ])
    }

    #[test]
    fn test_roots_are_unreferenced_plants() {
        let graph = CascadeGraph::from_registry(&chain_registry());
        assert_eq!(graph.roots(), vec![3]);
    }

    #[test]
    fn test_outlets_have_no_downstream() {
        let graph = CascadeGraph::from_registry(&chain_registry());
        assert_eq!(graph.outlets(), vec![1]);
    }

    #[test]
    fn test_upstream_adjacency() {
        let graph = CascadeGraph::from_registry(&registry(vec![
            plant(1, None),
            plant(2, Some(1)),
            plant(3, Some(1)),
        ]));

        assert_eq!(graph.upstream_of(1), &[2, 3]);
        assert_eq!(graph.upstream_of(2), &[] as &[i32]);
        assert_eq!(graph.downstream_of(2), Some(1));
        assert_eq!(graph.downstream_of(1), None);
    }

    #[test]
    fn test_isolated_plant_is_root_and_outlet() {
        let graph = CascadeGraph::from_registry(&registry(vec![plant(7, None)]));
        assert_eq!(graph.roots(), vec![7]);
        assert_eq!(graph.outlets(), vec![7]);
    }

    #[test]
    fn test_placeholders_are_excluded() {
        let graph = CascadeGraph::from_registry(&registry(vec![plant(0, None), plant(1, None)]));
        assert_eq!(graph.plant_nums(), &[1]);
        assert!(!graph.contains(0));
    }

    #[test]
    fn test_dangling_downstream_reference_is_kept() {
        // Plant 1 drains into 99 which was never decoded
        let graph = CascadeGraph::from_registry(&registry(vec![plant(1, Some(99))]));
        assert_eq!(graph.downstream_of(1), Some(99));
        assert!(!graph.contains(99));
        // 1 is still a root; 99 is referenced but not a node
        assert_eq!(graph.roots(), vec![1]);
        assert_eq!(graph.outlets(), vec![1]);
    }

    #[test]
    fn test_every_plant_reachable_from_some_root() {
        let graph = CascadeGraph::from_registry(&registry(vec![
            plant(1, None),
            plant(2, Some(1)),
            plant(3, Some(2)),
            plant(4, Some(1)),
            plant(5, None),
        ]));

        let mut reached = std::collections::HashSet::new();
        for root in graph.roots() {
            let mut current = Some(root);
            while let Some(num) = current {
                reached.insert(num);
                current = graph.downstream_of(num);
            }
        }
        for &num in graph.plant_nums() {
            assert!(reached.contains(&num), "plant {num} unreachable from roots");
        }
    }
}
