//! Data models for the plant registry
//!
//! This module contains the entity structures decoded from the binary and
//! text registry formats. They are plain data carriers: decoding is purely
//! mechanical and business-level plausibility of the values (negative
//! capacities and the like) is deliberately not validated here.

use serde::{Deserialize, Serialize};

use crate::constants::EVAPORATION_MONTHS;

// =============================================================================
// Plant
// =============================================================================

/// A hydroelectric generating plant and its static physical characteristics.
///
/// Both decoders produce this structure. Fields that exist in only one of
/// the two on-disk formats are optional: `gauge_station`, `company`,
/// `spillway_volume`, `diversion_volume` and the elevations come only from
/// the binary layout; `min_discharge` and `regulation` only from the text
/// layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Plant number - unique key within one decoded registry (placeholder
    /// rows with number 0 may repeat)
    pub plant_num: i32,

    /// Plant name (e.g. "CAMARGOS", "FURNAS")
    pub name: String,

    /// Subsystem / submarket the plant belongs to
    pub subsystem: Option<i32>,

    /// Flow gauge station identifier (binary layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge_station: Option<i64>,

    /// Owning company number (binary layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<i32>,

    /// Next plant in the river cascade; `None` means this plant's discharge
    /// leaves the modeled basin. Preserved even when it does not resolve to
    /// a decoded plant.
    pub downstream_plant: Option<i32>,

    /// Alternate flow path target, if the plant can divert discharge
    pub diversion_plant: Option<i32>,

    /// Minimum (dead) storage volume in hm3
    pub min_volume: f64,

    /// Maximum storage volume in hm3
    pub max_volume: f64,

    /// Storage volume at the spillway crest in hm3 (binary layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spillway_volume: Option<f64>,

    /// Storage volume at the diversion channel in hm3 (binary layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversion_volume: Option<f64>,

    /// Reservoir elevation at minimum volume, meters (binary layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_elevation: Option<f64>,

    /// Reservoir elevation at maximum volume, meters (binary layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_elevation: Option<f64>,

    /// Total installed capacity in MW
    pub installed_capacity: f64,

    /// Specific productivity in MW/(m3/s)/m
    pub productivity: f64,

    /// Minimum turbined discharge in m3/s (text layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_discharge: Option<f64>,

    /// Regulation class, e.g. "M" monthly, "S" weekly, "D" daily (text
    /// layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,
}

impl Plant {
    /// Check whether this is an all-zero placeholder row from binary padding
    pub fn is_placeholder(&self) -> bool {
        self.plant_num == 0
    }

    /// Useful storage range (max - min volume) in hm3
    pub fn storage_range(&self) -> f64 {
        self.max_volume - self.min_volume
    }
}

// =============================================================================
// Auxiliary Records (text layout only)
// =============================================================================

/// A homogeneous set of generating units at one plant.
///
/// Composite key `(plant_num, set_num)`. Only the text decoder populates
/// these; the binary layout carries unit data inside its reserved range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSet {
    pub plant_num: i32,
    pub set_num: i32,

    /// Number of identical units in the set
    pub num_units: i32,

    /// Capacity of one unit in MW
    pub unit_capacity: f64,
}

/// Water travel time between two plants of a cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTime {
    pub from_plant: i32,
    pub to_plant: i32,

    /// Propagation time in hours
    pub hours: f64,
}

/// One polynomial curve keyed by plant, up to 5 ordered coefficients.
///
/// The same shape serves all three curve families: volume-elevation,
/// volume-area, and discharge-tailrace elevation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialCurve {
    pub plant_num: i32,

    /// Coefficients in ascending power order; blank trailing columns are
    /// omitted, so the length is 0 to 5
    pub coefficients: Vec<f64>,
}

impl PolynomialCurve {
    /// Evaluate the polynomial at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Monthly evaporation coefficients for one plant, January first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaporationCoefficients {
    pub plant_num: i32,
    pub monthly: [i32; EVAPORATION_MONTHS],
}

// =============================================================================
// Source Format
// =============================================================================

/// Which on-disk representation a registry was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Headerless sequence of fixed 792-byte records
    Binary,
    /// Multi-block fixed-width text
    Text,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Binary => write!(f, "binary"),
            SourceFormat::Text => write!(f, "text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_plant() -> Plant {
        Plant {
            plant_num: 1,
            name: "CAMARGOS".to_string(),
            subsystem: Some(1),
            gauge_station: None,
            company: None,
            downstream_plant: Some(2),
            diversion_plant: None,
            min_volume: 120.0,
            max_volume: 792.0,
            spillway_volume: None,
            diversion_volume: None,
            min_elevation: None,
            max_elevation: None,
            installed_capacity: 46.0,
            productivity: 0.0088,
            min_discharge: Some(34.0),
            regulation: Some("M".to_string()),
        }
    }

    #[test]
    fn test_placeholder_detection() {
        let mut plant = create_test_plant();
        assert!(!plant.is_placeholder());

        plant.plant_num = 0;
        assert!(plant.is_placeholder());
    }

    #[test]
    fn test_storage_range() {
        let plant = create_test_plant();
        assert!((plant.storage_range() - 672.0).abs() < 1e-9);
    }

    #[test]
    fn test_polynomial_evaluation() {
        // 2 + 3x + x^2
        let curve = PolynomialCurve {
            plant_num: 1,
            coefficients: vec![2.0, 3.0, 1.0],
        };
        assert!((curve.evaluate(0.0) - 2.0).abs() < 1e-9);
        assert!((curve.evaluate(2.0) - 12.0).abs() < 1e-9);

        let empty = PolynomialCurve {
            plant_num: 1,
            coefficients: vec![],
        };
        assert_eq!(empty.evaluate(5.0), 0.0);
    }

    #[test]
    fn test_source_format_display() {
        assert_eq!(SourceFormat::Binary.to_string(), "binary");
        assert_eq!(SourceFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_plant_serialization_round_trip() {
        let plant = create_test_plant();
        let json = serde_json::to_string(&plant).unwrap();
        let back: Plant = serde_json::from_str(&json).unwrap();
        assert_eq!(plant, back);

        // Binary-only optionals are omitted when absent
        assert!(!json.contains("gauge_station"));
        assert!(json.contains("min_discharge"));
    }
}
