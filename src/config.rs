//! Detection configuration.
//!
//! The binary/text discrimination heuristic has two knobs: the size
//! tolerance around record multiples and the plausible identifier range for
//! the probe field. The defaults encode the contract values and are what
//! production callers use; tests narrow them to exercise edge behavior.

use crate::constants::{PROBE_ID_MAX, PROBE_ID_MIN, SIZE_TOLERANCE_BYTES};
use serde::{Deserialize, Serialize};

/// Tuning for [`crate::app::services::format_detector`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Allowed deviation, in bytes, from an exact multiple of the record size
    pub size_tolerance_bytes: u64,

    /// Lowest plant identifier accepted by the probe
    pub probe_id_min: i32,

    /// Highest plant identifier accepted by the probe
    pub probe_id_max: i32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            size_tolerance_bytes: SIZE_TOLERANCE_BYTES,
            probe_id_min: PROBE_ID_MIN,
            probe_id_max: PROBE_ID_MAX,
        }
    }
}

impl DetectorConfig {
    /// Check a probed identifier against the plausible range
    pub fn id_plausible(&self, id: i32) -> bool {
        id >= self.probe_id_min && id <= self.probe_id_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_contract() {
        let config = DetectorConfig::default();
        assert_eq!(config.size_tolerance_bytes, 100);
        assert_eq!(config.probe_id_min, 1);
        assert_eq!(config.probe_id_max, 9999);
    }

    #[test]
    fn test_id_plausible_bounds() {
        let config = DetectorConfig::default();
        assert!(config.id_plausible(1));
        assert!(config.id_plausible(9999));
        assert!(!config.id_plausible(0));
        assert!(!config.id_plausible(10000));
        assert!(!config.id_plausible(-1));
        // ASCII "    " at the probe offset
        assert!(!config.id_plausible(0x2020_2020));
    }
}
