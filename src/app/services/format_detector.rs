//! Binary/text format discrimination
//!
//! The binary registry layout has no magic header, so detection is a
//! two-stage heuristic: the file size must sit within a small tolerance of a
//! multiple of the fixed record size, and the 4 bytes at the plant
//! identifier offset must decode (little-endian) to a plausible plant
//! number. The identifier offset holds right-aligned ASCII in the text
//! layout, so text files fail the probe. This matches all observed
//! production data but is explicitly best-effort, not a format guarantee.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::config::DetectorConfig;
use crate::constants::{RECORD_SIZE, binary_offsets};
use crate::error::{RegistryError, Result};

/// Decide whether the file at `path` is a binary plant registry.
///
/// Deterministic and idempotent for a fixed file. Returns an error only when
/// the file cannot be read at all; every readable file classifies as binary
/// or text.
pub fn is_binary(path: &Path) -> Result<bool> {
    is_binary_with_config(path, &DetectorConfig::default())
}

/// [`is_binary`] with explicit detection knobs.
pub fn is_binary_with_config(path: &Path, config: &DetectorConfig) -> Result<bool> {
    let mut file = File::open(path).map_err(|source| RegistryError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let size = file
        .metadata()
        .map_err(|source| RegistryError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    if !size_near_record_multiple(size, config.size_tolerance_bytes) {
        debug!(size, "size not near a record multiple, classifying as text");
        return Ok(false);
    }

    // Too small to hold the probe field: an empty or tiny file inside the
    // tolerance window is still text.
    let probe_end = (binary_offsets::PLANT_NUM + 4) as u64;
    if size < probe_end {
        return Ok(false);
    }

    let mut probe = [0u8; 4];
    file.seek(SeekFrom::Start(binary_offsets::PLANT_NUM as u64))?;
    file.read_exact(&mut probe)?;

    let id = i32::from_le_bytes(probe);
    let plausible = config.id_plausible(id);
    debug!(id, plausible, "probed plant identifier field");

    Ok(plausible)
}

/// True when `size` is within `tolerance` bytes of some positive multiple of
/// [`RECORD_SIZE`].
fn size_near_record_multiple(size: u64, tolerance: u64) -> bool {
    let record = RECORD_SIZE as u64;
    let remainder = size % record;
    remainder <= tolerance || record - remainder <= tolerance
}
