//! Binary plant registry decoding
//!
//! Reads the file as a headerless sequence of fixed 792-byte records and
//! decodes each one mechanically. Placeholder rows (`plant_num = 0`) are
//! preserved in the output so callers can decide what to do with them. A
//! trailing chunk shorter than one record is dropped with a warning;
//! production files are observed to end in padding.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::app::models::Plant;
use crate::constants::RECORD_SIZE;
use crate::error::{RegistryError, Result};

pub mod layout;
pub mod mapping;

pub use layout::RawPlantRecord;

/// Counters reported by one binary decode pass.
#[derive(Debug, Clone, Default)]
pub struct BinaryDecodeStats {
    /// Complete records decoded (placeholders included)
    pub records_decoded: usize,

    /// Records with `plant_num = 0`
    pub placeholder_records: usize,

    /// Bytes in a dropped trailing partial chunk, 0 when the file ended on
    /// a record boundary
    pub truncated_tail_bytes: usize,
}

/// Decode every record in the file at `path`.
///
/// Returns exactly `floor(filesize / 792)` plants; a partial trailing chunk
/// contributes none. An unreadable file is a fatal error.
pub fn decode_all(path: &Path) -> Result<Vec<Plant>> {
    decode_all_with_stats(path).map(|(plants, _)| plants)
}

/// [`decode_all`] plus the counters for the pass.
pub fn decode_all_with_stats(path: &Path) -> Result<(Vec<Plant>, BinaryDecodeStats)> {
    let file = File::open(path).map_err(|source| RegistryError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut plants = Vec::new();
    let mut stats = BinaryDecodeStats::default();
    let mut chunk = [0u8; RECORD_SIZE];
    let mut offset: u64 = 0;

    loop {
        match read_record(&mut reader, &mut chunk, path, offset) {
            Ok(true) => {
                let raw = RawPlantRecord::decode(&chunk);
                if raw.plant_num == 0 {
                    stats.placeholder_records += 1;
                }
                plants.push(raw.to_plant());
                stats.records_decoded += 1;
                offset += RECORD_SIZE as u64;
            }
            Ok(false) => break,
            Err(RegistryError::TruncatedRecord { found, .. }) => {
                // Recoverable by design: the incomplete trailing record is
                // observed trailing padding, not corruption.
                warn!(
                    path = %path.display(),
                    offset,
                    found,
                    "dropping partial trailing record"
                );
                stats.truncated_tail_bytes = found;
                break;
            }
            Err(other) => return Err(other),
        }
    }

    debug!(
        path = %path.display(),
        records = stats.records_decoded,
        placeholders = stats.placeholder_records,
        "binary decode complete"
    );

    Ok((plants, stats))
}

/// Fill `chunk` from the reader. `Ok(true)` means one complete record,
/// `Ok(false)` a clean end on a record boundary. A stream that ends
/// mid-record yields [`RegistryError::TruncatedRecord`] with the byte
/// offset; the caller decides whether that is recoverable.
fn read_record(
    reader: &mut impl Read,
    chunk: &mut [u8; RECORD_SIZE],
    path: &Path,
    offset: u64,
) -> Result<bool> {
    let mut filled = 0;
    while filled < RECORD_SIZE {
        let n = match reader.read(&mut chunk[filled..]) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(RegistryError::FileUnreadable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if n == 0 {
            if filled == 0 {
                return Ok(false);
            }
            return Err(RegistryError::TruncatedRecord {
                path: path.to_path_buf(),
                offset,
                expected: RECORD_SIZE,
                found: filled,
            });
        }
        filled += n;
    }
    Ok(true)
}
