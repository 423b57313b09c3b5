//! Registry file loading
//!
//! The one entry point that ties detection and decoding together: sniff the
//! on-disk layout, dispatch to the matching decoder, and build the indexed
//! registry. Format handling is an explicit match so adding a layout means
//! adding an arm, not registering a callback.

use std::path::Path;

use tracing::info;

use crate::app::models::SourceFormat;
use crate::app::services::{binary_decoder, format_detector, text_decoder};
use crate::error::Result;

use super::PlantRegistry;

/// Parse the registry file at `path`, whichever layout it is in.
pub fn parse_registry_file(path: &Path) -> Result<PlantRegistry> {
    let format = if format_detector::is_binary(path)? {
        SourceFormat::Binary
    } else {
        SourceFormat::Text
    };
    info!(path = %path.display(), %format, "decoding plant registry");

    let registry = match format {
        SourceFormat::Binary => {
            let plants = binary_decoder::decode_all(path)?;
            PlantRegistry::from_plants(plants, format)?
        }
        SourceFormat::Text => {
            let (blocks, _stats) = text_decoder::decode(path)?;
            PlantRegistry::from_blocks(blocks, format)?
        }
    };

    info!(
        plants = registry.plant_count(),
        auxiliary = registry.has_auxiliary_data(),
        "registry loaded"
    );
    Ok(registry)
}
