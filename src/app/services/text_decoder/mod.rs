//! Text plant registry decoding
//!
//! A block-aware state machine over the seven known markers. A line whose
//! leading token matches a marker opens that block; the `FIM` sentinel
//! closes it; any other line inside an open block is a data line decoded by
//! the block's column parser. Lines outside any block are headers or
//! comments and are ignored, which also makes unrecognized markers
//! non-fatal. A column-parse failure on a data line aborts the whole parse:
//! a misaligned fixed-width line makes the rest of its block unreliable.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

use crate::app::models::{
    EvaporationCoefficients, Plant, PolynomialCurve, TravelTime, UnitSet,
};
use crate::constants::{BLOCK_TERMINATOR, markers};
use crate::error::{RegistryError, Result};

pub mod blocks;

/// Decoder state: outside any block, or inside one of the seven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    None,
    Plants,
    UnitSets,
    TravelTimes,
    VolumeElevation,
    VolumeArea,
    Tailrace,
    Evaporation,
}

/// Marker-to-state transition table. Immutable; the decoder never matches
/// markers ad hoc.
pub const TRANSITIONS: &[(&str, BlockState)] = &[
    (markers::PLANTS, BlockState::Plants),
    (markers::UNIT_SETS, BlockState::UnitSets),
    (markers::TRAVEL_TIMES, BlockState::TravelTimes),
    (markers::VOLUME_ELEVATION, BlockState::VolumeElevation),
    (markers::VOLUME_AREA, BlockState::VolumeArea),
    (markers::TAILRACE, BlockState::Tailrace),
    (markers::EVAPORATION, BlockState::Evaporation),
];

impl BlockState {
    /// State opened by a marker token, if the token is known.
    pub fn for_marker(token: &str) -> Option<BlockState> {
        TRANSITIONS
            .iter()
            .find(|(marker, _)| *marker == token)
            .map(|&(_, state)| state)
    }

    /// Block name used in error context.
    pub fn name(&self) -> &'static str {
        match self {
            BlockState::None => "none",
            BlockState::Plants => markers::PLANTS,
            BlockState::UnitSets => markers::UNIT_SETS,
            BlockState::TravelTimes => markers::TRAVEL_TIMES,
            BlockState::VolumeElevation => markers::VOLUME_ELEVATION,
            BlockState::VolumeArea => markers::VOLUME_AREA,
            BlockState::Tailrace => markers::TAILRACE,
            BlockState::Evaporation => markers::EVAPORATION,
        }
    }
}

/// Typed collections produced by one text decode pass.
#[derive(Debug, Clone, Default)]
pub struct DecodedBlocks {
    pub plants: Vec<Plant>,
    pub unit_sets: Vec<UnitSet>,
    pub travel_times: Vec<TravelTime>,
    pub volume_elevation_curves: Vec<PolynomialCurve>,
    pub volume_area_curves: Vec<PolynomialCurve>,
    pub tailrace_curves: Vec<PolynomialCurve>,
    pub evaporation: Vec<EvaporationCoefficients>,
}

/// Counters reported by one text decode pass.
#[derive(Debug, Clone, Default)]
pub struct TextDecodeStats {
    pub lines_total: usize,
    pub data_lines: usize,
    /// Headers, comments, and unrecognized markers outside any block
    pub ignored_lines: usize,
    pub blocks_opened: usize,
}

/// Decode the text registry file at `path`.
pub fn decode(path: &Path) -> Result<(DecodedBlocks, TextDecodeStats)> {
    let file = File::open(path).map_err(|source| RegistryError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut state = BlockState::None;
    let mut decoded = DecodedBlocks::default();
    let mut stats = TextDecodeStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|source| RegistryError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        stats.lines_total = line_num;

        let Some(token) = line.split_whitespace().next() else {
            stats.ignored_lines += 1;
            continue;
        };

        if token == BLOCK_TERMINATOR {
            trace!(line_num, block = state.name(), "block closed");
            state = BlockState::None;
            continue;
        }

        if let Some(next) = BlockState::for_marker(token) {
            trace!(line_num, block = next.name(), "block opened");
            state = next;
            stats.blocks_opened += 1;
            continue;
        }

        if state == BlockState::None {
            // Header, comment, or unknown marker: non-fatal by design
            stats.ignored_lines += 1;
            continue;
        }

        decode_data_line(&mut decoded, state, &line)
            .map_err(|err| RegistryError::BlockParse {
                path: path.to_path_buf(),
                line: line_num,
                block: state.name(),
                reason: err.to_string(),
            })?;
        stats.data_lines += 1;
    }

    debug!(
        path = %path.display(),
        lines = stats.lines_total,
        data_lines = stats.data_lines,
        plants = decoded.plants.len(),
        "text decode complete"
    );

    Ok((decoded, stats))
}

/// Decode one data line into the collection owned by the current state.
fn decode_data_line(decoded: &mut DecodedBlocks, state: BlockState, line: &str) -> Result<()> {
    match state {
        BlockState::None => unreachable!("data lines are never decoded outside a block"),
        BlockState::Plants => decoded.plants.push(blocks::parse_plant_line(line)?),
        BlockState::UnitSets => decoded.unit_sets.push(blocks::parse_unit_set_line(line)?),
        BlockState::TravelTimes => decoded
            .travel_times
            .push(blocks::parse_travel_time_line(line)?),
        BlockState::VolumeElevation => decoded
            .volume_elevation_curves
            .push(blocks::parse_polynomial_line(line)?),
        BlockState::VolumeArea => decoded
            .volume_area_curves
            .push(blocks::parse_polynomial_line(line)?),
        BlockState::Tailrace => decoded
            .tailrace_curves
            .push(blocks::parse_polynomial_line(line)?),
        BlockState::Evaporation => decoded
            .evaporation
            .push(blocks::parse_evaporation_line(line)?),
    }
    Ok(())
}
