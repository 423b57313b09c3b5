//! Format constants for the plant registry decoders
//!
//! This module is the single authority for the binary record layout, the
//! text block markers, and their fixed column ranges. Both decoders and the
//! format detector read from here; nothing re-derives an offset.

use std::ops::Range;

// =============================================================================
// Binary Record Layout
// =============================================================================

/// Size of one binary plant record in bytes. The binary file is a headerless,
/// footerless sequence of records of exactly this size.
pub const RECORD_SIZE: usize = 792;

/// Byte offsets of the fields decoded from a binary record. All numeric
/// fields are little-endian. Widths are 4 bytes unless noted.
pub mod binary_offsets {
    /// Plant identifier (i32). Also the detection probe field.
    pub const PLANT_NUM: usize = 0;

    /// Plant name, 12 bytes, NUL/space padded.
    pub const NAME: usize = 4;
    pub const NAME_LEN: usize = 12;

    /// Flow gauge station identifier (i64) - the single 8-byte integer
    /// field in the layout.
    pub const GAUGE_STATION: usize = 16;

    /// Subsystem / submarket number (i32).
    pub const SUBSYSTEM: usize = 24;

    /// Owning company number (i32).
    pub const COMPANY: usize = 28;

    /// Downstream plant number (i32, 0 = cascade end).
    pub const DOWNSTREAM_PLANT: usize = 32;

    /// Diversion plant number (i32, 0 = no diversion path).
    pub const DIVERSION_PLANT: usize = 36;

    /// Storage volumes in hm3 (f32 each).
    pub const MIN_VOLUME: usize = 40;
    pub const MAX_VOLUME: usize = 44;
    pub const SPILLWAY_VOLUME: usize = 48;
    pub const DIVERSION_VOLUME: usize = 52;

    /// Reservoir elevations in meters (f32 each).
    pub const MIN_ELEVATION: usize = 56;
    pub const MAX_ELEVATION: usize = 60;

    /// Volume-elevation polynomial, 5 x f32.
    pub const VOLUME_ELEVATION_POLY: usize = 64;

    /// Volume-area polynomial, 5 x f32.
    pub const VOLUME_AREA_POLY: usize = 84;

    /// Monthly evaporation coefficients, 12 x i32.
    pub const EVAPORATION: usize = 104;

    /// Generating unit set counts: total sets (i32), units per set (5 x i32),
    /// per-set unit capacity in MW (5 x f32).
    pub const NUM_UNIT_SETS: usize = 152;
    pub const UNITS_PER_SET: usize = 156;
    pub const SET_CAPACITY: usize = 176;

    /// Total installed capacity in MW (f32).
    pub const INSTALLED_CAPACITY: usize = 196;

    /// Specific productivity in MW/(m3/s)/m (f32).
    pub const PRODUCTIVITY: usize = 200;

    /// Reserved range: per-set turbine data, loss tables, and operating
    /// constraints not surfaced by the public model. Skipped without
    /// interpretation.
    pub const RESERVED_START: usize = 204;
    pub const RESERVED_END: usize = super::RECORD_SIZE;
}

/// Number of coefficients in each stored polynomial.
pub const POLY_COEFFICIENT_COUNT: usize = 5;

/// Number of monthly evaporation coefficients per plant.
pub const EVAPORATION_MONTHS: usize = 12;

/// Maximum generating unit sets carried per binary record.
pub const MAX_UNIT_SETS: usize = 5;

// =============================================================================
// Format Detection
// =============================================================================

/// Tolerance, in bytes, when testing whether a file size is a multiple of
/// [`RECORD_SIZE`]. Production binary files carry up to this much trailing
/// padding.
pub const SIZE_TOLERANCE_BYTES: u64 = 100;

/// Plausible plant identifier range for the binary probe field. ASCII space
/// padding at the probe offset in a text file decodes to 0x20202020, far
/// outside this range.
pub const PROBE_ID_MIN: i32 = 1;
pub const PROBE_ID_MAX: i32 = 9999;

// =============================================================================
// Text Block Markers
// =============================================================================

/// Leading tokens that open each of the seven block types.
pub mod markers {
    /// Plant registrations.
    pub const PLANTS: &str = "CADUSIH";

    /// Generating unit sets.
    pub const UNIT_SETS: &str = "CADCONJ";

    /// Water travel times between plants.
    pub const TRAVEL_TIMES: &str = "TVIAG";

    /// Volume-elevation polynomials.
    pub const VOLUME_ELEVATION: &str = "POLCOTVOL";

    /// Volume-area polynomials.
    pub const VOLUME_AREA: &str = "POLCOTARE";

    /// Discharge-tailrace elevation polynomials.
    pub const TAILRACE: &str = "POLVAZJUS";

    /// Monthly evaporation coefficients.
    pub const EVAPORATION: &str = "COEFEVAP";
}

/// Sentinel token closing any open block.
pub const BLOCK_TERMINATOR: &str = "FIM";

// =============================================================================
// Text Column Layouts
// =============================================================================

/// Fixed column ranges for each block's data lines, 0-based and
/// end-exclusive. Blank numeric columns mean "absent" where the field is
/// optional.
pub mod columns {
    use super::Range;

    pub mod plants {
        use super::Range;

        pub const PLANT_NUM: Range<usize> = 0..5;
        pub const NAME: Range<usize> = 6..18;
        pub const SUBSYSTEM: Range<usize> = 19..23;
        pub const DOWNSTREAM_PLANT: Range<usize> = 24..29;
        pub const DIVERSION_PLANT: Range<usize> = 30..35;
        pub const MIN_VOLUME: Range<usize> = 36..46;
        pub const MAX_VOLUME: Range<usize> = 47..57;
        pub const INSTALLED_CAPACITY: Range<usize> = 58..68;
        pub const PRODUCTIVITY: Range<usize> = 69..79;
        pub const MIN_DISCHARGE: Range<usize> = 80..90;
        pub const REGULATION: Range<usize> = 91..93;
    }

    pub mod unit_sets {
        use super::Range;

        pub const PLANT_NUM: Range<usize> = 0..5;
        pub const SET_NUM: Range<usize> = 6..9;
        pub const NUM_UNITS: Range<usize> = 10..13;
        pub const UNIT_CAPACITY: Range<usize> = 14..24;
    }

    pub mod travel_times {
        use super::Range;

        pub const FROM_PLANT: Range<usize> = 0..5;
        pub const TO_PLANT: Range<usize> = 6..11;
        pub const HOURS: Range<usize> = 12..22;
    }

    /// Shared layout for the three polynomial blocks.
    pub mod polynomial {
        use super::Range;

        pub const PLANT_NUM: Range<usize> = 0..5;
        pub const COEFFICIENTS: [Range<usize>; super::super::POLY_COEFFICIENT_COUNT] =
            [6..21, 22..37, 38..53, 54..69, 70..85];
    }

    pub mod evaporation {
        use super::Range;

        pub const PLANT_NUM: Range<usize> = 0..5;

        /// Column for month `m` (0-based): width 8, stride 9, starting at 6.
        pub const fn month(m: usize) -> Range<usize> {
            let start = 6 + 9 * m;
            start..start + 8
        }
    }
}
