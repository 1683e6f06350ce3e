//! Attribute ranges and thresholds shared by generation and queries.
//!
//! Ranges are half-open (`start..end`) unless the name says otherwise, and
//! are expressed in the unit the attribute is stored in.

/// Physical attribute ranges for generated objects.
pub mod ranges {
    /// Mass in kilograms.
    pub const MASS_KG: std::ops::Range<u32> = 10..5010;
    /// Size in hundredths of a meter (0.10 m .. 20.10 m).
    pub const SIZE_CM: std::ops::Range<u32> = 10..2010;
    /// Velocity jitter in hundredths of km/s, added to the orbit baseline.
    /// Half-open: the top edge (baseline + 5.00) is never produced.
    pub const VELOCITY_JITTER_CENTI: std::ops::Range<u32> = 0..500;
    /// Remaining lifespan in tenths of a year (0.0 .. 15.0 years).
    pub const LIFE_SPAN_DECI: std::ops::Range<u32> = 0..150;
    /// Numeric name suffix.
    pub const NAME_SUFFIX: std::ops::Range<u32> = 1000..10000;

    pub const LATITUDE_MIN: f64 = -90.0;
    pub const LATITUDE_MAX: f64 = 90.0;
    pub const LONGITUDE_MIN: f64 = -180.0;
    pub const LONGITUDE_MAX: f64 = 180.0;
}

/// Altitude ranges per orbit class, in km.
pub mod altitude {
    pub const LEO: std::ops::Range<u32> = 160..1660;
    pub const MEO: std::ops::Range<u32> = 2000..32000;
    pub const GEO: std::ops::Range<u32> = 35000..36000;
}

/// Velocity baselines in km/s.
pub mod velocity {
    pub const LEO_BASELINE: f64 = 7.0;
    pub const HIGH_ORBIT_BASELINE: f64 = 3.0;
}

/// Scoring constants.
pub mod risk {
    /// Upper bound of both derived scores.
    pub const MAX_SCORE: u8 = 100;
    /// Flat collision-risk penalty for crowded low orbits.
    pub const LEO_PENALTY: f64 = 20.0;
    /// Width of the uniform noise added to collision risk.
    pub const NOISE_SPAN: f64 = 20.0;
    /// Re-entry risk draw for short-lived LEO objects.
    pub const REENTRY_ELEVATED: std::ops::Range<u8> = 40..100;
    /// Re-entry risk draw for everything else.
    pub const REENTRY_BASELINE: std::ops::Range<u8> = 0..30;
    /// Lifespan (years) under which LEO objects get elevated re-entry risk.
    pub const SHORT_LIFE_YEARS: f64 = 5.0;
    /// Risk scores above this are "high".
    pub const HIGH_THRESHOLD: u8 = 70;
    /// Risk scores above this (and not high) are "medium".
    pub const MEDIUM_THRESHOLD: u8 = 40;
    /// Lifespan (years) under which re-entry is considered imminent.
    pub const IMMINENT_REENTRY_YEARS: f64 = 2.0;
}

/// Latitude band edges in absolute degrees.
pub mod bands {
    pub const LOW_MAX: f64 = 30.0;
    pub const MID_MAX: f64 = 60.0;
    pub const POLE: f64 = 90.0;
}

/// Population sizing defaults.
pub mod population {
    /// Objects scattered over the whole globe.
    pub const BACKGROUND_COUNT: u32 = 500;
    /// Objects placed in every quadrant × band sector.
    pub const PER_SECTOR_COUNT: u32 = 20;
    /// Quadrant size below which the population is considered incomplete.
    pub const MIN_QUADRANT_COUNT: u32 = 11;
    /// Name prefix for the background scatter.
    pub const BACKGROUND_PREFIX: &str = "Obj";
    /// Default length of ranked views.
    pub const RANKING_LENGTH: usize = 20;
}

/// Coordinates are stored with four decimal places.
pub const COORD_SCALE: f64 = 10_000.0;
/// Smallest representable coordinate step.
pub const COORD_STEP: f64 = 1.0 / COORD_SCALE;
