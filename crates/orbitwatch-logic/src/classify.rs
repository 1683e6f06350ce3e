//! Geographic classification: quadrants, latitude bands and sectors.
//!
//! A quadrant is decided by the signs of latitude and longitude (zero counts
//! as positive). A latitude band is decided by |latitude|. Together they split
//! the globe into twelve sectors, and [`Sector::lat_range`] /
//! [`Sector::long_range`] give each sector's rectangle on the 0.0001° grid so
//! that every point drawn inside it classifies back into the same sector.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::constants::{bands, ranges, COORD_STEP};
use crate::object::OrbitalObject;

/// Geographic quadrant (zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quadrant {
    /// lat >= 0, long >= 0
    Ne,
    /// lat < 0, long >= 0
    Se,
    /// lat < 0, long < 0
    Sw,
    /// lat >= 0, long < 0
    Nw,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Ne, Quadrant::Se, Quadrant::Sw, Quadrant::Nw];

    pub fn of(latitude: f64, longitude: f64) -> Self {
        match (latitude >= 0.0, longitude >= 0.0) {
            (true, true) => Quadrant::Ne,
            (false, true) => Quadrant::Se,
            (false, false) => Quadrant::Sw,
            (true, false) => Quadrant::Nw,
        }
    }

    /// Short code, also used as the name prefix for sector fill objects.
    pub fn code(self) -> &'static str {
        match self {
            Quadrant::Ne => "NE",
            Quadrant::Se => "SE",
            Quadrant::Sw => "SW",
            Quadrant::Nw => "NW",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::Ne => "North-East",
            Quadrant::Se => "South-East",
            Quadrant::Sw => "South-West",
            Quadrant::Nw => "North-West",
        }
    }

    pub fn is_north(self) -> bool {
        matches!(self, Quadrant::Ne | Quadrant::Nw)
    }

    pub fn is_east(self) -> bool {
        matches!(self, Quadrant::Ne | Quadrant::Se)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Band of absolute latitude within a quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatBand {
    /// |lat| < 30
    Low,
    /// 30 <= |lat| < 60
    Mid,
    /// |lat| >= 60
    High,
}

impl LatBand {
    pub const ALL: [LatBand; 3] = [LatBand::Low, LatBand::Mid, LatBand::High];

    pub fn of(latitude: f64) -> Self {
        let abs = latitude.abs();
        if abs < bands::LOW_MAX {
            LatBand::Low
        } else if abs < bands::MID_MAX {
            LatBand::Mid
        } else {
            LatBand::High
        }
    }

    /// Absolute-degree bounds, lower inclusive, upper exclusive except for
    /// `High` which reaches the pole.
    pub fn abs_bounds(self) -> (f64, f64) {
        match self {
            LatBand::Low => (0.0, bands::LOW_MAX),
            LatBand::Mid => (bands::LOW_MAX, bands::MID_MAX),
            LatBand::High => (bands::MID_MAX, bands::POLE),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LatBand::Low => "low",
            LatBand::Mid => "mid",
            LatBand::High => "high",
        }
    }
}

impl fmt::Display for LatBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = self.abs_bounds();
        write!(f, "{} ({lo:.0}°-{hi:.0}°)", self.as_str())
    }
}

pub fn classify_quadrant(obj: &OrbitalObject) -> Quadrant {
    Quadrant::of(obj.latitude, obj.longitude)
}

pub fn classify_lat_band(obj: &OrbitalObject) -> LatBand {
    LatBand::of(obj.latitude)
}

/// One quadrant × latitude band cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sector {
    pub quadrant: Quadrant,
    pub band: LatBand,
}

impl Sector {
    pub fn new(quadrant: Quadrant, band: LatBand) -> Self {
        Self { quadrant, band }
    }

    pub fn of(obj: &OrbitalObject) -> Self {
        Self::new(classify_quadrant(obj), classify_lat_band(obj))
    }

    /// All twelve sectors, quadrant-major (NE low, NE mid, NE high, SE low, ...).
    pub fn all() -> impl Iterator<Item = Sector> {
        Quadrant::ALL
            .into_iter()
            .flat_map(|q| LatBand::ALL.into_iter().map(move |b| Sector::new(q, b)))
    }

    /// Inclusive latitude range of this sector on the coordinate grid.
    pub fn lat_range(self) -> RangeInclusive<f64> {
        let (abs_lo, abs_hi) = self.band.abs_bounds();
        // The pole belongs to the high band; every other upper edge is open.
        let abs_hi = if self.band == LatBand::High {
            abs_hi
        } else {
            abs_hi - COORD_STEP
        };
        if self.quadrant.is_north() {
            abs_lo..=abs_hi
        } else {
            // Southern sectors must stay strictly below the equator.
            -abs_hi..=-abs_lo.max(COORD_STEP)
        }
    }

    /// Inclusive longitude range of this sector on the coordinate grid.
    pub fn long_range(self) -> RangeInclusive<f64> {
        if self.quadrant.is_east() {
            0.0..=ranges::LONGITUDE_MAX
        } else {
            ranges::LONGITUDE_MIN..=-COORD_STEP
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.quadrant, self.band.as_str())
    }
}
