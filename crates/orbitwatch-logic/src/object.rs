//! The orbital object record and its enumerated attributes.
//!
//! Enum values serialize to the strings the dashboard has always consumed
//! (`"satellite"`, `"LEO"`, `"Fragment"`, ...), and `OrbitalObject` keeps the
//! camelCase field names of the original record.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{altitude, risk, velocity};

/// Whether an object is an operated satellite or anything else in orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Satellite,
    Other,
}

impl ObjectType {
    pub const ALL: [ObjectType; 2] = [ObjectType::Satellite, ObjectType::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Satellite => "satellite",
            ObjectType::Other => "other",
        }
    }
}

/// Orbit band. Each band owns a disjoint altitude range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitClass {
    #[serde(rename = "LEO")]
    Leo,
    #[serde(rename = "MEO")]
    Meo,
    #[serde(rename = "GEO")]
    Geo,
}

impl OrbitClass {
    pub const ALL: [OrbitClass; 3] = [OrbitClass::Leo, OrbitClass::Meo, OrbitClass::Geo];

    pub fn as_str(self) -> &'static str {
        match self {
            OrbitClass::Leo => "LEO",
            OrbitClass::Meo => "MEO",
            OrbitClass::Geo => "GEO",
        }
    }

    /// Altitude range in km (half-open).
    pub fn altitude_range(self) -> Range<u32> {
        match self {
            OrbitClass::Leo => altitude::LEO,
            OrbitClass::Meo => altitude::MEO,
            OrbitClass::Geo => altitude::GEO,
        }
    }

    /// Velocity baseline in km/s before jitter is added.
    pub fn velocity_baseline(self) -> f64 {
        match self {
            OrbitClass::Leo => velocity::LEO_BASELINE,
            OrbitClass::Meo | OrbitClass::Geo => velocity::HIGH_ORBIT_BASELINE,
        }
    }
}

/// Coarse body shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Box,
    Sphere,
    Cylinder,
    Fragment,
    Cone,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Box,
        Shape::Sphere,
        Shape::Cylinder,
        Shape::Fragment,
        Shape::Cone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Box => "Box",
            Shape::Sphere => "Sphere",
            Shape::Cylinder => "Cylinder",
            Shape::Fragment => "Fragment",
            Shape::Cone => "Cone",
        }
    }
}

/// Issuing nation or operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    #[serde(rename = "USA")]
    Usa,
    Russia,
    China,
    #[serde(rename = "ESA")]
    Esa,
    India,
    Japan,
    SpaceX,
    Intelsat,
}

impl Origin {
    pub const ALL: [Origin; 8] = [
        Origin::Usa,
        Origin::Russia,
        Origin::China,
        Origin::Esa,
        Origin::India,
        Origin::Japan,
        Origin::SpaceX,
        Origin::Intelsat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Usa => "USA",
            Origin::Russia => "Russia",
            Origin::China => "China",
            Origin::Esa => "ESA",
            Origin::India => "India",
            Origin::Japan => "Japan",
            Origin::SpaceX => "SpaceX",
            Origin::Intelsat => "Intelsat",
        }
    }
}

macro_rules! display_and_parse {
    ($($ty:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownVariant;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $ty::ALL
                        .iter()
                        .copied()
                        .find(|v| v.as_str().eq_ignore_ascii_case(s))
                        .ok_or_else(|| UnknownVariant {
                            kind: stringify!($ty),
                            value: s.to_string(),
                        })
                }
            }
        )*
    };
}

display_and_parse!(ObjectType, OrbitClass, Shape, Origin);

/// A string did not name any variant of an attribute enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Collision-risk bucket used for card colouring and the high-risk tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score > risk::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score > risk::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// A tracked satellite or piece of debris.
///
/// Records are immutable once generated; a population is only ever replaced
/// as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalObject {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub orbit: OrbitClass,
    /// Mass in kg (whole kilograms).
    pub mass: f64,
    /// Characteristic size in m.
    pub size: f64,
    pub shape: Shape,
    /// Velocity in km/s.
    pub velocity: f64,
    /// Altitude in km.
    pub altitude: u32,
    pub origin: Origin,
    /// Collision risk, 0-100.
    pub risk_score: u8,
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated years remaining in orbit.
    pub life_span: f64,
    /// Re-entry likelihood, 0-100.
    pub reentry_risk: u8,
}

impl OrbitalObject {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    /// Less than two years of orbit left.
    pub fn is_reentry_imminent(&self) -> bool {
        self.life_span < risk::IMMINENT_REENTRY_YEARS
    }

    /// Altitude agrees with the orbit class.
    pub fn altitude_is_consistent(&self) -> bool {
        self.orbit.altitude_range().contains(&self.altitude)
    }
}

impl AsRef<OrbitalObject> for OrbitalObject {
    fn as_ref(&self) -> &OrbitalObject {
        self
    }
}
