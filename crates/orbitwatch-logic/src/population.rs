//! Population building — a globally scattered background plus a guaranteed
//! fill for every quadrant × latitude band sector.
//!
//! Random scatter alone regularly leaves some of the twelve sectors thin or
//! empty at a few hundred objects, so each build tops every sector up with a
//! fixed number of objects generated inside that sector's rectangle.
//!
//! ```
//! use orbitwatch_logic::population::{build_population, validate_config, PopulationConfig};
//! use rand::SeedableRng;
//!
//! let config = PopulationConfig::default();
//! assert!(validate_config(&config).is_empty());
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let population = build_population(&config, &mut rng);
//! assert_eq!(population.len() as u32, config.total_size());
//! ```

use std::fmt;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classify::{LatBand, Quadrant, Sector};
use crate::constants::{population, ranges};
use crate::generator::{format_name, full_latitude, full_longitude, generate};
use crate::object::OrbitalObject;
use crate::query::sector_counts;

/// Sizing and policy for population builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Objects scattered over the whole globe.
    pub background_count: u32,
    /// Objects generated inside each of the twelve sectors.
    pub per_sector_count: u32,
    /// A quadrant holding fewer objects than this marks the population stale.
    pub min_quadrant_count: u32,
    /// Seed for reproducible builds (None = fresh entropy per build).
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            background_count: population::BACKGROUND_COUNT,
            per_sector_count: population::PER_SECTOR_COUNT,
            min_quadrant_count: population::MIN_QUADRANT_COUNT,
            seed: None,
        }
    }
}

impl PopulationConfig {
    /// Number of objects a build produces.
    /// Saturates at `u32::MAX` for sizes `validate_config` rejects.
    pub fn total_size(&self) -> u32 {
        let sectors = Sector::all().count() as u32;
        self.background_count
            .saturating_add(sectors.saturating_mul(self.per_sector_count))
    }

    /// Per-quadrant count guaranteed by the sector fill alone (saturating).
    pub fn guaranteed_quadrant_count(&self) -> u32 {
        self.per_sector_count
            .saturating_mul(LatBand::ALL.len() as u32)
    }
}

/// Population configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// More background objects than distinct `Obj-NNNN` names.
    BackgroundTooLarge(u32),
    /// More objects per quadrant prefix than distinct names.
    SectorFillTooLarge(u32),
    /// The fill never reaches the rebuild floor, so every check would rebuild.
    UnreachableQuadrantFloor { floor: u32, guaranteed: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BackgroundTooLarge(n) => {
                write!(f, "background count {} exceeds {} unique names", n, name_capacity())
            }
            ConfigError::SectorFillTooLarge(n) => write!(
                f,
                "per-sector count {} exceeds {} unique names per quadrant",
                n,
                name_capacity()
            ),
            ConfigError::UnreachableQuadrantFloor { floor, guaranteed } => write!(
                f,
                "quadrant floor {} is above the {} objects the sector fill guarantees",
                floor, guaranteed
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

fn name_capacity() -> u32 {
    ranges::NAME_SUFFIX.end - ranges::NAME_SUFFIX.start
}

/// Validate a population configuration, returning all errors found.
pub fn validate_config(config: &PopulationConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.background_count > name_capacity() {
        errors.push(ConfigError::BackgroundTooLarge(config.background_count));
    }
    if config.guaranteed_quadrant_count() > name_capacity() {
        errors.push(ConfigError::SectorFillTooLarge(config.per_sector_count));
    }
    let guaranteed = config.guaranteed_quadrant_count();
    if config.min_quadrant_count > guaranteed {
        errors.push(ConfigError::UnreachableQuadrantFloor {
            floor: config.min_quadrant_count,
            guaranteed,
        });
    }

    errors
}

/// Build a full population: background scatter first, then sector fill in
/// NE, SE, SW, NW order, low to high band within each quadrant.
///
/// Name suffixes are drawn without replacement per prefix, so names are
/// unique whenever the config passes `validate_config`.
pub fn build_population(config: &PopulationConfig, rng: &mut impl Rng) -> Vec<OrbitalObject> {
    let mut objects = Vec::with_capacity(config.total_size() as usize);

    let (lat, long) = (full_latitude(), full_longitude());
    let suffixes = distinct_suffixes(rng, config.background_count);
    for i in 0..config.background_count as usize {
        let mut obj = generate(rng, &lat, &long, population::BACKGROUND_PREFIX);
        obj.name = format_name(population::BACKGROUND_PREFIX, suffixes[i % suffixes.len()]);
        objects.push(obj);
    }

    for quadrant in Quadrant::ALL {
        let prefix = quadrant.code();
        let suffixes = distinct_suffixes(rng, config.guaranteed_quadrant_count());
        let mut next = 0;
        for band in LatBand::ALL {
            let sector = Sector::new(quadrant, band);
            let (lat, long) = (sector.lat_range(), sector.long_range());
            for _ in 0..config.per_sector_count {
                let mut obj = generate(rng, &lat, &long, prefix);
                obj.name = format_name(prefix, suffixes[next % suffixes.len()]);
                next += 1;
                objects.push(obj);
            }
        }
    }

    objects
}

/// `count` distinct name suffixes in draw order. Wraps around once the
/// suffix space is exhausted.
fn distinct_suffixes(rng: &mut impl Rng, count: u32) -> Vec<u32> {
    let capacity = name_capacity() as usize;
    let amount = (count as usize).min(capacity);
    index::sample(rng, capacity, amount)
        .into_iter()
        .map(|i| ranges::NAME_SUFFIX.start + i as u32)
        .collect()
}

/// Why a population should be rebuilt before it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    Empty,
    SparseQuadrant { quadrant: Quadrant, count: u32 },
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildReason::Empty => write!(f, "population is empty"),
            RebuildReason::SparseQuadrant { quadrant, count } => {
                write!(f, "quadrant {} holds only {} objects", quadrant, count)
            }
        }
    }
}

/// Precondition check callers run before reading: the population is stale
/// when it is empty or any quadrant has fewer than `min_quadrant_count`
/// objects. Returns the first reason found.
pub fn rebuild_reason<T: AsRef<OrbitalObject>>(
    population: &[T],
    min_quadrant_count: u32,
) -> Option<RebuildReason> {
    if population.is_empty() {
        return Some(RebuildReason::Empty);
    }
    let counts = sector_counts(population);
    Quadrant::ALL.into_iter().find_map(|quadrant| {
        let count = counts.quadrant_total(quadrant);
        (count < min_quadrant_count).then_some(RebuildReason::SparseQuadrant { quadrant, count })
    })
}

pub fn needs_rebuild<T: AsRef<OrbitalObject>>(population: &[T], min_quadrant_count: u32) -> bool {
    rebuild_reason(population, min_quadrant_count).is_some()
}
