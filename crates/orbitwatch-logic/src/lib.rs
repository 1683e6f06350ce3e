//! Pure tracking logic for OrbitWatch.
//!
//! This crate holds everything about orbital objects that does not depend on
//! storage or a runtime: the record model, randomized generation, derived risk
//! scores, zone classification and the ranking queries the dashboard views are
//! built from. Functions take plain data (and an explicit `Rng` where they
//! draw random values) and return results, so every piece can be tested with a
//! seeded generator.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`classify`] | Quadrants, latitude bands, sector rectangles |
//! | [`constants`] | Attribute ranges, thresholds, default population sizes |
//! | [`generator`] | Single-object construction with randomized attributes |
//! | [`object`] | `OrbitalObject` and its enumerated attributes |
//! | [`population`] | Zone-balanced population builder, config validation, rebuild policy |
//! | [`query`] | Filters, rankings, zone views and fleet summaries |
//! | [`risk`] | Collision risk and re-entry risk scoring |
//!
//! ```
//! use orbitwatch_logic::population::{build_population, PopulationConfig};
//! use orbitwatch_logic::query::{list, ListFilter};
//! use orbitwatch_logic::object::ObjectType;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let population = build_population(&PopulationConfig::default(), &mut rng);
//! assert_eq!(population.len(), 740);
//!
//! let satellites = list(&population, &ListFilter::by_type(ObjectType::Satellite));
//! assert!(satellites.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
//! ```

pub mod classify;
pub mod constants;
pub mod generator;
pub mod object;
pub mod population;
pub mod query;
pub mod risk;
