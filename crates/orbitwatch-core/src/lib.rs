//! OrbitWatch Core - Orbital Object Tracking Engine
//!
//! Holds the current population of tracked satellites and debris, rebuilds
//! it from the generators in `orbitwatch-logic`, and serves the read views the
//! dashboard renders.
//!
//! # Architecture
//!
//! - **Store**: the current population as an immutable, versioned snapshot
//!   (a hecs `World` with a type index) swapped atomically on rebuild
//! - **Engine**: rebuild policy, the `list` read entrypoint, summaries
//! - **Persistence**: bincode snapshot files and JSON record export
//!
//! # Example
//!
//! ```rust,no_run
//! use orbitwatch_core::prelude::*;
//!
//! let engine = TrackingEngine::new();
//!
//! // Build the population if it is empty or a quadrant is sparse
//! engine.ensure_populated().expect("store unavailable");
//!
//! // Satellites, highest collision risk first
//! let satellites = engine
//!     .list(&ListFilter::by_type(ObjectType::Satellite))
//!     .expect("store unavailable");
//! println!("{} satellites tracked", satellites.len());
//! ```

pub mod engine;
pub mod persistence;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::TrackingEngine;
    pub use crate::store::{ObjectId, Record, Store, StoreError};
    pub use orbitwatch_logic::object::{ObjectType, OrbitClass, OrbitalObject};
    pub use orbitwatch_logic::population::PopulationConfig;
    pub use orbitwatch_logic::query::ListFilter;
}
