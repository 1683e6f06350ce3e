//! Tracking engine - main entry point for rebuilding and reading the population

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orbitwatch_logic::object::OrbitalObject;
use orbitwatch_logic::population::{
    build_population, rebuild_reason, validate_config, ConfigError, PopulationConfig,
    RebuildReason,
};
use orbitwatch_logic::query::{self, FleetSummary, ListFilter};

use crate::persistence::{self, SaveError};
use crate::store::{Record, Store, StoreError};

/// Owns the population store and the build configuration.
///
/// All methods take `&self`; share the engine behind an `Arc` to serve reads
/// and rebuilds from several threads.
pub struct TrackingEngine {
    store: Store,
    config: PopulationConfig,
}

impl TrackingEngine {
    /// Create an engine with the default configuration and an empty store.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            config: PopulationConfig::default(),
        }
    }

    /// Create an engine with a validated configuration.
    pub fn with_config(config: PopulationConfig) -> Result<Self, Vec<ConfigError>> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            store: Store::new(),
            config,
        })
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Discard the population and install a freshly built one.
    ///
    /// Uses `config.seed` when set, so seeded engines rebuild the same
    /// population every time. Returns the installed snapshot version.
    pub fn rebuild(&self) -> Result<u64, StoreError> {
        match self.config.seed {
            Some(seed) => self.rebuild_with(&mut StdRng::seed_from_u64(seed)),
            None => self.rebuild_with(&mut rand::thread_rng()),
        }
    }

    /// Rebuild drawing from the given random source.
    pub fn rebuild_with(&self, rng: &mut impl Rng) -> Result<u64, StoreError> {
        let objects = build_population(&self.config, rng);
        let count = objects.len();
        log::debug!(
            "built {} background + {} sector objects",
            self.config.background_count,
            count.saturating_sub(self.config.background_count as usize)
        );
        let version = self.store.replace_all(objects)?;
        log::info!("installed population v{} ({} objects)", version, count);
        Ok(version)
    }

    /// Replace the population with caller-supplied objects.
    pub fn install(&self, objects: Vec<OrbitalObject>) -> Result<u64, StoreError> {
        let count = objects.len();
        let version = self.store.replace_all(objects)?;
        log::info!("installed population v{} ({} objects)", version, count);
        Ok(version)
    }

    /// The read entrypoint: type filter through the store's type index, then
    /// orbit filter, then highest risk first.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Record>, StoreError> {
        let candidates = match filter.object_type {
            Some(object_type) => self.store.list_by_type(object_type)?,
            None => self.store.list_all()?,
        };
        let remaining = ListFilter {
            object_type: None,
            ..*filter
        };
        Ok(query::list(&candidates, &remaining)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Why the current population should be rebuilt, if it should.
    pub fn rebuild_reason(&self) -> Result<Option<RebuildReason>, StoreError> {
        let records = self.store.list_all()?;
        Ok(rebuild_reason(&records, self.config.min_quadrant_count))
    }

    pub fn needs_rebuild(&self) -> Result<bool, StoreError> {
        Ok(self.rebuild_reason()?.is_some())
    }

    /// Rebuild only if the population is empty or a quadrant is sparse.
    /// Returns whether a rebuild happened.
    pub fn ensure_populated(&self) -> Result<bool, StoreError> {
        match self.rebuild_reason()? {
            Some(reason) => {
                log::warn!("population stale ({}), rebuilding", reason);
                self.rebuild()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Headline counts for the current population.
    pub fn summary(&self) -> Result<FleetSummary, StoreError> {
        Ok(query::summarize(&self.store.list_all()?))
    }

    /// Save the current snapshot to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        let snapshot = self.store.snapshot()?;
        persistence::save_snapshot(writer, &snapshot)?;
        log::info!(
            "saved population v{} ({} objects)",
            snapshot.version(),
            snapshot.len()
        );
        Ok(())
    }

    /// Load a saved snapshot and install it, keeping record ids
    pub fn load<R: std::io::Read>(&self, reader: R) -> Result<u64, SaveError> {
        let loaded = persistence::load_snapshot(reader)?;
        let count = loaded.records.len();
        let version = self.store.restore(loaded.records)?;
        log::info!(
            "restored population saved at v{} as v{} ({} objects)",
            loaded.snapshot_version,
            version,
            count
        );
        Ok(version)
    }
}

impl Default for TrackingEngine {
    fn default() -> Self {
        Self::new()
    }
}
