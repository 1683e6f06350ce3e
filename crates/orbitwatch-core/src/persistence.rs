//! Save/Load for population snapshots
//!
//! Uses bincode for the binary snapshot file and serde_json for the record
//! export handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::store::{Record, Snapshot, StoreError};

/// Version number for snapshot file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable form of one snapshot
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Store version the snapshot was taken at
    pub snapshot_version: u64,
    /// All records in insertion order
    pub records: Vec<Record>,
}

/// Write a snapshot to a writer
pub fn save_snapshot<W: Write>(writer: W, snapshot: &Snapshot) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        snapshot_version: snapshot.version(),
        records: snapshot.records(),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Read a snapshot from a reader
pub fn load_snapshot<R: Read>(reader: R) -> Result<LoadedSnapshot, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(LoadedSnapshot {
        snapshot_version: save_data.snapshot_version,
        records: save_data.records,
    })
}

/// Result of loading a snapshot
pub struct LoadedSnapshot {
    pub snapshot_version: u64,
    pub records: Vec<Record>,
}

/// Write records as a JSON array
pub fn export_json<W: Write>(writer: W, records: &[Record]) -> Result<(), SaveError> {
    serde_json::to_writer(writer, records)?;
    Ok(())
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
    Store(StoreError),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl From<StoreError> for SaveError {
    fn from(e: StoreError) -> Self {
        SaveError::Store(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}
