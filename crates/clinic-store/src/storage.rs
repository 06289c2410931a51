//! Storage backends
//!
//! The snapshot is the unit of persistence: load it all at startup, rewrite
//! the affected tables after each mutation. That matches the flat-file model
//! this store replaces — single process, single writer, last write wins
//! (spec'd behavior, not a gap). [`MemoryStorage`] backs tests,
//! [`JsonFileStorage`] keeps one JSON file per logical table.

use crate::error::StorageError;
use crate::snapshot::ClinicSnapshot;
use clinic_model::{Account, Appointment, Report};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Persistence seam for the clinic snapshot
pub trait StorageBackend: Send + Sync {
    /// Load the full snapshot (empty on first run)
    ///
    /// # Errors
    /// `StorageError` if the underlying medium cannot be read or decoded
    fn load(&self) -> Result<ClinicSnapshot, StorageError>;

    /// Persist the full snapshot
    ///
    /// # Errors
    /// `StorageError` if the underlying medium cannot be written
    fn persist(&self, snapshot: &ClinicSnapshot) -> Result<(), StorageError>;
}

/// In-memory backend, the default for tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    held: Mutex<ClinicSnapshot>,
}

impl MemoryStorage {
    /// Create empty in-memory backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<ClinicSnapshot, StorageError> {
        Ok(self.held.lock().clone())
    }

    fn persist(&self, snapshot: &ClinicSnapshot) -> Result<(), StorageError> {
        *self.held.lock() = snapshot.clone();
        Ok(())
    }
}

const ACCOUNTS_FILE: &str = "accounts.json";
const APPOINTMENTS_FILE: &str = "appointments.json";
const REPORTS_FILE: &str = "reports.json";
const META_FILE: &str = "meta.json";

/// Assignment metadata persisted alongside the tables
#[derive(Debug, Default, Serialize, Deserialize)]
struct Meta {
    assignment_cursor: u64,
}

/// File backend: one JSON file per logical table, plus metadata
///
/// Missing files read as empty tables, so pointing at a fresh directory is
/// a valid first run. Each persist rewrites the table files wholesale.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create backend rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    /// `StorageError::Io` if the directory cannot be created
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the table files
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_table<T: serde::de::DeserializeOwned>(
        &self,
        file: &'static str,
    ) -> Result<Vec<T>, StorageError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = std::fs::read(&path)?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt { table: file, source })
    }

    fn write_json<T: Serialize>(&self, file: &'static str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        std::fs::write(self.dir.join(file), bytes)?;
        Ok(())
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self) -> Result<ClinicSnapshot, StorageError> {
        let accounts: Vec<Account> = self.read_table(ACCOUNTS_FILE)?;
        let appointments: Vec<Appointment> = self.read_table(APPOINTMENTS_FILE)?;
        let reports: Vec<Report> = self.read_table(REPORTS_FILE)?;

        let meta_path = self.dir.join(META_FILE);
        let meta: Meta = if meta_path.exists() {
            let bytes = std::fs::read(&meta_path)?;
            serde_json::from_slice(&bytes)
                .map_err(|source| StorageError::Corrupt { table: META_FILE, source })?
        } else {
            Meta::default()
        };

        let mut snapshot = ClinicSnapshot::new();
        for account in accounts {
            snapshot.accounts.insert(account.email.clone(), account);
        }
        for appointment in appointments {
            snapshot.appointments.insert(appointment.id, appointment);
        }
        snapshot.reports = reports;
        snapshot.assignment_cursor = meta.assignment_cursor;
        Ok(snapshot)
    }

    fn persist(&self, snapshot: &ClinicSnapshot) -> Result<(), StorageError> {
        let accounts: Vec<&Account> = snapshot.accounts.values().collect();
        let appointments: Vec<&Appointment> = snapshot.appointments.values().collect();

        self.write_json(ACCOUNTS_FILE, &accounts)?;
        self.write_json(APPOINTMENTS_FILE, &appointments)?;
        self.write_json(REPORTS_FILE, &snapshot.reports)?;
        self.write_json(
            META_FILE,
            &Meta {
                assignment_cursor: snapshot.assignment_cursor,
            },
        )?;
        Ok(())
    }
}

/// Working copy plus the backend it commits to
///
/// Shared by the credential and record stores. Mutations take the write
/// lock, then `commit` rewrites the backend from the working copy.
pub(crate) struct Shared {
    pub(crate) state: RwLock<ClinicSnapshot>,
    backend: Box<dyn StorageBackend>,
}

impl Shared {
    /// Load the snapshot from the backend and wrap it
    pub(crate) fn open(backend: Box<dyn StorageBackend>) -> Result<Arc<Self>, StorageError> {
        let snapshot = backend.load()?;
        Ok(Arc::new(Self::with_snapshot(snapshot, backend)))
    }

    /// Wrap an already-loaded snapshot
    pub(crate) fn with_snapshot(snapshot: ClinicSnapshot, backend: Box<dyn StorageBackend>) -> Self {
        Self {
            state: RwLock::new(snapshot),
            backend,
        }
    }

    /// Persist the current working copy
    pub(crate) fn commit(&self) -> Result<(), StorageError> {
        self.backend.persist(&self.state.read())
    }
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared").finish_non_exhaustive()
    }
}
