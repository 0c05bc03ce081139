//! JSON file persistence for ledger snapshots.
//!
//! The snapshot file is replaced atomically on every save. Readers and
//! writers coordinate through an `fs2` lock on a sibling `.lock` file, so a
//! load-modify-save cycle in [`SnapshotStore::update`] is a single critical
//! section across processes.

use crate::seed::seed_sample_data;
use crate::{BookingPolicy, Error, Ledger, LedgerSnapshot, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Snapshot file on disk
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

/// Held lock on the store; released on drop
struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot; a missing or malformed file is a persistence error
    pub fn load(&self) -> Result<LedgerSnapshot> {
        let _lock = self.lock(false)?;
        self.read()?.ok_or_else(|| {
            Error::persistence(format!("snapshot {} not found", self.path.display()))
        })
    }

    /// Load the snapshot, or `None` if it has never been saved
    pub fn load_optional(&self) -> Result<Option<LedgerSnapshot>> {
        let _lock = self.lock(false)?;
        self.read()
    }

    /// Atomically replace the snapshot file
    pub fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let _lock = self.lock(true)?;
        self.write(snapshot)
    }

    /// Open a ledger from the stored snapshot for reading
    ///
    /// When no snapshot exists yet, returns an empty ledger, seeded with the
    /// sample records if `seed` is set.
    pub fn open(&self, policy: BookingPolicy, seed: bool) -> Result<Ledger> {
        let _lock = self.lock(false)?;
        self.open_unlocked(policy, seed)
    }

    /// Load the ledger, apply `f`, and save the result under one exclusive lock
    ///
    /// Nothing is written if `f` fails.
    pub fn update<T, F>(&self, policy: BookingPolicy, seed: bool, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        let _lock = self.lock(true)?;
        let mut ledger = self.open_unlocked(policy, seed)?;
        let out = f(&mut ledger)?;
        self.write(&ledger.export_state())?;
        Ok(out)
    }

    fn open_unlocked(&self, policy: BookingPolicy, seed: bool) -> Result<Ledger> {
        match self.read()? {
            Some(snapshot) => Ledger::from_snapshot(snapshot, policy),
            None => {
                let mut ledger = Ledger::with_policy(policy);
                if seed {
                    tracing::info!("No snapshot at {:?}, seeding sample data", self.path);
                    seed_sample_data(&mut ledger)?;
                }
                Ok(ledger)
            }
        }
    }

    fn read(&self) -> Result<Option<LedgerSnapshot>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::persistence(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let snapshot = serde_json::from_str::<LedgerSnapshot>(&contents).map_err(|e| {
            Error::persistence(format!("malformed snapshot {}: {}", self.path.display(), e))
        })?;

        tracing::debug!("Loaded snapshot from {:?}", self.path);
        Ok(Some(snapshot))
    }

    fn write(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let dir = self.dir();
        std::fs::create_dir_all(dir)?;

        let write_err =
            |e: std::io::Error| Error::persistence(format!("cannot write {}: {}", self.path.display(), e));

        // Temp file in the same directory so the rename stays atomic
        let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
        let contents = serde_json::to_string_pretty(snapshot)?;
        temp.write_all(contents.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!("Saved snapshot to {:?}", self.path);
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> Result<PathBuf> {
        let name = self.path.file_name().ok_or_else(|| {
            Error::persistence(format!("snapshot path {} has no file name", self.path.display()))
        })?;
        let mut lock_name = name.to_os_string();
        lock_name.push(".lock");
        Ok(self.path.with_file_name(lock_name))
    }

    fn lock(&self, exclusive: bool) -> Result<StoreLock> {
        std::fs::create_dir_all(self.dir())?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path()?)?;

        if exclusive {
            file.lock_exclusive()?;
        } else {
            file.lock_shared()?;
        }
        Ok(StoreLock { file })
    }
}
