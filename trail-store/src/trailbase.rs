//! TrailBase - DuckDB-based storage for shelters and trails.

use anyhow::{Context, Result};
use duckdb::{params, Config, Connection};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use trail_core::{RecordStore, Shelter, ShelterId, StoreError, TrailEdge};

use super::dataset::Dataset;
use super::schema::{Difficulty, SCHEMA_SQL, SCHEMA_VERSION};
use super::trails::TrailRecord;

/// Database access mode for concurrent access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Read-write mode (exclusive lock, for imports)
    #[default]
    ReadWrite,
    /// Read-only mode (shared access, for queries)
    ReadOnly,
}

/// TrailBase - DuckDB-based storage for the trail network.
pub struct TrailBase {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl TrailBase {
    /// Open or create a database in read-write mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, AccessMode::ReadWrite)
    }

    /// Open an existing database in read-only mode.
    ///
    /// Snapshot and reachability queries never write, so they go through
    /// this and can run alongside each other.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, AccessMode::ReadOnly)
    }

    /// Open a database with the specified access mode.
    pub fn open_with_mode(path: impl AsRef<Path>, mode: AccessMode) -> Result<Self> {
        let path = path.as_ref();

        let conn = match mode {
            AccessMode::ReadWrite => Connection::open(path)
                .with_context(|| format!("Failed to open database: {:?}", path))?,
            AccessMode::ReadOnly => {
                let config = Config::default()
                    .access_mode(duckdb::AccessMode::ReadOnly)
                    .map_err(|e| anyhow::anyhow!("Failed to set read-only mode: {}", e))?;
                Connection::open_with_flags(path, config).with_context(|| {
                    format!("Failed to open database in read-only mode: {:?}", path)
                })?
            }
        };

        let base = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        };

        if mode == AccessMode::ReadWrite {
            base.init_schema()?;
        }

        Ok(base)
    }

    /// Create a throwaway in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let base = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        };
        base.init_schema()?;
        Ok(base)
    }

    /// Location on disk, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Acquire the connection lock, recovering from a poisoned mutex.
    fn acquire_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        match self.conn.lock() {
            Ok(guard) => Ok(guard),
            Err(poisoned) => {
                tracing::warn!("Recovering from poisoned database mutex");
                Ok(poisoned.into_inner())
            }
        }
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.acquire_conn()?;

        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize schema")?;

        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)",
            params![SCHEMA_VERSION],
        )
        .context("Failed to set schema version")?;

        Ok(())
    }

    /// Schema version stored in the metadata table.
    pub fn schema_version(&self) -> Result<Option<String>> {
        let conn = self.acquire_conn()?;
        let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Replace the shelter catalog with `shelters`.
    ///
    /// Duplicate ids keep the last occurrence.
    pub fn insert_shelters(&self, shelters: &[Shelter]) -> Result<()> {
        let mut unique: HashMap<ShelterId, &Shelter> = HashMap::new();
        for shelter in shelters {
            unique.insert(shelter.id, shelter);
        }
        tracing::info!(
            "insert_shelters: {} unique shelters (from {} total)",
            unique.len(),
            shelters.len()
        );

        let conn = self.acquire_conn()?;
        conn.execute("DELETE FROM shelter", [])?;

        {
            let mut appender = conn
                .appender("shelter")
                .context("Failed to create shelter appender")?;
            for shelter in unique.values() {
                appender.append_row(params![
                    shelter.id,
                    shelter.name,
                    shelter.locality,
                    shelter.altitude,
                    shelter.capacity,
                    shelter.is_open,
                ])?;
            }
            appender.flush()?;
        }

        let count: usize = conn.query_row("SELECT COUNT(*) FROM shelter", [], |row| row.get(0))?;
        tracing::info!("insert_shelters: after insert, DB has {} shelters", count);
        Ok(())
    }

    /// Replace every trail with `trails`.
    ///
    /// Trails are kept as given: duplicates and reversed pairs are legal
    /// records and only collapse once the engine builds a snapshot.
    pub fn insert_trails(&self, trails: &[TrailRecord]) -> Result<()> {
        let conn = self.acquire_conn()?;
        conn.execute("DELETE FROM trail", [])?;

        {
            let mut appender = conn
                .appender("trail")
                .context("Failed to create trail appender")?;
            for trail in trails {
                appender.append_row(params![
                    trail.shelter_id1,
                    trail.shelter_id2,
                    trail.distance,
                    trail.difficulty.map(|d| d.as_str()),
                    trail.duration.as_deref(),
                    trail.year,
                ])?;
            }
            appender.flush()?;
        }

        let count: usize = conn.query_row("SELECT COUNT(*) FROM trail", [], |row| row.get(0))?;
        tracing::info!("insert_trails: after insert, DB has {} trails", count);
        Ok(())
    }

    /// Load a whole dataset, replacing any previous contents.
    pub fn import_dataset(&self, dataset: &Dataset) -> Result<()> {
        let dangling = dataset.dangling_trails();
        if !dangling.is_empty() {
            tracing::warn!(
                "Dataset has {} trails referencing unknown shelters; snapshots that include them will fail",
                dangling.len()
            );
        }

        self.insert_shelters(&dataset.shelters)
            .context("Failed to import shelters")?;
        self.insert_trails(&dataset.trails)
            .context("Failed to import trails")?;
        Ok(())
    }

    /// Every shelter in the catalog, in id order.
    pub fn fetch_all_shelters(&self) -> Result<Vec<Shelter>> {
        let conn = self.acquire_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, locality, altitude, capacity, is_open FROM shelter ORDER BY id",
        )?;

        let mut rows = stmt.query([])?;
        let mut shelters = Vec::new();
        while let Some(row) = rows.next()? {
            shelters.push(Shelter {
                id: row.get(0)?,
                name: row.get(1)?,
                locality: row.get(2)?,
                altitude: row.get(3)?,
                capacity: row.get(4)?,
                is_open: row.get(5)?,
            });
        }

        Ok(shelters)
    }

    /// Every trail opened in or before `year`.
    pub fn fetch_trails_up_to(&self, year: i32) -> Result<Vec<TrailRecord>> {
        let conn = self.acquire_conn()?;
        let mut stmt = conn.prepare(
            "SELECT shelter_id1, shelter_id2, distance, difficulty, duration, year
             FROM trail WHERE year <= ?",
        )?;

        let mut rows = stmt.query(params![year])?;
        let mut trails = Vec::new();
        while let Some(row) = rows.next()? {
            let difficulty: Option<String> = row.get(3)?;
            trails.push(TrailRecord {
                shelter_id1: row.get(0)?,
                shelter_id2: row.get(1)?,
                distance: row.get(2)?,
                difficulty: difficulty.as_deref().and_then(Difficulty::parse),
                duration: row.get(4)?,
                year: row.get(5)?,
            });
        }

        tracing::debug!("fetch_trails_up_to({}): {} trails", year, trails.len());
        Ok(trails)
    }

    /// Get database statistics.
    pub fn stats(&self) -> Result<TrailStats> {
        let conn = self.acquire_conn()?;

        let shelter_count: usize =
            conn.query_row("SELECT COUNT(*) FROM shelter", [], |row| row.get(0))?;
        let trail_count: usize =
            conn.query_row("SELECT COUNT(*) FROM trail", [], |row| row.get(0))?;
        let (first_year, last_year): (Option<i32>, Option<i32>) = conn.query_row(
            "SELECT MIN(year), MAX(year) FROM trail",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(TrailStats {
            shelter_count,
            trail_count,
            first_year,
            last_year,
        })
    }
}

impl RecordStore for TrailBase {
    fn fetch_all_shelters(&self) -> std::result::Result<Vec<Shelter>, StoreError> {
        // Resolves to the inherent method.
        TrailBase::fetch_all_shelters(self)
            .map_err(|e| StoreError::unavailable(format!("{:#}", e)))
    }

    fn fetch_edges_up_to(&self, year: i32) -> std::result::Result<Vec<TrailEdge>, StoreError> {
        self.fetch_trails_up_to(year)
            .map(|trails| trails.iter().map(TrailRecord::edge).collect())
            .map_err(|e| StoreError::unavailable(format!("{:#}", e)))
    }
}

/// Statistics about the stored network.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrailStats {
    pub shelter_count: usize,
    pub trail_count: usize,
    /// Year of the oldest trail, if any.
    pub first_year: Option<i32>,
    /// Year of the newest trail, if any.
    pub last_year: Option<i32>,
}
