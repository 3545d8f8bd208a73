// tms-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Pack Store
// Description: Durable PackStore backed by SQLite.
// Purpose: Persist translation pack documents with insertion-order listing.
// Dependencies: tms-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`PackStore`] using `SQLite`. Packs are
//! stored as JSON documents keyed by pack id. The `seq` column is assigned on
//! first insert and kept across replacements, so listings ordered by `seq`
//! reproduce insertion order. Writes read the stored document back inside the
//! same transaction. Loads fail closed on oversized, undecodable, or
//! mismatched documents.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use rusqlite::params_from_iter;
use serde::Deserialize;
use thiserror::Error;
use tms_core::PackId;
use tms_core::PackStore;
use tms_core::StoreError;
use tms_core::TranslationPack;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum pack names bound into one `IN` query.
const MAX_NAMES_PER_QUERY: usize = 256;
/// Maximum pack document size accepted by the store.
pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` pack store.
#[derive(Debug, Clone)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a config for `path` with default pragmas.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store corruption or key mismatch.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Document exceeded the size limit.
    #[error("sqlite store document too large: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual document size in bytes.
        actual_bytes: usize,
    },
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::TooLarge {
                max_bytes,
                actual_bytes,
            } => Self::Invalid(format!(
                "pack document exceeds size limit: {actual_bytes} bytes (max {max_bytes})"
            )),
        }
    }
}

/// Maps a `rusqlite` error into a store error.
#[allow(clippy::needless_pass_by_value, reason = "Used as a map_err adapter.")]
fn db_error(err: rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed translation pack store.
#[derive(Clone)]
pub struct SqlitePackStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqlitePackStore {
    /// Opens an `SQLite`-backed pack store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Lists every pack ordered by insertion sequence.
    fn list_packs(&self) -> Result<Vec<TranslationPack>, SqliteStoreError> {
        let rows = {
            let guard = self.lock()?;
            let mut stmt = guard
                .prepare("SELECT pack_id, document FROM translation_packs ORDER BY seq")
                .map_err(db_error)?;
            let rows = stmt
                .query_map(params![], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
                })
                .map_err(db_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_error)?;
            drop(stmt);
            drop(guard);
            rows
        };
        rows.iter().map(|(pack_id, bytes)| decode_document(pack_id, bytes)).collect()
    }

    /// Lists packs whose name is in `names`, ordered by insertion sequence.
    fn list_packs_by_names(
        &self,
        names: &BTreeSet<String>,
    ) -> Result<Vec<TranslationPack>, SqliteStoreError> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut rows: Vec<(i64, String, Vec<u8>)> = Vec::new();
        {
            let guard = self.lock()?;
            for chunk in names.chunks(MAX_NAMES_PER_QUERY) {
                let placeholders = vec!["?"; chunk.len()].join(", ");
                let sql = format!(
                    "SELECT seq, pack_id, document FROM translation_packs WHERE pack_name IN \
                     ({placeholders})"
                );
                let mut stmt = guard.prepare(&sql).map_err(db_error)?;
                let chunk_rows = stmt
                    .query_map(params_from_iter(chunk.iter()), |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, Vec<u8>>(2)?,
                        ))
                    })
                    .map_err(db_error)?
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(db_error)?;
                rows.extend(chunk_rows);
            }
            drop(guard);
        }
        rows.sort_by_key(|(seq, _, _)| *seq);
        rows.iter().map(|(_, pack_id, bytes)| decode_document(pack_id, bytes)).collect()
    }

    /// Returns true when `id` has a row.
    fn pack_exists(&self, id: PackId) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        let found: Option<i64> = guard
            .query_row(
                "SELECT 1 FROM translation_packs WHERE pack_id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_error)?;
        drop(guard);
        Ok(found.is_some())
    }

    /// Loads the pack stored under `id`.
    fn load_pack(&self, id: PackId) -> Result<Option<TranslationPack>, SqliteStoreError> {
        let pack_id = id.to_string();
        let bytes: Option<Vec<u8>> = {
            let guard = self.lock()?;
            let bytes = guard
                .query_row(
                    "SELECT document FROM translation_packs WHERE pack_id = ?1",
                    params![pack_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(db_error)?;
            drop(guard);
            bytes
        };
        bytes.map(|bytes| decode_document(&pack_id, &bytes)).transpose()
    }

    /// Upserts `pack` and reads the stored document back.
    fn save_pack(
        &self,
        pack: &TranslationPack,
    ) -> Result<Option<TranslationPack>, SqliteStoreError> {
        let document =
            serde_json::to_vec(pack).map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
        if document.len() > MAX_DOCUMENT_BYTES {
            return Err(SqliteStoreError::TooLarge {
                max_bytes: MAX_DOCUMENT_BYTES,
                actual_bytes: document.len(),
            });
        }
        let pack_id = pack.id.to_string();
        let stored: Option<Vec<u8>> = {
            let mut guard = self.lock()?;
            let tx = guard.transaction().map_err(db_error)?;
            tx.execute(
                "INSERT INTO translation_packs (pack_id, pack_name, document) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(pack_id) DO UPDATE SET pack_name = excluded.pack_name, document = \
                 excluded.document",
                params![pack_id, pack.pack_name, document],
            )
            .map_err(db_error)?;
            let stored = tx
                .query_row(
                    "SELECT document FROM translation_packs WHERE pack_id = ?1",
                    params![pack_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(db_error)?;
            tx.commit().map_err(db_error)?;
            drop(guard);
            stored
        };
        stored.map(|bytes| decode_document(&pack_id, &bytes)).transpose()
    }

    /// Deletes the row for `id`; returns whether a row was removed.
    fn delete_pack(&self, id: PackId) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        let removed = guard
            .execute("DELETE FROM translation_packs WHERE pack_id = ?1", params![id.to_string()])
            .map_err(db_error)?;
        drop(guard);
        Ok(removed > 0)
    }

    /// Runs a trivial query to confirm the connection is usable.
    fn ping(&self) -> Result<(), SqliteStoreError> {
        let guard = self.lock()?;
        guard.query_row("SELECT 1", params![], |row| row.get::<_, i64>(0)).map_err(db_error)?;
        drop(guard);
        Ok(())
    }
}

impl PackStore for SqlitePackStore {
    fn list_all(&self) -> Result<Vec<TranslationPack>, StoreError> {
        self.list_packs().map_err(StoreError::from)
    }

    fn list_by_names(&self, names: &BTreeSet<String>) -> Result<Vec<TranslationPack>, StoreError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        self.list_packs_by_names(names).map_err(StoreError::from)
    }

    fn exists(&self, id: PackId) -> Result<bool, StoreError> {
        self.pack_exists(id).map_err(StoreError::from)
    }

    fn get(&self, id: PackId) -> Result<Option<TranslationPack>, StoreError> {
        self.load_pack(id).map_err(StoreError::from)
    }

    fn put(&self, pack: &TranslationPack) -> Result<Option<TranslationPack>, StoreError> {
        self.save_pack(pack).map_err(StoreError::from)
    }

    fn delete(&self, id: PackId) -> Result<bool, StoreError> {
        self.delete_pack(id).map_err(StoreError::from)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.ping().map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a stored document and checks it against its row key.
fn decode_document(pack_id: &str, bytes: &[u8]) -> Result<TranslationPack, SqliteStoreError> {
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(SqliteStoreError::TooLarge {
            max_bytes: MAX_DOCUMENT_BYTES,
            actual_bytes: bytes.len(),
        });
    }
    let pack: TranslationPack =
        serde_json::from_slice(bytes).map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
    if pack.id.to_string() != pack_id {
        return Err(SqliteStoreError::Corrupt(format!(
            "pack_id mismatch between key {pack_id} and document {}",
            pack.id
        )));
    }
    Ok(pack)
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags).map_err(db_error)?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(db_error)?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(db_error)?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(db_error)?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(db_error)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(db_error)?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(db_error)?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(db_error)?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS translation_packs (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    pack_id TEXT NOT NULL UNIQUE,
                    pack_name TEXT NOT NULL,
                    document BLOB NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_translation_packs_pack_name
                    ON translation_packs (pack_name);",
            )
            .map_err(db_error)?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(db_error)?;
    Ok(())
}
