//! SQLite-backed release catalog.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::catalog::ReleaseCatalog;
use crate::models::*;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Catalog path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Opening catalog '{}'", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Release source operations
    // ============================================================

    /// Track a release source. Adding an already tracked source is a no-op.
    pub fn add_source(&self, full: &str) -> Result<ReleaseSource> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO release_sources (full, created_at) VALUES (?, ?)",
            (full, Utc::now().to_rfc3339()),
        )?;
        Ok(ReleaseSource::new(full))
    }

    pub fn get_all_sources(&self) -> Result<Vec<ReleaseSource>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT full FROM release_sources ORDER BY full")?;

        let sources = stmt
            .query_map([], |row| Ok(ReleaseSource { full: row.get(0)? }))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sources)
    }

    fn source_exists(conn: &Connection, full: &str) -> Result<bool> {
        let count: i32 = conn.query_row(
            "SELECT COUNT(*) FROM release_sources WHERE full = ?",
            [full],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ============================================================
    // Release version operations
    // ============================================================

    /// Track a version under an existing source.
    ///
    /// Returns the existing record if the version is already tracked.
    pub fn add_version(&self, source: &str, version_raw: &str) -> Result<LocalVersionRecord> {
        if let Some(existing) = self.find_version(source, version_raw)? {
            return Ok(existing);
        }

        let conn = self.lock()?;
        if !Self::source_exists(&conn, source)? {
            anyhow::bail!("Release source '{}' not found", source);
        }

        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO release_versions (id, source, version_raw, created_at)
             VALUES (?, ?, ?, ?)",
            (id.to_string(), source, version_raw, now.to_rfc3339()),
        )?;

        Ok(LocalVersionRecord {
            id,
            source: source.to_string(),
            version_raw: version_raw.to_string(),
            created_at: now,
        })
    }

    pub fn get_versions_by_source(&self, source: &str) -> Result<Vec<LocalVersionRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, source, version_raw, created_at
             FROM release_versions WHERE source = ? ORDER BY rowid",
        )?;

        let versions = stmt
            .query_map([source], |row| {
                Ok(LocalVersionRecord {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    source: row.get(1)?,
                    version_raw: row.get(2)?,
                    created_at: parse_datetime(row.get::<_, String>(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(versions)
    }

    pub fn find_version(
        &self,
        source: &str,
        version_raw: &str,
    ) -> Result<Option<LocalVersionRecord>> {
        let conn = self.lock()?;
        let version = conn
            .query_row(
                "SELECT id, source, version_raw, created_at
                 FROM release_versions WHERE source = ? AND version_raw = ?",
                [source, version_raw],
                |row| {
                    Ok(LocalVersionRecord {
                        id: parse_uuid(row.get::<_, String>(0)?),
                        source: row.get(1)?,
                        version_raw: row.get(2)?,
                        created_at: parse_datetime(row.get::<_, String>(3)?),
                    })
                },
            )
            .optional()?;

        Ok(version)
    }

    // ============================================================
    // Note operations
    // ============================================================

    /// Replace the notes stored for a version.
    pub fn set_version_notes(&self, version_id: Uuid, note: &NoteRecord) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO release_notes (version_id, content, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(version_id) DO UPDATE
             SET content = excluded.content, updated_at = excluded.updated_at",
            (version_id.to_string(), &note.content, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    /// Notes stored for a version, or `None` if none were ever imported.
    pub fn get_version_notes(&self, version_id: Uuid) -> Result<Option<NoteRecord>> {
        let conn = self.lock()?;
        let note = conn
            .query_row(
                "SELECT content FROM release_notes WHERE version_id = ?",
                [version_id.to_string()],
                |row| Ok(NoteRecord { content: row.get(0)? }),
            )
            .optional()?;
        Ok(note)
    }
}

impl ReleaseCatalog for Database {
    fn list_sources(&self) -> Result<Vec<ReleaseSource>> {
        self.get_all_sources()
    }

    fn list_versions(&self, source: &str) -> Result<Vec<LocalVersionRecord>> {
        self.get_versions_by_source(source)
    }

    fn set_notes(&self, version: &LocalVersionRecord, note: &NoteRecord) -> Result<()> {
        self.set_version_notes(version.id, note)
    }
}

/// Catalog location under the platform data directory.
pub fn default_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "relnotes")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("catalog.db"))
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
