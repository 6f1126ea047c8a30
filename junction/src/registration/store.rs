//! Persistent registry of installed extension roots.
//!
//! The store is a single `SQLite` database keyed by (region, scope, label).
//! Installation is idempotent for the identity that already holds a mount;
//! a different identity claiming the same mount is a conflict.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::config::DEFAULT_LOCK_WAIT_SECONDS;
use crate::error::{Error, Result};

use super::descriptor::{
    ExtensionIdentity, MountPoint, MountRegion, RegistrationDescriptor, RegistrationScope,
};

/// Current schema version, stored in the metadata table.
const CURRENT_SCHEMA_VERSION: i32 = 1;

const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

const CREATE_MOUNTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS mounts (
        region TEXT NOT NULL,
        scope TEXT NOT NULL,
        label TEXT NOT NULL,
        identity TEXT NOT NULL,
        tooltip TEXT,
        installed_at INTEGER NOT NULL,
        PRIMARY KEY (region, scope, label)
    )";

const CREATE_IDENTITY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_mounts_identity ON mounts(identity)";

const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

const INSERT_MOUNT: &str = r"
    INSERT OR REPLACE INTO mounts
    (region, scope, label, identity, tooltip, installed_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

/// One installed mount, as recorded in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    /// Identity of the extension holding the mount.
    pub identity: ExtensionIdentity,
    /// Region the root is mounted under.
    pub region: MountRegion,
    /// Scope the registration applies to.
    pub scope: RegistrationScope,
    /// Label the root is listed as.
    pub label: String,
    /// Tooltip recorded at install time, if any.
    pub tooltip: Option<String>,
    /// When the mount was installed.
    pub installed_at: DateTime<Utc>,
}

/// A handle to the on-disk registration registry.
///
/// # Examples
///
/// ```no_run
/// use junction::RegistrationStore;
///
/// let store = RegistrationStore::open("/tmp/junction/registry.db").unwrap();
/// let entries = store.list(None).unwrap();
/// assert!(entries.is_empty());
/// ```
#[derive(Debug)]
pub struct RegistrationStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl RegistrationStore {
    /// Opens (creating if necessary) the registry at `path`, with the
    /// default lock wait.
    ///
    /// # Errors
    ///
    /// Same as [`RegistrationStore::open_with_lock_wait`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_lock_wait(path, Duration::from_secs(DEFAULT_LOCK_WAIT_SECONDS))
    }

    /// Opens (creating if necessary) the registry at `path`.
    ///
    /// The parent directory is created if missing. The connection uses WAL
    /// mode with a busy timeout so concurrent tools do not fail on lock;
    /// `lock_wait` bounds how long an operation blocks on a registry held
    /// by another process before failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, PRAGMA settings
    /// cannot be applied, or the schema version is newer than this build
    /// understands.
    pub fn open_with_lock_wait(path: impl AsRef<Path>, lock_wait: Duration) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;

        // PRAGMA journal_mode returns a row, so query it rather than execute.
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.busy_timeout(lock_wait)?;

        Self::check_schema(&conn)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a transient in-memory registry, mainly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if schema initialization fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::check_schema(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// The filesystem path of this registry, if it is file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn check_schema(conn: &Connection) -> Result<()> {
        conn.execute(CREATE_METADATA_TABLE, [])?;

        let version: Option<String> = conn
            .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
            .optional()?;

        match version {
            None => {
                conn.execute(CREATE_MOUNTS_TABLE, [])?;
                conn.execute(CREATE_IDENTITY_INDEX, [])?;
                conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
            }
            Some(value) => {
                let found: i32 = value.parse().map_err(|_| Error::Validation {
                    field: "schema_version".to_string(),
                    message: format!("malformed schema version '{value}'"),
                })?;
                if found > CURRENT_SCHEMA_VERSION {
                    return Err(Error::Validation {
                        field: "schema_version".to_string(),
                        message: format!(
                            "registry schema version {found} is newer than supported version {CURRENT_SCHEMA_VERSION}"
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Installs every mount point a descriptor declares, at `scope`.
    ///
    /// Re-installing mounts the same identity already holds is a no-op that
    /// refreshes the recorded tooltip.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the descriptor is invalid.
    /// - [`Error::RegistrationConflict`] if any mount point is held by a
    ///   different identity. No mounts are written in that case.
    pub fn install(
        &mut self,
        descriptor: &RegistrationDescriptor,
        scope: RegistrationScope,
    ) -> Result<()> {
        descriptor.validate()?;

        let tx = self.conn.transaction()?;
        for point in &descriptor.mounts {
            let holder: Option<String> = tx
                .query_row(
                    "SELECT identity FROM mounts WHERE region = ? AND scope = ? AND label = ?",
                    rusqlite::params![point.region.as_str(), scope.as_str(), point.label],
                    |row| row.get(0),
                )
                .optional()?;

            if let Some(holder) = holder {
                if !descriptor.identity.matches(&holder) {
                    return Err(Error::RegistrationConflict {
                        details: format!(
                            "mount '{}' under region '{}' ({scope}) is held by '{holder}'",
                            point.label, point.region
                        ),
                    });
                }
            }

            tx.execute(
                INSERT_MOUNT,
                rusqlite::params![
                    point.region.as_str(),
                    scope.as_str(),
                    point.label,
                    descriptor.identity.as_str(),
                    descriptor.tooltip,
                    Utc::now().timestamp(),
                ],
            )?;
        }
        tx.commit()?;

        log::info!(
            "installed {} mount(s) for '{}' at scope {scope}",
            descriptor.mounts.len(),
            descriptor.identity
        );
        Ok(())
    }

    /// Removes every mount an identity holds at `scope`.
    ///
    /// Returns the number of mounts removed; removing an identity that
    /// holds nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying database operation fails.
    pub fn uninstall(
        &mut self,
        identity: &ExtensionIdentity,
        scope: RegistrationScope,
    ) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM mounts WHERE identity = ? COLLATE NOCASE AND scope = ?",
            rusqlite::params![identity.as_str(), scope.as_str()],
        )?;
        log::info!("removed {removed} mount(s) for '{identity}' at scope {scope}");
        Ok(removed)
    }

    /// Looks up the entry holding one mount point, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying database operation fails or a
    /// stored row cannot be decoded.
    pub fn entry(
        &self,
        point: &MountPoint,
        scope: RegistrationScope,
    ) -> Result<Option<MountEntry>> {
        let row = self
            .conn
            .query_row(
                "SELECT region, scope, label, identity, tooltip, installed_at
                 FROM mounts WHERE region = ? AND scope = ? AND label = ?",
                rusqlite::params![point.region.as_str(), scope.as_str(), point.label],
                row_to_raw,
            )
            .optional()?;
        row.map(raw_to_entry).transpose()
    }

    /// Lists installed mounts, optionally restricted to one scope.
    ///
    /// Entries are ordered by region, then label.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying database operation fails or a
    /// stored row cannot be decoded.
    pub fn list(&self, scope: Option<RegistrationScope>) -> Result<Vec<MountEntry>> {
        let mut entries = Vec::new();
        match scope {
            Some(scope) => {
                let mut stmt = self.conn.prepare(
                    "SELECT region, scope, label, identity, tooltip, installed_at
                     FROM mounts WHERE scope = ? ORDER BY region, label",
                )?;
                let rows = stmt.query_map([scope.as_str()], row_to_raw)?;
                for row in rows {
                    entries.push(raw_to_entry(row?)?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT region, scope, label, identity, tooltip, installed_at
                     FROM mounts ORDER BY region, label",
                )?;
                let rows = stmt.query_map([], row_to_raw)?;
                for row in rows {
                    entries.push(raw_to_entry(row?)?);
                }
            }
        }
        Ok(entries)
    }
}

type RawEntry = (String, String, String, String, Option<String>, i64);

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn raw_to_entry(raw: RawEntry) -> Result<MountEntry> {
    let (region, scope, label, identity, tooltip, installed_at) = raw;
    let installed_at = Utc
        .timestamp_opt(installed_at, 0)
        .single()
        .ok_or_else(|| Error::Validation {
            field: "installed_at".to_string(),
            message: format!("stored timestamp {installed_at} is out of range"),
        })?;
    Ok(MountEntry {
        identity: ExtensionIdentity::new(identity)?,
        region: region.parse()?,
        scope: scope.parse()?,
        label,
        tooltip,
        installed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn descriptor(identity: &str, label: &str) -> RegistrationDescriptor {
        RegistrationDescriptor::new(ExtensionIdentity::new(identity).unwrap())
            .tooltip("test extension")
            .mount(MountPoint::new(MountRegion::Computer, label).unwrap())
    }

    #[test]
    fn test_open_applies_lock_wait() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.db");
        let store =
            RegistrationStore::open_with_lock_wait(&path, Duration::from_secs(2)).unwrap();
        let millis: i64 = store
            .conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .unwrap();
        assert_eq!(millis, 2000);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("registry.db");
        let store = RegistrationStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[test]
    fn test_install_and_lookup() {
        let mut store = RegistrationStore::open_in_memory().unwrap();
        store
            .install(&descriptor("acme.x", "Gadgets"), RegistrationScope::PerUser)
            .unwrap();

        let point = MountPoint::new(MountRegion::Computer, "Gadgets").unwrap();
        let entry = store
            .entry(&point, RegistrationScope::PerUser)
            .unwrap()
            .unwrap();
        assert!(entry.identity.matches("acme.x"));
        assert_eq!(entry.label, "Gadgets");
        assert_eq!(entry.tooltip.as_deref(), Some("test extension"));

        // Scopes are independent keys.
        assert!(store
            .entry(&point, RegistrationScope::Machine)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_install_is_idempotent_for_same_identity() {
        let mut store = RegistrationStore::open_in_memory().unwrap();
        store
            .install(&descriptor("acme.x", "Gadgets"), RegistrationScope::PerUser)
            .unwrap();
        store
            .install(&descriptor("ACME.X", "Gadgets"), RegistrationScope::PerUser)
            .unwrap();
        assert_eq!(store.list(None).unwrap().len(), 1);
    }

    #[test]
    fn test_install_conflict_with_other_identity() {
        let mut store = RegistrationStore::open_in_memory().unwrap();
        store
            .install(&descriptor("acme.x", "Gadgets"), RegistrationScope::PerUser)
            .unwrap();

        let err = store
            .install(&descriptor("rival.y", "Gadgets"), RegistrationScope::PerUser)
            .unwrap_err();
        assert!(err.is_registration_conflict());

        // The holder is unchanged.
        let point = MountPoint::new(MountRegion::Computer, "Gadgets").unwrap();
        let entry = store
            .entry(&point, RegistrationScope::PerUser)
            .unwrap()
            .unwrap();
        assert!(entry.identity.matches("acme.x"));
    }

    #[test]
    fn test_conflict_writes_nothing() {
        let mut store = RegistrationStore::open_in_memory().unwrap();
        store
            .install(&descriptor("acme.x", "Taken"), RegistrationScope::PerUser)
            .unwrap();

        // Second mount conflicts, so the first must not be written either.
        let both = RegistrationDescriptor::new(ExtensionIdentity::new("rival.y").unwrap())
            .mount(MountPoint::new(MountRegion::Desktop, "Fresh").unwrap())
            .mount(MountPoint::new(MountRegion::Computer, "Taken").unwrap());
        assert!(store
            .install(&both, RegistrationScope::PerUser)
            .unwrap_err()
            .is_registration_conflict());

        let fresh = MountPoint::new(MountRegion::Desktop, "Fresh").unwrap();
        assert!(store
            .entry(&fresh, RegistrationScope::PerUser)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_uninstall_removes_all_mounts_of_identity() {
        let mut store = RegistrationStore::open_in_memory().unwrap();
        let multi = RegistrationDescriptor::new(ExtensionIdentity::new("acme.x").unwrap())
            .mount(MountPoint::new(MountRegion::Computer, "Gadgets").unwrap())
            .mount(MountPoint::new(MountRegion::Desktop, "Gadgets").unwrap());
        store.install(&multi, RegistrationScope::PerUser).unwrap();

        let removed = store
            .uninstall(
                &ExtensionIdentity::new("ACME.X").unwrap(),
                RegistrationScope::PerUser,
            )
            .unwrap();
        assert_eq!(removed, 2);
        assert!(store.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_uninstall_absent_identity_is_noop() {
        let mut store = RegistrationStore::open_in_memory().unwrap();
        let removed = store
            .uninstall(
                &ExtensionIdentity::new("ghost").unwrap(),
                RegistrationScope::PerUser,
            )
            .unwrap();
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_list_is_ordered_and_scope_filtered() {
        let mut store = RegistrationStore::open_in_memory().unwrap();
        store
            .install(&descriptor("acme.x", "Zulu"), RegistrationScope::PerUser)
            .unwrap();
        store
            .install(&descriptor("acme.y", "Alpha"), RegistrationScope::PerUser)
            .unwrap();
        store
            .install(&descriptor("acme.z", "Moth"), RegistrationScope::Machine)
            .unwrap();

        let per_user = store.list(Some(RegistrationScope::PerUser)).unwrap();
        assert_eq!(per_user.len(), 2);
        assert_eq!(per_user[0].label, "Alpha");
        assert_eq!(per_user[1].label, "Zulu");

        assert_eq!(store.list(None).unwrap().len(), 3);
    }

    #[test]
    fn test_registrations_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.db");
        {
            let mut store = RegistrationStore::open(&path).unwrap();
            store
                .install(&descriptor("acme.x", "Gadgets"), RegistrationScope::PerUser)
                .unwrap();
        }

        let store = RegistrationStore::open(&path).unwrap();
        let entries = store.list(None).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].identity.matches("acme.x"));
    }
}
