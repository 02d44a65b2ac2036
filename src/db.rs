// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.spendwise", "Spendwise", "spendwise"));

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not serialize slice '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One independently persisted partition of the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Transactions,
    FixedExpenses,
    Budgets,
    Settings,
    LockedMonths,
}

impl Slice {
    pub const ALL: [Slice; 5] = [
        Slice::Transactions,
        Slice::FixedExpenses,
        Slice::Budgets,
        Slice::Settings,
        Slice::LockedMonths,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Slice::Transactions => "spendwise_transactions",
            Slice::FixedExpenses => "spendwise_fixed_expenses",
            Slice::Budgets => "spendwise_budgets",
            Slice::Settings => "spendwise_settings",
            Slice::LockedMonths => "spendwise_locked_months",
        }
    }
}

/// Key-value persistence of JSON blobs.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError>;
    fn clear(&self, keys: &[&str]) -> Result<(), StorageError>;
}

/// Read a slice, substituting `fallback` when the key is missing or the blob is malformed.
pub fn load_slice<T: DeserializeOwned>(storage: &dyn Storage, slice: Slice, fallback: T) -> T {
    let Some(raw) = storage.get(slice.key()) else {
        return fallback;
    };
    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("discarding unreadable slice '{}': {}", slice.key(), e);
            fallback
        }
    }
}

pub fn save_slice<T: Serialize>(
    storage: &dyn Storage,
    slice: Slice,
    data: &T,
) -> Result<(), StorageError> {
    let blob = serde_json::to_string(data).map_err(|source| StorageError::Serialize {
        key: slice.key(),
        source,
    })?;
    debug!("writing slice '{}' ({} bytes)", slice.key(), blob.len());
    storage.set(slice.key(), &blob)
}

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise.sqlite"))
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Option<String> {
        let res = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get::<_, String>(0)
            })
            .optional();
        match res {
            Ok(v) => v,
            Err(e) => {
                warn!("read of '{}' failed: {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, blob],
        )?;
        Ok(())
    }

    fn clear(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.conn.execute("DELETE FROM kv WHERE key=?1", params![key])?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn clear(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.borrow_mut();
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        (**self).set(key, blob)
    }

    fn clear(&self, keys: &[&str]) -> Result<(), StorageError> {
        (**self).clear(keys)
    }
}
