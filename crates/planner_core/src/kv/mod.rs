//! Local key-value cache for small text blobs.
//!
//! # Responsibility
//! - Define the cache contract used to mirror session identity.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Keys and values are opaque UTF-8 strings.
//! - `set` overwrites; `remove` of an absent key is not an error.

mod memory;
mod sqlite;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

pub type KvResult<T> = Result<T, KvError>;

#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Connection is missing the cache table.
    MissingTable(&'static str),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingTable(table) => write!(f, "key-value cache requires table `{table}`"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingTable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value cache.
pub trait KeyValueCache {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
    fn remove(&mut self, key: &str) -> KvResult<()>;
}
