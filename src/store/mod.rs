//! Persistence for classified documents.
//!
//! The service layer talks to a [`DocumentStore`]; [`MemoryStore`] backs
//! tests and the CLI, [`SqliteStore`] backs the daemon.

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::Result;
use crate::types::{DocumentRecord, NewDocument};

/// Storage backend for classified documents.
///
/// Ids are assigned by the store, start at 1 and increase with every insert.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist `doc`, returning the stored record with its id.
    async fn insert(&self, doc: NewDocument) -> Result<DocumentRecord>;

    /// Fetch one record including its extracted content.
    async fn get(&self, id: i64) -> Result<Option<DocumentRecord>>;

    /// Every stored record, oldest first.
    async fn list(&self) -> Result<Vec<DocumentRecord>>;
}
