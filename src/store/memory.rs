use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::Result;
use crate::types::{DocumentRecord, NewDocument};

/// In-process store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<DocumentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, doc: NewDocument) -> Result<DocumentRecord> {
        let mut records = self.records.write().await;
        let id = records.last().map_or(1, |r| r.id + 1);
        let record = DocumentRecord::from_new(id, doc);
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<Option<DocumentRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<DocumentRecord>> {
        Ok(self.records.read().await.clone())
    }
}
