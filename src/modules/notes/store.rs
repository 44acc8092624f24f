use std::sync::RwLock;

use axum::async_trait;

use crate::modules::auth::types::Identity;
use crate::modules::common::{SortOrder, StoreError};
use crate::modules::notes::types::Note;
use crate::types::{ConnectionPool, NOTES_TABLE_NAME};

/// Sorted range query over notes partitioned by owner.
#[async_trait]
pub trait NotesStore: Send + Sync {
    async fn query_by_owner(
        &self,
        owner: &Identity,
        limit: i64,
        order: SortOrder,
    ) -> Result<Vec<Note>, StoreError>;
}

pub struct PgNotesStore {
    pool: ConnectionPool,
}

impl PgNotesStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotesStore for PgNotesStore {
    async fn query_by_owner(
        &self,
        owner: &Identity,
        limit: i64,
        order: SortOrder,
    ) -> Result<Vec<Note>, StoreError> {
        let conn = self.pool.get().await?;

        let rows = conn.query(
            &format!(
                "SELECT id, \"user\", text, create_date FROM {NOTES_TABLE_NAME} WHERE \"user\" = $1 ORDER BY create_date {} LIMIT $2",
                order.as_sql()
            ),
            &[&owner.as_str(), &limit]).await?;

        let notes = rows.iter().map(|row| {
            Note {
                id: row.get(0),
                user: row.get(1),
                text: row.get(2),
                create_date: row.get(3)
            }
        }).collect();

        Ok(notes)
    }
}

#[derive(Default)]
pub struct MemoryNotesStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNotesStore {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes: RwLock::new(notes) }
    }

    pub fn insert(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.notes.write().map_err(|_| StoreError::Poisoned)?;
        notes.push(note);
        Ok(())
    }
}

#[async_trait]
impl NotesStore for MemoryNotesStore {
    async fn query_by_owner(
        &self,
        owner: &Identity,
        limit: i64,
        order: SortOrder,
    ) -> Result<Vec<Note>, StoreError> {
        let mut owned: Vec<Note> = {
            let notes = self.notes.read().map_err(|_| StoreError::Poisoned)?;
            notes.iter().filter(|note| note.user == owner.as_str()).cloned().collect()
        };

        match order {
            SortOrder::Ascending => owned.sort_by(|a, b| a.create_date.cmp(&b.create_date)),
            SortOrder::Descending => owned.sort_by(|a, b| b.create_date.cmp(&a.create_date)),
        }
        owned.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(owned)
    }
}
