//! Fixtures shared by unit and router tests.

use std::sync::Arc;

use axum::async_trait;
use chrono::{DateTime, Utc};

use crate::modules::auth::store::{MemoryTokenStore, TokenIdentityStore};
use crate::modules::auth::types::Identity;
use crate::modules::common::StoreError;
use crate::modules::notes::store::MemoryNotesStore;
use crate::modules::notes::types::Note;
use crate::types::AppState;

pub const ALICE: &str = "alice@example.com";
pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB: &str = "bob@example.com";
pub const BOB_TOKEN: &str = "bob-token";

const EPOCH: i64 = 1_700_000_000;

pub fn note_at(id: i32, user: &str, minutes: i64) -> Note {
    Note {
        id,
        user: user.to_string(),
        text: format!("note {id}"),
        create_date: DateTime::<Utc>::from_timestamp(EPOCH + minutes * 60, 0).unwrap(),
    }
}

/// Alice owns fifteen notes, Bob has a token and no notes, Carol has notes
/// and no token.
pub fn seeded_state() -> AppState {
    let tokens = MemoryTokenStore::default();
    tokens.insert(ALICE_TOKEN, Identity::new(ALICE)).unwrap();
    tokens.insert(BOB_TOKEN, Identity::new(BOB)).unwrap();

    let notes = MemoryNotesStore::default();
    // out of order on purpose; ids follow creation time
    for id in [7, 3, 15, 1, 12, 9, 4, 14, 2, 11, 6, 10, 5, 13, 8] {
        notes.insert(note_at(id, ALICE, i64::from(id))).unwrap();
    }
    notes.insert(note_at(100, "carol@example.com", 500)).unwrap();

    AppState::in_memory(tokens, notes)
}

struct UnavailableTokens;

#[async_trait]
impl TokenIdentityStore for UnavailableTokens {
    async fn lookup(&self, _token: &str) -> Result<Option<Identity>, StoreError> {
        Err(StoreError::Poisoned)
    }
}

/// A state whose token store fails every lookup.
pub fn failing_state() -> AppState {
    AppState {
        tokens: Arc::new(UnavailableTokens),
        ..seeded_state()
    }
}
