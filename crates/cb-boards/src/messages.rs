//! # Message Board
//!
//! Append-only chat per asset. Messages are never edited, deleted or
//! moderated; a board disappears only when its storage key is cleared, which
//! no operation here exposes.

use cb_core::error::{AppError, Result};
use cb_core::keys;
use cb_core::models::Message;
use cb_store::TypedStore;
use chrono::Utc;

#[derive(Clone)]
pub struct MessageBoard {
    store: TypedStore,
}

impl MessageBoard {
    pub fn new(store: TypedStore) -> Self {
        Self { store }
    }

    /// All messages for `asset_id` in creation order; empty when the board
    /// has never been written.
    pub fn list(&self, asset_id: &str) -> Vec<Message> {
        self.store.load(&keys::chat_messages(asset_id), Vec::new())
    }

    /// Appends a message and persists the whole board.
    ///
    /// Both fields are required; a blank username or content rejects the
    /// submission before anything is touched.
    pub fn post(&self, asset_id: &str, username: &str, content: &str) -> Result<Message> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError("username is required".into()));
        }
        if content.trim().is_empty() {
            return Err(AppError::ValidationError("message content is required".into()));
        }

        let key = keys::chat_messages(asset_id);
        let mut board: Vec<Message> = self.store.load(&key, Vec::new());

        let message = Message {
            id: crate::creation_id(board.iter().map(|m| m.id).max()),
            username: username.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        board.push(message.clone());
        self.store.save(&key, &board);

        tracing::debug!(asset_id, message_id = message.id, "message posted");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_kv_memory::MemoryKvStore;
    use std::sync::Arc;

    fn board() -> MessageBoard {
        MessageBoard::new(TypedStore::new(Arc::new(MemoryKvStore::new())))
    }

    #[test]
    fn post_appends_exactly_one() {
        let board = board();
        board.post("bitcoin", "alice", "gm").unwrap();
        let posted = board.post("bitcoin", "bob", "wen moon").unwrap();

        let listed = board.list("bitcoin");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.last(), Some(&posted));
    }

    #[test]
    fn blank_fields_reject_without_mutation() {
        let board = board();
        board.post("bitcoin", "alice", "hello").unwrap();

        assert!(matches!(
            board.post("bitcoin", "", "hello"),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            board.post("bitcoin", "alice", ""),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            board.post("bitcoin", "   ", "  \t "),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(board.list("bitcoin").len(), 1);
    }

    #[test]
    fn boards_are_scoped_per_asset() {
        let board = board();
        board.post("bitcoin", "alice", "btc talk").unwrap();
        board.post("ethereum", "alice", "eth talk").unwrap();

        assert_eq!(board.list("bitcoin").len(), 1);
        assert_eq!(board.list("ethereum").len(), 1);
        assert_eq!(board.list("dogecoin").len(), 0);
    }

    #[test]
    fn ids_are_unique_and_order_is_chronological() {
        let board = board();
        for i in 0..5 {
            board.post("bitcoin", "alice", &format!("msg {i}")).unwrap();
        }
        let listed = board.list("bitcoin");
        for pair in listed.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }
}
