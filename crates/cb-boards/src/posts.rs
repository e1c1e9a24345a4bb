//! # Post Board
//!
//! Mutable per-asset post collection: create/edit/delete/like plus the
//! persisted expand/collapse state of each post's content panel.
//!
//! Ownership is by claimed display name only — whoever presents the author's
//! username may edit or delete. There is no cryptographic identity behind it;
//! the acting username is an explicit parameter so the rule is testable.

use cb_core::error::{AppError, Result};
use cb_core::keys;
use cb_core::models::Post;
use cb_store::TypedStore;
use chrono::Utc;
use std::collections::BTreeSet;

/// Sort order for listing a board. Both orders are descending; the sort is
/// stable, so ties keep their storage (newest-first) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Likes,
}

#[derive(Clone)]
pub struct PostBoard {
    store: TypedStore,
}

impl PostBoard {
    pub fn new(store: TypedStore) -> Self {
        Self { store }
    }

    fn load_board(&self, asset_id: &str) -> Vec<Post> {
        self.store.load(&keys::forum_posts(asset_id), Vec::new())
    }

    fn save_board(&self, asset_id: &str, board: &[Post]) {
        self.store.save(&keys::forum_posts(asset_id), &board);
    }

    /// Posts for `asset_id`, sorted by the requested key.
    pub fn list(&self, asset_id: &str, sort: SortKey) -> Vec<Post> {
        let mut board = self.load_board(asset_id);
        match sort {
            SortKey::Date => board.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Likes => board.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }
        board
    }

    /// Creates a post and prepends it, so storage order is newest first.
    pub fn create(
        &self,
        asset_id: &str,
        username: &str,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError("username is required".into()));
        }
        if title.trim().is_empty() {
            return Err(AppError::ValidationError("title is required".into()));
        }
        if content.trim().is_empty() {
            return Err(AppError::ValidationError("content is required".into()));
        }

        let mut board = self.load_board(asset_id);
        let post = Post {
            id: crate::creation_id(board.iter().map(|p| p.id).max()),
            username: username.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            likes: 0,
        };
        board.insert(0, post.clone());
        self.save_board(asset_id, &board);

        tracing::debug!(asset_id, post_id = post.id, "post created");
        Ok(post)
    }

    /// Replaces a post's title and content. Only the author (same trimmed
    /// display name) may edit; id, username, date and likes are untouched.
    pub fn edit(
        &self,
        asset_id: &str,
        post_id: i64,
        acting_username: &str,
        new_title: &str,
        new_content: &str,
    ) -> Result<Post> {
        if new_title.trim().is_empty() {
            return Err(AppError::ValidationError("title is required".into()));
        }
        if new_content.trim().is_empty() {
            return Err(AppError::ValidationError("content is required".into()));
        }

        let mut board = self.load_board(asset_id);
        let post = Self::find_mut(&mut board, post_id)?;
        Self::check_owner(post, acting_username)?;

        post.title = new_title.to_string();
        post.content = new_content.to_string();
        let edited = post.clone();
        self.save_board(asset_id, &board);

        tracing::debug!(asset_id, post_id, "post edited");
        Ok(edited)
    }

    /// Removes a post (author only) and prunes its id from the expanded set.
    ///
    /// The "are you sure" confirmation lives with the caller; by the time
    /// this runs the deletion is decided.
    pub fn delete(&self, asset_id: &str, post_id: i64, acting_username: &str) -> Result<()> {
        let mut board = self.load_board(asset_id);
        let post = Self::find_mut(&mut board, post_id)?;
        Self::check_owner(post, acting_username)?;

        board.retain(|p| p.id != post_id);
        self.save_board(asset_id, &board);

        let expanded_key = keys::forum_expanded(asset_id);
        let mut expanded: BTreeSet<i64> = self.store.load(&expanded_key, BTreeSet::new());
        if expanded.remove(&post_id) {
            self.store.save(&expanded_key, &expanded);
        }

        tracing::debug!(asset_id, post_id, "post deleted");
        Ok(())
    }

    /// Increments the like counter. Anyone may like, any number of times —
    /// there is no dedup in the product model.
    pub fn like(&self, asset_id: &str, post_id: i64) -> Result<u64> {
        let mut board = self.load_board(asset_id);
        let post = Self::find_mut(&mut board, post_id)?;
        post.likes += 1;
        let likes = post.likes;
        self.save_board(asset_id, &board);
        Ok(likes)
    }

    /// Flips whether `post_id`'s content panel is expanded; returns the new
    /// state (`true` = now expanded).
    pub fn toggle_expand(&self, asset_id: &str, post_id: i64) -> bool {
        let key = keys::forum_expanded(asset_id);
        let mut expanded: BTreeSet<i64> = self.store.load(&key, BTreeSet::new());
        let now_expanded = expanded.insert(post_id);
        if !now_expanded {
            expanded.remove(&post_id);
        }
        self.store.save(&key, &expanded);
        now_expanded
    }

    /// Ids of posts currently shown expanded.
    pub fn expanded(&self, asset_id: &str) -> BTreeSet<i64> {
        self.store.load(&keys::forum_expanded(asset_id), BTreeSet::new())
    }

    fn find_mut(board: &mut [Post], post_id: i64) -> Result<&mut Post> {
        board
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("post".into(), post_id.to_string()))
    }

    fn check_owner(post: &Post, acting_username: &str) -> Result<()> {
        if post.username.trim() != acting_username.trim() {
            return Err(AppError::Unauthorized(format!(
                "post {} belongs to {}",
                post.id, post.username
            )));
        }
        Ok(())
    }
}
