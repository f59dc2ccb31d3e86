//! Post service - CRUD over posts with ownership checks.

use std::sync::Arc;

use chrono::Utc;
use storywave_shared::PostDto;

use crate::domain::post::post_from_dto;
use crate::domain::{Page, PageRequest, Post};
use crate::error::{DomainError, DomainResult};
use crate::ports::{TransactionManager, TxMode};

/// Stateless façade over the post and user stores.
///
/// Each operation opens its own transaction scope, read-write for mutations
/// and read-only for lookups. Early returns drop the scope, which rolls it back.
#[derive(Clone)]
pub struct PostService {
    tx: Arc<dyn TransactionManager>,
}

impl PostService {
    pub fn new(tx: Arc<dyn TransactionManager>) -> Self {
        Self { tx }
    }

    /// Create a post owned by `acting_user_id`.
    ///
    /// The like counter and creation time are always set by the server.
    #[tracing::instrument(skip(self, dto))]
    pub async fn create_post(&self, dto: PostDto, acting_user_id: &str) -> DomainResult<PostDto> {
        let scope = self.tx.begin(TxMode::ReadWrite).await?;

        let user = scope
            .users()
            .find_by_id(acting_user_id.to_string())
            .await?
            .ok_or_else(|| DomainError::invalid_argument("user not found"))?;

        let mut post = post_from_dto(dto, &user.id);
        post.id = None;
        post.thumbs = 0;
        post.created_at = Utc::now();
        post.updated_at = None;

        let saved = scope.posts().save(post).await?;
        scope.commit().await?;

        tracing::info!(post_id = ?saved.id, "Post created");
        Ok(saved.into())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_post_by_id(&self, id: i64) -> DomainResult<Option<PostDto>> {
        let scope = self.tx.begin(TxMode::ReadOnly).await?;
        let post = scope.posts().find_by_id(id).await?;
        scope.commit().await?;

        Ok(post.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_posts(&self) -> DomainResult<Vec<PostDto>> {
        let scope = self.tx.begin(TxMode::ReadOnly).await?;
        let posts = scope.posts().find_all().await?;
        scope.commit().await?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_posts_by_title_containing(&self, keyword: &str) -> DomainResult<Vec<PostDto>> {
        let scope = self.tx.begin(TxMode::ReadOnly).await?;
        let posts = scope.posts().find_by_title_containing(keyword).await?;
        scope.commit().await?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_posts_by_user(&self, user_id: &str) -> DomainResult<Vec<PostDto>> {
        let scope = self.tx.begin(TxMode::ReadOnly).await?;
        let posts = scope.posts().find_by_user_id(user_id).await?;
        scope.commit().await?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    /// Replace title and content of a post the acting user owns.
    ///
    /// Returns `None` both when the post does not exist and when it belongs
    /// to someone else.
    #[tracing::instrument(skip(self, dto))]
    pub async fn update_post(
        &self,
        post_id: i64,
        dto: PostDto,
        acting_user_id: &str,
    ) -> DomainResult<Option<PostDto>> {
        let scope = self.tx.begin(TxMode::ReadWrite).await?;

        let Some(mut post) = scope.posts().find_by_id(post_id).await? else {
            return Ok(None);
        };
        if !post.is_owned_by(acting_user_id) {
            tracing::warn!(owner = %post.user_id, "Update rejected: not the author");
            return Ok(None);
        }

        post.apply_edit(dto.title, dto.content);
        let saved = scope.posts().save(post).await?;
        scope.commit().await?;

        Ok(Some(saved.into()))
    }

    /// Delete a post as its author or as an admin.
    ///
    /// Fails only when the acting user does not exist; a missing post or a
    /// refused deletion yields `false`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_post(&self, post_id: i64, acting_user_id: &str) -> DomainResult<bool> {
        let scope = self.tx.begin(TxMode::ReadWrite).await?;

        let user = scope
            .users()
            .find_by_id(acting_user_id.to_string())
            .await?
            .ok_or_else(|| DomainError::invalid_argument("user does not exist"))?;

        let Some(post) = scope.posts().find_by_id(post_id).await? else {
            return Ok(false);
        };
        if !post.is_owned_by(&user.id) && !user.role.is_admin() {
            tracing::warn!(owner = %post.user_id, role = %user.role, "Delete rejected");
            return Ok(false);
        }

        scope.posts().delete(post_id).await?;
        scope.commit().await?;

        tracing::info!("Post deleted");
        Ok(true)
    }

    /// Fetch one page of posts. `page_number` is 1-based.
    ///
    /// Page numbers below one are passed through and rejected by
    /// [`PageRequest::of`].
    #[tracing::instrument(skip(self))]
    pub async fn find_paginated(&self, page_number: i64, page_size: i64) -> DomainResult<Page<Post>> {
        let request = PageRequest::of(page_number.saturating_sub(1), page_size)?;

        let scope = self.tx.begin(TxMode::ReadOnly).await?;
        let page = scope.posts().find_all_paged(request).await?;
        scope.commit().await?;

        Ok(page)
    }
}
