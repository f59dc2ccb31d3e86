//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use storywave_shared::{PageResponse, PostDto};

use crate::middleware::acting_user::ActingUser;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict the listing to titles containing this text.
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    user: ActingUser,
    body: web::Json<PostDto>,
) -> AppResult<HttpResponse> {
    let created = state.posts.create_post(body.into_inner(), user.id()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/posts[?title=]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let posts = match query.into_inner().title {
        Some(keyword) => state.posts.get_posts_by_title_containing(&keyword).await?,
        None => state.posts.get_all_posts().await?,
    };
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/page?page=&size=
///
/// `page` is 1-based.
pub async fn page_posts(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.find_paginated(query.page, query.size).await?;

    Ok(HttpResponse::Ok().json(PageResponse {
        page: page.page + 1,
        size: page.size,
        total_items: page.total_items,
        total_pages: page.total_pages,
        items: page.items.into_iter().map(PostDto::from).collect(),
    }))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .get_post_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{id}
///
/// Someone else's post is reported exactly like a missing one.
pub async fn update_post(
    state: web::Data<AppState>,
    user: ActingUser,
    path: web::Path<i64>,
    body: web::Json<PostDto>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .update_post(id, body.into_inner(), user.id())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    user: ActingUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if state.posts.delete_post(id, user.id()).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::Forbidden(format!("post {id} cannot be deleted")))
    }
}

/// GET /api/users/{id}/posts
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.get_posts_by_user(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}
