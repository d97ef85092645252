use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::http::extractor::{AdminUser, AuthUser, ValidId};
use crate::http::validation::ValidJson;
use crate::http::{ApiContext, Error, Result};
use crate::models::post::{Post, PostInput};

// Guard chains per route:
//
//   GET    /api/posts        auth
//   POST   /api/posts        auth
//   GET    /api/posts/:id    auth + id check
//   PUT    /api/posts/:id    auth + admin
//   DELETE /api/posts/:id    auth + admin + id check
pub(crate) fn router() -> Router<ApiContext> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
}

async fn list_posts(_auth_user: AuthUser, ctx: State<ApiContext>) -> Result<Json<Vec<Post>>> {
    // Newest first; the ordering lives in the store query.
    let posts = ctx.store.post().list_posts().await?;

    Ok(Json(posts))
}

async fn create_post(
    _auth_user: AuthUser,
    ctx: State<ApiContext>,
    ValidJson(input): ValidJson<PostInput>,
) -> Result<Json<Post>> {
    let post = ctx.store.post().create_post(input).await?;

    Ok(Json(post))
}

async fn get_post(
    _auth_user: AuthUser,
    ctx: State<ApiContext>,
    ValidId(id): ValidId,
) -> Result<Json<Post>> {
    let post = ctx.store.post().post_by_id(id).await?;

    Ok(Json(post))
}

/// Full-field replace of a post. Admins only.
async fn update_post(
    _admin: AdminUser,
    ctx: State<ApiContext>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<PostInput>,
) -> Result<Json<Post>> {
    // The body is validated before the id is even looked at; an id that
    // doesn't parse as a record key then reads the same as an absent record.
    let id = id
        .parse::<Uuid>()
        .map_err(|_| Error::NotFound("The post with the given ID was not found"))?;

    let post = ctx.store.post().update_post(id, input).await?;

    Ok(Json(post))
}

async fn delete_post(
    _admin: AdminUser,
    ctx: State<ApiContext>,
    ValidId(id): ValidId,
) -> Result<Json<Post>> {
    let post = ctx.store.post().delete_post(id).await?;

    Ok(Json(post))
}
