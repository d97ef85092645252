use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::http::extractor::{AdminUser, AuthUser, ValidId};
use crate::http::validation::ValidJson;
use crate::http::{ApiContext, Result};
use crate::models::profile::{Profile, ProfileInput};

// Guard chains per route:
//
//   GET    /api/profiles        auth
//   POST   /api/profiles        auth
//   GET    /api/profiles/:id    auth + id check
//   PUT    /api/profiles/:id    auth              (no admin gate, unlike posts)
//   DELETE /api/profiles/:id    auth + admin      (no id check, unlike posts)
//
// The two missing guards mirror the behavior existing clients were built
// against; see DESIGN.md before "fixing" either.
pub(crate) fn router() -> Router<ApiContext> {
    Router::new()
        .route("/api/profiles", get(list_profiles).post(create_profile))
        .route(
            "/api/profiles/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

async fn list_profiles(
    _auth_user: AuthUser,
    ctx: State<ApiContext>,
) -> Result<Json<Vec<Profile>>> {
    // Ordered by name; the ordering lives in the store query.
    let profiles = ctx.store.profile().list_profiles().await?;

    Ok(Json(profiles))
}

async fn create_profile(
    _auth_user: AuthUser,
    ctx: State<ApiContext>,
    ValidJson(input): ValidJson<ProfileInput>,
) -> Result<Json<Profile>> {
    let profile = ctx.store.profile().create_profile(input).await?;

    Ok(Json(profile))
}

async fn get_profile(
    _auth_user: AuthUser,
    ctx: State<ApiContext>,
    ValidId(id): ValidId,
) -> Result<Json<Profile>> {
    let profile = ctx.store.profile().profile_by_id(id).await?;

    Ok(Json(profile))
}

/// Full-field replace of a profile. Any authenticated user may do this.
async fn update_profile(
    _auth_user: AuthUser,
    ctx: State<ApiContext>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<ProfileInput>,
) -> Result<Json<Profile>> {
    // No id pre-check on this route: an id that isn't a record key surfaces
    // as an internal error, the same as any other store failure.
    let id = id
        .parse::<Uuid>()
        .map_err(|e| anyhow::anyhow!("malformed profile id in update: {e}"))?;

    let profile = ctx.store.profile().update_profile(id, input).await?;

    Ok(Json(profile))
}

async fn delete_profile(
    _admin: AdminUser,
    ctx: State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Profile>> {
    // No id pre-check on this route either.
    let id = id
        .parse::<Uuid>()
        .map_err(|e| anyhow::anyhow!("malformed profile id in delete: {e}"))?;

    let profile = ctx.store.profile().delete_profile(id).await?;

    Ok(Json(profile))
}
