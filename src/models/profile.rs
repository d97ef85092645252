use crate::http::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, derive(Debug, Clone, PartialEq))]
#[derive(Serialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub bio: String,
}

/// Client-supplied fields for creating or replacing a profile.
#[cfg_attr(test, derive(Debug, Clone, PartialEq))]
#[derive(Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(length(
        min = 2,
        max = 30,
        message = "\"name\" length must be between 2 and 30 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 5,
        max = 55,
        message = "\"location\" length must be between 5 and 55 characters"
    ))]
    pub location: String,
    #[validate(length(
        min = 10,
        max = 2000,
        message = "\"bio\" length must be between 10 and 2000 characters"
    ))]
    pub bio: String,
}

#[derive(Clone)]
pub struct ProfileController {
    pool: PgPool,
}

impl ProfileController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub type DynProfileCtrl = Arc<dyn ProfileCtrlTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileCtrlTrait {
    async fn list_profiles(&self) -> Result<Vec<Profile>>;
    async fn profile_by_id(&self, id: Uuid) -> Result<Profile>;
    async fn create_profile(&self, input: ProfileInput) -> Result<Profile>;
    async fn update_profile(&self, id: Uuid, input: ProfileInput) -> Result<Profile>;
    async fn delete_profile(&self, id: Uuid) -> Result<Profile>;
}

const NOT_FOUND: &str = "The profile with the given ID was not found";

#[async_trait]
impl ProfileCtrlTrait for ProfileController {
    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(
            "select id, name, location, bio from profile order by name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn profile_by_id(&self, id: Uuid) -> Result<Profile> {
        sqlx::query_as::<_, Profile>("select id, name, location, bio from profile where id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound(NOT_FOUND))
    }

    async fn create_profile(&self, input: ProfileInput) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            "insert into profile (name, location, bio) values ($1, $2, $3) \
             returning id, name, location, bio",
        )
        .bind(input.name)
        .bind(input.location)
        .bind(input.bio)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn update_profile(&self, id: Uuid, input: ProfileInput) -> Result<Profile> {
        sqlx::query_as::<_, Profile>(
            "update profile set name = $1, location = $2, bio = $3 where id = $4 \
             returning id, name, location, bio",
        )
        .bind(input.name)
        .bind(input.location)
        .bind(input.bio)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound(NOT_FOUND))
    }

    async fn delete_profile(&self, id: Uuid) -> Result<Profile> {
        sqlx::query_as::<_, Profile>(
            "delete from profile where id = $1 returning id, name, location, bio",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound(NOT_FOUND))
    }
}
