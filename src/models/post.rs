use crate::http::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, derive(Debug, Clone, PartialEq))]
#[derive(Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub story: String,
    pub author: String,
}

/// Client-supplied fields for creating or replacing a post.
///
/// `date` is deliberately absent: it is stamped when the record is first
/// stored and never touched again.
#[cfg_attr(test, derive(Debug, Clone, PartialEq))]
#[derive(Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "\"title\" length must be between 1 and 100 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 1,
        max = 4000,
        message = "\"story\" length must be between 1 and 4000 characters"
    ))]
    pub story: String,
    #[validate(length(
        min = 1,
        max = 30,
        message = "\"author\" length must be between 1 and 30 characters"
    ))]
    pub author: String,
}

#[derive(Clone)]
pub struct PostController {
    pool: PgPool,
}

impl PostController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub type DynPostCtrl = Arc<dyn PostCtrlTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostCtrlTrait {
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn post_by_id(&self, id: Uuid) -> Result<Post>;
    async fn create_post(&self, input: PostInput) -> Result<Post>;
    async fn update_post(&self, id: Uuid, input: PostInput) -> Result<Post>;
    async fn delete_post(&self, id: Uuid) -> Result<Post>;
}

const NOT_FOUND: &str = "The post with the given ID was not found";

#[async_trait]
impl PostCtrlTrait for PostController {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "select id, title, date, story, author from post order by date desc",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn post_by_id(&self, id: Uuid) -> Result<Post> {
        sqlx::query_as::<_, Post>("select id, title, date, story, author from post where id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound(NOT_FOUND))
    }

    async fn create_post(&self, input: PostInput) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            "insert into post (title, date, story, author) values ($1, $2, $3, $4) \
             returning id, title, date, story, author",
        )
        .bind(input.title)
        .bind(OffsetDateTime::now_utc())
        .bind(input.story)
        .bind(input.author)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Full-field replace; `date` keeps its creation-time value.
    async fn update_post(&self, id: Uuid, input: PostInput) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "update post set title = $1, story = $2, author = $3 where id = $4 \
             returning id, title, date, story, author",
        )
        .bind(input.title)
        .bind(input.story)
        .bind(input.author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound(NOT_FOUND))
    }

    async fn delete_post(&self, id: Uuid) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "delete from post where id = $1 returning id, title, date, story, author",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound(NOT_FOUND))
    }
}
