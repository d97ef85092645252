use sqlx::PgPool;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

pub mod post;
pub mod profile;

use post::{DynPostCtrl, PostController};
use profile::{DynProfileCtrl, ProfileController};

pub type DynStore = Arc<dyn StoreTrait + Send + Sync>;

/// Hands out the per-resource persistence controllers.
///
/// Handlers only ever see this trait, so tests can swap the whole store for a mock.
#[cfg_attr(test, automock)]
pub trait StoreTrait {
    fn post(&self) -> DynPostCtrl;
    fn profile(&self) -> DynProfileCtrl;
}

#[derive(Clone)]
pub struct Store {
    post: PostController,
    profile: ProfileController,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        let post = PostController::new(pool.clone());
        let profile = ProfileController::new(pool);
        Self { post, profile }
    }
}

impl StoreTrait for Store {
    fn post(&self) -> DynPostCtrl {
        Arc::new(self.post.clone())
    }

    fn profile(&self) -> DynProfileCtrl {
        Arc::new(self.profile.clone())
    }
}
