use crate::config::Config;
use crate::models::DynStore;
use std::sync::Arc;

/// Shared state for the whole API: the parsed configuration and the
/// persistence controllers behind their trait object.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<Config>,
    pub store: DynStore,
}
