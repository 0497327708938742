use std::sync::Arc;

use sharder_runpod::PodApi;

use crate::config::Config;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pods: Arc<dyn PodApi>,
    pub sessions: SessionStore,
}
