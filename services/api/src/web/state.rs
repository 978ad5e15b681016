//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use studyroom_core::ports::SnapshotService;

use crate::config::Config;

/// The shared application state, created once at startup and passed to all
/// handlers. Handlers are stateless reads over whatever snapshot the hosting
/// layer pushed last.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<dyn SnapshotService>,
    pub config: Arc<Config>,
}
