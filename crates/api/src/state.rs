use std::sync::Arc;

use wedsite_core::session::AdminSession;
use wedsite_publishing::{ContentService, ContentStore, DraftManager, DraftStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the stores are shared trait objects.
#[derive(Clone)]
pub struct AppState {
    /// Live content read by the public site.
    pub content: Arc<dyn ContentStore>,
    /// Versioned page drafts.
    pub drafts: Arc<dyn DraftStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn content_service(&self) -> ContentService {
        ContentService::new(Arc::clone(&self.content))
    }

    /// A draft manager acting on behalf of `session`.
    pub fn draft_manager(&self, session: AdminSession) -> DraftManager {
        DraftManager::new(
            Arc::clone(&self.content),
            Arc::clone(&self.drafts),
            Some(session),
        )
    }
}
