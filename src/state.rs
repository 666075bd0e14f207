//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::LinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub access_sender: mpsc::Sender<AccessEvent>,
    /// Prefix used to build `short_url` values, e.g. `https://s.example.com`.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        access_sender: mpsc::Sender<AccessEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
            access_sender,
            base_url: base_url.into(),
        }
    }
}
