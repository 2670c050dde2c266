//! Shared handler state.

use std::time::Duration;

use dex_core::context::RequestContext;
use dex_service::PokemonService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: PokemonService,
    pub request_timeout: Duration,
}

impl AppState {
    #[must_use]
    pub const fn new(service: PokemonService, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// A fresh context bounded by the configured per-request timeout.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
