//! # dex-source
//!
//! HTTP client for the external pokemon source (PokeAPI) and the translation
//! of its response shape into the persisted [`dex_core::entities::Pokemon`].
//!
//! One lookup is one request: there are no retries. The request timeout is
//! the caller's remaining deadline when the [`RequestContext`] has one, and
//! the configured default (10 s) otherwise.

pub mod model;
pub mod translate;

mod error;
mod http;

pub use error::SourceError;
pub use model::{ApiPokemon, ApiStat, NamedResource};
pub use translate::translate;

use std::time::Duration;

use dex_config::PokeApiConfig;
use dex_core::context::RequestContext;

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for looking up pokemon by name or id.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    default_timeout: Duration,
}

impl PokeApiClient {
    /// Create a client from the `pokeapi` config section.
    ///
    /// An empty base URL is accepted here and reported by [`Self::fetch`],
    /// so a misconfigured deployment still starts and answers with a typed
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Client`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &PokeApiConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim().to_string(),
            default_timeout: config.timeout(),
        })
    }

    /// Whether a base URL was configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the lookup URL: base URL + `/` + trimmed, lowercased,
    /// percent-encoded name.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotConfigured`] without a base URL,
    /// [`SourceError::EmptyName`] for a blank name, and
    /// [`SourceError::InvalidUrl`] if the result does not parse as a URL.
    pub fn lookup_url(&self, name: &str) -> Result<reqwest::Url, SourceError> {
        if !self.is_configured() {
            return Err(SourceError::NotConfigured);
        }
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return Err(SourceError::EmptyName);
        }
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&key)
        );
        reqwest::Url::parse(&raw).map_err(|e| SourceError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// Fetch one pokemon by name (case-insensitive) or numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the URL cannot be built, the deadline has
    /// passed, the request fails, PokeAPI answers with a non-success status,
    /// or the body does not decode as [`ApiPokemon`].
    pub async fn fetch(&self, ctx: &RequestContext, name: &str) -> Result<ApiPokemon, SourceError> {
        let url = self.lookup_url(name)?;

        let timeout = ctx.remaining().unwrap_or(self.default_timeout);
        if timeout.is_zero() {
            return Err(SourceError::DeadlineExceeded);
        }

        tracing::debug!(%url, ?timeout, "fetching pokemon");
        let resp = self.http.get(url).timeout(timeout).send().await?;
        let resp = http::check_status(resp).await?;
        let body = http::read_body(resp, http::MAX_BODY).await?;

        serde_json::from_slice(&body).map_err(SourceError::Decode)
    }
}
