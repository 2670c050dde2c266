//! # dex-service
//!
//! The integration pipeline. [`PokemonService`] drives
//! PokeAPI lookup → translation → store insert, lists and deletes stored
//! pokemon, and converges every component failure into a
//! [`ServiceError`] with a stable code.
//!
//! Each call is independent and holds no state between requests beyond the
//! store's connection pool. Dropping a returned future cancels the in-flight
//! work.

mod failure;

use dex_core::context::RequestContext;
use dex_core::entities::Pokemon;
use dex_core::errors::ServiceError;
use dex_db::PokedexDb;
use dex_db::error::DatabaseError;
use dex_source::{PokeApiClient, translate};

/// Outcome of listing the store. Both variants are successes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    Found(Vec<Pokemon>),
}

impl Listing {
    fn from_rows(rows: Vec<Pokemon>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Found(rows)
        }
    }

    /// Caller-facing summary line.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Empty => "No Pokemons found",
            Self::Found(_) => "Pokemons retrieved successfully",
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Pokemon> {
        match self {
            Self::Empty => Vec::new(),
            Self::Found(rows) => rows,
        }
    }
}

/// Orchestrates the PokeAPI client and the pokemon store.
#[derive(Debug, Clone)]
pub struct PokemonService {
    source: PokeApiClient,
    store: PokedexDb,
}

impl PokemonService {
    #[must_use]
    pub const fn new(source: PokeApiClient, store: PokedexDb) -> Self {
        Self { source, store }
    }

    #[must_use]
    pub const fn store(&self) -> &PokedexDb {
        &self.store
    }

    /// Look `name` up on PokeAPI, translate it and insert it.
    ///
    /// Validation happens before any network traffic: an unset base URL and
    /// a blank name are both invalid input.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an unset base URL or a blank name
    /// - `Api` when PokeAPI fails or rejects the lookup
    /// - `Conflict` when a pokemon with the same id is already stored
    /// - `Internal` for undecodable responses and other store failures
    pub async fn integrate(&self, ctx: &RequestContext, name: &str) -> Result<Pokemon, ServiceError> {
        if !self.source.is_configured() {
            return Err(ServiceError::invalid_input("PokeAPI base URL is not configured"));
        }
        if name.trim().is_empty() {
            return Err(ServiceError::invalid_input("Pokemon name must not be empty"));
        }

        let api = self.source.fetch(ctx, name).await.map_err(|error| {
            tracing::warn!(name, %error, "PokeAPI lookup failed");
            failure::from_source(error)
        })?;
        tracing::debug!(id = api.id, stats = api.stats.len(), "fetched pokemon");
        let pokemon = translate(api);

        match self.store.insert_pokemon(ctx, &pokemon).await {
            Ok(()) => {
                tracing::info!(id = pokemon.id, name = %pokemon.name, "integrated pokemon");
                Ok(pokemon)
            }
            Err(error @ DatabaseError::Conflict { .. }) => Err(ServiceError::conflict(
                format!("Pokemon with id {} already exists", pokemon.id),
                error,
            )),
            Err(error) => {
                tracing::error!(id = pokemon.id, %error, "saving pokemon failed");
                Err(failure::from_store(error, "Error saving pokemon to database"))
            }
        }
    }

    /// Every stored pokemon, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the store fails.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Listing, ServiceError> {
        tracing::debug!("listing pokemons");
        let rows = self.store.list_pokemons(ctx).await.map_err(|error| {
            tracing::error!(%error, "listing pokemons failed");
            failure::from_store(error, "Error getting pokemons from database")
        })?;
        Ok(Listing::from_rows(rows))
    }

    /// Delete by id and return what was deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no pokemon has that id and `Internal` for
    /// other store failures.
    pub async fn delete_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Pokemon, ServiceError> {
        match self.store.delete_pokemon_by_id(ctx, id).await {
            Ok(pokemon) => {
                tracing::info!(id, name = %pokemon.name, "deleted pokemon");
                Ok(pokemon)
            }
            Err(DatabaseError::NotFound { id }) => Err(ServiceError::not_found(format!(
                "Pokemon with id {id} not found"
            ))),
            Err(error) => {
                tracing::error!(id, %error, "deleting pokemon failed");
                Err(failure::from_store(error, "Error deleting pokemon"))
            }
        }
    }

    /// Number of stored pokemon.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the store fails.
    pub async fn count(&self, ctx: &RequestContext) -> Result<u64, ServiceError> {
        self.store
            .count_pokemons(ctx)
            .await
            .map_err(|error| failure::from_store(error, "Error counting pokemons"))
    }
}
