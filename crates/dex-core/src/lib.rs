//! # dex-core
//!
//! Core types shared by every Pokedex crate:
//! - The persisted [`entities::Pokemon`] record and its stat triples
//! - The closed error taxonomy ([`errors::ErrorCode`], [`errors::ServiceError`])
//! - [`context::RequestContext`], the deadline carried through every blocking call
//! - JSON response envelopes returned by the HTTP surface

pub mod context;
pub mod entities;
pub mod errors;
pub mod responses;
