//! Embedding generation for chunks and queries.
//!
//! Provider-agnostic: the pipeline only sees the [`Embedder`] trait, so the
//! real HTTP-backed provider can be swapped for a deterministic test double.

pub mod provider;
pub mod providers;

pub use provider::{create_embedder, Embedder};
