//! `todoapi-core` — the task item domain.
//!
//! This crate contains **pure domain** types (no storage, no HTTP).

pub mod error;
pub mod id;
pub mod item;

pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use item::{Item, ItemDraft, Mutation};
