//! The task item entity.

use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// A persisted task item.
///
/// Optional text fields that were never set (or were cleared by an update)
/// are `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Free-form category label.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl Item {
    /// Overwrite every mutable field with `draft` (no field-level merge).
    pub fn replace_with(&mut self, draft: ItemDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.kind = draft.kind;
        self.is_completed = draft.is_completed;
    }
}

/// The caller-supplied field set for create (candidate) and update (replacement).
///
/// An `id` in the incoming body is accepted and discarded: identity is only
/// ever minted by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Attach a store-assigned id.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            kind: self.kind,
            is_completed: self.is_completed,
        }
    }
}

/// Outcome of an update or delete against a specific id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// The record existed and the write was committed.
    Applied,
    /// No record has that id; nothing was written.
    NotFound,
}
