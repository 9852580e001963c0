//! Note record, creation draft, and partial updates.

use super::{NoteDomainError, parse_tags};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteId(String);

impl NoteId {
    /// Creates a note identifier from an existing value.
    ///
    /// # Errors
    ///
    /// Returns [`NoteDomainError::EmptyIdentifier`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, NoteDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(NoteDomainError::EmptyIdentifier);
        }
        Ok(Self(raw))
    }

    /// Creates a note identifier from a generated UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NoteId {
    type Error = NoteDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NoteId> for String {
    fn from(id: NoteId) -> Self {
        id.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A titled note with free-form tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note from a draft.
    #[must_use]
    pub fn new(id: NoteId, draft: NoteDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            tags: draft.tags,
            created_at,
        }
    }

    /// Returns the note identifier.
    #[must_use]
    pub const fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the tags in the order they were entered.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merges the fields present in `patch`, returning whether anything
    /// changed.
    pub fn apply(&mut self, patch: &NotePatch) -> bool {
        let mut changed = false;
        if let Some(title) = &patch.title
            && *title != self.title
        {
            title.clone_into(&mut self.title);
            changed = true;
        }
        if let Some(description) = &patch.description
            && *description != self.description
        {
            description.clone_into(&mut self.description);
            changed = true;
        }
        if let Some(tags) = &patch.tags
            && *tags != self.tags
        {
            tags.clone_into(&mut self.tags);
            changed = true;
        }
        changed
    }
}

/// Content of a note that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    description: String,
    tags: Vec<String>,
}

impl NoteDraft {
    /// Creates a draft without tags.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags: Vec::new(),
        }
    }

    /// Sets tags from comma-separated input, normalised by [`parse_tags`].
    #[must_use]
    pub fn with_tags(mut self, raw: &str) -> Self {
        self.tags = parse_tags(raw);
        self
    }
}

/// Partial update for a note; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
}

impl NotePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the body text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the tags from comma-separated input, normalised by
    /// [`parse_tags`].
    #[must_use]
    pub fn with_tags(mut self, raw: &str) -> Self {
        self.tags = Some(parse_tags(raw));
        self
    }
}
