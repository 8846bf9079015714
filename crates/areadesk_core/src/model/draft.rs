//! Typed create payloads for areas and folders.
//!
//! # Responsibility
//! - Normalize and validate user input before it can reach a gateway.
//! - Serialize into the `{ area: .. }` / `{ folder: .. }` request envelopes.
//!
//! # Invariants
//! - `display_name` is trimmed and never blank.
//! - `NewFolder::area` is trimmed and never blank.
//! - A client-chosen `uid` always matches the server UID rule.

use crate::model::ResourceName;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

static UID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,30}[a-zA-Z0-9])?$").expect("valid uid regex")
});

/// Returns whether `uid` is acceptable as a resource uid.
pub fn is_valid_uid(uid: &str) -> bool {
    UID_RE.is_match(uid)
}

/// Validation errors raised while building a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Display name is blank after trim.
    BlankDisplayName,
    /// Folder area reference is blank after trim.
    BlankArea,
    /// Client-chosen uid does not match the UID rule.
    InvalidUid(String),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankDisplayName => write!(f, "display name must not be blank"),
            Self::BlankArea => write!(f, "folder area must not be blank"),
            Self::InvalidUid(uid) => write!(f, "invalid uid: `{uid}`"),
        }
    }
}

impl Error for DraftError {}

/// Create payload for one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArea {
    display_name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ResourceName>,
}

impl NewArea {
    /// Creates a draft from a display name, trimming surrounding whitespace.
    pub fn new(display_name: impl Into<String>) -> Result<Self, DraftError> {
        Ok(Self {
            display_name: normalize_required(display_name.into(), DraftError::BlankDisplayName)?,
            description: String::new(),
            uid: None,
            parent: None,
        })
    }

    /// Sets the trimmed description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// Sets a client-chosen uid.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Result<Self, DraftError> {
        self.uid = Some(normalize_uid(uid.into())?);
        Ok(self)
    }

    /// Nests the new area under an existing one.
    pub fn with_parent(mut self, parent: impl Into<ResourceName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Create payload for one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    display_name: String,
    description: String,
    area: ResourceName,
    #[serde(skip_serializing_if = "Option::is_none")]
    uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ResourceName>,
}

impl NewFolder {
    /// Creates a draft under `area`. Both values are trimmed.
    pub fn new(
        display_name: impl Into<String>,
        area: impl Into<ResourceName>,
    ) -> Result<Self, DraftError> {
        let display_name =
            normalize_required(display_name.into(), DraftError::BlankDisplayName)?;
        let area = normalize_required(area.into(), DraftError::BlankArea)?;
        Ok(Self {
            display_name,
            description: String::new(),
            area,
            uid: None,
            parent: None,
        })
    }

    /// Sets the trimmed description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// Sets a client-chosen uid.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Result<Self, DraftError> {
        self.uid = Some(normalize_uid(uid.into())?);
        Ok(self)
    }

    /// Nests the new folder under an existing folder of the same area.
    pub fn with_parent(mut self, parent: impl Into<ResourceName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Request body of `POST /api/v1/areas`.
#[derive(Debug, Serialize)]
pub struct CreateAreaRequest<'a> {
    pub area: &'a NewArea,
}

/// Request body of `POST /api/v1/folders`.
#[derive(Debug, Serialize)]
pub struct CreateFolderRequest<'a> {
    pub folder: &'a NewFolder,
}

fn normalize_required(value: String, blank: DraftError) -> Result<String, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(blank);
    }
    Ok(trimmed.to_string())
}

fn normalize_uid(value: String) -> Result<String, DraftError> {
    let trimmed = value.trim();
    if !is_valid_uid(trimmed) {
        return Err(DraftError::InvalidUid(value));
    }
    Ok(trimmed.to_string())
}
