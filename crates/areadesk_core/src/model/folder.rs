//! Folder read model and list envelope.

use crate::model::ResourceName;
use serde::{Deserialize, Serialize};

/// Child entity nested under exactly one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Server-assigned resource name, unique across folders.
    pub name: ResourceName,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Owning area `name`.
    #[serde(default)]
    pub area: ResourceName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ResourceName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Folder {
    /// Returns whether this folder belongs to the given area.
    pub fn belongs_to(&self, area_name: &str) -> bool {
        self.area == area_name
    }
}

/// Response envelope of `GET /api/v1/folders`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoldersResponse {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}
