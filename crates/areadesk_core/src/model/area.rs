//! Area read model and list envelope.

use crate::model::ResourceName;
use serde::{Deserialize, Serialize};

/// Top-level grouping entity.
///
/// Only `name` is mandatory on the wire; everything else falls back to an
/// empty value so partially populated server payloads still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    /// Server-assigned resource name, unique across areas.
    pub name: ResourceName,
    #[serde(default)]
    pub uid: String,
    /// User-facing label.
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// RFC 3339 text as emitted by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// Parent area name for nested areas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ResourceName>,
}

/// Response envelope of `GET /api/v1/areas`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAreasResponse {
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Area, ListAreasResponse};

    #[test]
    fn area_decodes_with_only_name() {
        let area: Area = serde_json::from_str(r#"{"name":"areas/1"}"#).unwrap();
        assert_eq!(area.name, "areas/1");
        assert!(area.display_name.is_empty());
        assert_eq!(area.parent, None);
    }

    #[test]
    fn list_response_defaults_missing_areas_to_empty() {
        let response: ListAreasResponse = serde_json::from_str("{}").unwrap();
        assert!(response.areas.is_empty());
        assert_eq!(response.next_page_token, None);
    }

    #[test]
    fn area_uses_camel_case_wire_names() {
        let area: Area = serde_json::from_str(
            r#"{"name":"areas/w","displayName":"Work","createTime":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(area.display_name, "Work");
        assert_eq!(area.create_time.as_deref(), Some("2024-01-01T00:00:00Z"));
    }
}
