//! Project types for the Todoist API
//!
//! `Project` is the shape the provider schema is built against (the REST v2
//! layout). `ProjectV1` is what the Unified API actually returns; every
//! response passes through [`ProjectV1::into_project`].

use serde::{Deserialize, Serialize};

use super::color::ColorValue;

/// A Todoist project, as exposed to resource hosts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub comment_count: i64,
    pub color: String,
    pub is_shared: bool,
    pub order: i64,
    pub is_favorite: bool,
    pub is_inbox_project: bool,
    pub is_team_inbox: bool,
    pub view_style: String,
    pub url: String,
    pub parent_id: String,
}

/// Unified API project response (subset used by the provider).
///
/// Every field tolerates being missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectV1 {
    pub id: Option<String>,
    pub name: Option<String>,
    pub color: ColorValue,
    pub is_shared: Option<bool>,
    pub child_order: Option<i64>,
    pub is_favorite: Option<bool>,
    pub inbox_project: Option<bool>,
    pub is_team_inbox: Option<bool>,
    pub view_style: Option<String>,
    pub url: Option<String>,
    pub parent_id: Option<String>,
}

impl ProjectV1 {
    /// Translate the wire shape into the canonical project
    pub fn into_project(self) -> Project {
        Project {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            // Not reported by the Unified API
            comment_count: 0,
            color: self.color.resolve(),
            is_shared: self.is_shared.unwrap_or_default(),
            order: self.child_order.unwrap_or_default(),
            is_favorite: self.is_favorite.unwrap_or_default(),
            is_inbox_project: self.inbox_project.unwrap_or_default(),
            is_team_inbox: self.is_team_inbox.unwrap_or_default(),
            view_style: self.view_style.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            parent_id: self.parent_id.unwrap_or_default(),
        }
    }
}

impl From<ProjectV1> for Project {
    fn from(wire: ProjectV1) -> Self {
        wire.into_project()
    }
}

/// Request body for `POST /projects`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_style: Option<String>,
}

impl CreateProject {
    /// Create a payload for a project with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    pub fn with_view_style(mut self, view_style: impl Into<String>) -> Self {
        self.view_style = Some(view_style.into());
        self
    }
}

/// Request body for `POST /projects/{id}`.
///
/// `id` only selects the URL and is never part of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateProject {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_style: Option<String>,
}

impl UpdateProject {
    /// Create an empty update for the given project
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    pub fn with_view_style(mut self, view_style: impl Into<String>) -> Self {
        self.view_style = Some(view_style.into());
        self
    }

    /// True when no field besides the id is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.is_favorite.is_none()
            && self.view_style.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float_form_color_id_resolves_to_name() {
        let wire: ProjectV1 = serde_json::from_value(json!({"id": "1", "color": 37.0})).unwrap();
        assert_eq!(wire.into_project().color, "mint_green");
    }

    #[test]
    fn test_child_order_becomes_order() {
        let wire: ProjectV1 =
            serde_json::from_value(json!({"id": "9", "name": "Work", "child_order": 5})).unwrap();
        let project = wire.into_project();
        assert_eq!(project.order, 5);
        assert_eq!(project.id, "9");
        assert_eq!(project.name, "Work");
    }

    #[test]
    fn test_adapts_full_wire_object() {
        let wire: ProjectV1 = serde_json::from_value(json!({
            "id": "2203306141",
            "name": "Inbox",
            "color": 48,
            "is_shared": true,
            "child_order": 0,
            "is_favorite": true,
            "inbox_project": true,
            "is_team_inbox": false,
            "view_style": "list",
            "url": "https://todoist.com/showProject?id=2203306141",
            "parent_id": "220325187",
            "description": "ignored",
            "is_archived": false
        }))
        .unwrap();

        let project = Project::from(wire);
        assert_eq!(
            project,
            Project {
                id: "2203306141".into(),
                name: "Inbox".into(),
                comment_count: 0,
                color: "grey".into(),
                is_shared: true,
                order: 0,
                is_favorite: true,
                is_inbox_project: true,
                is_team_inbox: false,
                view_style: "list".into(),
                url: "https://todoist.com/showProject?id=2203306141".into(),
                parent_id: "220325187".into(),
            }
        );
    }

    #[test]
    fn test_missing_and_null_fields_become_zero_values() {
        let wire: ProjectV1 =
            serde_json::from_value(json!({"id": "1", "parent_id": null, "color": null})).unwrap();
        let project = wire.into_project();
        assert_eq!(project.parent_id, "");
        assert_eq!(project.color, "");
        assert_eq!(project.name, "");
        assert!(!project.is_favorite);
        assert_eq!(project.order, 0);
    }

    #[test]
    fn test_wrong_field_type_fails_to_decode() {
        let result = serde_json::from_value::<ProjectV1>(json!({"child_order": "first"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_payload_omits_unset_fields() {
        let payload = CreateProject::new("X");
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"name": "X"}));

        let payload = CreateProject::new("X")
            .with_parent_id("7")
            .with_color("red")
            .with_favorite(false)
            .with_view_style("board");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "X",
                "parent_id": "7",
                "color": "red",
                "is_favorite": false,
                "view_style": "board"
            })
        );
    }

    #[test]
    fn test_create_payload_keeps_empty_strings() {
        let payload = CreateProject::new("");
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"name": ""}));
    }

    #[test]
    fn test_update_payload_never_serializes_id() {
        let payload = UpdateProject::new("123").with_name("renamed");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"name": "renamed"})
        );
        assert!(!payload.is_empty());
        assert!(UpdateProject::new("123").is_empty());
        assert_eq!(serde_json::to_string(&UpdateProject::new("1")).unwrap(), "{}");
    }
}
