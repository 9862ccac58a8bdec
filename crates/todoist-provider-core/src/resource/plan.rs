//! Desired project state and its mapping onto request payloads

use serde::{Deserialize, Serialize};

use crate::client::{CreateProject, Project, UpdateProject};

/// Desired state of a project resource, as configured by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_style: Option<String>,
}

impl ProjectPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Payload creating a project in this state
    pub fn to_create(&self) -> CreateProject {
        CreateProject {
            name: Some(self.name.clone()),
            parent_id: self.parent_id.clone(),
            color: self.color.clone(),
            is_favorite: self.is_favorite,
            view_style: self.view_style.clone(),
        }
    }

    /// Payload moving `prior` to this state, carrying only differing fields.
    ///
    /// Attributes left unset in the plan are not managed and never sent.
    pub fn to_update(&self, prior: &Project) -> UpdateProject {
        let mut update = UpdateProject::new(prior.id.clone());

        if self.name != prior.name {
            update.name = Some(self.name.clone());
        }
        if let Some(color) = &self.color {
            if *color != prior.color {
                update.color = Some(color.clone());
            }
        }
        if let Some(is_favorite) = self.is_favorite {
            if is_favorite != prior.is_favorite {
                update.is_favorite = Some(is_favorite);
            }
        }
        if let Some(view_style) = &self.view_style {
            if *view_style != prior.view_style {
                update.view_style = Some(view_style.clone());
            }
        }

        update
    }

    /// Whether reaching this state from `prior` needs a new project.
    ///
    /// The update endpoint cannot move a project, so a parent change forces
    /// replacement.
    pub fn requires_replace(&self, prior: &Project) -> bool {
        match &self.parent_id {
            Some(parent_id) => *parent_id != prior.parent_id,
            None => false,
        }
    }
}
