//! Project endpoints

use reqwest::Method;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::transport::{RawResponse, TodoistClient};
use super::types::{CreateProject, Project, ProjectV1, UpdateProject};

impl TodoistClient {
    /// Fetch a project by id.
    ///
    /// Any non-success status (including 404) is returned as an API error.
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        info!(project_id = %project_id, "Reading project");

        let request = self.request(Method::GET, &format!("/projects/{}", project_id));
        let wire: ProjectV1 = self.send_json(request).await?;
        let project = wire.into_project();

        debug!(project = ?project, "Project read");
        Ok(project)
    }

    /// Create a project. Unset payload fields are not sent.
    pub async fn create_project(&self, payload: &CreateProject) -> Result<Project> {
        let body = serde_json::to_string(payload).map_err(Error::EncodeError)?;
        info!(payload = %body, "Creating project");

        let request = self.request(Method::POST, "/projects").body(body);
        let wire: ProjectV1 = self.send_json(request).await?;
        let project = wire.into_project();

        debug!(project = ?project, "Project created");
        Ok(project)
    }

    /// Update a project's set fields; the server merges them into the
    /// existing project.
    pub async fn update_project(&self, payload: &UpdateProject) -> Result<Project> {
        let project_id = payload.id.as_deref().ok_or(Error::MissingProjectId)?;
        let body = serde_json::to_string(payload).map_err(Error::EncodeError)?;
        info!(project_id = %project_id, payload = %body, "Updating project");

        let request = self
            .request(Method::POST, &format!("/projects/{}", project_id))
            .body(body);
        let wire: ProjectV1 = self.send_json(request).await?;
        let project = wire.into_project();

        debug!(project = ?project, "Project updated");
        Ok(project)
    }

    /// Delete a project, returning the undecoded response.
    ///
    /// The server answers 200 or 204; which codes count as deleted is left
    /// to the caller.
    pub async fn delete_project(&self, project_id: &str) -> Result<RawResponse> {
        info!(project_id = %project_id, "Deleting project");

        let request = self.request(Method::DELETE, &format!("/projects/{}", project_id));
        self.send(request).await
    }
}
