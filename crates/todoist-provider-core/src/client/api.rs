//! Trait abstracting the project operations.
//!
//! Lets resource hosts run against the real `TodoistClient` or an in-memory
//! implementation without changing the lifecycle code.

use async_trait::async_trait;

use crate::error::Result;

use super::transport::{RawResponse, TodoistClient};
use super::types::{CreateProject, Project, UpdateProject};

/// The four project operations a resource host needs
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Fetch a project by id
    async fn get_project(&self, project_id: &str) -> Result<Project>;

    /// Create a new project
    async fn create_project(&self, payload: &CreateProject) -> Result<Project>;

    /// Update the fields set in `payload`
    async fn update_project(&self, payload: &UpdateProject) -> Result<Project>;

    /// Delete a project, returning status and raw body
    async fn delete_project(&self, project_id: &str) -> Result<RawResponse>;
}

#[async_trait]
impl ProjectApi for TodoistClient {
    async fn get_project(&self, project_id: &str) -> Result<Project> {
        TodoistClient::get_project(self, project_id).await
    }

    async fn create_project(&self, payload: &CreateProject) -> Result<Project> {
        TodoistClient::create_project(self, payload).await
    }

    async fn update_project(&self, payload: &UpdateProject) -> Result<Project> {
        TodoistClient::update_project(self, payload).await
    }

    async fn delete_project(&self, project_id: &str) -> Result<RawResponse> {
        TodoistClient::delete_project(self, project_id).await
    }
}
