//! In-memory `ProjectApi` for tests.
//!
//! Mirrors the server's observable behavior: unknown ids answer 404 with a
//! JSON error body, updates merge only the fields that are set.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::client::{CreateProject, Project, ProjectApi, RawResponse, UpdateProject};
use crate::error::{Error, Result};

/// Fake project API backed by a map
pub struct FakeProjectApi {
    projects: RwLock<HashMap<String, Project>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
    delete_status: AtomicU16,
}

impl FakeProjectApi {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            calls: AtomicUsize::new(0),
            delete_status: AtomicU16::new(204),
        }
    }

    /// Seed a project directly, bypassing the API
    pub async fn insert(&self, project: Project) {
        self.projects
            .write()
            .await
            .insert(project.id.clone(), project);
    }

    /// Number of API calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Status code returned by successful deletes
    pub fn set_delete_status(&self, status: u16) {
        self.delete_status.store(status, Ordering::SeqCst);
    }

    fn not_found() -> Error {
        Error::ApiError {
            status: 404,
            body: r#"{"error":"not found"}"#.to_string(),
        }
    }

    fn record_call(&self, operation: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(operation, "[FakeProjectApi] call");
    }
}

impl Default for FakeProjectApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectApi for FakeProjectApi {
    async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.record_call("get_project");
        self.projects
            .read()
            .await
            .get(project_id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_project(&self, payload: &CreateProject) -> Result<Project> {
        self.record_call("create_project");
        let mut projects = self.projects.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let project = Project {
            id: id.clone(),
            name: payload.name.clone().unwrap_or_default(),
            color: payload.color.clone().unwrap_or_else(|| "charcoal".to_string()),
            order: projects.len() as i64,
            is_favorite: payload.is_favorite.unwrap_or(false),
            view_style: payload.view_style.clone().unwrap_or_else(|| "list".to_string()),
            url: format!("https://app.todoist.com/app/project/{}", id),
            parent_id: payload.parent_id.clone().unwrap_or_default(),
            ..Default::default()
        };

        projects.insert(id, project.clone());
        Ok(project)
    }

    async fn update_project(&self, payload: &UpdateProject) -> Result<Project> {
        let project_id = payload.id.as_deref().ok_or(Error::MissingProjectId)?;
        self.record_call("update_project");

        let mut projects = self.projects.write().await;
        let project = projects.get_mut(project_id).ok_or_else(Self::not_found)?;

        if let Some(name) = &payload.name {
            project.name = name.clone();
        }
        if let Some(color) = &payload.color {
            project.color = color.clone();
        }
        if let Some(is_favorite) = payload.is_favorite {
            project.is_favorite = is_favorite;
        }
        if let Some(view_style) = &payload.view_style {
            project.view_style = view_style.clone();
        }

        Ok(project.clone())
    }

    async fn delete_project(&self, project_id: &str) -> Result<RawResponse> {
        self.record_call("delete_project");
        self.projects
            .write()
            .await
            .remove(project_id)
            .ok_or_else(Self::not_found)?;

        Ok(RawResponse {
            status: self.delete_status.load(Ordering::SeqCst),
            body: String::new(),
        })
    }
}
