//! Project resource and data source lifecycle
//!
//! What a provider host runs for each plan/apply step on top of the four
//! project operations. Status code interpretation lives here, not in the
//! client: a 404 on read or delete means the project is already gone.

pub mod fake;
mod plan;

pub use fake::FakeProjectApi;
pub use plan::ProjectPlan;

use tracing::{info, warn};

use crate::client::{Project, ProjectApi};
use crate::error::{Error, Result};

const STATUS_OK: u16 = 200;
const STATUS_NO_CONTENT: u16 = 204;
const STATUS_NOT_FOUND: u16 = 404;

/// Create a project matching the plan
pub async fn create<A: ProjectApi + ?Sized>(api: &A, plan: &ProjectPlan) -> Result<Project> {
    let project = api.create_project(&plan.to_create()).await?;
    info!(project_id = %project.id, "Project resource created");
    Ok(project)
}

/// Refresh a project's state.
///
/// Returns `None` when the project no longer exists, so the host can drop it
/// from state.
pub async fn read<A: ProjectApi + ?Sized>(api: &A, project_id: &str) -> Result<Option<Project>> {
    match api.get_project(project_id).await {
        Ok(project) => Ok(Some(project)),
        Err(e) if e.status() == Some(STATUS_NOT_FOUND) => {
            warn!(project_id = %project_id, "Project not found, removing from state");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Move an existing project to the planned state.
///
/// Sends only attributes that differ from `prior`; when nothing differs no
/// request is made and `prior` is returned as-is.
pub async fn update<A: ProjectApi + ?Sized>(
    api: &A,
    prior: &Project,
    plan: &ProjectPlan,
) -> Result<Project> {
    if prior.id.is_empty() {
        return Err(Error::MissingProjectId);
    }
    if plan.requires_replace(prior) {
        return Err(Error::InvalidInput(format!(
            "parent_id of project {} cannot change in place ({:?} -> {:?}); the project must be replaced",
            prior.id, prior.parent_id, plan.parent_id
        )));
    }

    let payload = plan.to_update(prior);
    if payload.is_empty() {
        info!(project_id = %prior.id, "Project resource unchanged");
        return Ok(prior.clone());
    }

    let project = api.update_project(&payload).await?;
    info!(project_id = %project.id, "Project resource updated");
    Ok(project)
}

/// Delete a project.
///
/// 200 and 204 count as deleted; a 404 means it was already gone.
pub async fn delete<A: ProjectApi + ?Sized>(api: &A, project_id: &str) -> Result<()> {
    match api.delete_project(project_id).await {
        Ok(response) if matches!(response.status, STATUS_OK | STATUS_NO_CONTENT) => {
            info!(project_id = %project_id, status = response.status, "Project resource deleted");
            Ok(())
        }
        Ok(response) => Err(Error::ApiError {
            status: response.status,
            body: response.body,
        }),
        Err(e) if e.status() == Some(STATUS_NOT_FOUND) => {
            warn!(project_id = %project_id, "Project already deleted");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Data source read: the project must exist
pub async fn read_data_source<A: ProjectApi + ?Sized>(api: &A, project_id: &str) -> Result<Project> {
    api.get_project(project_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_read() {
        let api = FakeProjectApi::new();
        let plan = ProjectPlan {
            color: Some("mint_green".into()),
            ..ProjectPlan::new("X")
        };

        let created = create(&api, &plan).await.unwrap();
        assert_eq!(created.name, "X");
        assert_eq!(created.color, "mint_green");

        let read_back = read(&api, &created.id).await.unwrap();
        assert_eq!(read_back, Some(created));
    }

    #[tokio::test]
    async fn test_read_missing_project_is_none() {
        let api = FakeProjectApi::new();
        assert_eq!(read(&api, "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_data_source_missing_project_errors() {
        let api = FakeProjectApi::new();
        let err = read_data_source(&api, "nope").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_data_source_reads_existing_project() {
        let api = FakeProjectApi::new();
        api.insert(Project {
            id: "2203306141".into(),
            name: "Inbox".into(),
            color: "grey".into(),
            is_inbox_project: true,
            view_style: "list".into(),
            ..Default::default()
        })
        .await;

        let project = read_data_source(&api, "2203306141").await.unwrap();
        assert_eq!(project.name, "Inbox");
        assert_eq!(project.color, "grey");
        assert!(project.is_inbox_project);
        assert_eq!(api.call_count(), 1);

        let refreshed = read(&api, "2203306141").await.unwrap();
        assert_eq!(refreshed, Some(project));
    }

    #[tokio::test]
    async fn test_update_sends_only_changes() {
        let api = FakeProjectApi::new();
        let created = create(&api, &ProjectPlan::new("Home")).await.unwrap();

        let plan = ProjectPlan {
            is_favorite: Some(true),
            ..ProjectPlan::new("Home")
        };
        let updated = update(&api, &created, &plan).await.unwrap();
        assert!(updated.is_favorite);
        assert_eq!(updated.name, "Home");
    }

    #[tokio::test]
    async fn test_update_without_changes_makes_no_call() {
        let api = FakeProjectApi::new();
        let created = create(&api, &ProjectPlan::new("Home")).await.unwrap();
        let calls = api.call_count();

        let result = update(&api, &created, &ProjectPlan::new("Home")).await.unwrap();
        assert_eq!(result, created);
        assert_eq!(api.call_count(), calls);
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let api = FakeProjectApi::new();
        let err = update(&api, &Project::default(), &ProjectPlan::new("X"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingProjectId));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_rejects_parent_change() {
        let api = FakeProjectApi::new();
        let created = create(&api, &ProjectPlan::new("Child")).await.unwrap();
        let plan = ProjectPlan {
            parent_id: Some("999".into()),
            ..ProjectPlan::new("Child")
        };

        let err = update(&api, &created, &plan).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_accepts_200_and_204() {
        let api = FakeProjectApi::new();

        let first = create(&api, &ProjectPlan::new("A")).await.unwrap();
        delete(&api, &first.id).await.unwrap();

        api.set_delete_status(200);
        let second = create(&api, &ProjectPlan::new("B")).await.unwrap();
        delete(&api, &second.id).await.unwrap();

        assert_eq!(read(&api, &first.id).await.unwrap(), None);
        assert_eq!(read(&api, &second.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_rejects_other_success_codes() {
        let api = FakeProjectApi::new();
        api.set_delete_status(202);
        let project = create(&api, &ProjectPlan::new("A")).await.unwrap();

        let err = delete(&api, &project.id).await.unwrap_err();
        assert_eq!(err.status(), Some(202));
    }

    #[tokio::test]
    async fn test_delete_missing_project_is_ok() {
        let api = FakeProjectApi::new();
        assert!(delete(&api, "gone").await.is_ok());
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let api: Box<dyn ProjectApi> = Box::new(FakeProjectApi::new());
        let created = create(api.as_ref(), &ProjectPlan::new("Dyn")).await.unwrap();
        assert_eq!(read_data_source(api.as_ref(), &created.id).await.unwrap().name, "Dyn");
    }
}
