//! Todoist Provider Core Library
//!
//! This crate provides the pieces a resource host needs to manage Todoist
//! projects:
//! - Todoist Unified API client (authenticated transport, project endpoints)
//! - Wire shape adaptation, including legacy color id resolution
//! - Resource and data source lifecycle over the project operations
//! - Configuration with file persistence

pub mod client;
pub mod config;
pub mod error;
pub mod resource;


pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{CreateProject, Project, ProjectApi, TodoistClient, UpdateProject};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::resource::ProjectPlan;
}
