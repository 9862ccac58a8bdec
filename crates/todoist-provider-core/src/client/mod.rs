//! Todoist Unified API client
//!
//! Covers the project lifecycle only:
//! - Authenticated request transport
//! - Wire-to-canonical project adaptation
//! - Legacy color id resolution

mod api;
pub mod color;
mod projects;
mod transport;
mod types;

pub use api::ProjectApi;
pub use color::{ColorValue, color_name_for_id, known_color_names};
pub use transport::{
    DEFAULT_TIMEOUT_SECS, RawResponse, TODOIST_BASE_URL, TodoistClient, TodoistClientBuilder,
};
pub use types::{CreateProject, Project, ProjectV1, UpdateProject};
