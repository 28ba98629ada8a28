mod params;
mod project;
mod project_id;
mod resource;
mod status;

pub use params::ListParams;
pub use project::{list_count, list_items, NamedRef, ProjectSummary};
pub use project_id::ProjectId;
pub use resource::{ReferenceList, SummaryDimension};
pub use status::ProjectStatus;
