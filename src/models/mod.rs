pub mod fields;
pub mod project;

pub use fields::{detail_sections, field_label, format_date, DetailField, DetailGroup, DetailSection};
pub use project::{is_present, NewProject, ProjectChanges, ProjectRecord};
