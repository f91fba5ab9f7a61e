use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::project_track;

/// One row of the `project_track` table.
///
/// Every column except `project_no` is optional free text. An empty string and
/// a missing value mean the same thing; use [`is_present`] to test for a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectRecord {
    pub project_no: i32,
    pub entry_date: Option<String>,
    pub client: Option<String>,
    pub project_name: Option<String>,
    pub category: Option<String>,
    pub scanned_by: Option<String>,
    pub target_delivery_date: Option<String>,
    pub actual_delivery_date: Option<String>,
    pub description: Option<String>,
    pub levels: Option<String>,
    pub dwg: Option<String>,
    pub template: Option<String>,
    pub revit_version: Option<String>,
    pub arch_emd: Option<String>,
    pub google_earth_link: Option<String>,
    pub mep_emd_tier: Option<String>,
    pub comments: Option<String>,
    pub file_sharing: Option<String>,
    pub scanning_date: Option<String>,
    pub pdf: Option<String>,
    pub attachments: Option<String>,
}

/// Returns true when a text column holds a value.
///
/// Whitespace-only strings count as present.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl ProjectRecord {
    /// A project is complete once it has an actual delivery date.
    pub fn is_complete(&self) -> bool {
        is_present(self.actual_delivery_date.as_deref())
    }

    /// Project name, falling back to `Project <no>` for unnamed rows.
    pub fn title(&self) -> String {
        match self.project_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Project {}", self.project_no),
        }
    }

    /// Looks up a text column by its database name.
    pub fn text(&self, column: &str) -> Option<&str> {
        let value = match column {
            "entry_date" => &self.entry_date,
            "client" => &self.client,
            "project_name" => &self.project_name,
            "category" => &self.category,
            "scanned_by" => &self.scanned_by,
            "target_delivery_date" => &self.target_delivery_date,
            "actual_delivery_date" => &self.actual_delivery_date,
            "description" => &self.description,
            "levels" => &self.levels,
            "dwg" => &self.dwg,
            "template" => &self.template,
            "revit_version" => &self.revit_version,
            "arch_emd" => &self.arch_emd,
            "google_earth_link" => &self.google_earth_link,
            "mep_emd_tier" => &self.mep_emd_tier,
            "comments" => &self.comments,
            "file_sharing" => &self.file_sharing,
            "scanning_date" => &self.scanning_date,
            "pdf" => &self.pdf,
            "attachments" => &self.attachments,
            _ => return None,
        };
        value.as_deref()
    }
}

impl From<project_track::Model> for ProjectRecord {
    fn from(model: project_track::Model) -> Self {
        ProjectRecord {
            project_no: model.project_no,
            entry_date: model.entry_date,
            client: model.client,
            project_name: model.project_name,
            category: model.category,
            scanned_by: model.scanned_by,
            target_delivery_date: model.target_delivery_date,
            actual_delivery_date: model.actual_delivery_date,
            description: model.description,
            levels: model.levels,
            dwg: model.dwg,
            template: model.template,
            revit_version: model.revit_version,
            arch_emd: model.arch_emd,
            google_earth_link: model.google_earth_link,
            mep_emd_tier: model.mep_emd_tier,
            comments: model.comments,
            file_sharing: model.file_sharing,
            scanning_date: model.scanning_date,
            pdf: model.pdf,
            attachments: model.attachments,
        }
    }
}

/// Text columns of a project, each optional.
///
/// Used as the body of a partial update, where `None` leaves the column
/// untouched and an empty string clears it. `project_no` is immutable and
/// has no field here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProjectChanges {
    pub entry_date: Option<String>,
    pub client: Option<String>,
    pub project_name: Option<String>,
    pub category: Option<String>,
    pub scanned_by: Option<String>,
    pub target_delivery_date: Option<String>,
    pub actual_delivery_date: Option<String>,
    pub description: Option<String>,
    pub levels: Option<String>,
    pub dwg: Option<String>,
    pub template: Option<String>,
    pub revit_version: Option<String>,
    pub arch_emd: Option<String>,
    pub google_earth_link: Option<String>,
    pub mep_emd_tier: Option<String>,
    pub comments: Option<String>,
    pub file_sharing: Option<String>,
    pub scanning_date: Option<String>,
    pub pdf: Option<String>,
    pub attachments: Option<String>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        *self == ProjectChanges::default()
    }
}

/// Payload for creating a project. The caller picks `project_no`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewProject {
    pub project_no: i32,
    #[serde(flatten)]
    pub fields: ProjectChanges,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_treats_empty_and_missing_alike() {
        assert!(!is_present(None));
        assert!(!is_present(Some("")));
        assert!(is_present(Some("x")));
        assert!(is_present(Some(" ")));
    }

    #[test]
    fn completion_follows_actual_delivery_date() {
        let mut record = ProjectRecord {
            project_no: 7,
            ..Default::default()
        };
        assert!(!record.is_complete());
        record.actual_delivery_date = Some(String::new());
        assert!(!record.is_complete());
        record.actual_delivery_date = Some("2024-03-01".to_string());
        assert!(record.is_complete());
    }

    #[test]
    fn title_falls_back_to_number() {
        let mut record = ProjectRecord {
            project_no: 42,
            ..Default::default()
        };
        assert_eq!(record.title(), "Project 42");
        record.project_name = Some("Tower B".to_string());
        assert_eq!(record.title(), "Tower B");
    }

    #[test]
    fn new_project_flattens_fields() {
        let body = serde_json::json!({
            "project_no": 12,
            "client": "Acme",
            "dwg": "yes"
        });
        let parsed: NewProject = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.project_no, 12);
        assert_eq!(parsed.fields.client.as_deref(), Some("Acme"));
        assert_eq!(parsed.fields.dwg.as_deref(), Some("yes"));
        assert!(parsed.fields.pdf.is_none());
    }

    #[test]
    fn empty_changes_are_detected() {
        assert!(ProjectChanges::default().is_empty());
        let changes = ProjectChanges {
            comments: Some("late".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
