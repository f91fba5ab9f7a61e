use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::project::ProjectRecord;

/// Tabs of the project detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DetailGroup {
    Details,
    Files,
    Specs,
    Notes,
}

impl DetailGroup {
    pub const ALL: [DetailGroup; 4] = [
        DetailGroup::Details,
        DetailGroup::Files,
        DetailGroup::Specs,
        DetailGroup::Notes,
    ];

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            DetailGroup::Details => &[
                "entry_date",
                "project_no",
                "client",
                "project_name",
                "actual_delivery_date",
                "scanned_by",
                "scanning_date",
            ],
            DetailGroup::Files => &["dwg", "template", "pdf", "file_sharing", "google_earth_link"],
            DetailGroup::Specs => &["description", "levels", "revit_version", "arch_emd", "mep_emd_tier"],
            DetailGroup::Notes => &["comments"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DetailField {
    #[schema(value_type = String)]
    pub column: &'static str,
    pub label: String,
    pub value: Option<String>,
    /// Human-readable rendering of `value`.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DetailSection {
    pub group: DetailGroup,
    pub fields: Vec<DetailField>,
}

/// Splits a record into the detail view's tabs.
pub fn detail_sections(record: &ProjectRecord) -> Vec<DetailSection> {
    DetailGroup::ALL
        .iter()
        .map(|&group| DetailSection {
            group,
            fields: group
                .columns()
                .iter()
                .map(|&column| {
                    let value = if column == "project_no" {
                        Some(record.project_no.to_string())
                    } else {
                        record.text(column).map(str::to_string)
                    };
                    let display = if column.ends_with("_date") {
                        format_date(value.as_deref())
                    } else {
                        display_text(value.as_deref())
                    };
                    DetailField {
                        column,
                        label: field_label(column),
                        value,
                        display,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Display label for a column name.
pub fn field_label(column: &str) -> String {
    let known = match column {
        "entry_date" => "Entry Date",
        "project_no" => "Project No.",
        "project_name" => "Project Name",
        "scanned_by" => "Scanned By",
        "target_delivery_date" => "Target Delivery Date",
        "actual_delivery_date" => "Actual Delivery Date",
        "dwg" => "DWG",
        "pdf" => "PDF",
        "revit_version" => "Revit Version",
        "arch_emd" => "Arch EMD",
        "mep_emd_tier" => "MEP EMD & Tier",
        "google_earth_link" => "Google Earth Link",
        _ => return title_case(column),
    };
    known.to_string()
}

fn title_case(column: &str) -> String {
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const MISSING: &str = "—";

fn display_text(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Renders `2024-01-05` as `Jan 5, 2024`. Unparseable text is returned as-is.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return MISSING.to_string();
    };
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    match parsed {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}
