use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{is_present, ProjectRecord};

/// Exact-match column filters. An empty or missing value means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Filters {
    pub client: Option<String>,
    pub revit_version: Option<String>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        !is_present(self.client.as_deref()) && !is_present(self.revit_version.as_deref())
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        matches_exact(self.client.as_deref(), record.client.as_deref())
            && matches_exact(self.revit_version.as_deref(), record.revit_version.as_deref())
    }
}

fn matches_exact(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        Some(wanted) if !wanted.is_empty() => actual == Some(wanted),
        _ => true,
    }
}

/// Case-insensitive substring search over client, project name, entry date
/// and the project number.
pub fn matches_search(record: &ProjectRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let term = search.to_lowercase();
    let text_hit = [
        record.client.as_deref(),
        record.project_name.as_deref(),
        record.entry_date.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|value| value.to_lowercase().contains(&term));

    text_hit || record.project_no.to_string().contains(&term)
}

/// Non-empty distinct values of a column, in first-seen order.
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(no: i32, client: &str, name: &str) -> ProjectRecord {
        ProjectRecord {
            project_no: no,
            client: Some(client.to_string()).filter(|c| !c.is_empty()),
            project_name: Some(name.to_string()).filter(|n| !n.is_empty()),
            entry_date: Some("2024-05-17".to_string()),
            revit_version: Some("2023".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let r = record(1, "Acme Corp", "North Wing");
        assert!(matches_search(&r, "acme"));
        assert!(matches_search(&r, "NORTH"));
        assert!(matches_search(&r, "05-17"));
        assert!(!matches_search(&r, "south"));
    }

    #[test]
    fn search_matches_project_number_digits() {
        let r = record(1204, "", "");
        assert!(matches_search(&r, "1204"));
        assert!(matches_search(&r, "20"));
        assert!(!matches_search(&r, "999"));
    }

    #[test]
    fn missing_fields_never_match() {
        let r = ProjectRecord {
            project_no: 5,
            ..Default::default()
        };
        assert!(!matches_search(&r, "acme"));
        assert!(matches_search(&r, ""));
    }

    #[test]
    fn filters_are_exact_and_case_sensitive() {
        let r = record(1, "Acme", "x");
        let mut filters = Filters {
            client: Some("Acme".to_string()),
            revit_version: None,
        };
        assert!(filters.matches(&r));

        filters.client = Some("acme".to_string());
        assert!(!filters.matches(&r));

        filters.client = Some(String::new());
        filters.revit_version = Some("2023".to_string());
        assert!(filters.matches(&r));

        filters.revit_version = Some("2024".to_string());
        assert!(!filters.matches(&r));
    }

    #[test]
    fn empty_filters_constrain_nothing() {
        let filters = Filters {
            client: Some(String::new()),
            revit_version: None,
        };
        assert!(filters.is_empty());
        assert!(filters.matches(&ProjectRecord::default()));
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let values = [Some("Beta"), None, Some("Acme"), Some(""), Some("Beta")];
        assert_eq!(distinct_values(values), vec!["Beta", "Acme"]);
    }
}
