use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ProjectRecord;

/// Columns the project list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    EntryDate,
    ProjectNo,
    Client,
    ProjectName,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::EntryDate,
        SortKey::ProjectNo,
        SortKey::Client,
        SortKey::ProjectName,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            SortKey::EntryDate => "entry_date",
            SortKey::ProjectNo => "project_no",
            SortKey::Client => "client",
            SortKey::ProjectName => "project_name",
        }
    }

    fn compare(self, a: &ProjectRecord, b: &ProjectRecord) -> Ordering {
        match self {
            SortKey::ProjectNo => a.project_no.cmp(&b.project_no),
            _ => {
                // None sorts first, so missing values are the ascending minimum.
                let column = self.column_name();
                let left = a.text(column).filter(|v| !v.is_empty());
                let right = b.text(column).filter(|v| !v.is_empty());
                left.cmp(&right)
            }
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field `{0}`")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.column_name() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        self == SortDirection::Asc
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction `{0}`, expected `asc` or `desc`")]
pub struct UnknownSortDirection(pub String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(UnknownSortDirection(s.to_string())),
        }
    }
}

/// Sorts in place. Descending is the exact reverse of ascending.
pub fn sort_records(records: &mut [ProjectRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| key.compare(a, b));
    if !direction.is_ascending() {
        records.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(no: i32, client: Option<&str>, entry_date: Option<&str>) -> ProjectRecord {
        ProjectRecord {
            project_no: no,
            client: client.map(str::to_string),
            entry_date: entry_date.map(str::to_string),
            ..Default::default()
        }
    }

    fn numbers(records: &[ProjectRecord]) -> Vec<i32> {
        records.iter().map(|r| r.project_no).collect()
    }

    #[test]
    fn project_no_sorts_numerically() {
        let mut records = vec![record(10, None, None), record(9, None, None), record(100, None, None)];
        sort_records(&mut records, SortKey::ProjectNo, SortDirection::Asc);
        assert_eq!(numbers(&records), vec![9, 10, 100]);
    }

    #[test]
    fn descending_reverses_ascending() {
        let base = vec![
            record(4, None, None),
            record(1, None, None),
            record(3, None, None),
            record(2, None, None),
        ];
        let mut asc = base.clone();
        sort_records(&mut asc, SortKey::ProjectNo, SortDirection::Asc);
        let mut desc = base;
        sort_records(&mut desc, SortKey::ProjectNo, SortDirection::Desc);

        let mut reversed = numbers(&asc);
        reversed.reverse();
        assert_eq!(numbers(&desc), reversed);
    }

    #[test]
    fn missing_values_sort_first_ascending() {
        let mut records = vec![
            record(1, Some("Beta"), None),
            record(2, Some(""), None),
            record(3, Some("Acme"), None),
            record(4, None, None),
        ];
        sort_records(&mut records, SortKey::Client, SortDirection::Asc);
        let order = numbers(&records);
        assert_eq!(&order[2..], &[3, 1]);
        assert!(order[..2].contains(&2) && order[..2].contains(&4));
    }

    #[test]
    fn strings_compare_lexicographically() {
        let mut records = vec![
            record(1, None, Some("2024-02-01")),
            record(2, None, Some("2023-12-31")),
            record(3, None, Some("2024-01-15")),
        ];
        sort_records(&mut records, SortKey::EntryDate, SortDirection::Desc);
        assert_eq!(numbers(&records), vec![1, 3, 2]);
    }

    #[test]
    fn keys_parse_from_column_names() {
        assert_eq!("project_name".parse::<SortKey>(), Ok(SortKey::ProjectName));
        assert!("budget".parse::<SortKey>().is_err());
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("up".parse::<SortDirection>().is_err());
    }
}
