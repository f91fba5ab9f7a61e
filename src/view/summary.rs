use serde::Serialize;
use utoipa::ToSchema;

use super::filter::distinct_values;
use crate::models::{is_present, ProjectRecord};

/// How many projects the dashboard lists as recent.
pub const RECENT_LIMIT: usize = 5;

/// Tallies over the full record set, ignoring any search or filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Summary {
    pub total: usize,
    pub with_dwg: usize,
    pub with_pdf: usize,
    pub active_clients: usize,
    pub completed: usize,
}

impl Summary {
    pub fn from_records(records: &[ProjectRecord]) -> Self {
        let count = |pick: fn(&ProjectRecord) -> Option<&str>| {
            records.iter().filter(|r| is_present(pick(r))).count()
        };
        Summary {
            total: records.len(),
            with_dwg: count(|r| r.dwg.as_deref()),
            with_pdf: count(|r| r.pdf.as_deref()),
            active_clients: distinct_values(records.iter().map(|r| r.client.as_deref())).len(),
            completed: records.iter().filter(|r| r.is_complete()).count(),
        }
    }

    /// `part` as a whole-number percentage of `total`, rounded half up.
    pub fn percent(&self, part: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((part as f64 / self.total as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Complete,
    InProgress,
}

impl ProjectStatus {
    pub fn of(record: &ProjectRecord) -> Self {
        if record.is_complete() {
            ProjectStatus::Complete
        } else {
            ProjectStatus::InProgress
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecentProject {
    pub project_no: i32,
    pub title: String,
    pub client: Option<String>,
    pub entry_date: Option<String>,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Dashboard {
    pub summary: Summary,
    pub dwg_percent: u32,
    pub completed_percent: u32,
    pub recent: Vec<RecentProject>,
}

impl Dashboard {
    /// `records` are expected newest first, as the store returns them for
    /// `entry_date` descending; the first five become the recent list.
    pub fn from_records(records: Vec<ProjectRecord>) -> Self {
        let summary = Summary::from_records(&records);
        let recent = records
            .iter()
            .take(RECENT_LIMIT)
            .map(|r| RecentProject {
                project_no: r.project_no,
                title: r.title(),
                client: r.client.clone().filter(|c| !c.is_empty()),
                entry_date: r.entry_date.clone().filter(|d| !d.is_empty()),
                status: ProjectStatus::of(r),
            })
            .collect();

        Dashboard {
            dwg_percent: summary.percent(summary.with_dwg),
            completed_percent: summary.percent(summary.completed),
            summary,
            recent,
        }
    }
}
