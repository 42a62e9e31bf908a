use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse lifecycle class of a tracker status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    ToDo,
    InProgress,
    Done,
}

impl StatusCategory {
    /// Maps a raw tracker status onto its category. Unknown statuses map to `None`.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.trim().to_ascii_lowercase().as_str() {
            "to do" | "todo" | "open" | "backlog" | "reopened" | "selected for development" => {
                Some(StatusCategory::ToDo)
            }
            "in progress" | "code review" | "testing" | "in review" => {
                Some(StatusCategory::InProgress)
            }
            "done" | "closed" | "resolved" => Some(StatusCategory::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub id: String,
    pub project: String,
    pub assignee: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// First transition into an in-progress-class status, when the tracker reports one.
    pub started_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub story_points: Option<f64>,
    pub customer: Option<String>,
    pub labels: BTreeSet<String>,
}

impl Ticket {
    pub fn new(id: &str, project: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            project: project.to_string(),
            assignee: None,
            status: String::new(),
            created_at,
            started_at: None,
            resolved_at: None,
            story_points: None,
            customer: None,
            labels: BTreeSet::new(),
        }
    }

    pub fn status_category(&self) -> Option<StatusCategory> {
        StatusCategory::from_status(&self.status)
    }

    /// Resolution timestamp, if the ticket is resolved and the resolution does not
    /// predate creation.
    pub fn consistent_resolution(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
            .filter(|resolved_at| *resolved_at >= self.created_at)
    }

    /// Start of active work. Without a recorded start transition the ticket is
    /// considered started when it was created.
    pub fn cycle_start(&self) -> DateTime<Utc> {
        match self.started_at {
            Some(started_at) if started_at >= self.created_at => started_at,
            _ => self.created_at,
        }
    }

    /// Story points, ignoring negative estimates.
    pub fn story_point_value(&self) -> Option<f64> {
        self.story_points.filter(|points| *points >= 0.0)
    }
}
