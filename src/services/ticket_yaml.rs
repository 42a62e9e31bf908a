use std::collections::BTreeSet;
use std::io;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ticket::Ticket;

#[derive(Error, Debug)]
pub enum TicketYamlError {
    #[error("failed to read ticket file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse ticket file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("missing ticket id")]
    MissingTicketId,
    #[error("invalid timestamp for ticket {ticket}: {value}")]
    InvalidTimestamp { ticket: String, value: String },
}

#[derive(Deserialize)]
struct TicketRecord {
    id: String,
    #[serde(default)]
    project: String,
    assignee: Option<String>,
    #[serde(default)]
    status: String,
    created_at: String,
    started_at: Option<String>,
    resolved_at: Option<String>,
    story_points: Option<f64>,
    customer: Option<String>,
    labels: Option<LabelsRecord>,
}

/// Labels either as a list or as a comma-delimited string such as `",bug,backend,"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelsRecord {
    List(Vec<String>),
    Delimited(String),
}

impl LabelsRecord {
    fn into_set(self) -> BTreeSet<String> {
        let labels = match self {
            LabelsRecord::List(values) => values,
            LabelsRecord::Delimited(text) => text.split(',').map(str::to_string).collect(),
        };
        labels
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect()
    }
}

pub fn load_tickets_from_yaml_file(path: &str) -> Result<Vec<Ticket>, TicketYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_tickets_from_yaml_str(&contents)
}

/// Parses a YAML (or JSON) list of tickets.
pub fn deserialize_tickets_from_yaml_str(input: &str) -> Result<Vec<Ticket>, TicketYamlError> {
    let records: Vec<TicketRecord> = serde_yaml::from_str(input)?;
    records.into_iter().map(ticket_from_record).collect()
}

fn ticket_from_record(record: TicketRecord) -> Result<Ticket, TicketYamlError> {
    if record.id.trim().is_empty() {
        return Err(TicketYamlError::MissingTicketId);
    }

    let created_at = parse_timestamp(&record.id, &record.created_at)?;
    let mut ticket = Ticket::new(&record.id, &record.project, created_at);
    ticket.started_at = parse_timestamp_opt(&record.id, record.started_at.as_deref())?;
    ticket.resolved_at = parse_timestamp_opt(&record.id, record.resolved_at.as_deref())?;
    ticket.assignee = record.assignee.filter(|assignee| !assignee.is_empty());
    ticket.status = record.status;
    ticket.story_points = record.story_points;
    ticket.customer = record.customer.filter(|customer| !customer.is_empty());
    ticket.labels = record.labels.map(LabelsRecord::into_set).unwrap_or_default();
    Ok(ticket)
}

fn parse_timestamp_opt(
    ticket: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, TicketYamlError> {
    match value {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse_timestamp(ticket, text).map(Some),
    }
}

/// Accepts RFC 3339, the tracker's `2026-01-12T10:13:04.983+0100` form and
/// plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(ticket: &str, value: &str) -> Result<DateTime<Utc>, TicketYamlError> {
    let text = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(timestamp) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| TicketYamlError::InvalidTimestamp {
            ticket: ticket.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;
    use chrono::TimeZone;

    #[test]
    fn parses_full_ticket_records() {
        let yaml = r#"
- id: ABC-1
  project: ABC
  assignee: alice
  status: Done
  created_at: 2024-01-01T09:00:00Z
  started_at: 2024-01-02
  resolved_at: 2024-01-03T10:13:04.983+0100
  story_points: 3
  customer: ACME
  labels: [bug, backend]
- id: ABC-2
  project: ABC
  status: To Do
  created_at: "2024-01-02"
  labels: ",frontend,,ux,"
"#;

        let tickets = deserialize_tickets_from_yaml_str(yaml).unwrap();

        assert_eq!(tickets.len(), 2);
        let first = &tickets[0];
        assert_eq!(first.id, "ABC-1");
        assert_eq!(first.assignee.as_deref(), Some("alice"));
        assert_eq!(first.created_at, at(2024, 1, 1, 9));
        assert_eq!(first.started_at, Some(at(2024, 1, 2, 0)));
        assert_eq!(
            first.resolved_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 3, 9, 13, 4).unwrap() + chrono::Duration::milliseconds(983))
        );
        assert_eq!(first.story_points, Some(3.0));
        assert_eq!(first.customer.as_deref(), Some("ACME"));
        assert!(first.labels.contains("bug") && first.labels.contains("backend"));

        let second = &tickets[1];
        assert_eq!(second.resolved_at, None);
        assert_eq!(second.assignee, None);
        let labels: Vec<&str> = second.labels.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["frontend", "ux"]);
    }

    #[test]
    fn parses_json_input() {
        let json = r#"[{"id": "ABC-1", "project": "ABC", "status": "Done",
            "created_at": "2024-01-01T00:00:00Z", "resolved_at": "2024-01-02T00:00:00Z"}]"#;

        let tickets = deserialize_tickets_from_yaml_str(json).unwrap();

        assert_eq!(tickets[0].resolved_at, Some(at(2024, 1, 2, 0)));
    }

    #[test]
    fn rejects_invalid_timestamps() {
        let yaml = "- id: ABC-1\n  created_at: yesterday\n";

        let error = deserialize_tickets_from_yaml_str(yaml).expect_err("expected timestamp error");

        assert!(matches!(
            error,
            TicketYamlError::InvalidTimestamp { ref ticket, .. } if ticket == "ABC-1"
        ));
    }

    #[test]
    fn rejects_missing_ids() {
        let yaml = "- id: ' '\n  created_at: 2024-01-01\n";

        let error = deserialize_tickets_from_yaml_str(yaml).expect_err("expected id error");

        assert!(matches!(error, TicketYamlError::MissingTicketId));
    }
}
