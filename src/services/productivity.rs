use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ticket::{StatusCategory, Ticket};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub total_tickets: usize,
    pub tickets_created: usize,
    pub tickets_resolved: usize,
    pub tickets_in_progress: usize,
    /// Resolved share of all tickets, in percent.
    pub resolution_rate: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProductivityRow {
    pub key: String,
    pub tickets_created: usize,
    pub tickets_resolved: usize,
    pub avg_story_points: f64,
    pub total_story_points: f64,
}

pub fn summarize_tickets(tickets: &[Ticket]) -> MetricsSummary {
    let total_tickets = tickets.len();
    let tickets_resolved = tickets
        .iter()
        .filter(|ticket| ticket.consistent_resolution().is_some())
        .count();
    let tickets_in_progress = tickets
        .iter()
        .filter(|ticket| ticket.status_category() == Some(StatusCategory::InProgress))
        .count();

    MetricsSummary {
        total_tickets,
        tickets_created: total_tickets,
        tickets_resolved,
        tickets_in_progress,
        resolution_rate: tickets_resolved as f64 / total_tickets.max(1) as f64 * 100.0,
    }
}

/// Productivity per assignee, sorted by assignee. Unassigned tickets are skipped.
pub fn productivity_per_assignee(tickets: &[Ticket]) -> Vec<ProductivityRow> {
    group_productivity(tickets, |ticket| ticket.assignee.as_deref())
}

/// Productivity per project, sorted by project.
pub fn productivity_per_project(tickets: &[Ticket]) -> Vec<ProductivityRow> {
    group_productivity(tickets, |ticket| Some(ticket.project.as_str()))
}

#[derive(Default)]
struct GroupTotals {
    created: usize,
    resolved: usize,
    estimated: usize,
    story_points: f64,
}

fn group_productivity<'a, F>(tickets: &'a [Ticket], key_of: F) -> Vec<ProductivityRow>
where
    F: Fn(&'a Ticket) -> Option<&'a str>,
{
    let mut groups: BTreeMap<&str, GroupTotals> = BTreeMap::new();
    for ticket in tickets {
        let Some(key) = key_of(ticket) else {
            continue;
        };
        let totals = groups.entry(key).or_default();
        totals.created += 1;
        if ticket.consistent_resolution().is_some() {
            totals.resolved += 1;
        }
        if let Some(points) = ticket.story_point_value() {
            totals.estimated += 1;
            totals.story_points += points;
        }
    }

    groups
        .into_iter()
        .map(|(key, totals)| ProductivityRow {
            key: key.to_string(),
            tickets_created: totals.created,
            tickets_resolved: totals.resolved,
            avg_story_points: if totals.estimated == 0 {
                0.0
            } else {
                totals.story_points / totals.estimated as f64
            },
            total_story_points: totals.story_points,
        })
        .collect()
}
