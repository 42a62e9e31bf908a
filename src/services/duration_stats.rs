use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::ticket::Ticket;
use crate::services::percentiles::value_or_zero;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Which interval of a ticket's life is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    /// From start of work (or creation, without a recorded start) to resolution.
    CycleTime,
    /// From creation to resolution.
    LeadTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationPoint {
    pub ticket_id: String,
    pub duration_days: f64,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub points: Vec<DurationPoint>,
    pub average_days: f64,
    pub p50_days: f64,
    pub p85_days: f64,
    pub p95_days: f64,
}

impl DurationStats {
    fn empty() -> Self {
        Self {
            points: Vec::new(),
            average_days: 0.0,
            p50_days: 0.0,
            p85_days: 0.0,
            p95_days: 0.0,
        }
    }
}

/// Computes per-ticket durations and their summary for resolved tickets.
///
/// Points are ordered by resolution time, then ticket id. Tickets with
/// inconsistent timestamps are skipped with a warning.
pub fn calculate_duration_stats(tickets: &[Ticket], kind: DurationKind) -> DurationStats {
    let mut points: Vec<DurationPoint> = tickets
        .iter()
        .filter_map(|ticket| duration_point(ticket, kind))
        .collect();

    if points.is_empty() {
        return DurationStats::empty();
    }

    points.sort_by(|a, b| {
        a.resolved_at
            .cmp(&b.resolved_at)
            .then_with(|| a.ticket_id.cmp(&b.ticket_id))
    });

    let mut durations: Vec<f64> = points.iter().map(|point| point.duration_days).collect();
    durations.sort_by(f64::total_cmp);
    let average_days = durations.iter().sum::<f64>() / durations.len() as f64;

    debug!(?kind, points = points.len(), "calculated duration stats");
    DurationStats {
        average_days,
        p50_days: value_or_zero(&durations, 50.0),
        p85_days: value_or_zero(&durations, 85.0),
        p95_days: value_or_zero(&durations, 95.0),
        points,
    }
}

fn duration_point(ticket: &Ticket, kind: DurationKind) -> Option<DurationPoint> {
    let resolved_at = ticket.resolved_at?;
    if resolved_at < ticket.created_at {
        warn!(
            ticket = %ticket.id,
            %resolved_at,
            created_at = %ticket.created_at,
            "ticket resolved before it was created, skipped"
        );
        return None;
    }

    let start = match kind {
        DurationKind::LeadTime => ticket.created_at,
        DurationKind::CycleTime => {
            if let Some(started_at) = ticket.started_at {
                if started_at < ticket.created_at {
                    warn!(
                        ticket = %ticket.id,
                        %started_at,
                        "ticket started before it was created, using creation time"
                    );
                } else if started_at > resolved_at {
                    warn!(
                        ticket = %ticket.id,
                        %started_at,
                        %resolved_at,
                        "ticket started after it was resolved, skipped"
                    );
                    return None;
                }
            }
            ticket.cycle_start()
        }
    };

    Some(DurationPoint {
        ticket_id: ticket.id.clone(),
        duration_days: fractional_days(resolved_at - start),
        resolved_at,
    })
}

fn fractional_days(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}
