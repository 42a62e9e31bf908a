use chrono::TimeDelta;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::ticket::Ticket;

pub const DEFAULT_SLA_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaReport {
    /// Share of resolved tickets resolved within the window, in percent.
    pub sla_compliance: f64,
    /// Mean creation-to-resolution time of resolved tickets, in hours.
    pub average_resolution_time: f64,
    pub resolved_count: usize,
    pub compliant_count: usize,
}

impl SlaReport {
    fn empty() -> Self {
        Self {
            sla_compliance: 0.0,
            average_resolution_time: 0.0,
            resolved_count: 0,
            compliant_count: 0,
        }
    }
}

/// Evaluates resolved tickets against a resolution window measured from creation.
pub fn evaluate_sla(tickets: &[Ticket], window_days: i64) -> SlaReport {
    let Some(window) = TimeDelta::try_days(window_days).filter(|window| *window >= TimeDelta::zero())
    else {
        warn!(window_days, "invalid SLA window, reporting zeroed SLA metrics");
        return SlaReport::empty();
    };

    let mut resolved_count = 0usize;
    let mut compliant_count = 0usize;
    let mut total_hours = 0.0;

    for ticket in tickets {
        let Some(resolved_at) = ticket.resolved_at else {
            continue;
        };
        if resolved_at < ticket.created_at {
            warn!(
                ticket = %ticket.id,
                %resolved_at,
                created_at = %ticket.created_at,
                "ticket resolved before it was created, excluded from SLA"
            );
            continue;
        }

        let resolution_time = resolved_at - ticket.created_at;
        resolved_count += 1;
        if resolution_time <= window {
            compliant_count += 1;
        }
        total_hours += resolution_time.num_milliseconds() as f64 / 3_600_000.0;
    }

    if resolved_count == 0 {
        return SlaReport::empty();
    }

    debug!(resolved_count, compliant_count, "evaluated SLA");
    SlaReport {
        sla_compliance: compliant_count as f64 / resolved_count as f64 * 100.0,
        average_resolution_time: total_hours / resolved_count as f64,
        resolved_count,
        compliant_count,
    }
}
