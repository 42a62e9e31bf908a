use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::domain::throughput::ThroughputPoint;
use crate::domain::ticket::Ticket;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CfdPoint {
    pub date: NaiveDate,
    pub open: usize,
    pub done: usize,
}

/// Builds the cumulative flow series from an ordered throughput series.
pub fn build_cumulative_flow(throughput: &[ThroughputPoint]) -> Vec<CfdPoint> {
    build_cumulative_flow_from(throughput, 0)
}

/// Builds the cumulative flow series on top of `opening_backlog` tickets that
/// were already open when the series starts.
///
/// `done` counts resolutions within the series only. A negative open count
/// (more resolutions than known created work) is clamped to zero.
pub fn build_cumulative_flow_from(
    throughput: &[ThroughputPoint],
    opening_backlog: usize,
) -> Vec<CfdPoint> {
    let mut cum_created = opening_backlog;
    let mut cum_done = 0usize;

    throughput
        .iter()
        .map(|point| {
            cum_created += point.created;
            cum_done += point.resolved;
            if cum_done > cum_created {
                warn!(
                    date = %point.date,
                    cum_created,
                    cum_done,
                    "more tickets resolved than created, open count clamped to zero"
                );
            }
            CfdPoint {
                date: point.date,
                open: cum_created.saturating_sub(cum_done),
                done: cum_done,
            }
        })
        .collect()
}

/// Number of tickets created before `start` that were still unresolved on it.
pub fn opening_backlog(tickets: &[Ticket], start: NaiveDate) -> usize {
    tickets
        .iter()
        .filter(|ticket| ticket.created_at.date_naive() < start)
        .filter(|ticket| {
            ticket
                .consistent_resolution()
                .is_none_or(|resolved_at| resolved_at.date_naive() >= start)
        })
        .count()
}
