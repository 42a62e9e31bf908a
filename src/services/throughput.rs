use tracing::{debug, warn};

use crate::domain::throughput::ThroughputPoint;
use crate::domain::ticket::Ticket;
use crate::services::time_buckets::{TimeBucket, bucket_index};

/// Counts created and resolved tickets per bucket.
///
/// The output has one point per bucket, in bucket order, including buckets
/// without any events. Events outside the bucketed range are ignored.
pub fn aggregate_throughput(tickets: &[Ticket], buckets: &[TimeBucket]) -> Vec<ThroughputPoint> {
    let mut points: Vec<ThroughputPoint> = buckets
        .iter()
        .map(|bucket| ThroughputPoint {
            date: bucket.date,
            created: 0,
            resolved: 0,
        })
        .collect();

    for ticket in tickets {
        if let Some(index) = bucket_index(buckets, ticket.created_at.date_naive()) {
            points[index].created += 1;
        }

        let Some(resolved_at) = ticket.resolved_at else {
            continue;
        };
        if resolved_at < ticket.created_at {
            warn!(
                ticket = %ticket.id,
                %resolved_at,
                created_at = %ticket.created_at,
                "ticket resolved before it was created, resolution not counted"
            );
            continue;
        }
        if let Some(index) = bucket_index(buckets, resolved_at.date_naive()) {
            points[index].resolved += 1;
        }
    }

    debug!(
        tickets = tickets.len(),
        buckets = buckets.len(),
        "aggregated throughput"
    );
    points
}
