use tracing::debug;

use crate::domain::throughput::VelocityPoint;
use crate::domain::ticket::{StatusCategory, Ticket};
use crate::services::time_buckets::{TimeBucket, bucket_index};

/// Derives the historical velocity series: story points resolved per bucket.
///
/// Buckets whose resolved tickets carry no story points fall back to the number
/// of resolved tickets. Tickets that were reopened (their current status is a
/// to-do or in-progress status) do not count even if they carry a resolution.
pub fn calculate_velocity_history(tickets: &[Ticket], buckets: &[TimeBucket]) -> Vec<VelocityPoint> {
    let mut story_points = vec![0.0_f64; buckets.len()];
    let mut resolved = vec![0usize; buckets.len()];

    let completed = tickets.iter().filter(|ticket| !is_reopened(ticket));
    for ticket in completed {
        let Some(resolved_at) = ticket.consistent_resolution() else {
            continue;
        };
        let Some(index) = bucket_index(buckets, resolved_at.date_naive()) else {
            continue;
        };
        resolved[index] += 1;
        story_points[index] += ticket.story_point_value().unwrap_or(0.0);
    }

    debug!(buckets = buckets.len(), "calculated velocity history");
    buckets
        .iter()
        .zip(story_points.into_iter().zip(resolved))
        .map(|(bucket, (points, count))| VelocityPoint {
            date: bucket.date,
            velocity: if points > 0.0 { points } else { count as f64 },
        })
        .collect()
}

fn is_reopened(ticket: &Ticket) -> bool {
    matches!(
        ticket.status_category(),
        Some(StatusCategory::ToDo) | Some(StatusCategory::InProgress)
    )
}
