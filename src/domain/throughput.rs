use chrono::NaiveDate;
use serde::Serialize;

/// Tickets created and resolved within one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThroughputPoint {
    pub date: NaiveDate,
    pub created: usize,
    pub resolved: usize,
}

/// Work completed within one period, in story points (or tickets when no
/// estimates are recorded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VelocityPoint {
    pub date: NaiveDate,
    pub velocity: f64,
}
