use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::ticket::Ticket;

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn build_open_ticket(id: &str, created_at: DateTime<Utc>) -> Ticket {
    let mut ticket = Ticket::new(id, "ABC", created_at);
    ticket.status = "To Do".to_string();
    ticket
}

pub fn build_resolved_ticket(
    id: &str,
    created_at: DateTime<Utc>,
    resolved_at: DateTime<Utc>,
) -> Ticket {
    let mut ticket = Ticket::new(id, "ABC", created_at);
    ticket.status = "Done".to_string();
    ticket.resolved_at = Some(resolved_at);
    ticket
}

pub fn build_done_ticket(
    id: &str,
    points: f64,
    started_at: DateTime<Utc>,
    resolved_at: DateTime<Utc>,
) -> Ticket {
    let mut ticket = build_resolved_ticket(id, started_at, resolved_at);
    ticket.started_at = Some(started_at);
    ticket.story_points = Some(points);
    ticket
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected {expected}, but got {actual}"
    );
}
