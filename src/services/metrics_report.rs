use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::granularity::Granularity;
use crate::domain::throughput::{ThroughputPoint, VelocityPoint};
use crate::domain::ticket::Ticket;
use crate::services::cumulative_flow::{CfdPoint, build_cumulative_flow_from, opening_backlog};
use crate::services::duration_stats::{DurationKind, DurationStats, calculate_duration_stats};
use crate::services::engine_config::EngineConfig;
use crate::services::forecast_types::{ForecastResult, SprintForecast};
use crate::services::productivity::{
    MetricsSummary, ProductivityRow, productivity_per_assignee, productivity_per_project,
    summarize_tickets,
};
use crate::services::sla::{SlaReport, evaluate_sla};
use crate::services::smoothing::{SeriesPoint, smooth_throughput};
use crate::services::throughput::aggregate_throughput;
use crate::services::time_buckets::bucket_range;
use crate::services::velocity_calculation::calculate_velocity_history;
use crate::services::velocity_forecast::{forecast_sprint, forecast_velocity};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: Granularity,
    pub summary: MetricsSummary,
    pub throughput: Vec<ThroughputPoint>,
    pub cumulative_flow: Vec<CfdPoint>,
    pub throughput_overlay: Option<Vec<SeriesPoint>>,
    pub cycle_time: DurationStats,
    pub lead_time: DurationStats,
    pub sla: SlaReport,
    pub productivity_per_assignee: Vec<ProductivityRow>,
    pub productivity_per_project: Vec<ProductivityRow>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: Granularity,
    pub history: Vec<VelocityPoint>,
    pub forecast: ForecastResult,
    pub sprint: SprintForecast,
}

/// Computes every dashboard metric for tickets over `start..=end`.
///
/// Summary, duration, SLA and productivity figures cover tickets created within
/// the range. The time series count every event falling in the range, and the
/// cumulative flow starts from the backlog open at `start`.
pub fn build_metrics_report(
    tickets: &[Ticket],
    config: &EngineConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> MetricsReport {
    let buckets = bucket_range(start, end, config.granularity);
    let throughput = aggregate_throughput(tickets, &buckets);
    let cumulative_flow = build_cumulative_flow_from(&throughput, opening_backlog(tickets, start));
    let throughput_overlay = config
        .smoothing
        .as_ref()
        .map(|smoothing| smooth_throughput(&throughput, smoothing));
    let scoped = created_within(tickets, start, end);

    MetricsReport {
        start_date: start,
        end_date: end,
        granularity: config.granularity,
        summary: summarize_tickets(&scoped),
        throughput,
        cumulative_flow,
        throughput_overlay,
        cycle_time: calculate_duration_stats(&scoped, DurationKind::CycleTime),
        lead_time: calculate_duration_stats(&scoped, DurationKind::LeadTime),
        sla: evaluate_sla(&scoped, config.sla_window_days),
        productivity_per_assignee: productivity_per_assignee(&scoped),
        productivity_per_project: productivity_per_project(&scoped),
    }
}

fn created_within(tickets: &[Ticket], start: NaiveDate, end: NaiveDate) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|ticket| (start..=end).contains(&ticket.created_at.date_naive()))
        .cloned()
        .collect()
}

/// Derives the velocity history over `start..=end` and forecasts beyond `end`.
pub fn build_forecast_report(
    tickets: &[Ticket],
    config: &EngineConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> ForecastReport {
    let buckets = bucket_range(start, end, config.granularity);
    let history = calculate_velocity_history(tickets, &buckets);
    let forecast_config = config.forecast_config();

    ForecastReport {
        start_date: start,
        end_date: end,
        granularity: config.granularity,
        forecast: forecast_velocity(&history, &forecast_config, end),
        sprint: forecast_sprint(&history, &forecast_config, end),
        history,
    }
}
