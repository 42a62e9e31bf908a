use crate::services::duration_stats::DurationStats;
use crate::services::metrics_report::{ForecastReport, MetricsReport};

pub fn format_metrics_report(report: &MetricsReport) -> String {
    let mut lines = Vec::new();
    lines.push("Metrics Report".to_string());
    lines.push(format!(
        "Period: {} to {} ({})",
        report.start_date, report.end_date, report.granularity
    ));
    lines.push(format!("Tickets: {}", report.summary.total_tickets));
    lines.push(format!("Resolved: {}", report.summary.tickets_resolved));
    lines.push(format!("In progress: {}", report.summary.tickets_in_progress));
    lines.push(format!("Resolution rate: {:.1}%", report.summary.resolution_rate));
    lines.push(format!("SLA compliance: {:.1}%", report.sla.sla_compliance));
    lines.push(format!(
        "Average resolution time: {:.1} hours",
        report.sla.average_resolution_time
    ));
    lines.push(String::new());
    lines.push("Durations (days):".to_string());
    lines.push("Measure | Tickets | Average | P50 | P85 | P95".to_string());
    lines.push("--------|---------|---------|-----|-----|----".to_string());
    lines.push(format_duration_row("Cycle time", &report.cycle_time));
    lines.push(format_duration_row("Lead time", &report.lead_time));

    lines.join("\n")
}

fn format_duration_row(label: &str, stats: &DurationStats) -> String {
    format!(
        "{label} | {count} | {average:.2} | {p50:.2} | {p85:.2} | {p95:.2}",
        count = stats.points.len(),
        average = stats.average_days,
        p50 = stats.p50_days,
        p85 = stats.p85_days,
        p95 = stats.p95_days,
    )
}

pub fn format_forecast_report(report: &ForecastReport) -> String {
    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    lines.push(format!(
        "History: {} to {} ({} {} periods)",
        report.start_date,
        report.end_date,
        report.history.len(),
        report.granularity
    ));
    lines.push(format!("Trend: {}", report.forecast.trend));
    lines.push(format!("Model accuracy: {:.2}", report.forecast.model_accuracy));
    lines.push(format!(
        "Next sprint ({} days): {:.2} (confidence {:.2})",
        report.forecast.next_sprint_prediction.days,
        report.forecast.next_sprint_prediction.velocity,
        report.forecast.next_sprint_prediction.confidence
    ));
    lines.push(String::new());
    lines.push("Date | Velocity | Lower | Upper".to_string());
    lines.push("-----|----------|-------|------".to_string());
    for (predicted, bound) in report
        .forecast
        .predicted_velocity
        .iter()
        .zip(&report.forecast.confidence_interval)
    {
        lines.push(format!(
            "{} | {:.2} | {:.2} | {:.2}",
            predicted.date, predicted.velocity, bound.lower, bound.upper
        ));
    }

    lines.join("\n")
}
