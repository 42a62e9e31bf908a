use crate::commands::base_commands::QueryArgs;
use crate::commands::query::{CommandError, load_query, write_output};
use crate::commands::report_format::format_forecast_report;
use crate::services::metrics_report::build_forecast_report;

const DEFAULT_HISTORY_DAYS: u64 = 90;

pub fn forecast_command(
    query: &QueryArgs,
    horizon: Option<usize>,
    sprint_length: Option<u32>,
) -> Result<(), CommandError> {
    let mut loaded = load_query(query, DEFAULT_HISTORY_DAYS)?;
    if let Some(horizon) = horizon {
        loaded.config.forecast_horizon_periods = horizon;
    }
    if let Some(sprint_length) = sprint_length {
        loaded.config.sprint_length_days = sprint_length;
    }

    let report = build_forecast_report(&loaded.tickets, &loaded.config, loaded.start, loaded.end);

    write_output(&query.output, &report)?;
    println!("{}", format_forecast_report(&report));
    println!("Forecast written to {}", query.output);
    Ok(())
}
