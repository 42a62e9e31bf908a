use crate::commands::base_commands::QueryArgs;
use crate::commands::query::{CommandError, load_query, write_output};
use crate::commands::report_format::format_metrics_report;
use crate::services::metrics_report::build_metrics_report;

const DEFAULT_METRICS_DAYS: u64 = 30;

pub fn metrics_command(query: &QueryArgs) -> Result<(), CommandError> {
    let loaded = load_query(query, DEFAULT_METRICS_DAYS)?;
    let report = build_metrics_report(&loaded.tickets, &loaded.config, loaded.start, loaded.end);

    write_output(&query.output, &report)?;
    println!("{}", format_metrics_report(&report));
    println!("Metrics written to {}", query.output);
    Ok(())
}
