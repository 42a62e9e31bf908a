use std::io;
use std::path::Path;

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::commands::base_commands::QueryArgs;
use crate::domain::ticket::Ticket;
use crate::services::engine_config::{EngineConfig, EngineConfigError};
use crate::services::ticket_filter::TicketFilter;
use crate::services::ticket_yaml::{TicketYamlError, load_tickets_from_yaml_file};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Tickets(#[from] TicketYamlError),
    #[error(transparent)]
    Config(#[from] EngineConfigError),
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid range: start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("failed to serialize output: {0}")]
    Serialize(String),
    #[error("failed to write output file {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// Filtered tickets, effective configuration and date range of one command.
pub struct Query {
    pub tickets: Vec<Ticket>,
    pub config: EngineConfig,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Loads and filters the tickets named by `args`. Without a start date the
/// range covers `default_days` days ending on the end date.
pub fn load_query(args: &QueryArgs, default_days: u64) -> Result<Query, CommandError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(granularity) = args.granularity {
        config.granularity = granularity;
    }

    let end = match &args.end_date {
        Some(value) => parse_date(value)?,
        None => Local::now().date_naive(),
    };
    let start = match &args.start_date {
        Some(value) => parse_date(value)?,
        None => end.checked_sub_days(Days::new(default_days)).unwrap_or(end),
    };
    if start > end {
        return Err(CommandError::InvalidRange { start, end });
    }

    let filter = TicketFilter {
        project: args.project.clone(),
        assignee: args.assignee.clone(),
        status: args.status.clone(),
        customer: args.customer.clone(),
        label: args.label.clone(),
    };
    let all_tickets = load_tickets_from_yaml_file(&args.tickets)?;
    let tickets = filter.apply(&all_tickets);
    info!(
        loaded = all_tickets.len(),
        selected = tickets.len(),
        %start,
        %end,
        "loaded tickets"
    );

    Ok(Query {
        tickets,
        config,
        start,
        end,
    })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CommandError::InvalidDate(value.to_string()))
}

/// Writes `value` as YAML for `.yaml`/`.yml` paths and as JSON otherwise.
pub fn write_output<T: Serialize>(path: &str, value: &T) -> Result<(), CommandError> {
    let is_yaml = matches!(
        Path::new(path).extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let contents = if is_yaml {
        serde_yaml::to_string(value).map_err(|e| CommandError::Serialize(e.to_string()))?
    } else {
        serde_json::to_string_pretty(value).map_err(|e| CommandError::Serialize(e.to_string()))?
    };
    std::fs::write(path, contents).map_err(|source| CommandError::Write {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::on_date;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(parse_date("2024-02-29").unwrap(), on_date(2024, 2, 29));
        assert!(matches!(
            parse_date("29.02.2024"),
            Err(CommandError::InvalidDate(value)) if value == "29.02.2024"
        ));
    }
}
