pub mod base_commands;
pub mod forecast_cmd;
pub mod metrics_cmd;
pub mod query;
pub mod report_format;
