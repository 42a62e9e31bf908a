pub mod cumulative_flow;
pub mod duration_stats;
pub mod engine_config;
pub mod forecast_types;
pub mod metrics_report;
pub mod percentiles;
pub mod productivity;
pub mod sla;
pub mod smoothing;
pub mod throughput;
pub mod ticket_filter;
pub mod ticket_yaml;
pub mod time_buckets;
pub mod velocity_calculation;
pub mod velocity_forecast;
