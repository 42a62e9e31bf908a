use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::granularity::Granularity;
use crate::services::sla::DEFAULT_SLA_WINDOW_DAYS;
use crate::services::smoothing::{MovingAverage, SmoothingConfig};
use crate::services::velocity_forecast::{
    DEFAULT_HORIZON_PERIODS, DEFAULT_SPRINT_LENGTH_DAYS, ForecastConfig,
};

#[derive(Error, Debug)]
pub enum EngineConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Options shared by every metrics and forecast computation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub granularity: Granularity,
    pub sla_window_days: i64,
    pub forecast_horizon_periods: usize,
    pub sprint_length_days: u32,
    /// Overlay computed on the throughput series.
    pub smoothing: Option<SmoothingConfig>,
    /// Smoothing applied to the velocity history before the regression fit.
    pub forecast_smoothing: Option<MovingAverage>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Day,
            sla_window_days: DEFAULT_SLA_WINDOW_DAYS,
            forecast_horizon_periods: DEFAULT_HORIZON_PERIODS,
            sprint_length_days: DEFAULT_SPRINT_LENGTH_DAYS,
            smoothing: None,
            forecast_smoothing: None,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(input)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| EngineConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents).map_err(|source| EngineConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            horizon_periods: self.forecast_horizon_periods,
            sprint_length_days: self.sprint_length_days,
            granularity: self.granularity,
            pre_smoothing: self.forecast_smoothing,
        }
    }
}
