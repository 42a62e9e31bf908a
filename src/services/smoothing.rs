use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::throughput::{ThroughputPoint, VelocityPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothingKind {
    #[serde(rename = "EMA", alias = "ema")]
    Ema,
    #[serde(rename = "SMA", alias = "sma")]
    Sma,
}

/// Throughput counter an overlay is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSource {
    Created,
    #[default]
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverage {
    #[serde(rename = "type")]
    pub kind: SmoothingKind,
    pub period: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    #[serde(flatten)]
    pub average: MovingAverage,
    #[serde(default)]
    pub source: SeriesSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl MovingAverage {
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        match self.kind {
            SmoothingKind::Ema => exponential_moving_average(values, self.period),
            SmoothingKind::Sma => simple_moving_average(values, self.period),
        }
    }
}

/// EMA seeded with the first value, `k = 2 / (period + 1)`.
pub fn exponential_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (effective_period(period) as f64 + 1.0);
    let mut smoothed: Vec<f64> = Vec::with_capacity(values.len());
    for value in values {
        let next = match smoothed.last() {
            Some(previous) => value * k + previous * (1.0 - k),
            None => *value,
        };
        smoothed.push(next);
    }
    smoothed
}

/// Trailing mean over the last `period` values; the window shrinks at the
/// start of the series instead of producing gaps.
pub fn simple_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let period = effective_period(period);
    let mut window_sum = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            window_sum += value;
            if idx >= period {
                window_sum -= values[idx - period];
            }
            window_sum / (idx + 1).min(period) as f64
        })
        .collect()
}

/// Overlay of the configured throughput counter.
pub fn smooth_throughput(throughput: &[ThroughputPoint], config: &SmoothingConfig) -> Vec<SeriesPoint> {
    let values: Vec<f64> = throughput
        .iter()
        .map(|point| match config.source {
            SeriesSource::Created => point.created as f64,
            SeriesSource::Resolved => point.resolved as f64,
        })
        .collect();

    throughput
        .iter()
        .zip(config.average.apply(&values))
        .map(|(point, value)| SeriesPoint {
            date: point.date,
            value,
        })
        .collect()
}

/// Smoothed copy of a velocity series.
pub fn smooth_velocity(history: &[VelocityPoint], average: &MovingAverage) -> Vec<VelocityPoint> {
    let values: Vec<f64> = history.iter().map(|point| point.velocity).collect();
    history
        .iter()
        .zip(average.apply(&values))
        .map(|(point, velocity)| VelocityPoint {
            date: point.date,
            velocity,
        })
        .collect()
}

fn effective_period(period: usize) -> usize {
    if period == 0 {
        warn!("smoothing period of 0 treated as 1");
        return 1;
    }
    period
}
