use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trend::Increasing => "increasing",
            Trend::Stable => "stable",
            Trend::Decreasing => "decreasing",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictedVelocity {
    pub date: NaiveDate,
    pub velocity: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConfidenceBound {
    pub date: NaiveDate,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SprintPrediction {
    pub velocity: f64,
    pub confidence: f64,
    pub days: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub predicted_velocity: Vec<PredictedVelocity>,
    pub confidence_interval: Vec<ConfidenceBound>,
    pub trend: Trend,
    pub next_sprint_prediction: SprintPrediction,
    pub model_accuracy: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SprintForecast {
    pub sprint_length_days: u32,
    pub predicted_story_points: f64,
    pub confidence: f64,
    pub trend: Trend,
    pub daily_breakdown: Vec<PredictedVelocity>,
}
