use chrono::NaiveDate;
use tracing::debug;

use crate::domain::granularity::Granularity;
use crate::domain::throughput::VelocityPoint;
use crate::services::forecast_types::{
    ConfidenceBound, ForecastResult, PredictedVelocity, SprintForecast, SprintPrediction, Trend,
};
use crate::services::smoothing::{MovingAverage, smooth_velocity};

/// z-score of the two-sided 95% interval.
pub const CONFIDENCE_Z: f64 = 1.96;
/// Slopes within `±TREND_EPSILON` per period count as stable.
pub const TREND_EPSILON: f64 = 0.01;
pub const DEFAULT_SPRINT_LENGTH_DAYS: u32 = 14;
pub const DEFAULT_HORIZON_PERIODS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub horizon_periods: usize,
    pub sprint_length_days: u32,
    pub granularity: Granularity,
    pub pre_smoothing: Option<MovingAverage>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_periods: DEFAULT_HORIZON_PERIODS,
            sprint_length_days: DEFAULT_SPRINT_LENGTH_DAYS,
            granularity: Granularity::Day,
            pre_smoothing: None,
        }
    }
}

/// Velocity model fitted to a history.
#[derive(Debug, Clone, PartialEq)]
enum VelocityModel {
    /// Too little history for a regression; projects a constant.
    Constant(f64),
    Linear(LinearFit),
}

#[derive(Debug, Clone, PartialEq)]
struct LinearFit {
    slope: f64,
    intercept: f64,
    r_squared: f64,
    residual_std: f64,
}

impl VelocityModel {
    fn fit(values: &[f64]) -> Self {
        if values.len() < 2 {
            return VelocityModel::Constant(values.last().copied().unwrap_or(0.0).max(0.0));
        }
        VelocityModel::Linear(fit_linear(values))
    }

    fn predict(&self, period_index: usize) -> f64 {
        match self {
            VelocityModel::Constant(value) => *value,
            VelocityModel::Linear(fit) => {
                (fit.slope * period_index as f64 + fit.intercept).max(0.0)
            }
        }
    }

    fn margin(&self) -> f64 {
        match self {
            VelocityModel::Constant(_) => 0.0,
            VelocityModel::Linear(fit) => CONFIDENCE_Z * fit.residual_std,
        }
    }

    fn trend(&self) -> Trend {
        match self {
            VelocityModel::Linear(fit) if fit.slope > TREND_EPSILON => Trend::Increasing,
            VelocityModel::Linear(fit) if fit.slope < -TREND_EPSILON => Trend::Decreasing,
            _ => Trend::Stable,
        }
    }

    fn accuracy(&self) -> f64 {
        match self {
            VelocityModel::Constant(_) => 0.0,
            VelocityModel::Linear(fit) => fit.r_squared,
        }
    }
}

/// Ordinary least squares on `(index, value)`. Needs at least two values.
fn fit_linear(values: &[f64]) -> LinearFit {
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let (numerator, denominator) = values.iter().enumerate().fold(
        (0.0, 0.0),
        |(numerator, denominator), (idx, value)| {
            let dx = idx as f64 - x_mean;
            (numerator + dx * (value - y_mean), denominator + dx * dx)
        },
    );
    let slope = if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    };
    let intercept = y_mean - slope * x_mean;

    let residuals: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(idx, value)| value - (slope * idx as f64 + intercept))
        .collect();
    let residual_mean = residuals.iter().sum::<f64>() / n;
    let residual_variance = residuals
        .iter()
        .map(|residual| (residual - residual_mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    let ss_res: f64 = residuals.iter().map(|residual| residual * residual).sum();
    let ss_tot: f64 = values.iter().map(|value| (value - y_mean).powi(2)).sum();
    // A flat history reproduced exactly by the fit is a perfect fit.
    let r_squared = if ss_tot.abs() < f64::EPSILON {
        if ss_res.abs() < f64::EPSILON { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    };

    LinearFit {
        slope,
        intercept,
        r_squared: r_squared.clamp(0.0, 1.0),
        residual_std: residual_variance.sqrt(),
    }
}

/// Projects a velocity history `config.horizon_periods` periods ahead.
///
/// Future dates continue from the last historical period; with an empty history
/// they continue from the period containing `as_of`.
pub fn forecast_velocity(
    history: &[VelocityPoint],
    config: &ForecastConfig,
    as_of: NaiveDate,
) -> ForecastResult {
    let history = match &config.pre_smoothing {
        Some(average) => smooth_velocity(history, average),
        None => history.to_vec(),
    };
    let values: Vec<f64> = history.iter().map(|point| point.velocity).collect();
    let model = VelocityModel::fit(&values);

    let anchor = history
        .last()
        .map(|point| point.date)
        .unwrap_or_else(|| config.granularity.period_start(as_of));
    let future_dates = future_period_dates(anchor, config.granularity, config.horizon_periods);
    let first_future_index = values.len();
    let margin = model.margin();

    let mut predicted_velocity = Vec::with_capacity(future_dates.len());
    let mut confidence_interval = Vec::with_capacity(future_dates.len());
    for (offset, date) in future_dates.into_iter().enumerate() {
        let velocity = model.predict(first_future_index + offset);
        predicted_velocity.push(PredictedVelocity { date, velocity });
        confidence_interval.push(ConfidenceBound {
            date,
            lower: (velocity - margin).max(0.0),
            upper: velocity + margin,
        });
    }

    let model_accuracy = model.accuracy();
    let next_sprint_prediction = SprintPrediction {
        velocity: sprint_velocity(&model, first_future_index, config),
        confidence: model_accuracy,
        days: config.sprint_length_days,
    };

    debug!(
        history = values.len(),
        horizon = config.horizon_periods,
        ?model,
        "fitted velocity forecast"
    );
    ForecastResult {
        predicted_velocity,
        confidence_interval,
        trend: model.trend(),
        next_sprint_prediction,
        model_accuracy,
    }
}

/// Forecast restricted to the next sprint, with its per-period breakdown.
pub fn forecast_sprint(
    history: &[VelocityPoint],
    config: &ForecastConfig,
    as_of: NaiveDate,
) -> SprintForecast {
    let sprint_config = ForecastConfig {
        horizon_periods: sprint_periods(config.sprint_length_days, config.granularity),
        ..config.clone()
    };
    let forecast = forecast_velocity(history, &sprint_config, as_of);

    SprintForecast {
        sprint_length_days: config.sprint_length_days,
        predicted_story_points: forecast.next_sprint_prediction.velocity,
        confidence: forecast.next_sprint_prediction.confidence,
        trend: forecast.trend,
        daily_breakdown: forecast.predicted_velocity,
    }
}

/// Work expected in the sprint following the history. Daily series are summed
/// over the sprint's days; coarser series scale the next period's prediction to
/// the sprint length.
fn sprint_velocity(model: &VelocityModel, first_future_index: usize, config: &ForecastConfig) -> f64 {
    match config.granularity {
        Granularity::Day => (0..config.sprint_length_days as usize)
            .map(|offset| model.predict(first_future_index + offset))
            .sum(),
        granularity => {
            model.predict(first_future_index) * f64::from(config.sprint_length_days)
                / f64::from(granularity.nominal_days())
        }
    }
}

fn sprint_periods(sprint_length_days: u32, granularity: Granularity) -> usize {
    sprint_length_days.div_ceil(granularity.nominal_days()) as usize
}

/// Up to `count` period starts following the period containing `anchor`. Stops
/// early at the end of the representable calendar.
fn future_period_dates(anchor: NaiveDate, granularity: Granularity, count: usize) -> Vec<NaiveDate> {
    std::iter::successors(
        granularity.next_period_start(granularity.period_start(anchor)),
        |current| granularity.next_period_start(*current),
    )
    .take(count)
    .collect()
}
