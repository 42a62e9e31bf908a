use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::domain::granularity::Granularity;

/// One period of a bucketed date range.
///
/// `date` is the calendar-aligned start of the period and serves as the bucket
/// label. `start` and `end` are inclusive and clipped to the requested range, so
/// the first and last bucket of a range can be shorter than a full period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    pub date: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeBucket {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Splits the inclusive range `start..=end` into consecutive buckets.
///
/// - `start > end` => no buckets.
/// - Every day of the range belongs to exactly one bucket.
pub fn bucket_range(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Vec<TimeBucket> {
    let mut buckets = Vec::new();
    if start > end {
        debug!(%start, %end, "empty bucket range");
        return buckets;
    }

    let mut period_start = granularity.period_start(start);
    while period_start <= end {
        let next_start = granularity.next_period_start(period_start);
        let period_end = next_start
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        buckets.push(TimeBucket {
            date: period_start,
            start: period_start.max(start),
            end: period_end.min(end),
        });
        match next_start {
            Some(next) => period_start = next,
            None => break,
        }
    }

    buckets
}

/// Index of the bucket containing `date`, if any. `buckets` must be ordered as
/// produced by [`bucket_range`].
pub fn bucket_index(buckets: &[TimeBucket], date: NaiveDate) -> Option<usize> {
    let index = buckets.partition_point(|bucket| bucket.end < date);
    buckets
        .get(index)
        .filter(|bucket| bucket.contains(date))
        .map(|_| index)
}
