use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

/// Mean of the values ingested within a sliding time window.
///
/// The window trails the most recently ingested timestamp, samples are
/// expected in time order.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: Duration,
    samples: VecDeque<(DateTime<Utc>, f64)>,
    sum: f64,
}

impl MovingAverage {
    pub fn new(window: Duration) -> MovingAverage {
        MovingAverage { window, samples: VecDeque::new(), sum: 0. }
    }

    pub fn ingest(&mut self, value: f64, timestamp: DateTime<Utc>) {
        self.samples.push_back((timestamp, value));
        self.sum += value;

        let oldest_allowed = timestamp - self.window;
        while let Some(&(time, value)) = self.samples.front() {
            if time >= oldest_allowed {
                break;
            }
            self.samples.pop_front();
            self.sum -= value;
        }
    }

    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.sum / self.samples.len() as f64)
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;

    use super::*;

    fn minute(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 10, minute, 0).unwrap()
    }

    #[test]
    fn empty() {
        assert_eq!(MovingAverage::new(Duration::minutes(5)).average(), None);
    }

    #[test]
    fn drops_old_samples() {
        let mut average = MovingAverage::new(Duration::minutes(5));

        average.ingest(1., minute(0));
        average.ingest(2., minute(1));
        average.ingest(6., minute(5));
        assert_eq!(average.len(), 3);
        assert_approx_eq!(average.average().unwrap(), 3.);

        average.ingest(10., minute(6));
        assert_eq!(average.len(), 3);
        assert_approx_eq!(average.average().unwrap(), 6.);

        average.ingest(4., minute(30));
        assert_eq!(average.len(), 1);
        assert_approx_eq!(average.average().unwrap(), 4.);
    }
}
