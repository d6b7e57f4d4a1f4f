//! Append-only record of a run.

use serde::{Deserialize, Serialize};

/// One recorded point of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Logical time (seconds).
    pub time: f64,
    /// Plant output after the tick.
    pub process_value: f64,
    /// Setpoint in force during the tick.
    pub setpoint: f64,
}

/// Parallel time, process value and setpoint columns of equal length.
///
/// Never empty: a fresh series holds the single sample at `t = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    time: Vec<f64>,
    process_value: Vec<f64>,
    setpoint: Vec<f64>,
}

impl TimeSeries {
    /// Series holding only the origin sample `(0, 0, setpoint)`.
    pub fn starting_at(setpoint: f64) -> Self {
        Self {
            time: vec![0.0],
            process_value: vec![0.0],
            setpoint: vec![setpoint],
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.time.push(sample.time);
        self.process_value.push(sample.process_value);
        self.setpoint.push(sample.setpoint);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn process_value(&self) -> &[f64] {
        &self.process_value
    }

    pub fn setpoint(&self) -> &[f64] {
        &self.setpoint
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            time: *self.time.get(index)?,
            process_value: *self.process_value.get(index)?,
            setpoint: *self.setpoint.get(index)?,
        })
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// CSV with a `time_s,process_value,setpoint` header.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("time_s,process_value,setpoint\n");
        for s in self.iter() {
            out.push_str(&format!("{},{},{}\n", s.time, s.process_value, s.setpoint));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_series_holds_origin() {
        let series = TimeSeries::starting_at(1.5);
        assert_eq!(series.len(), 1);
        assert!(!series.is_empty());
        assert_eq!(
            series.latest(),
            Some(Sample {
                time: 0.0,
                process_value: 0.0,
                setpoint: 1.5
            })
        );
    }

    #[test]
    fn push_keeps_columns_aligned() {
        let mut series = TimeSeries::starting_at(1.0);
        series.push(Sample {
            time: 0.1,
            process_value: 0.04,
            setpoint: 1.0,
        });
        assert_eq!(series.time(), &[0.0, 0.1]);
        assert_eq!(series.process_value(), &[0.0, 0.04]);
        assert_eq!(series.setpoint(), &[1.0, 1.0]);
        assert_eq!(series.iter().count(), 2);
        assert_eq!(series.get(2), None);
    }

    #[test]
    fn csv_export() {
        let mut series = TimeSeries::starting_at(1.0);
        series.push(Sample {
            time: 0.5,
            process_value: 0.25,
            setpoint: 1.0,
        });
        assert_eq!(
            series.to_csv(),
            "time_s,process_value,setpoint\n0,0,1\n0.5,0.25,1\n"
        );
    }
}
