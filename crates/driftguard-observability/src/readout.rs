//! Numeric readouts for an external gauge/counter exporter.
//!
//! Components flatten their state into `(name, labels, value)` samples.
//! No wire format is produced here.

use serde::Serialize;

/// One gauge or counter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl MetricSample {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            value,
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Implemented by every component that exposes numeric state.
pub trait GaugeReadout {
    fn readouts(&self) -> Vec<MetricSample>;
}

/// Find a sample by name and an optional single label match.
pub fn find_sample<'a>(
    samples: &'a [MetricSample],
    name: &str,
    label: Option<(&str, &str)>,
) -> Option<&'a MetricSample> {
    samples.iter().find(|s| {
        s.name == name
            && match label {
                Some((k, v)) => s.label(k) == Some(v),
                None => true,
            }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_label() {
        let samples = vec![
            MetricSample::new("drift_distance", 0.1).with_label("type", "response"),
            MetricSample::new("drift_distance", 0.2).with_label("type", "data"),
            MetricSample::new("alerts_total", 3.0),
        ];
        let data = find_sample(&samples, "drift_distance", Some(("type", "data"))).unwrap();
        assert_eq!(data.value, 0.2);
        assert_eq!(find_sample(&samples, "alerts_total", None).unwrap().value, 3.0);
        assert!(find_sample(&samples, "missing", None).is_none());
    }
}
