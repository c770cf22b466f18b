use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single metric sample: one measurement event with tags and fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Unix epoch milliseconds when the measurement was taken.
    pub timestamp: i64,

    /// Measurement name (e.g., "thermal_zone").
    pub measurement: String,

    /// Measured values keyed by field name.
    pub fields: HashMap<String, FieldValue>,

    /// Context labels (e.g., zone name, sensor type).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

impl Sample {
    /// Create a new sample with the current timestamp and no fields or tags.
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp_millis(),
            measurement: measurement.into(),
            fields: HashMap::new(),
            tags: HashMap::new(),
        }
    }

    /// Add a field to this sample.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a tag to this sample.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Typed field value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    /// Signed integer reading (raw sensor units).
    Integer(i64),

    /// Floating-point reading.
    Float(f64),

    /// Text value.
    Text(String),

    /// Boolean value.
    Boolean(bool),
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

/// Sink that receives samples from a monitor.
///
/// Delivery is fire-and-forget: there is no acknowledgment and no
/// backpressure signal. The owner of the accumulator decides when and how
/// buffered samples are shipped downstream.
pub trait Accumulator {
    /// Accept one sample.
    fn add_sample(&mut self, sample: Sample);
}

/// In-memory accumulator backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryAccumulator {
    samples: Vec<Sample>,
}

impl MemoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered samples, oldest first.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Take all buffered samples, leaving the accumulator empty.
    pub fn drain(&mut self) -> Vec<Sample> {
        std::mem::take(&mut self.samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Accumulator for MemoryAccumulator {
    fn add_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }
}

/// Get the current timestamp in milliseconds since Unix epoch.
pub fn current_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_creation() {
        let sample = Sample::new("thermal_zone")
            .with_field("value", 45000i64)
            .with_tag("zone", "thermal_zone0")
            .with_tag("type", "cpu-thermal");

        assert_eq!(sample.measurement, "thermal_zone");
        assert_eq!(
            sample.fields.get("value"),
            Some(&FieldValue::Integer(45000))
        );
        assert_eq!(sample.tags.get("zone"), Some(&"thermal_zone0".to_string()));
        assert_eq!(sample.tags.get("type"), Some(&"cpu-thermal".to_string()));
        assert!(sample.timestamp > 0);
    }

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from(-1000i64), FieldValue::Integer(-1000));
        assert_eq!(FieldValue::from(3.14), FieldValue::Float(3.14));
        assert_eq!(
            FieldValue::from("test"),
            FieldValue::Text("test".to_string())
        );
        assert_eq!(FieldValue::from(true), FieldValue::Boolean(true));
    }

    #[test]
    fn test_memory_accumulator_drain() {
        let mut acc = MemoryAccumulator::new();
        assert!(acc.is_empty());

        acc.add_sample(Sample::new("thermal_zone").with_field("value", 1i64));
        acc.add_sample(Sample::new("thermal_zone").with_field("value", 2i64));
        assert_eq!(acc.len(), 2);

        let drained = acc.drain();
        assert_eq!(drained.len(), 2);
        assert!(acc.is_empty());
    }
}
