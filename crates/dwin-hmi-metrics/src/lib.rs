//! Metrics infrastructure for the DWIN HMI protocol.
//!
//! This crate describes every metric the protocol client records. It re-exports
//! the `metrics` crate for convenience and declares each metric as a structured
//! [`Metric`] constant to avoid typos and carry its metadata. Nothing is
//! recorded unless the host application installs a `metrics` recorder.
//!
//! # Example
//!
//! ```rust,ignore
//! use dwin_hmi_metrics::{MetricLabels, metric_defs, describe_metrics};
//!
//! // Initialize metrics descriptions at startup
//! describe_metrics();
//!
//! // Create labels for a panel
//! let labels = MetricLabels::new("/dev/ttyUSB0");
//!
//! // Use labels with metrics
//! metrics::counter!(
//!     metric_defs::FRAMES_SENT.name,
//!     &labels.with(&[("command", "read_register".to_string())])
//! )
//! .increment(1);
//! ```
//!
//! # Metric Type
//!
//! ```rust
//! use dwin_hmi_metrics::{Metric, MetricKind};
//! use metrics::Unit;
//!
//! const MY_COUNTER: Metric = Metric::counter("my.counter")
//!     .with_description("A counter metric")
//!     .with_unit(Unit::Count)
//!     .with_labels(&["device", "command"]);
//!
//! assert_eq!(MY_COUNTER.kind, MetricKind::Counter);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_histogram, Unit};

/// Whether a metric counts events or records a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Histogram,
}

/// A metric declaration with its metadata.
///
/// Use the const constructors to declare metrics at compile time.
#[derive(Debug, Clone)]
pub struct Metric {
    /// The metric name (e.g., "dwin_hmi.frames_sent").
    pub name: &'static str,
    /// Counter or histogram.
    pub kind: MetricKind,
    /// Human-readable description of the metric.
    pub description: &'static str,
    /// The unit of measurement (optional).
    pub unit: Option<Unit>,
    /// Expected label keys for this metric.
    pub labels: &'static [&'static str],
}

impl Metric {
    /// Creates a new counter metric with the given name.
    pub const fn counter(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Counter,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Creates a new histogram metric with the given name.
    pub const fn histogram(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Histogram,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Sets the description for the metric.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the unit for the metric.
    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the expected label keys for the metric.
    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Registers this metric's description with the metrics recorder.
    ///
    /// This should be called once at startup for each metric.
    pub fn describe(&self) {
        match (self.kind, self.unit) {
            (MetricKind::Counter, Some(unit)) => {
                describe_counter!(self.name, unit, self.description);
            }
            (MetricKind::Counter, None) => {
                describe_counter!(self.name, self.description);
            }
            (MetricKind::Histogram, Some(unit)) => {
                describe_histogram!(self.name, unit, self.description);
            }
            (MetricKind::Histogram, None) => {
                describe_histogram!(self.name, self.description);
            }
        }
    }
}

/// All metric definitions for the protocol client.
pub mod metric_defs {
    use super::{Metric, Unit};

    /// Label present on every metric: the device (port) the client talks to.
    pub const DEVICE_LABELS: &[&str] = &["device"];

    // ========================================================================
    // Traffic
    // ========================================================================

    /// Request frames written to the transport.
    ///
    /// Labels: device, command
    pub const FRAMES_SENT: Metric = Metric::counter("dwin_hmi.frames_sent")
        .with_description("Request frames written to the transport")
        .with_unit(Unit::Count)
        .with_labels(&["device", "command"]);

    /// Bytes written to the transport.
    ///
    /// Labels: device
    pub const BYTES_SENT: Metric = Metric::counter("dwin_hmi.bytes_sent")
        .with_description("Bytes written to the transport")
        .with_unit(Unit::Bytes)
        .with_labels(&["device"]);

    /// Bytes read from the transport.
    ///
    /// Labels: device
    pub const BYTES_RECEIVED: Metric = Metric::counter("dwin_hmi.bytes_received")
        .with_description("Bytes read from the transport")
        .with_unit(Unit::Bytes)
        .with_labels(&["device"]);

    // ========================================================================
    // Failures
    // ========================================================================

    /// Read replies rejected by validation.
    ///
    /// Labels: device, fault (truncated, bad_header, unexpected_command)
    pub const INVALID_RESPONSES: Metric = Metric::counter("dwin_hmi.invalid_responses")
        .with_description("Read replies rejected by validation")
        .with_unit(Unit::Count)
        .with_labels(&["device", "fault"]);

    /// Write ACKs that arrived incomplete or not at all. Never an error.
    ///
    /// Labels: device
    pub const SHORT_ACKS: Metric = Metric::counter("dwin_hmi.short_acks")
        .with_description("Write ACKs shorter than expected before the deadline")
        .with_unit(Unit::Count)
        .with_labels(&["device"]);

    /// Transport faults surfaced to the caller.
    ///
    /// Labels: device, command
    pub const TRANSPORT_ERRORS: Metric = Metric::counter("dwin_hmi.transport_errors")
        .with_description("Transport faults surfaced to the caller")
        .with_unit(Unit::Count)
        .with_labels(&["device", "command"]);

    // ========================================================================
    // Timing
    // ========================================================================

    /// Time from sending a request to finishing its reply read, in microseconds.
    ///
    /// Labels: device, command
    pub const ROUND_TRIP_TIME: Metric = Metric::histogram("dwin_hmi.round_trip_time_us")
        .with_description("Request to reply round trip time in microseconds")
        .with_unit(Unit::Microseconds)
        .with_labels(&["device", "command"]);

    /// Returns a slice of all defined metrics.
    pub const ALL: &[&Metric] = &[
        &FRAMES_SENT,
        &BYTES_SENT,
        &BYTES_RECEIVED,
        &INVALID_RESPONSES,
        &SHORT_ACKS,
        &TRANSPORT_ERRORS,
        &ROUND_TRIP_TIME,
    ];
}

/// Labels identifying the display a metric belongs to.
///
/// # Example
///
/// ```rust
/// use dwin_hmi_metrics::MetricLabels;
///
/// let labels = MetricLabels::new("/dev/ttyUSB0");
/// let extended = labels.with(&[("command", "read_register".to_string())]);
///
/// assert!(extended.iter().any(|(k, v)| *k == "device" && v == "/dev/ttyUSB0"));
/// assert!(extended.iter().any(|(k, v)| *k == "command" && v == "read_register"));
/// ```
#[derive(Debug, Clone)]
pub struct MetricLabels {
    /// Device identifier, usually the serial port name.
    pub device: String,
}

impl Default for MetricLabels {
    fn default() -> Self {
        Self::new("hmi")
    }
}

impl MetricLabels {
    /// Creates labels for the given device.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }

    /// Converts the labels to the metrics crate label format.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        vec![("device", self.device.clone())]
    }

    /// Returns labels with additional key-value pairs.
    pub fn with(&self, extra: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let mut labels = self.to_labels();
        labels.extend_from_slice(extra);
        labels
    }
}

/// Describes all metrics recorded by the protocol client.
///
/// Call once at startup, after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_labels_new() {
        let labels = MetricLabels::new("COM11");
        assert_eq!(labels.device, "COM11");
        assert_eq!(labels.to_labels(), vec![("device", "COM11".to_string())]);
    }

    #[test]
    fn test_with_extra_labels() {
        let labels = MetricLabels::new("COM11");
        let extended = labels.with(&[("command", "write_register".to_string())]);

        assert_eq!(extended.len(), 2);
        assert!(extended.contains(&("command", "write_register".to_string())));
    }

    #[test]
    fn test_metric_definitions() {
        assert_eq!(metric_defs::FRAMES_SENT.name, "dwin_hmi.frames_sent");
        assert_eq!(metric_defs::FRAMES_SENT.kind, MetricKind::Counter);
        assert_eq!(metric_defs::BYTES_SENT.unit, Some(Unit::Bytes));
        assert_eq!(metric_defs::ROUND_TRIP_TIME.kind, MetricKind::Histogram);
        assert_eq!(
            metric_defs::ROUND_TRIP_TIME.unit,
            Some(Unit::Microseconds)
        );
        assert_eq!(metric_defs::INVALID_RESPONSES.labels, &["device", "fault"]);
    }

    #[test]
    fn test_all_metrics_count() {
        assert_eq!(metric_defs::ALL.len(), 7);
    }

    #[test]
    fn test_every_metric_carries_device_label() {
        for metric in metric_defs::ALL {
            assert!(
                metric.labels.contains(&metric_defs::DEVICE_LABELS[0]),
                "{} is missing the device label",
                metric.name
            );
        }
    }

    #[test]
    fn test_metric_minimal() {
        const MINIMAL: Metric = Metric::counter("minimal");

        assert_eq!(MINIMAL.name, "minimal");
        assert_eq!(MINIMAL.kind, MetricKind::Counter);
        assert_eq!(MINIMAL.description, "");
        assert_eq!(MINIMAL.unit, None);
        assert_eq!(MINIMAL.labels, &[] as &[&str]);
    }

    #[test]
    fn test_describe_without_recorder_is_noop() {
        describe_metrics();
    }
}
