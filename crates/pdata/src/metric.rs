use crate::{AttrMap, InstrumentationScope, Resource};

/// A named metric and its recorded data points.
#[derive(Debug, Clone)]
pub struct Metric {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub data: MetricData,
}

impl Metric {
    pub fn gauge(name: impl Into<String>, data_points: Vec<NumberDataPoint>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            unit: String::new(),
            data: MetricData::Gauge(Gauge { data_points }),
        }
    }

    pub fn sum(name: impl Into<String>, data_points: Vec<NumberDataPoint>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            unit: String::new(),
            data: MetricData::Sum(Sum {
                data_points,
                is_monotonic: false,
                temporality: AggregationTemporality::Cumulative,
            }),
        }
    }

    pub fn histogram(name: impl Into<String>, data_points: Vec<HistogramDataPoint>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            unit: String::new(),
            data: MetricData::Histogram(Histogram { data_points }),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MetricData {
    Gauge(Gauge),
    Sum(Sum),
    Histogram(Histogram),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregationTemporality {
    #[default]
    Unspecified,
    Delta,
    Cumulative,
}

#[derive(Debug, Clone, Default)]
pub struct Gauge {
    pub data_points: Vec<NumberDataPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct Sum {
    pub data_points: Vec<NumberDataPoint>,
    pub is_monotonic: bool,
    pub temporality: AggregationTemporality,
}

#[derive(Debug, Clone, Default)]
pub struct Histogram {
    pub data_points: Vec<HistogramDataPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Double(f64),
}

impl NumberValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumberValue::Int(i) => *i as f64,
            NumberValue::Double(d) => *d,
        }
    }
}

impl Default for NumberValue {
    fn default() -> Self {
        NumberValue::Double(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NumberDataPoint {
    pub attributes: AttrMap,
    pub time_unix_nano: u64,
    pub value: NumberValue,
}

impl NumberDataPoint {
    pub fn double(value: f64) -> Self {
        Self {
            value: NumberValue::Double(value),
            ..Default::default()
        }
    }

    pub fn int(value: i64) -> Self {
        Self {
            value: NumberValue::Int(value),
            ..Default::default()
        }
    }

    pub fn with_attributes(mut self, attributes: AttrMap) -> Self {
        self.attributes = attributes;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistogramDataPoint {
    pub attributes: AttrMap,
    pub time_unix_nano: u64,
    pub count: u64,
    pub sum: f64,
    pub bucket_counts: Vec<u64>,
    pub explicit_bounds: Vec<f64>,
}

/// A full metric export batch, grouped like [`crate::Traces`].
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    pub resource_metrics: Vec<ResourceMetrics>,
}

impl Metrics {
    pub fn metric_count(&self) -> usize {
        self.resource_metrics
            .iter()
            .flat_map(|rm| &rm.scope_metrics)
            .map(|sm| sm.metrics.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceMetrics {
    pub resource: Resource,
    pub scope_metrics: Vec<ScopeMetrics>,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeMetrics {
    pub scope: InstrumentationScope,
    pub metrics: Vec<Metric>,
}
