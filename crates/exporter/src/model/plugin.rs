use std::collections::BTreeMap;

use instana_pdata::{AttrMap, Metric, MetricData};
use serde::Serialize;

pub const PLUGIN_HOST: &str = "com.instana.plugin.host";
pub const PLUGIN_PROCESS: &str = "com.instana.plugin.process";
pub const PLUGIN_DOCKER: &str = "com.instana.plugin.docker";
pub const PLUGIN_GO: &str = "com.instana.plugin.golang";
pub const PLUGIN_JAVA: &str = "com.instana.plugin.java";
pub const PLUGIN_PYTHON: &str = "com.instana.plugin.python";
pub const PLUGIN_OTEL_METRICS: &str = "com.instana.plugin.otel.metrics";
pub const PLUGIN_GENERIC_HARDWARE: &str = "com.instana.plugin.generic.hardware";

/// One monitored entity's snapshot, under a backend-recognized plugin name.
#[derive(Debug, Clone, Serialize)]
pub struct PluginPayload {
    pub name: &'static str,
    #[serde(rename = "entityId")]
    pub entity_id: String,
    pub data: PluginData,
}

/// The closed set of payload bodies the backend understands.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PluginData {
    Host(HostData),
    Process(ProcessData),
    Docker(DockerData),
    GoRuntime(GoProcessData),
    JvmRuntime(JvmProcessData),
    PythonRuntime(PythonProcessData),
    CustomMetrics(CustomMetricsData),
    Zone(GenericZoneData),
}

impl PluginPayload {
    pub fn host(entity_id: impl Into<String>, data: HostData) -> Self {
        Self {
            name: PLUGIN_HOST,
            entity_id: entity_id.into(),
            data: PluginData::Host(data),
        }
    }

    pub fn process(entity_id: impl Into<String>, data: ProcessData) -> Self {
        Self {
            name: PLUGIN_PROCESS,
            entity_id: entity_id.into(),
            data: PluginData::Process(data),
        }
    }

    pub fn docker(entity_id: impl Into<String>, data: DockerData) -> Self {
        Self {
            name: PLUGIN_DOCKER,
            entity_id: entity_id.into(),
            data: PluginData::Docker(data),
        }
    }

    pub fn go_runtime(data: GoProcessData) -> Self {
        Self {
            name: PLUGIN_GO,
            entity_id: data.pid.to_string(),
            data: PluginData::GoRuntime(data),
        }
    }

    pub fn jvm_runtime(data: JvmProcessData) -> Self {
        Self {
            name: PLUGIN_JAVA,
            entity_id: data.pid.to_string(),
            data: PluginData::JvmRuntime(data),
        }
    }

    pub fn python_runtime(data: PythonProcessData) -> Self {
        Self {
            name: PLUGIN_PYTHON,
            entity_id: data.pid.to_string(),
            data: PluginData::PythonRuntime(data),
        }
    }

    pub fn custom_metrics(entity_id: impl Into<String>, data: CustomMetricsData) -> Self {
        Self {
            name: PLUGIN_OTEL_METRICS,
            entity_id: entity_id.into(),
            data: PluginData::CustomMetrics(data),
        }
    }

    /// Synthetic grouping marker attached once per non-empty bundle.
    pub fn zone(zone_name: impl Into<String>) -> Self {
        Self {
            name: PLUGIN_GENERIC_HARDWARE,
            entity_id: "localhost".to_string(),
            data: PluginData::Zone(GenericZoneData {
                group_id: zone_name.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CpuSummary {
    #[serde(skip_serializing_if = "f64_is_zero")]
    pub sys: f64,
    #[serde(skip_serializing_if = "f64_is_zero")]
    pub idle: f64,
    #[serde(skip_serializing_if = "f64_is_zero")]
    pub user: f64,
    #[serde(skip_serializing_if = "f64_is_zero")]
    pub steal: f64,
}

impl CpuSummary {
    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HostData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "CpuSummary::is_zero")]
    pub cpu: CpuSummary,
    #[serde(rename = "cpus", skip_serializing_if = "Vec::is_empty")]
    pub cpu_summaries: Vec<CpuSummary>,
    #[serde(rename = "hostname", skip_serializing_if = "String::is_empty")]
    pub host_name: String,
    #[serde(rename = "cpu.count", skip_serializing_if = "usize_is_zero")]
    pub cpu_count: usize,
    #[serde(rename = "os.name", skip_serializing_if = "String::is_empty")]
    pub os_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessData {
    pub pid: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub exec: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(rename = "container", skip_serializing_if = "String::is_empty")]
    pub container_id: String,
    #[serde(
        rename = "com.instana.plugin.host.pid",
        skip_serializing_if = "Option::is_none"
    )]
    pub host_pid: Option<i64>,
}

/// Container snapshot. Fields the inbound telemetry cannot populate yet
/// (command, timestamps, daemon versions, network/storage settings) stay
/// `None` and off the wire instead of carrying made-up defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DockerData {
    pub id: String,
    pub image: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "startedAt", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(rename = "networkMode", skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    #[serde(rename = "portBindings", skip_serializing_if = "Option::is_none")]
    pub port_bindings: Option<String>,
    #[serde(rename = "storageDriver", skip_serializing_if = "Option::is_none")]
    pub storage_driver: Option<String>,
    #[serde(rename = "dockerVersion", skip_serializing_if = "Option::is_none")]
    pub docker_version: Option<String>,
    #[serde(rename = "dockerApiVersion", skip_serializing_if = "Option::is_none")]
    pub docker_api_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RuntimeInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub compiler: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoProcessData {
    pub pid: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<RuntimeInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JvmProcessData {
    pub pid: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "jvm.vendor", skip_serializing_if = "String::is_empty")]
    pub jvm_vendor: String,
    #[serde(rename = "jvm.version", skip_serializing_if = "String::is_empty")]
    pub jvm_version: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PythonProcessData {
    pub pid: i64,
    #[serde(rename = "snapshot.name", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "snapshot.version", skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(rename = "snapshot.f", skip_serializing_if = "String::is_empty")]
    pub flavor: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenericZoneData {
    #[serde(rename = "availability-zone")]
    pub group_id: String,
}

/// Gauges, sums and histogram means folded out of a generic metric batch,
/// keyed by metric name plus sorted attribute signature.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomMetricsData {
    pub metrics: MetricMaps,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pid: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricMaps {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub gauges: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub histograms_mean: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sums: BTreeMap<String, f64>,
}

impl CustomMetricsData {
    /// Folds one metric's data points into the maps.
    ///
    /// Histogram entries record the data point's raw sum under
    /// `histograms_mean` — an approximation the backend expects, not a true
    /// mean.
    pub fn append_metric(&mut self, metric: &Metric) {
        match &metric.data {
            MetricData::Gauge(gauge) => {
                for dp in &gauge.data_points {
                    self.metrics
                        .gauges
                        .insert(compact_name(&metric.name, &dp.attributes), dp.value.as_f64());
                }
            }
            MetricData::Sum(sum) => {
                for dp in &sum.data_points {
                    self.metrics
                        .sums
                        .insert(compact_name(&metric.name, &dp.attributes), dp.value.as_f64());
                }
            }
            MetricData::Histogram(histogram) => {
                for dp in &histogram.data_points {
                    self.metrics
                        .histograms_mean
                        .insert(compact_name(&metric.name, &dp.attributes), dp.sum);
                }
            }
        }
    }
}

/// Renders `name{k1="v1",k2="v2"}` with attributes sorted by key, or `name{}`
/// for a bare metric.
fn compact_name(metric_name: &str, attributes: &AttrMap) -> String {
    if attributes.is_empty() {
        return format!("{metric_name}{{}}");
    }
    let labels: Vec<String> = attributes
        .sorted()
        .into_iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect();
    format!("{}{{{}}}", metric_name, labels.join(","))
}

fn f64_is_zero(v: &f64) -> bool {
    *v == 0.0
}

fn usize_is_zero(v: &usize) -> bool {
    *v == 0
}
