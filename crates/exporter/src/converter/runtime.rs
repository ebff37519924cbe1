//! Language-runtime converters: one per supported SDK language, each keyed on
//! the `telemetry.sdk.language` resource attribute and emitting a runtime
//! snapshot for the reporting process.

use instana_pdata::{semconv, AttrMap, Metric, Span};

use crate::converter::Converter;
use crate::model::{
    Bundle, GoProcessData, JvmProcessData, PluginPayload, PythonProcessData, RuntimeInfo,
};

fn sdk_language_is(attributes: &AttrMap, language: &str) -> bool {
    attributes.get_str(semconv::TELEMETRY_SDK_LANGUAGE) == Some(language)
}

fn resource_pid(attributes: &AttrMap) -> Option<i64> {
    attributes.contains_key(semconv::PROCESS_PID).then(|| {
        attributes
            .get_int(semconv::PROCESS_PID)
            .unwrap_or_default()
    })
}

fn attr_string(attributes: &AttrMap, key: &str) -> String {
    attributes.get_str(key).unwrap_or_default().to_string()
}

pub struct GoRuntimeConverter;

fn go_snapshot(attributes: &AttrMap, pid: i64) -> GoProcessData {
    GoProcessData {
        pid,
        snapshot: Some(RuntimeInfo {
            name: attr_string(attributes, semconv::PROCESS_EXECUTABLE_NAME),
            compiler: attr_string(attributes, semconv::PROCESS_RUNTIME_NAME),
            version: attr_string(attributes, semconv::PROCESS_RUNTIME_VERSION),
        }),
    }
}

impl Converter for GoRuntimeConverter {
    fn name(&self) -> &'static str {
        "go-runtime"
    }

    fn accepts_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> bool {
        sdk_language_is(attributes, semconv::TELEMETRY_SDK_LANGUAGE_GO)
    }

    fn convert_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> Vec<PluginPayload> {
        resource_pid(attributes)
            .map(|pid| PluginPayload::go_runtime(go_snapshot(attributes, pid)))
            .into_iter()
            .collect()
    }

    fn accepts_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> bool {
        sdk_language_is(attributes, semconv::TELEMETRY_SDK_LANGUAGE_GO)
    }

    fn convert_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> Bundle {
        let mut bundle = Bundle::new();
        bundle
            .metrics
            .plugins
            .extend(self.convert_metrics(attributes, &[]));
        bundle
    }
}

pub struct JavaRuntimeConverter;

fn jvm_snapshot(attributes: &AttrMap, pid: i64) -> JvmProcessData {
    JvmProcessData {
        pid,
        name: attr_string(attributes, semconv::PROCESS_EXECUTABLE_NAME),
        jvm_vendor: attr_string(attributes, semconv::PROCESS_RUNTIME_NAME),
        jvm_version: attr_string(attributes, semconv::PROCESS_RUNTIME_VERSION),
    }
}

impl Converter for JavaRuntimeConverter {
    fn name(&self) -> &'static str {
        "java-runtime"
    }

    fn accepts_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> bool {
        sdk_language_is(attributes, semconv::TELEMETRY_SDK_LANGUAGE_JAVA)
    }

    fn convert_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> Vec<PluginPayload> {
        resource_pid(attributes)
            .map(|pid| PluginPayload::jvm_runtime(jvm_snapshot(attributes, pid)))
            .into_iter()
            .collect()
    }

    fn accepts_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> bool {
        sdk_language_is(attributes, semconv::TELEMETRY_SDK_LANGUAGE_JAVA)
    }

    fn convert_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> Bundle {
        let mut bundle = Bundle::new();
        bundle
            .metrics
            .plugins
            .extend(self.convert_metrics(attributes, &[]));
        bundle
    }
}

pub struct PythonRuntimeConverter;

fn python_snapshot(attributes: &AttrMap, pid: i64) -> PythonProcessData {
    PythonProcessData {
        pid,
        name: attr_string(attributes, semconv::PROCESS_EXECUTABLE_NAME),
        version: attr_string(attributes, semconv::PROCESS_RUNTIME_VERSION),
        flavor: attr_string(attributes, semconv::PROCESS_RUNTIME_NAME),
    }
}

impl Converter for PythonRuntimeConverter {
    fn name(&self) -> &'static str {
        "python-runtime"
    }

    fn accepts_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> bool {
        sdk_language_is(attributes, semconv::TELEMETRY_SDK_LANGUAGE_PYTHON)
    }

    fn convert_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> Vec<PluginPayload> {
        resource_pid(attributes)
            .map(|pid| PluginPayload::python_runtime(python_snapshot(attributes, pid)))
            .into_iter()
            .collect()
    }

    fn accepts_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> bool {
        sdk_language_is(attributes, semconv::TELEMETRY_SDK_LANGUAGE_PYTHON)
    }

    fn convert_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> Bundle {
        let mut bundle = Bundle::new();
        bundle
            .metrics
            .plugins
            .extend(self.convert_metrics(attributes, &[]));
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PluginData;

    fn attrs(language: &str) -> AttrMap {
        let mut attrs = AttrMap::new();
        attrs.insert(semconv::TELEMETRY_SDK_LANGUAGE, language);
        attrs.insert(semconv::PROCESS_PID, 99i64);
        attrs.insert(semconv::PROCESS_EXECUTABLE_NAME, "svc");
        attrs.insert(semconv::PROCESS_RUNTIME_NAME, "rt");
        attrs.insert(semconv::PROCESS_RUNTIME_VERSION, "1.2.3");
        attrs
    }

    #[test]
    fn each_converter_keys_on_its_language() {
        let go = attrs("go");
        let java = attrs("java");
        let python = attrs("python");

        assert!(GoRuntimeConverter.accepts_metrics(&go, &[]));
        assert!(!GoRuntimeConverter.accepts_metrics(&java, &[]));
        assert!(JavaRuntimeConverter.accepts_metrics(&java, &[]));
        assert!(!JavaRuntimeConverter.accepts_metrics(&python, &[]));
        assert!(PythonRuntimeConverter.accepts_metrics(&python, &[]));
        assert!(!PythonRuntimeConverter.accepts_metrics(&go, &[]));
        assert!(!GoRuntimeConverter.accepts_metrics(&AttrMap::new(), &[]));
    }

    #[test]
    fn go_snapshot_carries_runtime_info() {
        let plugins = GoRuntimeConverter.convert_metrics(&attrs("go"), &[]);
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].name, "com.instana.plugin.golang");
        assert_eq!(plugins[0].entity_id, "99");

        let PluginData::GoRuntime(go) = &plugins[0].data else {
            panic!("expected a go runtime payload");
        };
        let snapshot = go.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.name, "svc");
        assert_eq!(snapshot.compiler, "rt");
        assert_eq!(snapshot.version, "1.2.3");
    }

    #[test]
    fn missing_pid_yields_nothing() {
        let attrs = attrs("java");
        let attrs: AttrMap = attrs
            .iter()
            .filter(|(k, _)| *k != semconv::PROCESS_PID)
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        assert!(JavaRuntimeConverter.convert_metrics(&attrs, &[]).is_empty());
    }

    #[test]
    fn span_batches_emit_the_same_payload() {
        let bundle = PythonRuntimeConverter.convert_spans(&attrs("python"), &[]);
        assert!(bundle.spans.is_empty());
        assert_eq!(bundle.metrics.plugins.len(), 1);
        assert_eq!(bundle.metrics.plugins[0].name, "com.instana.plugin.python");
    }
}
