//! The converter family: each converter decides via a predicate whether it
//! applies to a resource-scoped batch, and if so emits spans and/or plugin
//! payloads. Predicates are independent and may overlap; every accepting
//! converter runs and their outputs concatenate.

mod collector;
mod custom_metrics;
mod docker;
mod host;
mod process;
mod runtime;
mod span;

use instana_pdata::{AttrMap, Metric, Span};

use crate::model::{Bundle, PluginPayload};

pub use collector::CollectorConverter;
pub use custom_metrics::CustomMetricsConverter;
pub use docker::DockerConverter;
pub use host::HostConverter;
pub use process::ProcessConverter;
pub use runtime::{GoRuntimeConverter, JavaRuntimeConverter, PythonRuntimeConverter};
pub use span::SpanConverter;

pub trait Converter: Send + Sync {
    fn name(&self) -> &'static str;

    fn accepts_metrics(&self, _attributes: &AttrMap, _metrics: &[Metric]) -> bool {
        false
    }

    fn convert_metrics(&self, _attributes: &AttrMap, _metrics: &[Metric]) -> Vec<PluginPayload> {
        Vec::new()
    }

    fn accepts_spans(&self, _attributes: &AttrMap, _spans: &[Span]) -> bool {
        false
    }

    fn convert_spans(&self, _attributes: &AttrMap, _spans: &[Span]) -> Bundle {
        Bundle::new()
    }
}

/// Runs an ordered list of converters over each batch and merges everything
/// they accept. The composition is passed in explicitly; merge order follows
/// registration order, which is observable in the serialized output.
pub struct ConvertAll {
    converters: Vec<Box<dyn Converter>>,
}

impl ConvertAll {
    pub fn new(converters: Vec<Box<dyn Converter>>) -> Self {
        Self { converters }
    }

    /// The default composition covering every payload kind the agent accepts.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(DockerConverter),
            Box::new(HostConverter),
            Box::new(ProcessConverter),
            Box::new(CustomMetricsConverter),
            Box::new(CollectorConverter),
            Box::new(GoRuntimeConverter),
            Box::new(JavaRuntimeConverter),
            Box::new(PythonRuntimeConverter),
            Box::new(SpanConverter),
        ])
    }

    pub fn convert_metrics(&self, attributes: &AttrMap, metrics: &[Metric]) -> Vec<PluginPayload> {
        let mut plugins = Vec::new();
        for converter in &self.converters {
            if !converter.accepts_metrics(attributes, metrics) {
                log::trace!("converter {} did not accept the metric batch", converter.name());
                continue;
            }
            plugins.extend(converter.convert_metrics(attributes, metrics));
        }
        plugins
    }

    pub fn convert_spans(&self, attributes: &AttrMap, spans: &[Span]) -> Bundle {
        let mut bundle = Bundle::new();
        for converter in &self.converters {
            if !converter.accepts_spans(attributes, spans) {
                log::trace!("converter {} did not accept the span batch", converter.name());
                continue;
            }
            bundle.merge(converter.convert_spans(attributes, spans));
        }
        bundle
    }
}

pub(crate) fn contains_metric_with_prefix(metrics: &[Metric], prefix: &str) -> bool {
    metrics.iter().any(|m| m.name.starts_with(prefix))
}

pub(crate) fn contains_attributes(attributes: &AttrMap, keys: &[&str]) -> bool {
    keys.iter().all(|key| attributes.contains_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HostData, ProcessData};

    struct FakeConverter {
        name: &'static str,
        accepts: bool,
    }

    impl Converter for FakeConverter {
        fn name(&self) -> &'static str {
            self.name
        }

        fn accepts_metrics(&self, _attributes: &AttrMap, _metrics: &[Metric]) -> bool {
            self.accepts
        }

        fn convert_metrics(
            &self,
            _attributes: &AttrMap,
            _metrics: &[Metric],
        ) -> Vec<PluginPayload> {
            match self.name {
                "first" => vec![PluginPayload::host("h", HostData::default())],
                _ => vec![PluginPayload::process("1", ProcessData::default())],
            }
        }
    }

    #[test]
    fn merge_follows_registration_order() {
        let fanout = ConvertAll::new(vec![
            Box::new(FakeConverter {
                name: "first",
                accepts: true,
            }),
            Box::new(FakeConverter {
                name: "skipped",
                accepts: false,
            }),
            Box::new(FakeConverter {
                name: "second",
                accepts: true,
            }),
        ]);

        let plugins = fanout.convert_metrics(&AttrMap::new(), &[]);
        let names: Vec<_> = plugins.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["com.instana.plugin.host", "com.instana.plugin.process"]
        );
    }

    #[test]
    fn non_accepting_converter_does_not_suppress_others() {
        let fanout = ConvertAll::new(vec![
            Box::new(FakeConverter {
                name: "skipped",
                accepts: false,
            }),
            Box::new(FakeConverter {
                name: "second",
                accepts: true,
            }),
        ]);
        assert_eq!(fanout.convert_metrics(&AttrMap::new(), &[]).len(), 1);
    }

    #[test]
    fn prefix_helper() {
        let metrics = vec![instana_pdata::Metric::gauge("system.cpu.time", vec![])];
        assert!(contains_metric_with_prefix(&metrics, "system."));
        assert!(!contains_metric_with_prefix(&metrics, "container."));
        assert!(!contains_metric_with_prefix(&[], "system."));
    }

    #[test]
    fn attribute_presence_helper() {
        let attrs: AttrMap = [("foo", "bar"), ("fizz", "buzz")].into_iter().collect();
        assert!(!contains_attributes(&attrs, &["bingo"]));
        assert!(!contains_attributes(&attrs, &["bingo", "buzz"]));
        assert!(contains_attributes(&attrs, &["foo"]));
        assert!(contains_attributes(&attrs, &["foo", "fizz"]));
    }
}
