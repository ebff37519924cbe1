use serde::Serialize;

use crate::model::plugin::PluginPayload;
use crate::model::span::Span;

/// The outermost unit of transmission: the spans and plugin payloads of one
/// export call. Created fresh per call, destroyed after serialization.
#[derive(Debug, Default, Serialize)]
pub struct Bundle {
    #[serde(skip_serializing_if = "PluginContainer::is_empty")]
    pub metrics: PluginContainer,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<Span>,
}

#[derive(Debug, Default, Serialize)]
pub struct PluginContainer {
    pub plugins: Vec<PluginPayload>,
}

impl PluginContainer {
    fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends another bundle's output, preserving order.
    pub fn merge(&mut self, other: Bundle) {
        self.metrics.plugins.extend(other.metrics.plugins);
        self.spans.extend(other.spans);
    }

    pub fn marshal(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::plugin::{HostData, ProcessData};

    #[test]
    fn empty_bundle_serializes_to_nothing() {
        let body = Bundle::new().marshal().unwrap();
        assert_eq!(body, b"{}");
    }

    #[test]
    fn merge_preserves_order() {
        let mut bundle = Bundle::new();

        let mut first = Bundle::new();
        first
            .metrics
            .plugins
            .push(PluginPayload::host("h", HostData::default()));
        let mut second = Bundle::new();
        second
            .metrics
            .plugins
            .push(PluginPayload::process("1", ProcessData::default()));

        bundle.merge(first);
        bundle.merge(second);

        let names: Vec<_> = bundle.metrics.plugins.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["com.instana.plugin.host", "com.instana.plugin.process"]
        );
    }
}
