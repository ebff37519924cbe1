use crate::AttrMap;

/// The entity (process, host, service) that produced a batch of telemetry.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    pub attributes: AttrMap,
}

impl Resource {
    pub fn new(attributes: AttrMap) -> Self {
        Self { attributes }
    }
}

/// The instrumentation library that recorded a group of telemetry items.
#[derive(Debug, Clone, Default)]
pub struct InstrumentationScope {
    pub name: String,
    pub version: String,
}
