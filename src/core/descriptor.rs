//! Capability descriptors reported by implementations.

use std::collections::BTreeMap;

use crate::core::record::ConfigRecord;
use crate::core::value::Value;

/// Everything an implementation reports about itself.
///
/// The structured part is an `mfxImplDescription` record with one attached
/// sub-description per decoder, encoder or VPP capability. Properties that
/// have no record layout (adapter index, implemented function names, ...)
/// are kept as live values keyed by their dotted name.
#[derive(Debug, Clone)]
pub struct CapabilityDescriptor {
    name: String,
    record: ConfigRecord,
    live: BTreeMap<String, Vec<Value>>,
}

impl CapabilityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        CapabilityDescriptor {
            name: name.into(),
            record: ConfigRecord::impl_description(),
            live: BTreeMap::new(),
        }
    }

    /// Display name of the implementation.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut ConfigRecord {
        &mut self.record
    }

    /// Add a live property value. Repeated calls accumulate values.
    pub fn push_live(&mut self, path: impl Into<String>, value: Value) {
        self.live.entry(path.into()).or_default().push(value);
    }

    /// Values of a live property.
    pub fn live(&self, path: &str) -> Option<&[Value]> {
        self.live.get(path).map(Vec::as_slice)
    }

    pub fn live_properties(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.live.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
