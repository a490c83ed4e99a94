//! Implementation enumeration and selection.
//!
//! Enumeration is pull-based: the selector asks for descriptor 0, 1, ...
//! until the enumerator runs out, testing each against the filters in
//! turn. Backends that probe hardware lazily only pay for the descriptors
//! actually requested.

use crate::core::descriptor::CapabilityDescriptor;
use crate::ops::matcher::{match_capability, PropertyFilter};

/// Source of capability descriptors, one per available implementation.
pub trait ImplementationEnumerator {
    /// Descriptor of the `index`-th implementation, or `None` past the end.
    fn next_descriptor(&mut self, index: usize) -> Option<CapabilityDescriptor>;
}

/// Enumerator over a fixed list of descriptors.
#[derive(Debug, Clone, Default)]
pub struct StaticEnumerator {
    descriptors: Vec<CapabilityDescriptor>,
}

impl StaticEnumerator {
    pub fn new(descriptors: Vec<CapabilityDescriptor>) -> Self {
        StaticEnumerator { descriptors }
    }

    pub fn descriptors(&self) -> &[CapabilityDescriptor] {
        &self.descriptors
    }
}

impl ImplementationEnumerator for StaticEnumerator {
    fn next_descriptor(&mut self, index: usize) -> Option<CapabilityDescriptor> {
        self.descriptors.get(index).cloned()
    }
}

/// Index of the first implementation satisfying every filter.
pub fn select_implementation<E>(enumerator: &mut E, filters: &[PropertyFilter]) -> Option<usize>
where
    E: ImplementationEnumerator + ?Sized,
{
    let mut index = 0;
    while let Some(descriptor) = enumerator.next_descriptor(index) {
        if match_capability(&descriptor, filters) {
            tracing::debug!("selected implementation {} ({})", index, descriptor.name());
            return Some(index);
        }
        index += 1;
    }
    tracing::debug!("no implementation among {} satisfies the filters", index);
    None
}

/// Indices of every implementation satisfying every filter.
pub fn matching_indices<E>(enumerator: &mut E, filters: &[PropertyFilter]) -> Vec<usize>
where
    E: ImplementationEnumerator + ?Sized,
{
    let mut matches = Vec::new();
    let mut index = 0;
    while let Some(descriptor) = enumerator.next_descriptor(index) {
        if match_capability(&descriptor, filters) {
            matches.push(index);
        }
        index += 1;
    }
    matches
}
