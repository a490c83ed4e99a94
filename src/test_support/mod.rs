//! Test utilities and mocks for vplcfg tests.
//!
//! This module provides a recording enumerator and descriptor fixtures so
//! selection logic can be tested without probing real implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use vplcfg::test_support::{DescriptorFixture, MockEnumerator};
//!
//! #[test]
//! fn test_example() {
//!     let mut e = MockEnumerator::new(vec![
//!         DescriptorFixture::cpu("cpu").build(),
//!         DescriptorFixture::gpu("gpu").build(),
//!     ]);
//!
//!     let filters = ["Impl=2".parse().unwrap()];
//!     assert_eq!(select_implementation(&mut e, &filters), Some(1));
//!     assert_eq!(e.requests(), vec![0, 1]);
//! }
//! ```

pub mod fixtures;

use std::sync::{Arc, Mutex};

use crate::core::descriptor::CapabilityDescriptor;
use crate::ops::enumerate::ImplementationEnumerator;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Enumerator that records every index it is asked for.
///
/// Clones share the request log, so a test can keep a handle while the
/// enumerator itself is moved into the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockEnumerator {
    descriptors: Vec<CapabilityDescriptor>,
    requests: Arc<Mutex<Vec<usize>>>,
}

impl MockEnumerator {
    pub fn new(descriptors: Vec<CapabilityDescriptor>) -> Self {
        MockEnumerator {
            descriptors,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Indices requested so far, in request order.
    pub fn requests(&self) -> Vec<usize> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Forget recorded requests.
    pub fn clear(&self) {
        if let Ok(mut r) = self.requests.lock() {
            r.clear();
        }
    }
}

impl ImplementationEnumerator for MockEnumerator {
    fn next_descriptor(&mut self, index: usize) -> Option<CapabilityDescriptor> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(index);
        }
        self.descriptors.get(index).cloned()
    }
}
