//! vplcfg - Property-path configuration for video acceleration parameter records
//!
//! This crate provides the core library functionality for vplcfg:
//! schema-driven resolution of textual property paths, value coercion,
//! extension-buffer negotiation, and capability matching over enumerated
//! implementations.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod schema;
pub mod util;

/// Test utilities and mocks for vplcfg tests.
///
/// This module is available when compiling tests or with the
/// `test-support` feature. It provides a recording enumerator and
/// descriptor and manifest fixtures.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use core::{
    descriptor::CapabilityDescriptor, record::ConfigRecord, tag::BufferTag, value::TypeKind,
    value::Value,
};

pub use ops::{
    apply_with_attach, get_property, match_capability, matching_indices, select_implementation,
    set_property, FilterValue, ImplementationEnumerator, Manifest, PropertyFilter,
    StaticEnumerator,
};
pub use resolver::{resolve, ConfigError};
pub use schema::{catalog, SchemaCatalog};
