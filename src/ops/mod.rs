//! High-level operations.
//!
//! Property access on parameter records and capability matching over
//! enumerated implementations.

pub mod coerce;
pub mod enumerate;
pub mod manifest;
pub mod matcher;
pub mod mutate;
pub mod negotiate;
pub mod property;

pub use coerce::{coerce_list, coerce_text, coerce_value, CoerceError};
pub use enumerate::{matching_indices, select_implementation, ImplementationEnumerator, StaticEnumerator};
pub use manifest::{load_descriptors, ImplementationEntry, Manifest, ManifestError};
pub use matcher::{match_capability, FilterValue, ParseFilterError, PropertyFilter};
pub use negotiate::negotiate;
pub use property::{apply_with_attach, get_property, set_property};
