//! Core data structures.
//!
//! - Field kinds and typed values
//! - Buffer tags and four-character codes
//! - Parameter records with attached extension buffers
//! - Capability descriptors reported by implementations

pub mod descriptor;
pub mod record;
pub mod tag;
pub mod value;

pub use descriptor::CapabilityDescriptor;
pub use record::{AttachError, ConfigRecord, ExtensionBuffer, RecordView, Slot};
pub use tag::BufferTag;
pub use value::{FieldCategory, RecordId, TypeKind, Value};
