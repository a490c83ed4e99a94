//! Property path resolution.
//!
//! Turns a textual path such as `mfxExtCodingOption2.MaxQPI` or
//! `mfxExtAvcTemporalLayers.Layer[].Scale` into the buffer, byte offset,
//! stride and element count it addresses within a schema set.

pub mod errors;
pub mod path;
pub mod resolve;

pub use errors::ConfigError;
pub use path::{Index, PathSegment, PathSyntaxError, PropertyPath};
pub use resolve::{resolve, ResolvedField, Target, MAX_INSTANCES};
