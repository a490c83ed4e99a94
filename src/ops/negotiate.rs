//! Extension buffer negotiation.
//!
//! A path into an extension record only reaches storage once a buffer with
//! the matching tag is attached. When it is not, the caller gets
//! [`ConfigError::MoreBuffersNeeded`] with the tag and size to allocate and
//! is expected to attach and retry. Nothing is remembered between calls.

use crate::core::record::{ConfigRecord, Slot};
use crate::resolver::{ConfigError, ResolvedField, Target};

/// Find the buffer a resolved field lives in.
///
/// Without an explicit instance index the first attached instance is used.
pub fn negotiate(
    record: &ConfigRecord,
    path: &str,
    resolved: &ResolvedField,
) -> Result<Slot, ConfigError> {
    match resolved.target {
        Target::Base => Ok(Slot::Base),
        Target::Extension {
            tag,
            size,
            instance,
            ..
        } => record
            .find_instance(tag, instance.unwrap_or(0))
            .ok_or_else(|| {
                tracing::debug!(
                    "{} needs buffer {} ({} attached)",
                    path,
                    tag,
                    record.instance_count(tag)
                );
                ConfigError::MoreBuffersNeeded {
                    path: path.to_string(),
                    tag,
                    size,
                }
            }),
    }
}

/// Every buffer a resolved field may live in. An explicit instance index
/// narrows this to at most one slot.
pub fn candidate_slots(record: &ConfigRecord, resolved: &ResolvedField) -> Vec<Slot> {
    match resolved.target {
        Target::Base => vec![Slot::Base],
        Target::Extension {
            tag,
            instance: Some(k),
            ..
        } => record.find_instance(tag, k).into_iter().collect(),
        Target::Extension { tag, .. } => record.instances(tag).collect(),
    }
}
