//! String-addressed property access on parameter records.
//!
//! Every write runs the same pipeline: resolve the path against the
//! record's schema set, find the buffer holding the field, coerce the text
//! into the field's type, then store it. A failure at any stage leaves the
//! record untouched.

use crate::core::record::ConfigRecord;
use crate::core::value::Value;
use crate::ops::coerce::{coerce_list, coerce_text, coerce_value, CoerceError};
use crate::ops::mutate::{self, Payload};
use crate::ops::negotiate::negotiate;
use crate::resolver::{resolve, ConfigError, ResolvedField};

/// Set the property at `path` from its textual value.
///
/// Returns [`ConfigError::MoreBuffersNeeded`] without touching the record
/// when the field lives in an extension that is not attached. Extension
/// header fields are readable but not writable.
pub fn set_property(record: &mut ConfigRecord, path: &str, value: &str) -> Result<(), ConfigError> {
    let resolved = resolve(record.schemas(), path)?;
    if resolved.is_extension_header() {
        return Err(ConfigError::not_found(
            path,
            format!("`{}` is set when the buffer is attached", resolved.field.name),
            None,
        ));
    }
    let slot = negotiate(record, path, &resolved)?;

    let payload = coerce_payload(&resolved, value).map_err(|source| ConfigError::Unsupported {
        path: path.to_string(),
        value: value.to_string(),
        source,
    })?;

    let buf = record
        .buffer_mut(slot)
        .ok_or_else(|| ConfigError::not_found(path, "buffer is no longer attached", None))?;
    mutate::write(buf, &resolved, &payload);

    tracing::debug!("set {} = {}", path, value);
    Ok(())
}

/// Read the property at `path`.
///
/// Scalars and single elements yield one value, arrays every element, and
/// character arrays a single text value.
pub fn get_property(record: &ConfigRecord, path: &str) -> Result<Vec<Value>, ConfigError> {
    let resolved = resolve(record.schemas(), path)?;
    let slot = negotiate(record, path, &resolved)?;
    let buf = record
        .buffer(slot)
        .ok_or_else(|| ConfigError::not_found(path, "buffer is no longer attached", None))?;
    Ok(mutate::read(buf, &resolved))
}

/// [`set_property`], attaching a zeroed extension buffer and retrying once
/// if the field's extension is missing.
pub fn apply_with_attach(
    record: &mut ConfigRecord,
    path: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match set_property(record, path, value) {
        Err(ConfigError::MoreBuffersNeeded { tag, size, .. }) => {
            tracing::debug!("attaching {} ({} bytes) for {}", tag, size, path);
            record.attach_zeroed(tag)?;
            set_property(record, path, value)
        }
        other => other,
    }
}

pub(crate) fn coerce_payload(resolved: &ResolvedField, raw: &str) -> Result<Payload, CoerceError> {
    let field = resolved.field;
    if resolved.text {
        coerce_text(raw, resolved.capacity()).map(Payload::Text)
    } else if resolved.count == 1 {
        coerce_value(raw, field.kind, field.category).map(|v| Payload::Elements(vec![v]))
    } else {
        coerce_list(raw, field.kind, field.category).map(Payload::Elements)
    }
}
