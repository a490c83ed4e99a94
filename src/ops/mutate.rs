//! In-place reads and writes of resolved fields.

use crate::core::value::Value;
use crate::resolver::ResolvedField;

/// Coerced payload for one write.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Positional element values.
    Elements(Vec<Value>),
    /// Zero-filled text buffer of the field's full capacity.
    Text(Vec<u8>),
}

/// Write `payload` into `buf` at the resolved location.
///
/// Positional writes store `min(count, supplied)` elements starting at the
/// first one; later elements keep their previous contents. Text writes
/// replace the whole character array.
pub fn write(buf: &mut [u8], resolved: &ResolvedField, payload: &Payload) {
    match payload {
        Payload::Text(bytes) => {
            let end = resolved.offset + bytes.len();
            if let Some(dst) = buf.get_mut(resolved.offset..end) {
                dst.copy_from_slice(bytes);
            }
        }
        Payload::Elements(values) => {
            let size = resolved.element_size();
            for (i, value) in values.iter().take(resolved.count).enumerate() {
                let start = resolved.offset + i * resolved.stride;
                if let Some(dst) = buf.get_mut(start..start + size) {
                    value.write_le(dst);
                }
            }
        }
    }
}

/// Read the resolved elements from `buf`.
pub fn read(buf: &[u8], resolved: &ResolvedField) -> Vec<Value> {
    if resolved.text {
        let end = resolved.offset + resolved.capacity();
        return buf
            .get(resolved.offset..end)
            .map(|bytes| vec![Value::text_from_bytes(bytes)])
            .unwrap_or_default();
    }

    let size = resolved.element_size();
    (0..resolved.count)
        .filter_map(|i| {
            let start = resolved.offset + i * resolved.stride;
            Value::read_le(resolved.kind(), buf.get(start..start + size)?)
        })
        .collect()
}
