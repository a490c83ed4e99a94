//! Parameter records: a base buffer plus attached extension buffers.
//!
//! Extension buffers are owned byte arenas tagged with a [`BufferTag`]. A
//! typed view over a buffer is only handed out after its tag has been
//! matched against the schema set, so no caller ever reinterprets bytes
//! under the wrong layout.

use thiserror::Error;

use crate::core::tag::BufferTag;
use crate::core::value::{TypeKind, Value};
use crate::schema::{catalog, RecordSchema, SchemaSet};

/// Error attaching an extension buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("buffer tag {tag} is not a known extension")]
    UnknownTag { tag: BufferTag },

    #[error("extension {tag} needs exactly {expected} bytes, got {actual}")]
    SizeMismatch {
        tag: BufferTag,
        expected: usize,
        actual: usize,
    },
}

/// One attached extension buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionBuffer {
    tag: BufferTag,
    data: Vec<u8>,
}

impl ExtensionBuffer {
    pub fn tag(&self) -> BufferTag {
        self.tag
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Which buffer of a record an access targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Base,
    /// Position in the record's attachment list.
    Extension(usize),
}

/// A base record instance and its attached extensions.
#[derive(Debug, Clone)]
pub struct ConfigRecord {
    schemas: &'static SchemaSet,
    base: Vec<u8>,
    extensions: Vec<ExtensionBuffer>,
}

impl ConfigRecord {
    /// Zeroed base record with no attachments.
    pub fn new(schemas: &'static SchemaSet) -> Self {
        ConfigRecord {
            schemas,
            base: vec![0; schemas.base().size()],
            extensions: Vec::new(),
        }
    }

    /// Empty `mfxVideoParam` record.
    pub fn video_param() -> Self {
        Self::new(catalog().video_param())
    }

    /// Empty `mfxImplDescription` record.
    pub fn impl_description() -> Self {
        Self::new(catalog().impl_description())
    }

    pub fn schemas(&self) -> &'static SchemaSet {
        self.schemas
    }

    pub fn base_bytes(&self) -> &[u8] {
        &self.base
    }

    /// Attached extensions in attachment order.
    pub fn extensions(&self) -> &[ExtensionBuffer] {
        &self.extensions
    }

    /// Attach a caller-provided buffer under `tag`.
    ///
    /// The buffer must be exactly the declared size of the extension. The
    /// header fields are overwritten with the tag and size.
    pub fn attach(&mut self, tag: BufferTag, mut data: Vec<u8>) -> Result<(), AttachError> {
        let schema = self
            .schemas
            .extension_by_tag(tag)
            .ok_or(AttachError::UnknownTag { tag })?;

        if data.len() != schema.size() {
            return Err(AttachError::SizeMismatch {
                tag,
                expected: schema.size(),
                actual: data.len(),
            });
        }

        write_header(&mut data, tag);
        tracing::debug!("attached {} ({} bytes)", schema.name(), data.len());
        self.extensions.push(ExtensionBuffer { tag, data });
        Ok(())
    }

    /// Attach a zero-filled buffer of the declared size.
    pub fn attach_zeroed(&mut self, tag: BufferTag) -> Result<(), AttachError> {
        let size = self
            .schemas
            .extension_by_tag(tag)
            .map(RecordSchema::size)
            .ok_or(AttachError::UnknownTag { tag })?;
        self.attach(tag, vec![0; size])
    }

    /// Remove the most recently attached buffer with `tag`.
    pub fn detach(&mut self, tag: BufferTag) -> Option<ExtensionBuffer> {
        let pos = self.extensions.iter().rposition(|ext| ext.tag == tag)?;
        Some(self.extensions.remove(pos))
    }

    /// Number of attached instances of `tag`.
    pub fn instance_count(&self, tag: BufferTag) -> usize {
        self.extensions.iter().filter(|ext| ext.tag == tag).count()
    }

    /// Slot of the `instance`-th attachment with `tag`.
    pub fn find_instance(&self, tag: BufferTag, instance: usize) -> Option<Slot> {
        self.extensions
            .iter()
            .enumerate()
            .filter(|(_, ext)| ext.tag == tag)
            .nth(instance)
            .map(|(pos, _)| Slot::Extension(pos))
    }

    /// Slots of every attachment with `tag`.
    pub fn instances(&self, tag: BufferTag) -> impl Iterator<Item = Slot> + '_ {
        self.extensions
            .iter()
            .enumerate()
            .filter(move |(_, ext)| ext.tag == tag)
            .map(|(pos, _)| Slot::Extension(pos))
    }

    pub fn buffer(&self, slot: Slot) -> Option<&[u8]> {
        match slot {
            Slot::Base => Some(&self.base),
            Slot::Extension(pos) => self.extensions.get(pos).map(|ext| ext.data.as_slice()),
        }
    }

    pub(crate) fn buffer_mut(&mut self, slot: Slot) -> Option<&mut [u8]> {
        match slot {
            Slot::Base => Some(&mut self.base),
            Slot::Extension(pos) => self
                .extensions
                .get_mut(pos)
                .map(|ext| ext.data.as_mut_slice()),
        }
    }

    /// Typed view over the base record.
    pub fn base_view(&self) -> RecordView<'_> {
        RecordView {
            schemas: self.schemas,
            schema: self.schemas.base(),
            bytes: &self.base,
        }
    }

    /// Typed view over the first attached extension with `tag`.
    pub fn extension_view(&self, tag: BufferTag) -> Option<RecordView<'_>> {
        let schema = self.schemas.extension_by_tag(tag)?;
        let ext = self.extensions.iter().find(|ext| ext.tag == tag)?;
        Some(RecordView {
            schemas: self.schemas,
            schema,
            bytes: &ext.data,
        })
    }
}

fn write_header(data: &mut [u8], tag: BufferTag) {
    let size = data.len() as u32;
    data[0..4].copy_from_slice(&tag.raw().to_le_bytes());
    data[4..8].copy_from_slice(&size.to_le_bytes());
}

/// Read-only typed access to one buffer under its matching schema.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    schemas: &'static SchemaSet,
    schema: &'static RecordSchema,
    bytes: &'a [u8],
}

impl<'a> RecordView<'a> {
    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    /// Scalar value of a direct field. Arrays yield their first element,
    /// text arrays their contents.
    pub fn get(&self, name: &str) -> Option<Value> {
        let field = self.schema.field(name)?;
        let start = field.offset;
        match field.kind {
            TypeKind::Record(_) => None,
            _ if field.is_text() => Some(Value::text_from_bytes(
                self.bytes.get(start..start + field.byte_len())?,
            )),
            kind => Value::read_le(kind, self.bytes.get(start..start + field.size)?),
        }
    }

    /// View of a nested record field.
    pub fn nested(&self, name: &str) -> Option<RecordView<'a>> {
        let field = self.schema.field(name)?;
        let TypeKind::Record(id) = field.kind else {
            return None;
        };
        let schema = self.schemas.record(id)?;
        Some(RecordView {
            schemas: self.schemas,
            schema,
            bytes: self.bytes.get(field.offset..field.offset + schema.size())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VSIN: BufferTag = BufferTag::new(*b"VSIN");

    #[test]
    fn test_new_record_is_zeroed() {
        let record = ConfigRecord::video_param();
        assert!(record.base_bytes().iter().all(|&b| b == 0));
        assert!(record.extensions().is_empty());
    }

    #[test]
    fn test_attach_writes_header() {
        let mut record = ConfigRecord::video_param();
        record.attach(VSIN, vec![0xAA; 20]).unwrap();

        let view = record.extension_view(VSIN).unwrap();
        assert_eq!(view.get("BufferId"), Some(Value::U32(VSIN.raw())));
        assert_eq!(view.get("BufferSz"), Some(Value::U32(20)));
        assert_eq!(view.get("VideoFormat"), Some(Value::U16(0xAAAA)));
    }

    #[test]
    fn test_attach_rejects_wrong_size() {
        let mut record = ConfigRecord::video_param();
        let err = record.attach(VSIN, vec![0; 19]).unwrap_err();
        assert_eq!(
            err,
            AttachError::SizeMismatch {
                tag: VSIN,
                expected: 20,
                actual: 19
            }
        );
        assert!(record.extensions().is_empty());
    }

    #[test]
    fn test_attach_rejects_unknown_tag() {
        let mut record = ConfigRecord::video_param();
        let tag = BufferTag::new(*b"NOPE");
        assert_eq!(
            record.attach_zeroed(tag),
            Err(AttachError::UnknownTag { tag })
        );
    }

    #[test]
    fn test_capability_tags_are_not_video_extensions() {
        let mut record = ConfigRecord::video_param();
        let tag = crate::schema::tables::DECODER_TAG;
        assert!(record.attach_zeroed(tag).is_err());
    }

    #[test]
    fn test_instances_and_detach() {
        let mut record = ConfigRecord::video_param();
        record.attach_zeroed(VSIN).unwrap();
        record.attach_zeroed(BufferTag::new(*b"CDO2")).unwrap();
        record.attach_zeroed(VSIN).unwrap();

        assert_eq!(record.instance_count(VSIN), 2);
        assert_eq!(record.find_instance(VSIN, 1), Some(Slot::Extension(2)));
        assert_eq!(record.find_instance(VSIN, 2), None);

        let removed = record.detach(VSIN).unwrap();
        assert_eq!(removed.tag(), VSIN);
        assert_eq!(record.instance_count(VSIN), 1);
        assert_eq!(record.extensions().len(), 2);
    }

    #[test]
    fn test_nested_view() {
        let record = ConfigRecord::video_param();
        let frame = record
            .base_view()
            .nested("mfx")
            .and_then(|mfx| mfx.nested("FrameInfo"))
            .unwrap();
        assert_eq!(frame.schema().name(), "mfxFrameInfo");
        assert_eq!(frame.get("Width"), Some(Value::U16(0)));
    }
}
