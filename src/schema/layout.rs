//! Record layout tables and the layout engine.
//!
//! Records are declared as static tables of [`Def`] entries in declaration
//! order. The engine places them with natural C alignment: every field sits
//! at the next multiple of its own alignment and the record size is rounded
//! up to the largest member alignment. Overlays place every branch at the
//! same offset, so aliases such as `QPI`/`InitialDelayInKB` share storage.

use std::collections::HashMap;

use thiserror::Error;

use super::{FieldDescriptor, RecordKind, RecordSchema};
use crate::core::value::{FieldCategory, RecordId, TypeKind};

/// One entry of a record table.
#[derive(Debug, Clone, Copy)]
pub enum Def {
    /// Addressable field (scalar, array, or nested record).
    Field {
        name: &'static str,
        kind: TypeKind,
        shape: &'static [usize],
        category: FieldCategory,
    },
    /// Storage that occupies layout space but cannot be addressed.
    Pad {
        kind: TypeKind,
        shape: &'static [usize],
    },
    /// Branches laid out at a shared offset.
    Overlay {
        branches: &'static [&'static [Def]],
    },
}

/// Static declaration of one record type.
#[derive(Debug, Clone, Copy)]
pub struct RecordDef {
    pub name: &'static str,
    pub kind: RecordKind,
    pub defs: &'static [Def],
}

/// Byte size of [`EXTENSION_HEADER`].
pub const EXTENSION_HEADER_SIZE: usize = 8;

/// Every extension record starts with this header.
pub static EXTENSION_HEADER: &[Def] = &[
    field!(U32 "BufferId"),
    field!(U32 "BufferSz"),
];

/// Inconsistency in a static record table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("record `{record}` references `{nested}` before it is declared")]
    UnknownRecord {
        record: &'static str,
        nested: &'static str,
    },

    #[error("record `{record}` declares field `{field}` twice")]
    DuplicateField {
        record: &'static str,
        field: &'static str,
    },

    #[error("record `{0}` is declared twice")]
    DuplicateRecord(&'static str),

    #[error("record table has no base record")]
    MissingBase,
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

struct Placer<'a> {
    record: &'static str,
    built: &'a HashMap<RecordId, RecordSchema>,
}

impl Placer<'_> {
    /// Size and alignment of one element of `kind`.
    fn element(&self, kind: TypeKind) -> Result<(usize, usize), LayoutError> {
        match kind {
            TypeKind::Record(id) => self
                .built
                .get(&id)
                .map(|schema| (schema.size(), schema.align()))
                .ok_or(LayoutError::UnknownRecord {
                    record: self.record,
                    nested: id.as_str(),
                }),
            scalar => Ok((scalar.scalar_size(), scalar.scalar_size())),
        }
    }

    /// Lay out `defs` starting at `start`. Returns the end offset and the
    /// largest alignment seen.
    fn place(
        &self,
        defs: &[Def],
        start: usize,
        out: &mut Vec<FieldDescriptor>,
    ) -> Result<(usize, usize), LayoutError> {
        let mut cursor = start;
        let mut max_align = 1;

        for def in defs {
            match *def {
                Def::Field {
                    name,
                    kind,
                    shape,
                    category,
                } => {
                    let (size, align) = self.element(kind)?;
                    let offset = align_up(cursor, align);
                    out.push(FieldDescriptor {
                        name,
                        kind,
                        category,
                        offset,
                        size,
                        array_shape: shape,
                        owning_record: RecordId(self.record),
                    });
                    cursor = offset + size * shape.iter().product::<usize>();
                    max_align = max_align.max(align);
                }
                Def::Pad { kind, shape } => {
                    let (size, align) = self.element(kind)?;
                    cursor = align_up(cursor, align) + size * shape.iter().product::<usize>();
                    max_align = max_align.max(align);
                }
                Def::Overlay { branches } => {
                    let mut align = 1;
                    for branch in branches {
                        let (_, branch_align) = self.place(branch, 0, &mut Vec::new())?;
                        align = align.max(branch_align);
                    }

                    let base = align_up(cursor, align);
                    let mut end = base;
                    for branch in branches {
                        let (branch_end, _) = self.place(branch, base, out)?;
                        end = end.max(branch_end);
                    }

                    cursor = base + align_up(end - base, align);
                    max_align = max_align.max(align);
                }
            }
        }

        Ok((cursor, max_align))
    }
}

/// Build schemas for `defs` in declaration order. Nested records must be
/// declared before the records that embed them.
pub fn build_records(
    defs: &[RecordDef],
) -> Result<HashMap<RecordId, RecordSchema>, LayoutError> {
    let mut built: HashMap<RecordId, RecordSchema> = HashMap::new();

    for def in defs {
        let id = RecordId(def.name);
        if built.contains_key(&id) {
            return Err(LayoutError::DuplicateRecord(def.name));
        }

        let placer = Placer {
            record: def.name,
            built: &built,
        };

        let mut fields = Vec::new();
        let mut cursor = 0;
        let mut align = 1;
        if matches!(def.kind, RecordKind::Extension { .. }) {
            (cursor, align) = placer.place(EXTENSION_HEADER, 0, &mut fields)?;
        }
        let (end, body_align) = placer.place(def.defs, cursor, &mut fields)?;
        align = align.max(body_align);
        let size = align_up(end, align);

        let schema = RecordSchema::new(id, def.kind, size, align, fields).map_err(|field| {
            LayoutError::DuplicateField {
                record: def.name,
                field,
            }
        })?;
        tracing::trace!("laid out {} ({} bytes)", def.name, size);
        built.insert(id, schema);
    }

    Ok(built)
}
