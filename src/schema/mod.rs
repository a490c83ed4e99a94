//! Schema catalog: static metadata for every known record type.
//!
//! The catalog is built once from the tables in [`tables`] and lives for
//! the whole process. Two schema sets exist:
//!
//! - the video parameter set, rooted at `mfxVideoParam`, with its
//!   extension buffers (`mfxExtCodingOption2`, `mfxExtVPPScaling`, ...)
//! - the implementation description set, rooted at `mfxImplDescription`,
//!   with flattened decoder/encoder/VPP sub-descriptions
//!
//! Adding a field is a table change; nothing else needs to know about it.

macro_rules! field {
    ($kind:ident $name:literal) => {
        $crate::schema::layout::Def::Field {
            name: $name,
            kind: $crate::core::value::TypeKind::$kind,
            shape: &[],
            category: $crate::core::value::FieldCategory::Value,
        }
    };
    ($kind:ident $name:literal [$($dim:literal),+]) => {
        $crate::schema::layout::Def::Field {
            name: $name,
            kind: $crate::core::value::TypeKind::$kind,
            shape: &[$($dim),+],
            category: $crate::core::value::FieldCategory::Value,
        }
    };
}

macro_rules! fourcc_field {
    ($name:literal) => {
        $crate::schema::layout::Def::Field {
            name: $name,
            kind: $crate::core::value::TypeKind::U32,
            shape: &[],
            category: $crate::core::value::FieldCategory::FourCC,
        }
    };
}

macro_rules! record {
    ($name:literal : $rec:literal) => {
        $crate::schema::layout::Def::Field {
            name: $name,
            kind: $crate::core::value::TypeKind::Record($crate::core::value::RecordId($rec)),
            shape: &[],
            category: $crate::core::value::FieldCategory::Value,
        }
    };
    ($name:literal : $rec:literal [$($dim:literal),+]) => {
        $crate::schema::layout::Def::Field {
            name: $name,
            kind: $crate::core::value::TypeKind::Record($crate::core::value::RecordId($rec)),
            shape: &[$($dim),+],
            category: $crate::core::value::FieldCategory::Value,
        }
    };
}

macro_rules! pad {
    ($kind:ident) => {
        $crate::schema::layout::Def::Pad {
            kind: $crate::core::value::TypeKind::$kind,
            shape: &[],
        }
    };
    ($kind:ident [$($dim:literal),+]) => {
        $crate::schema::layout::Def::Pad {
            kind: $crate::core::value::TypeKind::$kind,
            shape: &[$($dim),+],
        }
    };
}

macro_rules! overlay {
    ($([$($def:expr),* $(,)?]),+ $(,)?) => {
        $crate::schema::layout::Def::Overlay {
            branches: &[$(&[$($def),*]),+],
        }
    };
}

pub mod layout;
pub mod tables;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::core::tag::BufferTag;
use crate::core::value::{FieldCategory, RecordId, TypeKind};

pub use layout::LayoutError;

/// Metadata for one field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,

    pub kind: TypeKind,

    pub category: FieldCategory,

    /// Byte offset from the start of the owning record.
    pub offset: usize,

    /// Size of one element in bytes.
    pub size: usize,

    /// Declared dimensions; empty for scalars.
    pub array_shape: &'static [usize],

    pub owning_record: RecordId,
}

impl FieldDescriptor {
    pub fn is_array(&self) -> bool {
        !self.array_shape.is_empty()
    }

    /// Number of elements (1 for scalars).
    pub fn element_count(&self) -> usize {
        self.array_shape.iter().product()
    }

    /// Whether this field is a fixed-length text buffer.
    pub fn is_text(&self) -> bool {
        self.kind == TypeKind::Char && self.is_array()
    }

    /// Total bytes occupied by the field.
    pub fn byte_len(&self) -> usize {
        self.size * self.element_count()
    }
}

/// Role of a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Root record of a schema set.
    Base,
    /// Record that only appears embedded in another record.
    Nested,
    /// Separately allocated record identified by a buffer tag.
    Extension { tag: BufferTag },
}

/// Field layout of one record type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    id: RecordId,
    kind: RecordKind,
    size: usize,
    align: usize,
    fields: Vec<FieldDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl RecordSchema {
    /// Build a schema from laid-out fields. Returns the first duplicated
    /// field name on conflict.
    pub(crate) fn new(
        id: RecordId,
        kind: RecordKind,
        size: usize,
        align: usize,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, &'static str> {
        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if index.insert(field.name, i).is_some() {
                return Err(field.name);
            }
        }

        Ok(RecordSchema {
            id,
            kind,
            size,
            align,
            fields,
            index,
        })
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Declared byte size, including the header for extension records.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn align(&self) -> usize {
        self.align
    }

    /// Tag of an extension record.
    pub fn tag(&self) -> Option<BufferTag> {
        match self.kind {
            RecordKind::Extension { tag } => Some(tag),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Fields in layout order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// A leaf field reachable from a schema set, as listed by [`SchemaSet::leaf_paths`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPath {
    /// Property path addressing the leaf.
    pub path: String,
    pub kind: TypeKind,
    pub category: FieldCategory,
    /// Byte offset within the base record or extension buffer.
    pub offset: usize,
    pub shape: Vec<usize>,
}

/// A base record together with its extension and nested records.
#[derive(Debug)]
pub struct SchemaSet {
    base: RecordId,
    records: HashMap<RecordId, RecordSchema>,
    extensions: Vec<RecordId>,
    by_tag: HashMap<BufferTag, RecordId>,
    aliases: HashMap<&'static str, &'static str>,
}

impl SchemaSet {
    /// Build a schema set from static tables. The first `Base` record is the
    /// root; aliases map short names to full property paths.
    pub fn build(
        defs: &[layout::RecordDef],
        aliases: &[(&'static str, &'static str)],
    ) -> Result<Self, LayoutError> {
        let records = layout::build_records(defs)?;

        let base = defs
            .iter()
            .find(|def| def.kind == RecordKind::Base)
            .map(|def| RecordId(def.name))
            .ok_or(LayoutError::MissingBase)?;

        let mut extensions = Vec::new();
        let mut by_tag = HashMap::new();
        for def in defs {
            if let RecordKind::Extension { tag } = def.kind {
                if by_tag.insert(tag, RecordId(def.name)).is_some() {
                    return Err(LayoutError::DuplicateRecord(def.name));
                }
                extensions.push(RecordId(def.name));
            }
        }

        Ok(SchemaSet {
            base,
            records,
            extensions,
            by_tag,
            aliases: aliases.iter().copied().collect(),
        })
    }

    /// The root record schema.
    pub fn base(&self) -> &RecordSchema {
        // The base id always comes from the same table that built `records`.
        &self.records[&self.base]
    }

    pub fn record(&self, id: RecordId) -> Option<&RecordSchema> {
        self.records.get(&id)
    }

    /// Extension schema by its external name (e.g. `mfxExtCodingOption2`).
    pub fn extension_by_name(&self, name: &str) -> Option<&RecordSchema> {
        self.extensions
            .iter()
            .find(|id| id.as_str() == name)
            .and_then(|id| self.records.get(id))
    }

    pub fn extension_by_tag(&self, tag: BufferTag) -> Option<&RecordSchema> {
        self.by_tag.get(&tag).and_then(|id| self.records.get(id))
    }

    /// Extension schemas in declaration order.
    pub fn extensions(&self) -> impl Iterator<Item = &RecordSchema> {
        self.extensions.iter().filter_map(|id| self.records.get(id))
    }

    /// Full path for a flat alias such as `Width`.
    pub fn alias(&self, name: &str) -> Option<&'static str> {
        self.aliases.get(name).copied()
    }

    /// Every addressable leaf, base record first, then each extension.
    pub fn leaf_paths(&self) -> Vec<LeafPath> {
        let mut out = Vec::new();
        self.collect_leaves(self.base(), "", 0, &mut out);
        for ext in self.extensions() {
            self.collect_leaves(ext, ext.name(), 0, &mut out);
        }
        out
    }

    fn collect_leaves(
        &self,
        schema: &RecordSchema,
        prefix: &str,
        base_offset: usize,
        out: &mut Vec<LeafPath>,
    ) {
        for field in schema.fields() {
            let path = if prefix.is_empty() {
                field.name.to_string()
            } else {
                format!("{}.{}", prefix, field.name)
            };

            match field.kind {
                TypeKind::Record(id) => {
                    let Some(nested) = self.record(id) else {
                        continue;
                    };
                    let nested_prefix = if field.is_array() {
                        format!("{}[]", path)
                    } else {
                        path
                    };
                    self.collect_leaves(nested, &nested_prefix, base_offset + field.offset, out);
                }
                kind => out.push(LeafPath {
                    path: if field.is_array() {
                        format!("{}[]", path)
                    } else {
                        path
                    },
                    kind,
                    category: field.category,
                    offset: base_offset + field.offset,
                    shape: field.array_shape.to_vec(),
                }),
            }
        }
    }
}

/// Process-wide registry of schema sets.
#[derive(Debug)]
pub struct SchemaCatalog {
    video: SchemaSet,
    implementation: SchemaSet,
}

impl SchemaCatalog {
    /// Build the catalog from the built-in tables.
    pub fn builtin() -> Result<Self, LayoutError> {
        Ok(SchemaCatalog {
            video: SchemaSet::build(&tables::video_records(), tables::VIDEO_ALIASES)?,
            implementation: SchemaSet::build(tables::CAPS_RECORDS, &[])?,
        })
    }

    /// Schemas rooted at `mfxVideoParam`.
    pub fn video_param(&self) -> &SchemaSet {
        &self.video
    }

    /// Schemas rooted at `mfxImplDescription`.
    pub fn impl_description(&self) -> &SchemaSet {
        &self.implementation
    }
}

static CATALOG: LazyLock<SchemaCatalog> = LazyLock::new(|| {
    SchemaCatalog::builtin()
        .unwrap_or_else(|e| panic!("built-in record tables are inconsistent: {}", e))
});

/// The process-wide schema catalog.
pub fn catalog() -> &'static SchemaCatalog {
    &CATALOG
}
