//! Path resolution against a schema set.

use crate::core::tag::BufferTag;
use crate::core::value::TypeKind;
use crate::resolver::errors::ConfigError;
use crate::resolver::path::{Index, PathSegment, PropertyPath};
use crate::schema::layout::EXTENSION_HEADER_SIZE;
use crate::schema::{FieldDescriptor, RecordSchema, SchemaSet};

/// Instance indexes on extension names must stay below this.
pub const MAX_INSTANCES: usize = 64;

/// Buffer a resolved field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Base,
    Extension {
        tag: BufferTag,
        name: &'static str,
        /// Declared buffer size, header included.
        size: usize,
        /// Explicit `[k]` instance selector, if any.
        instance: Option<usize>,
    },
}

/// Location of a leaf addressed by a property path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedField {
    pub field: &'static FieldDescriptor,

    pub target: Target,

    /// Byte offset of the first addressed element within the buffer.
    pub offset: usize,

    /// Bytes between consecutive addressed elements.
    pub stride: usize,

    /// Number of addressed elements.
    pub count: usize,

    /// The whole character array is addressed as one string.
    pub text: bool,
}

impl ResolvedField {
    /// Kind of each addressed element.
    pub fn kind(&self) -> TypeKind {
        self.field.kind
    }

    /// Byte size of each addressed element.
    pub fn element_size(&self) -> usize {
        self.field.size
    }

    /// Whether this is the `BufferId`/`BufferSz` header of an extension,
    /// which mirrors the buffer's tag and size.
    pub fn is_extension_header(&self) -> bool {
        matches!(self.target, Target::Extension { .. }) && self.offset < EXTENSION_HEADER_SIZE
    }

    /// Capacity in bytes of a text field.
    pub fn capacity(&self) -> usize {
        if self.text {
            self.field.byte_len()
        } else {
            self.field.size
        }
    }
}

/// Resolve `path` against `set`.
///
/// The path may start with the base record name, a flat alias (`Width`),
/// or an extension name with an optional instance index
/// (`mfxExtEncoderROI[1]`). Arrays of records may be projected with `[]`
/// (`Layer[].Scale`), and an array leaf without an index addresses every
/// element.
pub fn resolve(set: &'static SchemaSet, path: &str) -> Result<ResolvedField, ConfigError> {
    let parsed = PropertyPath::parse(path).map_err(|e| {
        ConfigError::not_found(path, e.message.clone(), Some((e.offset, e.len)))
    })?;

    let resolved = Walker { set, path }.resolve(parsed.segments())?;
    tracing::trace!(
        "resolved {} -> {:?}+{} x{} ({})",
        path,
        resolved.target,
        resolved.offset,
        resolved.count,
        resolved.field.kind
    );
    Ok(resolved)
}

enum Select<'a> {
    Scalar,
    Text,
    All,
    At(&'a [usize]),
}

struct Walker<'p> {
    set: &'static SchemaSet,
    path: &'p str,
}

impl Walker<'_> {
    fn err(&self, reason: impl Into<String>, seg: &PathSegment) -> ConfigError {
        ConfigError::not_found(self.path, reason, Some(seg.span))
    }

    fn resolve(&self, segments: &[PathSegment]) -> Result<ResolvedField, ConfigError> {
        let base = self.set.base();
        let mut segments = segments;

        if let Some((first, rest)) = segments.split_first() {
            if first.name == base.name() && first.index.is_none() && !rest.is_empty() {
                segments = rest;
            }
        }

        let Some((first, rest)) = segments.split_first() else {
            return Err(ConfigError::not_found(self.path, "path names no field", None));
        };

        if base.field(&first.name).is_none() {
            if let Some(full) = self.set.alias(&first.name) {
                let expanded = self.expand_alias(full, first, rest)?;
                return self.walk(base, Target::Base, &expanded);
            }

            if let Some(ext) = self.set.extension_by_name(&first.name) {
                let instance = match &first.index {
                    None => None,
                    Some(Index::At(idx)) if idx.len() == 1 && idx[0] < MAX_INSTANCES => {
                        Some(idx[0])
                    }
                    Some(Index::At(idx)) if idx.len() == 1 => {
                        return Err(self.err(
                            format!("instance index must be below {}", MAX_INSTANCES),
                            first,
                        ))
                    }
                    Some(_) => {
                        return Err(self.err("extension takes a single instance index", first))
                    }
                };
                let Some(tag) = ext.tag() else {
                    return Err(self.err("record is not an extension", first));
                };
                let target = Target::Extension {
                    tag,
                    name: ext.name(),
                    size: ext.size(),
                    instance,
                };
                if rest.is_empty() {
                    return Err(self.err("path ends at a record, not a field", first));
                }
                return self.walk(ext, target, rest);
            }
        }

        self.walk(base, Target::Base, segments)
    }

    /// Replace the alias segment with its full path. The alias index moves
    /// to the last expanded segment; spans keep pointing at the alias.
    fn expand_alias(
        &self,
        full: &str,
        alias: &PathSegment,
        rest: &[PathSegment],
    ) -> Result<Vec<PathSegment>, ConfigError> {
        let parsed = PropertyPath::parse(full)
            .map_err(|e| self.err(format!("alias `{}` is malformed: {}", alias.name, e), alias))?;

        let mut expanded: Vec<PathSegment> = parsed
            .segments()
            .iter()
            .map(|seg| PathSegment {
                name: seg.name.clone(),
                index: None,
                span: alias.span,
            })
            .collect();
        if let Some(last) = expanded.last_mut() {
            last.index = alias.index.clone();
        }
        expanded.extend_from_slice(rest);
        Ok(expanded)
    }

    fn walk(
        &self,
        root: &'static RecordSchema,
        target: Target,
        segments: &[PathSegment],
    ) -> Result<ResolvedField, ConfigError> {
        let mut schema = root;
        let mut offset = 0;
        let mut projection: Option<(usize, usize)> = None;

        for (i, seg) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            let field = schema
                .field(&seg.name)
                .ok_or_else(|| self.err(format!("no field `{}` in {}", seg.name, schema.name()), seg))?;

            let nested = match field.kind {
                TypeKind::Record(id) => Some(self.set.record(id).ok_or_else(|| {
                    self.err(format!("record {} is not in the catalog", id), seg)
                })?),
                _ => None,
            };

            if nested.is_some() && last {
                return Err(self.err(
                    format!("`{}` is a record, not a field", seg.name),
                    seg,
                ));
            }
            if nested.is_none() && !last {
                return Err(self.err(
                    format!("`{}` is a field with no members", seg.name),
                    seg,
                ));
            }

            // Per-element byte size; nested records use their schema size.
            let elem = nested.map_or(field.size, |n| n.size());
            offset += field.offset;

            let select = match (&seg.index, field.is_array()) {
                (Some(_), false) => {
                    return Err(self.err(format!("`{}` is not an array", seg.name), seg))
                }
                (None, false) => Select::Scalar,
                (None | Some(Index::All), true) if field.is_text() => Select::Text,
                (None | Some(Index::All), true) => Select::All,
                (Some(Index::At(idx)), true) => Select::At(idx),
            };

            match select {
                Select::Scalar | Select::Text => {}
                Select::At(idx) => {
                    offset += elem * self.linear_index(field, idx, seg)?;
                }
                Select::All => {
                    if projection.is_some() {
                        return Err(self.err("only one `[]` is allowed per path", seg));
                    }
                    projection = Some((elem, field.element_count()));
                }
            }

            match nested {
                Some(next) => schema = next,
                None => {
                    let text = matches!(select, Select::Text);
                    let (stride, count) = match (projection, text) {
                        (Some(p), false) => p,
                        (Some(_), true) => {
                            return Err(self.err("text fields cannot be projected", seg))
                        }
                        (None, _) => (field.size, 1),
                    };
                    return Ok(ResolvedField {
                        field,
                        target,
                        offset,
                        stride,
                        count,
                        text,
                    });
                }
            }
        }

        Err(ConfigError::not_found(self.path, "path names no field", None))
    }

    fn linear_index(
        &self,
        field: &FieldDescriptor,
        idx: &[usize],
        seg: &PathSegment,
    ) -> Result<usize, ConfigError> {
        let shape = field.array_shape;
        if idx.len() != shape.len() {
            return Err(self.err(
                format!(
                    "`{}` has {} dimension(s), got {} index(es)",
                    seg.name,
                    shape.len(),
                    idx.len()
                ),
                seg,
            ));
        }

        let mut linear = 0;
        for (&i, &dim) in idx.iter().zip(shape) {
            if i >= dim {
                return Err(self.err(
                    format!("index {} out of bounds for `{}` (length {})", i, seg.name, dim),
                    seg,
                ));
            }
            linear = linear * dim + i;
        }
        Ok(linear)
    }
}
