//! Field type kinds and typed values.
//!
//! Every leaf field in a record is one of a closed set of scalar kinds.
//! Values read from or written into records travel as [`Value`], whose
//! equality is bit-exact so that capability matching never depends on
//! floating-point rounding rules.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Identifier of a record schema (the record's external name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub &'static str);

impl RecordId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Storage kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// One byte of text.
    Char,
    /// Reference to a nested record schema.
    Record(RecordId),
}

impl TypeKind {
    /// Size in bytes of one element. Nested records report zero here;
    /// their size lives in the referenced schema.
    pub fn scalar_size(&self) -> usize {
        match self {
            TypeKind::U8 | TypeKind::I8 | TypeKind::Char => 1,
            TypeKind::U16 | TypeKind::I16 => 2,
            TypeKind::U32 | TypeKind::I32 | TypeKind::F32 => 4,
            TypeKind::U64 | TypeKind::I64 | TypeKind::F64 => 8,
            TypeKind::Record(_) => 0,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            TypeKind::U8
                | TypeKind::U16
                | TypeKind::U32
                | TypeKind::U64
                | TypeKind::I8
                | TypeKind::I16
                | TypeKind::I32
                | TypeKind::I64
        )
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            TypeKind::I8 | TypeKind::I16 | TypeKind::I32 | TypeKind::I64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, TypeKind::F32 | TypeKind::F64)
    }

    pub fn is_record(&self) -> bool {
        matches!(self, TypeKind::Record(_))
    }

    /// Inclusive integer range for integer kinds.
    pub fn integer_bounds(&self) -> Option<(i128, i128)> {
        let bounds = match self {
            TypeKind::U8 => (0, u8::MAX as i128),
            TypeKind::U16 => (0, u16::MAX as i128),
            TypeKind::U32 => (0, u32::MAX as i128),
            TypeKind::U64 => (0, u64::MAX as i128),
            TypeKind::I8 => (i8::MIN as i128, i8::MAX as i128),
            TypeKind::I16 => (i16::MIN as i128, i16::MAX as i128),
            TypeKind::I32 => (i32::MIN as i128, i32::MAX as i128),
            TypeKind::I64 => (i64::MIN as i128, i64::MAX as i128),
            _ => return None,
        };
        Some(bounds)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::U8 => "u8",
            TypeKind::U16 => "u16",
            TypeKind::U32 => "u32",
            TypeKind::U64 => "u64",
            TypeKind::I8 => "i8",
            TypeKind::I16 => "i16",
            TypeKind::I32 => "i32",
            TypeKind::I64 => "i64",
            TypeKind::F32 => "f32",
            TypeKind::F64 => "f64",
            TypeKind::Char => "char",
            TypeKind::Record(id) => id.as_str(),
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How textual input for a field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldCategory {
    /// Plain numeric or character value.
    #[default]
    Value,
    /// 32-bit code that also accepts a four-character literal such as `NV12`.
    FourCC,
}

/// A typed field value.
#[derive(Debug, Clone)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(u8),
    /// Contents of a character array up to the first NUL.
    Text(String),
}

impl Value {
    /// Kind of the value. Text reports [`TypeKind::Char`].
    pub fn kind(&self) -> TypeKind {
        match self {
            Value::U8(_) => TypeKind::U8,
            Value::U16(_) => TypeKind::U16,
            Value::U32(_) => TypeKind::U32,
            Value::U64(_) => TypeKind::U64,
            Value::I8(_) => TypeKind::I8,
            Value::I16(_) => TypeKind::I16,
            Value::I32(_) => TypeKind::I32,
            Value::I64(_) => TypeKind::I64,
            Value::F32(_) => TypeKind::F32,
            Value::F64(_) => TypeKind::F64,
            Value::Char(_) | Value::Text(_) => TypeKind::Char,
        }
    }

    /// Encode one scalar element little-endian into `out`.
    ///
    /// `out` must be exactly the element size; text values are written by
    /// the mutator, not here.
    pub fn write_le(&self, out: &mut [u8]) {
        match self {
            Value::U8(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::U16(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::U32(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::U64(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::I8(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::I16(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::I32(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::I64(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::F32(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::F64(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::Char(c) => out.copy_from_slice(&[*c]),
            Value::Text(_) => {}
        }
    }

    /// Decode one scalar element of `kind` from little-endian bytes.
    ///
    /// Returns `None` for record kinds or when `bytes` has the wrong length.
    pub fn read_le(kind: TypeKind, bytes: &[u8]) -> Option<Value> {
        let value = match kind {
            TypeKind::U8 => Value::U8(u8::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::U16 => Value::U16(u16::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::U32 => Value::U32(u32::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::U64 => Value::U64(u64::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::I8 => Value::I8(i8::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::I16 => Value::I16(i16::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::I32 => Value::I32(i32::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::I64 => Value::I64(i64::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::F32 => Value::F32(f32::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::F64 => Value::F64(f64::from_le_bytes(bytes.try_into().ok()?)),
            TypeKind::Char => Value::Char(*bytes.first().filter(|_| bytes.len() == 1)?),
            TypeKind::Record(_) => return None,
        };
        Some(value)
    }

    /// Decode a NUL-terminated character array.
    pub fn text_from_bytes(bytes: &[u8]) -> Value {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Value::Text(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Integer payload widened to `i128`, if this is an integer value.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Value::U8(v) => Some(v as i128),
            Value::U16(v) => Some(v as i128),
            Value::U32(v) => Some(v as i128),
            Value::U64(v) => Some(v as i128),
            Value::I8(v) => Some(v as i128),
            Value::I16(v) => Some(v as i128),
            Value::I32(v) => Some(v as i128),
            Value::I64(v) => Some(v as i128),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Char(c) => write!(f, "{}", *c as char),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Char(_) | Value::Text(_) => serializer.collect_str(self),
        }
    }
}

/// Error returned when parsing a [`TypeKind`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTypeKindError(pub String);

impl fmt::Display for ParseTypeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scalar type '{}'. Valid types: u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, char",
            self.0
        )
    }
}

impl std::error::Error for ParseTypeKindError {}

impl FromStr for TypeKind {
    type Err = ParseTypeKindError;

    /// Parses scalar kinds only; nested records are never named this way.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u8" | "mfxu8" => Ok(TypeKind::U8),
            "u16" | "mfxu16" => Ok(TypeKind::U16),
            "u32" | "mfxu32" => Ok(TypeKind::U32),
            "u64" | "mfxu64" => Ok(TypeKind::U64),
            "i8" | "mfxi8" => Ok(TypeKind::I8),
            "i16" | "mfxi16" => Ok(TypeKind::I16),
            "i32" | "mfxi32" => Ok(TypeKind::I32),
            "i64" | "mfxi64" => Ok(TypeKind::I64),
            "f32" | "mfxf32" => Ok(TypeKind::F32),
            "f64" | "mfxf64" => Ok(TypeKind::F64),
            "char" | "mfxchar" => Ok(TypeKind::Char),
            _ => Err(ParseTypeKindError(s.to_string())),
        }
    }
}
