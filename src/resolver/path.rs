//! Property path syntax.
//!
//! A path is a dot-separated list of segments. Each segment is an
//! identifier optionally followed by an index suffix:
//!
//! ```text
//! mfx.FrameInfo.Width
//! mfxExtCodingOption2.MaxQPI
//! mfxExtAvcTemporalLayers.Layer[2].Scale
//! mfxExtAvcTemporalLayers.Layer[].Scale
//! mfxExtEncoderROI[1].ROI[0].Left
//! ```
//!
//! `[]` selects every element of an array; `[i]`, `[i][j]` select one
//! element. The two forms cannot be mixed within one segment.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Index suffix of a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Index {
    /// `[]`: every element.
    All,
    /// `[i][j]...`: one element, one index per dimension.
    At(Vec<usize>),
}

/// One `name[index]` component of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,

    pub index: Option<Index>,

    /// Byte range of the segment in the source text.
    pub span: (usize, usize),
}

/// A parsed property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

/// Syntax error in a property path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct PathSyntaxError {
    pub offset: usize,
    pub len: usize,
    pub message: String,
}

impl PathSyntaxError {
    fn new(offset: usize, len: usize, message: impl Into<String>) -> Self {
        PathSyntaxError {
            offset,
            len: len.max(1),
            message: message.into(),
        }
    }
}

impl PropertyPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        PropertyPath { segments }
    }

    pub fn parse(input: &str) -> Result<Self, PathSyntaxError> {
        if input.is_empty() {
            return Err(PathSyntaxError::new(0, 0, "empty property path"));
        }

        let mut segments = Vec::new();
        let mut start = 0;
        for part in input.split('.') {
            segments.push(parse_segment(part, start)?);
            start += part.len() + 1;
        }

        Ok(PropertyPath { segments })
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn parse_segment(text: &str, base: usize) -> Result<PathSegment, PathSyntaxError> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(PathSyntaxError::new(base, 1, "empty path segment"));
    }
    if !is_ident_start(bytes[0]) {
        return Err(PathSyntaxError::new(
            base,
            1,
            format!("unexpected character `{}`", text[..1].escape_default()),
        ));
    }

    let name_end = bytes
        .iter()
        .position(|&b| !is_ident_char(b))
        .unwrap_or(bytes.len());
    let name = text[..name_end].to_string();

    let mut all = false;
    let mut at = Vec::new();
    let mut pos = name_end;
    while pos < bytes.len() {
        if bytes[pos] != b'[' {
            return Err(PathSyntaxError::new(
                base + pos,
                1,
                format!("unexpected character `{}`", (bytes[pos] as char).escape_default()),
            ));
        }
        let close = text[pos..]
            .find(']')
            .map(|i| pos + i)
            .ok_or_else(|| PathSyntaxError::new(base + pos, text.len() - pos, "unclosed `[`"))?;

        let inner = &text[pos + 1..close];
        if inner.is_empty() {
            all = true;
        } else if inner.bytes().all(|b| b.is_ascii_digit()) {
            let idx = inner.parse::<usize>().map_err(|_| {
                PathSyntaxError::new(base + pos + 1, inner.len(), "index out of range")
            })?;
            at.push(idx);
        } else {
            return Err(PathSyntaxError::new(
                base + pos + 1,
                inner.len(),
                format!("invalid index `{}`", inner),
            ));
        }
        pos = close + 1;
    }

    let index = match (all, at.is_empty()) {
        (false, true) => None,
        (false, false) => Some(Index::At(at)),
        (true, true) if pos == name_end + 2 => Some(Index::All),
        (true, _) => {
            return Err(PathSyntaxError::new(
                base + name_end,
                pos - name_end,
                "`[]` cannot be combined with other indexes",
            ))
        }
    };

    Ok(PathSegment {
        name,
        index,
        span: (base, text.len()),
    })
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&seg.name)?;
            match &seg.index {
                None => {}
                Some(Index::All) => f.write_str("[]")?,
                Some(Index::At(indexes)) => {
                    for idx in indexes {
                        write!(f, "[{}]", idx)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromStr for PropertyPath {
    type Err = PathSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyPath::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &PropertyPath) -> Vec<&str> {
        path.segments().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_parse_simple_path() {
        let path = PropertyPath::parse("mfx.FrameInfo.Width").unwrap();
        assert_eq!(names(&path), ["mfx", "FrameInfo", "Width"]);
        assert!(path.segments().iter().all(|s| s.index.is_none()));
        assert_eq!(path.segments()[2].span, (14, 5));
    }

    #[test]
    fn test_parse_indexes() {
        let path = PropertyPath::parse("mfxExtEncoderROI[1].ROI[0].Left").unwrap();
        assert_eq!(path.segments()[0].index, Some(Index::At(vec![1])));
        assert_eq!(path.segments()[1].index, Some(Index::At(vec![0])));
        assert_eq!(path.segments()[2].index, None);

        let path = PropertyPath::parse("Grid[1][2]").unwrap();
        assert_eq!(path.segments()[0].index, Some(Index::At(vec![1, 2])));

        let path = PropertyPath::parse("Layer[].Scale").unwrap();
        assert_eq!(path.segments()[0].index, Some(Index::All));
    }

    #[test]
    fn test_parse_errors() {
        assert!(PropertyPath::parse("").is_err());
        assert!(PropertyPath::parse("mfx..Width").is_err());
        assert!(PropertyPath::parse("mfx.").is_err());
        assert!(PropertyPath::parse("1abc").is_err());
        assert!(PropertyPath::parse("Layer[x]").is_err());
        assert!(PropertyPath::parse("Layer[-1]").is_err());
        assert!(PropertyPath::parse("Layer[1").is_err());
        assert!(PropertyPath::parse("Layer[][1]").is_err());
        assert!(PropertyPath::parse("Layer[][]").is_err());
        assert!(PropertyPath::parse("Width ").is_err());
    }

    #[test]
    fn test_error_offset_points_at_segment() {
        let err = PropertyPath::parse("mfx.Frame-Info").unwrap_err();
        assert_eq!(err.offset, 9);
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["mfx.FrameInfo.Width", "A[1][2].B", "Layer[].Scale"] {
            assert_eq!(PropertyPath::parse(text).unwrap().to_string(), text);
        }
    }
}
