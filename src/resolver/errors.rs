//! Property access error types and diagnostics.

use miette::{NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::record::AttachError;
use crate::core::tag::BufferTag;
use crate::ops::coerce::CoerceError;
use crate::util::diagnostic::{Diagnostic, InvalidPathError};

/// Error setting, reading or matching a property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("property `{path}` not found: {reason}")]
    NotFound {
        path: String,
        reason: String,
        /// `(offset, len)` of the offending part of `path`.
        span: Option<(usize, usize)>,
    },

    #[error("cannot store `{value}` in `{path}`: {source}")]
    Unsupported {
        path: String,
        value: String,
        source: CoerceError,
    },

    #[error("`{path}` needs extension buffer {tag} ({size} bytes) attached")]
    MoreBuffersNeeded {
        path: String,
        tag: BufferTag,
        size: usize,
    },

    #[error(transparent)]
    Attach(#[from] AttachError),
}

impl ConfigError {
    pub(crate) fn not_found(
        path: &str,
        reason: impl Into<String>,
        span: Option<(usize, usize)>,
    ) -> Self {
        ConfigError::NotFound {
            path: path.to_string(),
            reason: reason.into(),
            span,
        }
    }

    /// Whether attaching the named buffer and retrying can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConfigError::MoreBuffersNeeded { .. })
    }

    /// Source-annotated report for a path that failed to resolve.
    pub fn to_report(&self) -> Option<InvalidPathError> {
        match self {
            ConfigError::NotFound {
                path,
                reason,
                span: Some((offset, len)),
            } => Some(InvalidPathError {
                reason: reason.clone(),
                src: NamedSource::new("property path", path.clone()),
                span: SourceSpan::from((*offset, *len)),
            }),
            _ => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::NotFound { path, reason, .. } => {
                Diagnostic::error(format!("unknown property `{}`", path))
                    .with_context(reason.clone())
                    .with_suggestion("Run `vplcfg schema` to list addressable properties")
            }

            ConfigError::Unsupported {
                path,
                value,
                source,
            } => Diagnostic::error(format!("cannot store `{}` in `{}`", value, path))
                .with_context(source.to_string())
                .with_suggestion("Check the field type with `vplcfg schema`"),

            ConfigError::MoreBuffersNeeded { path, tag, size } => Diagnostic::warning(format!(
                "`{}` lives in extension buffer {}",
                path, tag
            ))
            .with_context(format!("the buffer is {} bytes and is not attached", size))
            .with_suggestion("Attach the buffer and retry, or drop `--no-attach`"),

            ConfigError::Attach(err) => Diagnostic::error(err.to_string()),
        }
    }
}
