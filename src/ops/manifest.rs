//! Implementation manifests.
//!
//! A manifest describes implementations in TOML so they can be matched
//! without probing real backends:
//!
//! ```toml
//! [[implementation]]
//! name = "gpu"
//!
//! [implementation.properties]
//! Impl = 2
//! ImplName = "mfx-gen"
//! "ApiVersion.Major" = 2
//!
//! [[implementation.decoder]]
//! "decoder.CodecID" = "HEVC"
//! "decoder.MaxcodecLevel" = 186
//!
//! [implementation.live]
//! DXGIAdapterIndex = 0
//! "mfxImplementedFunctions.FunctionsName" = ["MFXInit", "MFXClose"]
//! ```
//!
//! Each `decoder`, `encoder` and `vpp` entry becomes one attached
//! sub-description; its keys are paths relative to that sub-description.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::descriptor::CapabilityDescriptor;
use crate::core::tag::BufferTag;
use crate::core::value::Value;
use crate::ops::enumerate::StaticEnumerator;
use crate::ops::property::set_property;
use crate::resolver::ConfigError;
use crate::schema::tables::{DECODER_TAG, ENCODER_TAG, VPP_TAG};
use crate::util::config::toml_text;

/// Error loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("implementation `{implementation}`: {source}")]
    Property {
        implementation: String,
        source: ConfigError,
    },

    #[error("implementation `{implementation}`: `{key}` has an unsupported value ({kind})")]
    UnsupportedValue {
        implementation: String,
        key: String,
        kind: &'static str,
    },
}

/// Parsed manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    #[serde(rename = "implementation")]
    pub implementations: Vec<ImplementationEntry>,
}

/// One `[[implementation]]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImplementationEntry {
    pub name: String,

    /// `mfxImplDescription` paths and values.
    pub properties: BTreeMap<String, toml::Value>,

    pub decoder: Vec<BTreeMap<String, toml::Value>>,

    pub encoder: Vec<BTreeMap<String, toml::Value>>,

    pub vpp: Vec<BTreeMap<String, toml::Value>>,

    /// Values without a record layout.
    pub live: BTreeMap<String, toml::Value>,
}

impl Manifest {
    pub fn parse(contents: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Build one descriptor per implementation, in file order.
    pub fn descriptors(&self) -> Result<Vec<CapabilityDescriptor>, ManifestError> {
        self.implementations
            .iter()
            .map(ImplementationEntry::to_descriptor)
            .collect()
    }

    pub fn enumerator(&self) -> Result<StaticEnumerator, ManifestError> {
        self.descriptors().map(StaticEnumerator::new)
    }
}

impl ImplementationEntry {
    pub fn to_descriptor(&self) -> Result<CapabilityDescriptor, ManifestError> {
        let mut desc = CapabilityDescriptor::new(self.name.clone());

        for (path, value) in &self.properties {
            let text = self.text(path, value)?;
            self.set(&mut desc, path, &text)?;
        }

        let groups: [(&str, BufferTag, &[BTreeMap<String, toml::Value>]); 3] = [
            ("mfxDecoderDescription", DECODER_TAG, &self.decoder),
            ("mfxEncoderDescription", ENCODER_TAG, &self.encoder),
            ("mfxVPPDescription", VPP_TAG, &self.vpp),
        ];
        for (record_name, tag, entries) in groups {
            for entry in entries {
                desc.record_mut()
                    .attach_zeroed(tag)
                    .map_err(|e| self.property_error(e.into()))?;
                let instance = desc.record().instance_count(tag) - 1;
                for (path, value) in entry {
                    let text = self.text(path, value)?;
                    let full = format!("{}[{}].{}", record_name, instance, path);
                    self.set(&mut desc, &full, &text)?;
                }
            }
        }

        for (path, value) in &self.live {
            for v in self.live_values(path, value)? {
                desc.push_live(path.clone(), v);
            }
        }

        tracing::debug!(
            "loaded implementation `{}` ({} sub-descriptions)",
            self.name,
            desc.record().extensions().len()
        );
        Ok(desc)
    }

    fn set(&self, desc: &mut CapabilityDescriptor, path: &str, text: &str) -> Result<(), ManifestError> {
        set_property(desc.record_mut(), path, text).map_err(|e| self.property_error(e))
    }

    fn property_error(&self, source: ConfigError) -> ManifestError {
        ManifestError::Property {
            implementation: self.name.clone(),
            source,
        }
    }

    fn unsupported(&self, key: &str, value: &toml::Value) -> ManifestError {
        ManifestError::UnsupportedValue {
            implementation: self.name.clone(),
            key: key.to_string(),
            kind: value.type_str(),
        }
    }

    /// Textual form of a manifest value; arrays become comma lists.
    fn text(&self, key: &str, value: &toml::Value) -> Result<String, ManifestError> {
        toml_text(value).ok_or_else(|| self.unsupported(key, value))
    }

    fn live_values(&self, key: &str, value: &toml::Value) -> Result<Vec<Value>, ManifestError> {
        let single = match value {
            toml::Value::String(s) => Value::Text(s.clone()),
            toml::Value::Integer(i) => match u32::try_from(*i) {
                Ok(u) => Value::U32(u),
                Err(_) => Value::I64(*i),
            },
            toml::Value::Float(f) => Value::F64(*f),
            toml::Value::Boolean(b) => Value::U32(u32::from(*b)),
            toml::Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.extend(self.live_values(key, item)?);
                }
                return Ok(out);
            }
            other => return Err(self.unsupported(key, other)),
        };
        Ok(vec![single])
    }
}

/// Load a manifest file straight into descriptors.
pub fn load_descriptors(path: &Path) -> Result<Vec<CapabilityDescriptor>, ManifestError> {
    Manifest::load(path)?.descriptors()
}
