//! Test fixtures for common test scenarios.
//!
//! This module provides pre-built capability descriptors and manifest
//! generators for the matching and selection tests.

use std::path::{Path, PathBuf};

use crate::core::descriptor::CapabilityDescriptor;
use crate::core::tag::BufferTag;
use crate::core::value::Value;
use crate::ops::property::set_property;
use crate::schema::tables::{DECODER_TAG, ENCODER_TAG, VPP_TAG};

/// Builder for a capability descriptor.
///
/// Panics on paths or values the implementation-description schema
/// rejects; fixtures are expected to be well formed.
#[derive(Debug, Clone)]
pub struct DescriptorFixture {
    descriptor: CapabilityDescriptor,
}

impl DescriptorFixture {
    /// Create an empty descriptor fixture.
    pub fn new(name: impl Into<String>) -> Self {
        DescriptorFixture {
            descriptor: CapabilityDescriptor::new(name),
        }
    }

    /// A hardware implementation with AVC and HEVC decoders and an HEVC
    /// encoder on adapter 0.
    pub fn gpu(name: impl Into<String>) -> Self {
        Self::new(name)
            .with("Impl", "2")
            .with("AccelerationMode", "3")
            .with("ApiVersion.Major", "2")
            .with("ApiVersion.Minor", "9")
            .with("ImplName", "mfx-gen")
            .with("VendorID", "32902")
            .with_decoder("AVC ", 51)
            .with_decoder("HEVC", 186)
            .with_encoder("HEVC", 186)
            .with_live("DXGIAdapterIndex", Value::U32(0))
    }

    /// A software implementation with a scaling filter only.
    pub fn cpu(name: impl Into<String>) -> Self {
        Self::new(name)
            .with("Impl", "1")
            .with("ApiVersion.Major", "2")
            .with("ApiVersion.Minor", "5")
            .with("ImplName", "mfx-sw")
            .with_vpp("PSCL")
    }

    /// Set a property on the description.
    pub fn with(mut self, path: &str, value: &str) -> Self {
        set_property(self.descriptor.record_mut(), path, value)
            .unwrap_or_else(|e| panic!("fixture property `{}={}`: {}", path, value, e));
        self
    }

    /// Attach a decoder sub-description for `codec`.
    pub fn with_decoder(mut self, codec: &str, max_level: u16) -> Self {
        let k = self.attach(DECODER_TAG);
        self.with(&format!("mfxDecoderDescription[{}].decoder.CodecID", k), codec)
            .with(
                &format!("mfxDecoderDescription[{}].decoder.MaxcodecLevel", k),
                &max_level.to_string(),
            )
    }

    /// Attach an encoder sub-description for `codec`.
    pub fn with_encoder(mut self, codec: &str, max_level: u16) -> Self {
        let k = self.attach(ENCODER_TAG);
        self.with(&format!("mfxEncoderDescription[{}].encoder.CodecID", k), codec)
            .with(
                &format!("mfxEncoderDescription[{}].encoder.MaxcodecLevel", k),
                &max_level.to_string(),
            )
    }

    /// Attach a processing-filter sub-description.
    pub fn with_vpp(mut self, filter: &str) -> Self {
        let k = self.attach(VPP_TAG);
        self.with(&format!("mfxVPPDescription[{}].filter.FilterFourCC", k), filter)
    }

    /// Record a live property.
    pub fn with_live(mut self, path: &str, value: Value) -> Self {
        self.descriptor.push_live(path, value);
        self
    }

    pub fn build(self) -> CapabilityDescriptor {
        self.descriptor
    }

    /// Attach a zeroed buffer and return its instance index.
    fn attach(&mut self, tag: BufferTag) -> usize {
        let record = self.descriptor.record_mut();
        record
            .attach_zeroed(tag)
            .unwrap_or_else(|e| panic!("fixture attach {}: {}", tag, e));
        record.instance_count(tag) - 1
    }
}

impl From<DescriptorFixture> for CapabilityDescriptor {
    fn from(fixture: DescriptorFixture) -> Self {
        fixture.build()
    }
}

/// Common manifest templates.
pub mod manifests {
    /// Two implementations: a GPU with HEVC/AVC decode, and a CPU with
    /// scaling only.
    pub fn gpu_and_cpu() -> &'static str {
        r#"[[implementation]]
name = "gpu"

[implementation.properties]
Impl = 2
ImplName = "mfx-gen"
VendorID = 0x8086
"ApiVersion.Major" = 2
"ApiVersion.Minor" = 9

[[implementation.decoder]]
"decoder.CodecID" = "AVC "
"decoder.MaxcodecLevel" = 51

[[implementation.decoder]]
"decoder.CodecID" = "HEVC"
"decoder.MaxcodecLevel" = 186

[implementation.live]
DXGIAdapterIndex = 0

[[implementation]]
name = "cpu"

[implementation.properties]
Impl = 1
ImplName = "mfx-sw"

[[implementation.vpp]]
"filter.FilterFourCC" = "PSCL"
"#
    }

    /// A manifest whose only implementation names an unknown property.
    pub fn unknown_property() -> &'static str {
        "[[implementation]]\nname = \"broken\"\n\n[implementation.properties]\nNoSuchField = 1\n"
    }
}

/// Write `contents` as `<dir>/<name>` and return the full path.
pub fn write_manifest(dir: &Path, name: &str, contents: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}
