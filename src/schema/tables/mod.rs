//! Built-in record tables.

mod caps;
mod ext;
mod video;

use super::layout::RecordDef;

pub use caps::{RECORDS as CAPS_RECORDS, DECODER_TAG, ENCODER_TAG, VPP_TAG};
pub use video::ALIASES as VIDEO_ALIASES;

/// Records of the video parameter set: the base record and its nested
/// records first, then the extension buffers.
pub fn video_records() -> Vec<RecordDef> {
    video::RECORDS.iter().chain(ext::RECORDS).copied().collect()
}
