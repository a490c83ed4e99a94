//! Implementation capability descriptions.
//!
//! A backend reports nested lists of codecs, profiles and memory types. The
//! enumerator flattens every combination into one sub-description, so each
//! attached `mfxDecoderDescription` holds exactly one codec/profile/memory
//! triple and filters address it with plain dotted paths.

use crate::core::tag::BufferTag;
use crate::schema::layout::RecordDef;
use crate::schema::RecordKind;

pub const DECODER_TAG: BufferTag = BufferTag::new(*b"DDSC");
pub const ENCODER_TAG: BufferTag = BufferTag::new(*b"EDSC");
pub const VPP_TAG: BufferTag = BufferTag::new(*b"VDSC");

pub static RECORDS: &[RecordDef] = &[
    RecordDef {
        name: "mfxVersion",
        kind: RecordKind::Nested,
        defs: &[overlay!(
            [field!(U16 "Minor"), field!(U16 "Major")],
            [field!(U32 "Version")],
        )],
    },
    RecordDef {
        name: "mfxRange32U",
        kind: RecordKind::Nested,
        defs: &[field!(U32 "Min"), field!(U32 "Max"), field!(U32 "Step")],
    },
    RecordDef {
        name: "mfxImplDescription",
        kind: RecordKind::Base,
        defs: &[
            field!(U16 "Version"),
            field!(U32 "Impl"),
            field!(U16 "AccelerationMode"),
            record!("ApiVersion": "mfxVersion"),
            field!(Char "ImplName" [32]),
            field!(Char "License" [128]),
            field!(Char "Keywords" [128]),
            field!(U32 "VendorID"),
            field!(U32 "VendorImplID"),
        ],
    },
    // Decoder
    RecordDef {
        name: "mfxDecMemDesc",
        kind: RecordKind::Nested,
        defs: &[
            field!(U32 "MemHandleType"),
            record!("Width": "mfxRange32U"),
            record!("Height": "mfxRange32U"),
            fourcc_field!("ColorFormats"),
        ],
    },
    RecordDef {
        name: "mfxDecProfile",
        kind: RecordKind::Nested,
        defs: &[field!(U32 "Profile"), record!("decmemdesc": "mfxDecMemDesc")],
    },
    RecordDef {
        name: "mfxDecCodec",
        kind: RecordKind::Nested,
        defs: &[
            fourcc_field!("CodecID"),
            field!(U16 "MaxcodecLevel"),
            record!("decprofile": "mfxDecProfile"),
        ],
    },
    RecordDef {
        name: "mfxDecoderDescription",
        kind: RecordKind::Extension { tag: DECODER_TAG },
        defs: &[record!("decoder": "mfxDecCodec")],
    },
    // Encoder
    RecordDef {
        name: "mfxEncMemDesc",
        kind: RecordKind::Nested,
        defs: &[
            field!(U32 "MemHandleType"),
            record!("Width": "mfxRange32U"),
            record!("Height": "mfxRange32U"),
            fourcc_field!("ColorFormats"),
        ],
    },
    RecordDef {
        name: "mfxEncProfile",
        kind: RecordKind::Nested,
        defs: &[field!(U32 "Profile"), record!("encmemdesc": "mfxEncMemDesc")],
    },
    RecordDef {
        name: "mfxEncCodec",
        kind: RecordKind::Nested,
        defs: &[
            fourcc_field!("CodecID"),
            field!(U16 "MaxcodecLevel"),
            field!(U16 "BiDirectionalPrediction"),
            record!("encprofile": "mfxEncProfile"),
        ],
    },
    RecordDef {
        name: "mfxEncoderDescription",
        kind: RecordKind::Extension { tag: ENCODER_TAG },
        defs: &[record!("encoder": "mfxEncCodec")],
    },
    // Video processing
    RecordDef {
        name: "mfxVPPFormat",
        kind: RecordKind::Nested,
        defs: &[fourcc_field!("InFormat"), fourcc_field!("OutFormat")],
    },
    RecordDef {
        name: "mfxVPPMemDesc",
        kind: RecordKind::Nested,
        defs: &[
            field!(U32 "MemHandleType"),
            record!("Width": "mfxRange32U"),
            record!("Height": "mfxRange32U"),
            record!("format": "mfxVPPFormat"),
        ],
    },
    RecordDef {
        name: "mfxVPPFilter",
        kind: RecordKind::Nested,
        defs: &[
            fourcc_field!("FilterFourCC"),
            field!(U16 "MaxDelayInFrames"),
            record!("memdesc": "mfxVPPMemDesc"),
        ],
    },
    RecordDef {
        name: "mfxVPPDescription",
        kind: RecordKind::Extension { tag: VPP_TAG },
        defs: &[record!("filter": "mfxVPPFilter")],
    },
];
