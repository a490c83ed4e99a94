//! `mfxVideoParam` and the records embedded in it.

use crate::schema::layout::RecordDef;
use crate::schema::RecordKind;

pub static RECORDS: &[RecordDef] = &[
    RecordDef {
        name: "mfxFrameId",
        kind: RecordKind::Nested,
        defs: &[
            field!(U16 "TemporalId"),
            field!(U16 "PriorityId"),
            overlay!(
                [field!(U16 "DependencyId"), field!(U16 "QualityId")],
                [field!(U16 "ViewId")],
            ),
        ],
    },
    RecordDef {
        name: "mfxFrameInfo",
        kind: RecordKind::Nested,
        defs: &[
            pad!(U32[4]),
            field!(U16 "ChannelId"),
            field!(U16 "BitDepthLuma"),
            field!(U16 "BitDepthChroma"),
            field!(U16 "Shift"),
            record!("FrameId": "mfxFrameId"),
            fourcc_field!("FourCC"),
            overlay!(
                [
                    field!(U16 "Width"),
                    field!(U16 "Height"),
                    field!(U16 "CropX"),
                    field!(U16 "CropY"),
                    field!(U16 "CropW"),
                    field!(U16 "CropH"),
                ],
                [field!(U64 "BufferSize"), pad!(U32)],
            ),
            field!(U32 "FrameRateExtN"),
            field!(U32 "FrameRateExtD"),
            pad!(U16),
            field!(U16 "AspectRatioW"),
            field!(U16 "AspectRatioH"),
            field!(U16 "PicStruct"),
            field!(U16 "ChromaFormat"),
            pad!(U16),
        ],
    },
    RecordDef {
        name: "mfxInfoMFX",
        kind: RecordKind::Nested,
        defs: &[
            pad!(U32[7]),
            field!(U16 "LowPower"),
            field!(U16 "BRCParamMultiplier"),
            record!("FrameInfo": "mfxFrameInfo"),
            fourcc_field!("CodecId"),
            field!(U16 "CodecProfile"),
            field!(U16 "CodecLevel"),
            field!(U16 "NumThread"),
            overlay!(
                // encoding
                [
                    field!(U16 "TargetUsage"),
                    field!(U16 "GopPicSize"),
                    field!(U16 "GopRefDist"),
                    field!(U16 "GopOptFlag"),
                    field!(U16 "IdrInterval"),
                    field!(U16 "RateControlMethod"),
                    overlay!(
                        [field!(U16 "InitialDelayInKB")],
                        [field!(U16 "QPI")],
                        [field!(U16 "Accuracy")],
                    ),
                    field!(U16 "BufferSizeInKB"),
                    overlay!(
                        [field!(U16 "TargetKbps")],
                        [field!(U16 "QPP")],
                        [field!(U16 "ICQQuality")],
                    ),
                    overlay!(
                        [field!(U16 "MaxKbps")],
                        [field!(U16 "QPB")],
                        [field!(U16 "Convergence")],
                    ),
                    field!(U16 "NumSlice"),
                    field!(U16 "NumRefFrame"),
                    field!(U16 "EncodedOrder"),
                ],
                // decoding
                [
                    field!(U16 "DecodedOrder"),
                    field!(U16 "ExtendedPicStruct"),
                    field!(U16 "TimeStampCalc"),
                    field!(U16 "SliceGroupsPresent"),
                    field!(U16 "MaxDecFrameBuffering"),
                    field!(U16 "EnableReallocRequest"),
                    field!(U16 "FilmGrain"),
                    field!(U16 "IgnoreLevelConstrain"),
                    field!(U16 "SkipOutput"),
                    pad!(U16[4]),
                ],
                // JPEG decoding
                [
                    field!(U16 "JPEGChromaFormat"),
                    field!(U16 "Rotation"),
                    field!(U16 "JPEGColorFormat"),
                    field!(U16 "InterleavedDec"),
                    field!(U8 "SamplingFactorH" [4]),
                    field!(U8 "SamplingFactorV" [4]),
                    pad!(U16[5]),
                ],
                // JPEG encoding
                [
                    field!(U16 "Interleaved"),
                    field!(U16 "Quality"),
                    field!(U16 "RestartInterval"),
                    pad!(U16[10]),
                ],
            ),
        ],
    },
    RecordDef {
        name: "mfxInfoVPP",
        kind: RecordKind::Nested,
        defs: &[
            pad!(U32[8]),
            record!("In": "mfxFrameInfo"),
            record!("Out": "mfxFrameInfo"),
        ],
    },
    RecordDef {
        name: "mfxVideoParam",
        kind: RecordKind::Base,
        defs: &[
            field!(U32 "AllocId"),
            pad!(U32[2]),
            pad!(U16),
            field!(U16 "AsyncDepth"),
            overlay!(
                [record!("mfx": "mfxInfoMFX")],
                [record!("vpp": "mfxInfoVPP")],
            ),
            field!(U16 "Protected"),
            field!(U16 "IOPattern"),
            // ExtParam pointer slot; attachments live in the record instead
            pad!(U64),
            field!(U16 "NumExtParam"),
            pad!(U16),
        ],
    },
];

/// Short names accepted in place of full `mfxVideoParam` paths.
pub static ALIASES: &[(&str, &str)] = &[
    ("LowPower", "mfx.LowPower"),
    ("BRCParamMultiplier", "mfx.BRCParamMultiplier"),
    ("CodecId", "mfx.CodecId"),
    ("CodecProfile", "mfx.CodecProfile"),
    ("CodecLevel", "mfx.CodecLevel"),
    ("NumThread", "mfx.NumThread"),
    ("TargetUsage", "mfx.TargetUsage"),
    ("GopPicSize", "mfx.GopPicSize"),
    ("GopRefDist", "mfx.GopRefDist"),
    ("GopOptFlag", "mfx.GopOptFlag"),
    ("IdrInterval", "mfx.IdrInterval"),
    ("RateControlMethod", "mfx.RateControlMethod"),
    ("InitialDelayInKB", "mfx.InitialDelayInKB"),
    ("QPI", "mfx.QPI"),
    ("Accuracy", "mfx.Accuracy"),
    ("BufferSizeInKB", "mfx.BufferSizeInKB"),
    ("TargetKbps", "mfx.TargetKbps"),
    ("QPP", "mfx.QPP"),
    ("ICQQuality", "mfx.ICQQuality"),
    ("MaxKbps", "mfx.MaxKbps"),
    ("QPB", "mfx.QPB"),
    ("Convergence", "mfx.Convergence"),
    ("NumSlice", "mfx.NumSlice"),
    ("NumRefFrame", "mfx.NumRefFrame"),
    ("EncodedOrder", "mfx.EncodedOrder"),
    ("DecodedOrder", "mfx.DecodedOrder"),
    ("ExtendedPicStruct", "mfx.ExtendedPicStruct"),
    ("TimeStampCalc", "mfx.TimeStampCalc"),
    ("SliceGroupsPresent", "mfx.SliceGroupsPresent"),
    ("MaxDecFrameBuffering", "mfx.MaxDecFrameBuffering"),
    ("EnableReallocRequest", "mfx.EnableReallocRequest"),
    ("FilmGrain", "mfx.FilmGrain"),
    ("IgnoreLevelConstrain", "mfx.IgnoreLevelConstrain"),
    ("SkipOutput", "mfx.SkipOutput"),
    ("JPEGChromaFormat", "mfx.JPEGChromaFormat"),
    ("Rotation", "mfx.Rotation"),
    ("JPEGColorFormat", "mfx.JPEGColorFormat"),
    ("InterleavedDec", "mfx.InterleavedDec"),
    ("Interleaved", "mfx.Interleaved"),
    ("Quality", "mfx.Quality"),
    ("RestartInterval", "mfx.RestartInterval"),
    ("SamplingFactorH", "mfx.SamplingFactorH"),
    ("SamplingFactorV", "mfx.SamplingFactorV"),
    ("ChannelId", "mfx.FrameInfo.ChannelId"),
    ("BitDepthLuma", "mfx.FrameInfo.BitDepthLuma"),
    ("BitDepthChroma", "mfx.FrameInfo.BitDepthChroma"),
    ("Shift", "mfx.FrameInfo.Shift"),
    ("FourCC", "mfx.FrameInfo.FourCC"),
    ("Width", "mfx.FrameInfo.Width"),
    ("Height", "mfx.FrameInfo.Height"),
    ("CropX", "mfx.FrameInfo.CropX"),
    ("CropY", "mfx.FrameInfo.CropY"),
    ("CropW", "mfx.FrameInfo.CropW"),
    ("CropH", "mfx.FrameInfo.CropH"),
    ("BufferSize", "mfx.FrameInfo.BufferSize"),
    ("FrameRateExtN", "mfx.FrameInfo.FrameRateExtN"),
    ("FrameRateExtD", "mfx.FrameInfo.FrameRateExtD"),
    ("AspectRatioW", "mfx.FrameInfo.AspectRatioW"),
    ("AspectRatioH", "mfx.FrameInfo.AspectRatioH"),
    ("PicStruct", "mfx.FrameInfo.PicStruct"),
    ("ChromaFormat", "mfx.FrameInfo.ChromaFormat"),
    ("FrameId", "mfx.FrameInfo.FrameId"),
];
