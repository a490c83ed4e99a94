//! Extension buffers attachable to `mfxVideoParam`.
//!
//! Each extension is declared without its header; the layout engine adds
//! `BufferId`/`BufferSz` in front of the body.

use crate::core::tag::BufferTag;
use crate::schema::layout::RecordDef;
use crate::schema::RecordKind;

const fn ext(code: &[u8; 4]) -> RecordKind {
    RecordKind::Extension {
        tag: BufferTag::new(*code),
    }
}

pub static RECORDS: &[RecordDef] = &[
    // Records embedded in extension bodies
    RecordDef {
        name: "mfxI16Pair",
        kind: RecordKind::Nested,
        defs: &[field!(I16 "x"), field!(I16 "y")],
    },
    RecordDef {
        name: "mfxAvcTemporalLayer",
        kind: RecordKind::Nested,
        defs: &[field!(U16 "Scale"), pad!(U16[3])],
    },
    RecordDef {
        name: "mfxTemporalLayer",
        kind: RecordKind::Nested,
        defs: &[
            field!(U16 "Scale"),
            field!(U16 "QPI"),
            field!(U16 "QPP"),
            field!(U16 "QPB"),
            field!(U32 "TargetKbps"),
            field!(U32 "MaxKbps"),
            field!(U32 "BufferSizeInKB"),
            field!(U32 "InitialDelayInKB"),
            pad!(U16[20]),
        ],
    },
    RecordDef {
        name: "mfxVP9TemporalLayer",
        kind: RecordKind::Nested,
        defs: &[
            field!(U16 "FrameRateScale"),
            field!(U16 "TargetKbps"),
            pad!(U16[14]),
        ],
    },
    RecordDef {
        name: "mfxRefPic",
        kind: RecordKind::Nested,
        defs: &[field!(U32 "FrameOrder"), field!(U16 "PicStruct"), pad!(U16[5])],
    },
    RecordDef {
        name: "mfxRoiEntry",
        kind: RecordKind::Nested,
        defs: &[
            field!(U32 "Left"),
            field!(U32 "Top"),
            field!(U32 "Right"),
            field!(U32 "Bottom"),
            overlay!([field!(I16 "Priority")], [field!(I16 "DeltaQP")]),
            pad!(U16[7]),
        ],
    },
    RecordDef {
        name: "mfxVPPSignalRange",
        kind: RecordKind::Nested,
        defs: &[
            field!(U16 "TransferMatrix"),
            field!(U16 "NominalRange"),
            pad!(U16[6]),
        ],
    },
    // Encoder controls
    RecordDef {
        name: "mfxExtCodingOption",
        kind: ext(b"CDOP"),
        defs: &[
            pad!(U16),
            field!(U16 "RateDistortionOpt"),
            field!(U16 "MECostType"),
            field!(U16 "MESearchType"),
            record!("MVSearchWindow": "mfxI16Pair"),
            field!(U16 "EndOfSequence"),
            field!(U16 "FramePicture"),
            field!(U16 "CAVLC"),
            pad!(U16[2]),
            field!(U16 "RecoveryPointSEI"),
            field!(U16 "ViewOutput"),
            field!(U16 "NalHrdConformance"),
            field!(U16 "SingleSeiNalUnit"),
            field!(U16 "VuiVclHrdParameters"),
            field!(U16 "RefPicListReordering"),
            field!(U16 "ResetRefList"),
            field!(U16 "RefPicMarkRep"),
            field!(U16 "FieldOutput"),
            field!(U16 "IntraPredBlockSize"),
            field!(U16 "InterPredBlockSize"),
            field!(U16 "MVPrecision"),
            field!(U16 "MaxDecFrameBuffering"),
            field!(U16 "AUDelimiter"),
            field!(U16 "EndOfStream"),
            field!(U16 "PicTimingSEI"),
            field!(U16 "VuiNalHrdParameters"),
        ],
    },
    RecordDef {
        name: "mfxExtCodingOption2",
        kind: ext(b"CDO2"),
        defs: &[
            field!(U16 "IntRefType"),
            field!(U16 "IntRefCycleSize"),
            field!(I16 "IntRefQPDelta"),
            field!(U32 "MaxFrameSize"),
            field!(U32 "MaxSliceSize"),
            field!(U16 "BitrateLimit"),
            field!(U16 "MBBRC"),
            field!(U16 "ExtBRC"),
            field!(U16 "LookAheadDepth"),
            field!(U16 "Trellis"),
            field!(U16 "RepeatPPS"),
            field!(U16 "BRefType"),
            field!(U16 "AdaptiveI"),
            field!(U16 "AdaptiveB"),
            field!(U16 "LookAheadDS"),
            field!(U16 "NumMbPerSlice"),
            field!(U16 "SkipFrame"),
            field!(U8 "MinQPI"),
            field!(U8 "MaxQPI"),
            field!(U8 "MinQPP"),
            field!(U8 "MaxQPP"),
            field!(U8 "MinQPB"),
            field!(U8 "MaxQPB"),
            field!(U16 "FixedFrameRate"),
            field!(U16 "DisableDeblockingIdc"),
            field!(U16 "DisableVUI"),
            field!(U16 "BufferingPeriodSEI"),
            field!(U16 "EnableMAD"),
            field!(U16 "UseRawRef"),
        ],
    },
    RecordDef {
        name: "mfxExtCodingOption3",
        kind: ext(b"CDO3"),
        defs: &[
            field!(U16 "NumSliceI"),
            field!(U16 "NumSliceP"),
            field!(U16 "NumSliceB"),
            field!(U16 "WinBRCMaxAvgKbps"),
            field!(U16 "WinBRCSize"),
            field!(U16 "QVBRQuality"),
            field!(U16 "EnableMBQP"),
            field!(U16 "IntRefCycleDist"),
            field!(U16 "DirectBiasAdjustment"),
            field!(U16 "GlobalMotionBiasAdjustment"),
            field!(U16 "MVCostScalingFactor"),
            field!(U16 "MBDisableSkipMap"),
            field!(U16 "WeightedPred"),
            field!(U16 "WeightedBiPred"),
            field!(U16 "AspectRatioInfoPresent"),
            field!(U16 "OverscanInfoPresent"),
            field!(U16 "OverscanAppropriate"),
            field!(U16 "TimingInfoPresent"),
            field!(U16 "BitstreamRestriction"),
            field!(U16 "LowDelayHrd"),
            field!(U16 "MotionVectorsOverPicBoundaries"),
            pad!(U16[2]),
            field!(U16 "ScenarioInfo"),
            field!(U16 "ContentInfo"),
            field!(U16 "PRefType"),
            field!(U16 "FadeDetection"),
            pad!(U16[2]),
            field!(U16 "GPB"),
            field!(U32 "MaxFrameSizeI"),
            field!(U32 "MaxFrameSizeP"),
            pad!(U32[3]),
            field!(U16 "EnableQPOffset"),
            field!(I16 "QPOffset" [8]),
            field!(U16 "NumRefActiveP" [8]),
            field!(U16 "NumRefActiveBL0" [8]),
            field!(U16 "NumRefActiveBL1" [8]),
            pad!(U16),
            field!(U16 "TransformSkip"),
            field!(U16 "TargetChromaFormatPlus1"),
            field!(U16 "TargetBitDepthLuma"),
            field!(U16 "TargetBitDepthChroma"),
            field!(U16 "BRCPanicMode"),
            field!(U16 "LowDelayBRC"),
            field!(U16 "EnableMBForceIntra"),
            field!(U16 "AdaptiveMaxFrameSize"),
            field!(U16 "RepartitionCheckEnable"),
            pad!(U16[3]),
            field!(U16 "EncodedUnitsInfo"),
            field!(U16 "EnableNalUnitType"),
            field!(U16 "ExtBrcAdaptiveLTR"),
            pad!(U16[163]),
        ],
    },
    RecordDef {
        name: "mfxExtHEVCParam",
        kind: ext(b"265P"),
        defs: &[
            field!(U16 "PicWidthInLumaSamples"),
            field!(U16 "PicHeightInLumaSamples"),
            field!(U64 "GeneralConstraintFlags"),
            field!(U16 "SampleAdaptiveOffset"),
            field!(U16 "LCUSize"),
            pad!(U16[116]),
        ],
    },
    RecordDef {
        name: "mfxExtHEVCTiles",
        kind: ext(b"265T"),
        defs: &[
            field!(U16 "NumTileRows"),
            field!(U16 "NumTileColumns"),
            pad!(U16[74]),
        ],
    },
    RecordDef {
        name: "mfxExtVP9Param",
        kind: ext(b"9PAR"),
        defs: &[
            field!(U16 "FrameWidth"),
            field!(U16 "FrameHeight"),
            field!(U16 "WriteIVFHeaders"),
            pad!(I16[6]),
            field!(I16 "QIndexDeltaLumaDC"),
            field!(I16 "QIndexDeltaChromaAC"),
            field!(I16 "QIndexDeltaChromaDC"),
            field!(U16 "NumTileRows"),
            field!(U16 "NumTileColumns"),
            pad!(U16[110]),
        ],
    },
    RecordDef {
        name: "mfxExtVP9TemporalLayers",
        kind: ext(b"9TML"),
        defs: &[
            record!("Layer": "mfxVP9TemporalLayer" [8]),
            pad!(U16[60]),
        ],
    },
    RecordDef {
        name: "mfxExtAvcTemporalLayers",
        kind: ext(b"ATML"),
        defs: &[
            pad!(U32[4]),
            pad!(U16),
            field!(U16 "BaseLayerPID"),
            record!("Layer": "mfxAvcTemporalLayer" [8]),
        ],
    },
    RecordDef {
        name: "mfxExtTemporalLayers",
        kind: ext(b"TMPL"),
        defs: &[pad!(U16[12]), record!("Layer": "mfxTemporalLayer" [8])],
    },
    RecordDef {
        name: "mfxExtAVCRefLists",
        kind: ext(b"RLTS"),
        defs: &[
            field!(U16 "NumRefIdxL0Active"),
            field!(U16 "NumRefIdxL1Active"),
            pad!(U16[2]),
            record!("RefPicList0": "mfxRefPic" [32]),
            record!("RefPicList1": "mfxRefPic" [32]),
        ],
    },
    RecordDef {
        name: "mfxExtEncoderROI",
        kind: ext(b"EROI"),
        defs: &[
            field!(U16 "NumROI"),
            field!(U16 "ROIMode"),
            pad!(U16[10]),
            record!("ROI": "mfxRoiEntry" [256]),
        ],
    },
    RecordDef {
        name: "mfxExtPredWeightTable",
        kind: ext(b"EPWT"),
        defs: &[
            field!(U16 "LumaLog2WeightDenom"),
            field!(U16 "ChromaLog2WeightDenom"),
            field!(U16 "LumaWeightFlag" [2, 32]),
            field!(U16 "ChromaWeightFlag" [2, 32]),
            field!(I16 "Weights" [2, 32, 3, 2]),
            pad!(U16[58]),
        ],
    },
    RecordDef {
        name: "mfxExtInsertHeaders",
        kind: ext(b"SPRE"),
        defs: &[field!(U16 "SPS"), field!(U16 "PPS"), pad!(U16[8])],
    },
    // Signalling and HDR metadata
    RecordDef {
        name: "mfxExtVideoSignalInfo",
        kind: ext(b"VSIN"),
        defs: &[
            field!(U16 "VideoFormat"),
            field!(U16 "VideoFullRange"),
            field!(U16 "ColourDescriptionPresent"),
            field!(U16 "ColourPrimaries"),
            field!(U16 "TransferCharacteristics"),
            field!(U16 "MatrixCoefficients"),
        ],
    },
    RecordDef {
        name: "mfxExtVPPVideoSignalInfo",
        kind: ext(b"VVSI"),
        defs: &[
            pad!(U16[4]),
            overlay!(
                [
                    record!("In": "mfxVPPSignalRange"),
                    record!("Out": "mfxVPPSignalRange"),
                ],
                [
                    field!(U16 "TransferMatrix"),
                    field!(U16 "NominalRange"),
                    pad!(U16[14]),
                ],
            ),
        ],
    },
    RecordDef {
        name: "mfxExtChromaLocInfo",
        kind: ext(b"CLIN"),
        defs: &[
            field!(U16 "ChromaLocInfoPresentFlag"),
            field!(U16 "ChromaSampleLocTypeTopField"),
            field!(U16 "ChromaSampleLocTypeBottomField"),
            pad!(U16[9]),
        ],
    },
    RecordDef {
        name: "mfxExtMasteringDisplayColourVolume",
        kind: ext(b"DCVS"),
        defs: &[
            pad!(U16[15]),
            field!(U16 "InsertPayloadToggle"),
            field!(U16 "DisplayPrimariesX" [3]),
            field!(U16 "DisplayPrimariesY" [3]),
            field!(U16 "WhitePointX"),
            field!(U16 "WhitePointY"),
            field!(U32 "MaxDisplayMasteringLuminance"),
            field!(U32 "MinDisplayMasteringLuminance"),
        ],
    },
    RecordDef {
        name: "mfxExtContentLightLevelInfo",
        kind: ext(b"LLIS"),
        defs: &[
            pad!(U16[9]),
            field!(U16 "InsertPayloadToggle"),
            field!(U16 "MaxContentLightLevel"),
            field!(U16 "MaxPicAverageLightLevel"),
        ],
    },
    // Runtime placement
    RecordDef {
        name: "mfxExtThreadsParam",
        kind: ext(b"THDP"),
        defs: &[
            field!(U16 "NumThread"),
            field!(I32 "SchedulingType"),
            field!(I32 "Priority"),
            pad!(U16[55]),
        ],
    },
    RecordDef {
        name: "mfxExtDeviceAffinityMask",
        kind: ext(b"DAFM"),
        defs: &[
            field!(Char "DeviceID" [128]),
            field!(U32 "NumSubDevices"),
            // Mask pointer slot
            pad!(U64),
        ],
    },
    // Video processing
    RecordDef {
        name: "mfxExtVPPDeinterlacing",
        kind: ext(b"VPDI"),
        defs: &[
            field!(U16 "Mode"),
            field!(U16 "TelecinePattern"),
            field!(U16 "TelecineLocation"),
            pad!(U16[9]),
        ],
    },
    RecordDef {
        name: "mfxExtVPPFrameRateConversion",
        kind: ext(b"FRC "),
        defs: &[field!(U16 "Algorithm"), pad!(U16), pad!(U32[15])],
    },
    RecordDef {
        name: "mfxExtVPPRotation",
        kind: ext(b"ROT "),
        defs: &[field!(U16 "Angle"), pad!(U16[11])],
    },
    RecordDef {
        name: "mfxExtVPPScaling",
        kind: ext(b"VSCL"),
        defs: &[
            field!(U16 "ScalingMode"),
            field!(U16 "InterpolationMethod"),
            pad!(U16[10]),
        ],
    },
    RecordDef {
        name: "mfxExtVPPMirroring",
        kind: ext(b"MIRR"),
        defs: &[field!(U16 "Type"), pad!(U16[11])],
    },
    RecordDef {
        name: "mfxExtVPPColorFill",
        kind: ext(b"VCLF"),
        defs: &[field!(U16 "Enable"), pad!(U16[11])],
    },
    RecordDef {
        name: "mfxExtColorConversion",
        kind: ext(b"VCSC"),
        defs: &[field!(U16 "ChromaSiting"), pad!(U16[27])],
    },
    RecordDef {
        name: "mfxExtVPPProcAmp",
        kind: ext(b"PAMP"),
        defs: &[
            field!(F64 "Brightness"),
            field!(F64 "Contrast"),
            field!(F64 "Hue"),
            field!(F64 "Saturation"),
        ],
    },
    RecordDef {
        name: "mfxExtVPPDenoise",
        kind: ext(b"DNIS"),
        defs: &[field!(U16 "DenoiseFactor")],
    },
    RecordDef {
        name: "mfxExtVPPDetail",
        kind: ext(b"DET "),
        defs: &[field!(U16 "DetailFactor")],
    },
];
