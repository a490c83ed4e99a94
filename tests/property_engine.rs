//! Library-level tests for property access and capability matching.
//!
//! These exercise the public API the way an embedding application would:
//! build records, set and read properties by path, attach extension
//! buffers on request, and select implementations by filter.

use vplcfg::core::{BufferTag, CapabilityDescriptor, ConfigRecord, FieldCategory, TypeKind, Value};
use vplcfg::ops::{
    apply_with_attach, coerce_value, get_property, match_capability, matching_indices,
    select_implementation, set_property, CoerceError, PropertyFilter, StaticEnumerator,
};
use vplcfg::resolver::{resolve, ConfigError};
use vplcfg::schema::catalog;

fn filters(list: &[&str]) -> Vec<PropertyFilter> {
    list.iter().map(|f| f.parse().unwrap()).collect()
}

// ============================================================================
// Boundary round-trip
// ============================================================================

#[test]
fn test_boundary_round_trip_per_width() {
    let cases: &[(&str, &str, Value, &str, Value, &str)] = &[
        ("mfxExtCodingOption2.MaxQPI", "0", Value::U8(0), "255", Value::U8(u8::MAX), "256"),
        ("Width", "0", Value::U16(0), "65535", Value::U16(u16::MAX), "65536"),
        (
            "FrameRateExtN",
            "0",
            Value::U32(0),
            "4294967295",
            Value::U32(u32::MAX),
            "4294967296",
        ),
        (
            "BufferSize",
            "0",
            Value::U64(0),
            "18446744073709551615",
            Value::U64(u64::MAX),
            "18446744073709551616",
        ),
        (
            "mfxExtCodingOption2.IntRefQPDelta",
            "-32768",
            Value::I16(i16::MIN),
            "32767",
            Value::I16(i16::MAX),
            "32768",
        ),
        (
            "mfxExtThreadsParam.SchedulingType",
            "-2147483648",
            Value::I32(i32::MIN),
            "2147483647",
            Value::I32(i32::MAX),
            "2147483648",
        ),
        (
            "mfxExtVPPProcAmp.Brightness",
            "-1.7976931348623157e308",
            Value::F64(f64::MIN),
            "1.7976931348623157e308",
            Value::F64(f64::MAX),
            "1.7976931348623158e308",
        ),
    ];

    for (path, min, min_value, max, max_value, above) in cases {
        let mut record = ConfigRecord::video_param();

        apply_with_attach(&mut record, path, min).unwrap();
        assert_eq!(get_property(&record, path).unwrap(), vec![min_value.clone()], "{}", path);

        apply_with_attach(&mut record, path, max).unwrap();
        assert_eq!(get_property(&record, path).unwrap(), vec![max_value.clone()], "{}", path);

        let err = set_property(&mut record, path, above).unwrap_err();
        assert!(matches!(err, ConfigError::Unsupported { .. }), "{}: {:?}", path, err);
        assert_eq!(get_property(&record, path).unwrap(), vec![max_value.clone()], "{}", path);
    }
}

#[test]
fn test_below_minimum_is_unsupported() {
    let cases = [
        ("mfxExtCodingOption2.MaxQPI", "-1"),
        ("Width", "-1"),
        ("FrameRateExtN", "-0"),
        ("mfxExtCodingOption2.IntRefQPDelta", "-32769"),
        ("mfxExtThreadsParam.SchedulingType", "-2147483649"),
        ("mfxExtVPPProcAmp.Brightness", "-1e309"),
        ("mfxExtVPPProcAmp.Brightness", "-1.7976931348623158e308"),
    ];

    for (path, below) in cases {
        let mut record = ConfigRecord::video_param();
        let err = apply_with_attach(&mut record, path, below).unwrap_err();
        assert!(matches!(err, ConfigError::Unsupported { .. }), "{}: {:?}", path, err);
    }
}

#[test]
fn test_boundaries_for_kinds_without_fields() {
    let value = |token, kind| coerce_value(token, kind, FieldCategory::Value);

    assert_eq!(value("-128", TypeKind::I8), Ok(Value::I8(i8::MIN)));
    assert_eq!(value("127", TypeKind::I8), Ok(Value::I8(i8::MAX)));
    assert!(value("128", TypeKind::I8).is_err());
    assert!(value("-129", TypeKind::I8).is_err());

    assert_eq!(value("9223372036854775807", TypeKind::I64), Ok(Value::I64(i64::MAX)));
    assert!(value("9223372036854775808", TypeKind::I64).is_err());

    assert_eq!(
        value("3.4028234663852886e38", TypeKind::F32),
        Ok(Value::F32(f32::MAX))
    );
    // Rounds to f32::MAX but lies above it
    assert!(matches!(
        value("3.4028235e38", TypeKind::F32),
        Err(CoerceError::OutOfRange { .. })
    ));
    assert!(value("3.5e38", TypeKind::F32).is_err());
}

#[test]
fn test_depth_scenario() {
    let mut record = ConfigRecord::video_param();
    record.attach_zeroed(BufferTag::new(*b"CDO2")).unwrap();

    set_property(&mut record, "mfxExtCodingOption2.MaxQPI", "255").unwrap();
    assert_eq!(
        get_property(&record, "mfxExtCodingOption2.MaxQPI").unwrap(),
        vec![Value::U8(255)]
    );

    for bad in ["256", "-1"] {
        let err = set_property(&mut record, "mfxExtCodingOption2.MaxQPI", bad).unwrap_err();
        assert!(matches!(err, ConfigError::Unsupported { .. }));
    }
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolution_is_idempotent() {
    let set = catalog().video_param();
    for path in [
        "Width",
        "mfx.FrameInfo.Width",
        "mfxExtCodingOption2.MaxQPI",
        "mfxExtAvcTemporalLayers.Layer[].Scale",
        "mfxExtPredWeightTable.Weights[1][31][2][1]",
        "mfxExtEncoderROI[1].ROI[3].DeltaQP",
    ] {
        let first = resolve(set, path).unwrap();
        let second = resolve(set, path).unwrap();
        assert_eq!(first, second, "{}", path);
        assert!(std::ptr::eq(first.field, second.field));
    }
}

#[test]
fn test_alias_and_full_path_agree() {
    let set = catalog().video_param();
    assert_eq!(
        resolve(set, "Width").unwrap(),
        resolve(set, "mfx.FrameInfo.Width").unwrap()
    );
}

#[test]
fn test_unknown_paths_are_not_found() {
    let mut record = ConfigRecord::video_param();
    for path in [
        "mfx.FrameInfo.Widht",
        "mfxExtNothing.Field",
        "mfx.FrameInfo",
        "Width.Extra",
        "mfx.SamplingFactorH[4]",
        "mfxExtEncoderROI[64].NumROI",
        "mfxExtPredWeightTable.Weights[0][0]",
    ] {
        let err = set_property(&mut record, path, "1").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }), "{}: {:?}", path, err);
    }
}

// ============================================================================
// Extension negotiation
// ============================================================================

#[test]
fn test_negotiation_protocol() {
    let mut record = ConfigRecord::video_param();

    let err = set_property(&mut record, "mfxExtCodingOption2.MaxQPI", "51").unwrap_err();
    let (tag, size) = match err {
        ConfigError::MoreBuffersNeeded { tag, size, .. } => (tag, size),
        other => panic!("expected MoreBuffersNeeded, got {:?}", other),
    };
    assert_eq!(tag, BufferTag::new(*b"CDO2"));
    let schema = catalog().video_param().extension_by_tag(tag).unwrap();
    assert_eq!(size, schema.size());

    // Wrong size is refused
    assert!(record.attach(tag, vec![0; size - 1]).is_err());

    record.attach(tag, vec![0; size]).unwrap();
    set_property(&mut record, "mfxExtCodingOption2.MaxQPI", "51").unwrap();
    assert_eq!(
        get_property(&record, "mfxExtCodingOption2.MaxQPI").unwrap(),
        vec![Value::U8(51)]
    );
}

#[test]
fn test_retry_fails_on_its_own_merits() {
    let mut record = ConfigRecord::video_param();
    let err = apply_with_attach(&mut record, "mfxExtVideoSignalInfo.VideoFormat", "-5").unwrap_err();
    assert!(matches!(err, ConfigError::Unsupported { .. }));
    assert_eq!(record.instance_count(BufferTag::new(*b"VSIN")), 1);
}

#[test]
fn test_reads_need_attached_buffers_too() {
    let record = ConfigRecord::video_param();
    let err = get_property(&record, "mfxExtVPPDenoise.DenoiseFactor").unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn test_instance_selector() {
    let mut record = ConfigRecord::video_param();
    let tag = BufferTag::new(*b"EROI");
    record.attach_zeroed(tag).unwrap();
    record.attach_zeroed(tag).unwrap();

    set_property(&mut record, "mfxExtEncoderROI[1].NumROI", "2").unwrap();
    assert_eq!(
        get_property(&record, "mfxExtEncoderROI[0].NumROI").unwrap(),
        vec![Value::U16(0)]
    );
    assert_eq!(
        get_property(&record, "mfxExtEncoderROI[1].NumROI").unwrap(),
        vec![Value::U16(2)]
    );

    let err = set_property(&mut record, "mfxExtEncoderROI[2].NumROI", "1").unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn test_failed_call_leaves_record_untouched() {
    let mut record = ConfigRecord::video_param();
    set_property(&mut record, "Width", "1920").unwrap();
    let before = record.base_bytes().to_vec();

    assert!(set_property(&mut record, "Width", "70000").is_err());
    assert!(set_property(&mut record, "mfx.SamplingFactorH", "1,2,300").is_err());
    assert!(set_property(&mut record, "mfx.FrameInfo.Widht", "1").is_err());
    assert_eq!(record.base_bytes(), &before[..]);
}

// ============================================================================
// Positional array writes
// ============================================================================

#[test]
fn test_positional_write_keeps_tail() {
    let mut record = ConfigRecord::video_param();
    set_property(&mut record, "mfx.SamplingFactorH", "9,9,9,9").unwrap();
    set_property(&mut record, "mfx.SamplingFactorH[]", "1, 2").unwrap();

    assert_eq!(
        get_property(&record, "mfx.SamplingFactorH").unwrap(),
        vec![Value::U8(1), Value::U8(2), Value::U8(9), Value::U8(9)]
    );
    assert_eq!(
        get_property(&record, "mfx.SamplingFactorH[3]").unwrap(),
        vec![Value::U8(9)]
    );
}

#[test]
fn test_positional_write_over_record_array() {
    let mut record = ConfigRecord::video_param();
    apply_with_attach(
        &mut record,
        "mfxExtAvcTemporalLayers.Layer[].Scale",
        "5,5,5,5,5,5,5,5",
    )
    .unwrap();
    set_property(&mut record, "mfxExtAvcTemporalLayers.Layer[].Scale", "1,2,4").unwrap();

    let scales = get_property(&record, "mfxExtAvcTemporalLayers.Layer[].Scale").unwrap();
    let expected: Vec<Value> = [1, 2, 4, 5, 5, 5, 5, 5].into_iter().map(Value::U16).collect();
    assert_eq!(scales, expected);
    assert_eq!(
        get_property(&record, "mfxExtAvcTemporalLayers.Layer[2].Scale").unwrap(),
        vec![Value::U16(4)]
    );
}

#[test]
fn test_multi_dimensional_index() {
    let mut record = ConfigRecord::video_param();
    apply_with_attach(&mut record, "mfxExtPredWeightTable.Weights[1][2][0][1]", "-7").unwrap();
    assert_eq!(
        get_property(&record, "mfxExtPredWeightTable.Weights[1][2][0][1]").unwrap(),
        vec![Value::I16(-7)]
    );
    assert_eq!(
        get_property(&record, "mfxExtPredWeightTable.Weights[1][2][0][0]").unwrap(),
        vec![Value::I16(0)]
    );
}

// ============================================================================
// Character arrays
// ============================================================================

#[test]
fn test_char_array_overflow() {
    let mut record = ConfigRecord::video_param();
    let path = "mfxExtDeviceAffinityMask.DeviceID";

    let err = apply_with_attach(&mut record, path, &"a".repeat(128)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Unsupported {
            source: CoerceError::TextTooLong { len: 128, capacity: 128 },
            ..
        }
    ));

    apply_with_attach(&mut record, path, &"b".repeat(127)).unwrap();
    let bytes = record.extensions()[0].bytes();
    assert_eq!(&bytes[8..135], "b".repeat(127).as_bytes());
    assert_eq!(bytes[135], 0);
}

#[test]
fn test_char_array_zero_fills() {
    let mut record = ConfigRecord::video_param();
    let path = "mfxExtDeviceAffinityMask.DeviceID";

    apply_with_attach(&mut record, path, "longer-name").unwrap();
    set_property(&mut record, path, "gpu").unwrap();

    assert_eq!(
        get_property(&record, path).unwrap(),
        vec![Value::Text("gpu".to_string())]
    );
    let bytes = record.extensions()[0].bytes();
    assert!(bytes[8 + 3..8 + 128].iter().all(|&b| b == 0));
}

// ============================================================================
// Capability filters
// ============================================================================

fn implementation(name: &str, impl_kind: u32, codecs: &[&str]) -> CapabilityDescriptor {
    let mut desc = CapabilityDescriptor::new(name);
    set_property(desc.record_mut(), "Impl", &impl_kind.to_string()).unwrap();
    for (k, codec) in codecs.iter().enumerate() {
        desc.record_mut()
            .attach_zeroed(BufferTag::new(*b"DDSC"))
            .unwrap();
        set_property(
            desc.record_mut(),
            &format!("mfxDecoderDescription[{}].decoder.CodecID", k),
            codec,
        )
        .unwrap();
    }
    desc
}

#[test]
fn test_empty_filters_match_everything() {
    for desc in [
        implementation("a", 1, &[]),
        implementation("b", 2, &["HEVC"]),
        CapabilityDescriptor::new("empty"),
    ] {
        assert!(match_capability(&desc, &[]));
    }
}

#[test]
fn test_unresolvable_filter_rejects() {
    let desc = implementation("gpu", 2, &["HEVC"]);
    assert!(!match_capability(&desc, &filters(&["mfxNoSuchDescription.Field=1"])));
    assert!(!match_capability(&desc, &filters(&["Impl=2", "NoSuchField=0"])));
}

#[test]
fn test_only_kth_descriptor_matches() {
    let descriptors = vec![
        implementation("sw", 1, &["AVC "]),
        implementation("gpu-a", 2, &["AVC "]),
        implementation("gpu-b", 2, &["AVC ", "HEVC"]),
        implementation("gpu-c", 2, &[]),
    ];
    let wanted = filters(&["Impl=2", "mfxDecoderDescription.decoder.CodecID=HEVC"]);

    let verdicts: Vec<bool> = descriptors
        .iter()
        .map(|d| match_capability(d, &wanted))
        .collect();
    assert_eq!(verdicts, [false, false, true, false]);

    let mut enumerator = StaticEnumerator::new(descriptors);
    assert_eq!(select_implementation(&mut enumerator, &wanted), Some(2));
    assert_eq!(matching_indices(&mut enumerator, &wanted), vec![2]);
}

#[test]
fn test_filter_values_are_coerced_to_field_type() {
    let desc = implementation("gpu", 2, &["HEVC"]);
    assert!(match_capability(&desc, &filters(&["Impl= 2 "])));
    assert!(match_capability(
        &desc,
        &[PropertyFilter::typed("Impl", Value::U32(2))]
    ));
    // Not a number: no match rather than an error
    assert!(!match_capability(&desc, &filters(&["Impl=two"])));
}

#[test]
fn test_decoder_filters_must_hold_on_one_decoder() {
    let mut desc = implementation("gpu", 2, &["AVC ", "HEVC"]);
    for (k, profile) in ["100", "1"].iter().enumerate() {
        let path = format!("mfxDecoderDescription[{}].decoder.decprofile.Profile", k);
        set_property(desc.record_mut(), &path, profile).unwrap();
    }

    let split = filters(&[
        "mfxDecoderDescription.decoder.CodecID=HEVC",
        "mfxDecoderDescription.decoder.decprofile.Profile=100",
    ]);
    assert!(!match_capability(&desc, &split));

    let together = filters(&[
        "mfxDecoderDescription.decoder.CodecID=HEVC",
        "mfxDecoderDescription.decoder.decprofile.Profile=1",
    ]);
    assert!(match_capability(&desc, &together));
}

#[test]
fn test_resolution_range_containment() {
    let mut desc = implementation("gpu", 2, &["HEVC"]);
    let reported = "mfxDecoderDescription[0].decoder.decprofile.decmemdesc.Width";
    for (member, value) in [("Min", "64"), ("Max", "4096"), ("Step", "1")] {
        set_property(desc.record_mut(), &format!("{}.{}", reported, member), value).unwrap();
    }

    let width = "mfxDecoderDescription.decoder.decprofile.decmemdesc.Width";
    assert!(match_capability(&desc, &filters(&[format!("{}=1920,1920,1", width).as_str()])));
    assert!(!match_capability(&desc, &filters(&[format!("{}=1920,8192,1", width).as_str()])));
}
