//! CLI integration tests for vplcfg.
//!
//! These tests drive the binary end to end: property assignment, schema
//! listing, and implementation matching against manifests on disk.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the vplcfg binary command, isolated from any user configuration.
fn vplcfg(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vplcfg").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env_remove("VPLCFG_MANIFEST");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const MANIFEST: &str = r#"[[implementation]]
name = "gpu"

[implementation.properties]
Impl = 2
ImplName = "mfx-gen"
"ApiVersion.Major" = 2
"ApiVersion.Minor" = 9

[[implementation.decoder]]
"decoder.CodecID" = "AVC "

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
"#;

fn write_manifest(dir: &Path) {
    fs::write(dir.join("impls.toml"), MANIFEST).unwrap();
}

// ============================================================================
// vplcfg set
// ============================================================================

#[test]
fn test_set_prints_values() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "Width=1920", "Height=1080", "CodecId=HEVC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Width = 1920"))
        .stdout(predicate::str::contains("Height = 1080"))
        .stdout(predicate::str::contains("CodecId = 1129727304"));
}

#[test]
fn test_set_attaches_extension_buffers() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args([
            "set",
            "mfxExtCodingOption2.MaxQPI=51",
            "mfxExtDeviceAffinityMask.DeviceID=gpu0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("mfxExtCodingOption2.MaxQPI = 51"))
        .stdout(predicate::str::contains(
            "mfxExtDeviceAffinityMask.DeviceID = gpu0",
        ));
}

#[test]
fn test_set_array_positional() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "mfx.SamplingFactorH=1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mfx.SamplingFactorH = 1, 2, 0, 0"));
}

#[test]
fn test_set_last_assignment_wins() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "Width=640", "Width=1280"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Width = 1280"))
        .stdout(predicate::str::contains("Width = 640").not());
}

#[test]
fn test_set_json_output() {
    let tmp = temp_dir();

    let output = vplcfg(tmp.path())
        .args([
            "set",
            "--format",
            "json",
            "Width=1920",
            "mfxExtCodingOption2.MaxQPI=51",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["path"], "Width");
    assert_eq!(json[0]["values"][0], 1920);
    assert_eq!(json[1]["path"], "mfxExtCodingOption2.MaxQPI");
    assert_eq!(json[1]["values"][0], 51);
}

#[test]
fn test_set_unknown_property_fails() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "mfx.FrameInfo.Widht=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to set `mfx.FrameInfo.Widht`"))
        .stderr(predicate::str::contains("unknown property path"));
}

#[test]
fn test_set_out_of_range_fails() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "BitDepthLuma=70000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot store `70000`"));
}

#[test]
fn test_set_negative_into_unsigned_fails() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "mfxExtCodingOption2.MaxQPI=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot store `-1`"));
}

#[test]
fn test_set_no_attach_reports_missing_buffer() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "--no-attach", "mfxExtCodingOption2.MaxQPI=51"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("extension buffer CDO2"))
        .stderr(predicate::str::contains("68 bytes"));
}

#[test]
fn test_set_rejects_bad_argument() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "Width"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected PATH=VALUE"));
}

#[test]
fn test_set_without_params_fails() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .arg("set")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no properties given"));
}

#[test]
fn test_set_reads_project_config() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("vplcfg.toml"),
        "[params]\nWidth = 1280\n\"mfxExtVideoSignalInfo.VideoFullRange\" = 1\n",
    )
    .unwrap();

    vplcfg(tmp.path())
        .args(["set", "Height=720"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Width = 1280"))
        .stdout(predicate::str::contains(
            "mfxExtVideoSignalInfo.VideoFullRange = 1",
        ))
        .stdout(predicate::str::contains("Height = 720"));
}

#[test]
fn test_set_config_can_disable_attach() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("vplcfg.toml"),
        "[defaults]\nattach_extensions = false\n",
    )
    .unwrap();

    vplcfg(tmp.path())
        .args(["set", "mfxExtVPPDenoise.DenoiseFactor=50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DNIS"));
}

#[test]
fn test_set_explicit_config_missing() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["set", "--config", "missing.toml", "Width=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

// ============================================================================
// vplcfg schema
// ============================================================================

#[test]
fn test_schema_lists_extension_fields() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["schema", "mfxExtDeviceAffinityMask"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mfxExtDeviceAffinityMask.DeviceID[]"))
        .stdout(predicate::str::contains("char[128]"))
        .stdout(predicate::str::contains("+8"))
        .stdout(predicate::str::contains("mfxExtCodingOption2").not());
}

#[test]
fn test_schema_caps() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["schema", "--caps", "mfxDecoderDescription"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "mfxDecoderDescription.decoder.CodecID",
        ))
        .stdout(predicate::str::contains("fourcc"));
}

#[test]
fn test_schema_json() {
    let tmp = temp_dir();

    let output = vplcfg(tmp.path())
        .args(["schema", "--format", "json", "mfxExtVPPProcAmp.Brightness"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["path"], "mfxExtVPPProcAmp.Brightness");
    assert_eq!(json[0]["type"], "f64");
    assert_eq!(json[0]["offset"], 8);
}

#[test]
fn test_schema_unknown_prefix_fails() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["schema", "mfxExtNothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vplcfg schema"));
}

// ============================================================================
// vplcfg match
// ============================================================================

#[test]
fn test_match_by_impl() {
    let tmp = temp_dir();
    write_manifest(tmp.path());

    vplcfg(tmp.path())
        .args(["match", "--manifest", "impls.toml", "--filter", "Impl=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: gpu"))
        .stdout(predicate::str::contains("cpu").not());
}

#[test]
fn test_match_sub_description_any_instance() {
    let tmp = temp_dir();
    write_manifest(tmp.path());

    vplcfg(tmp.path())
        .args([
            "match",
            "--manifest",
            "impls.toml",
            "--filter",
            "mfxDecoderDescription.decoder.CodecID=HEVC",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: gpu"));

    vplcfg(tmp.path())
        .args([
            "match",
            "--manifest",
            "impls.toml",
            "-f",
            "mfxVPPDescription.filter.FilterFourCC=PSCL",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1: cpu"))
        .stdout(predicate::str::contains("gpu").not());
}

#[test]
fn test_match_live_property() {
    let tmp = temp_dir();
    write_manifest(tmp.path());

    vplcfg(tmp.path())
        .args([
            "match",
            "--manifest",
            "impls.toml",
            "--filter",
            "DXGIAdapterIndex=0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: gpu"));
}

#[test]
fn test_match_without_filters_lists_all() {
    let tmp = temp_dir();
    write_manifest(tmp.path());

    vplcfg(tmp.path())
        .args(["match", "--manifest", "impls.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: gpu"))
        .stdout(predicate::str::contains("1: cpu"));

    vplcfg(tmp.path())
        .args(["match", "--manifest", "impls.toml", "--first"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: gpu"))
        .stdout(predicate::str::contains("cpu").not());
}

#[test]
fn test_match_none_fails() {
    let tmp = temp_dir();
    write_manifest(tmp.path());

    vplcfg(tmp.path())
        .args([
            "match",
            "--manifest",
            "impls.toml",
            "--filter",
            "mfxDecoderDescription.decoder.CodecID=VP90",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no implementation satisfies 1 filter(s)"));
}

#[test]
fn test_match_uses_configured_manifest_and_filters() {
    let tmp = temp_dir();
    write_manifest(tmp.path());
    fs::write(
        tmp.path().join("vplcfg.toml"),
        "[defaults]\nmanifest = \"impls.toml\"\n\n[[filter]]\npath = \"ImplName\"\nvalue = \"mfx-sw\"\n",
    )
    .unwrap();

    vplcfg(tmp.path())
        .args(["match", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"cpu\""))
        .stdout(predicate::str::contains("\"index\": 1"));
}

#[test]
fn test_match_manifest_from_environment() {
    let tmp = temp_dir();
    write_manifest(tmp.path());

    vplcfg(tmp.path())
        .env("VPLCFG_MANIFEST", "impls.toml")
        .args(["match", "--filter", "ImplName=mfx-sw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1: cpu"));

    // The flag wins over the environment
    vplcfg(tmp.path())
        .env("VPLCFG_MANIFEST", "missing.toml")
        .args(["match", "--manifest", "impls.toml", "--filter", "Impl=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: gpu"));
}

#[test]
fn test_match_requires_manifest() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .arg("match")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no implementation manifest given"));
}

#[test]
fn test_match_reports_broken_manifest() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("impls.toml"),
        "[[implementation]]\nname = \"broken\"\n[implementation.properties]\nNoSuchField = 1\n",
    )
    .unwrap();

    vplcfg(tmp.path())
        .args(["match", "--manifest", "impls.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("implementation `broken`"));
}

// ============================================================================
// vplcfg completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    vplcfg(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vplcfg"));
}
