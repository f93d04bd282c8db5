use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("rosmigrate_{label}_{}_{}", std::process::id(), nanos));
    path
}

fn write_temp_file(label: &str, contents: &str) -> PathBuf {
    let path = temp_path(label);
    fs::write(&path, contents).expect("write temp file");
    path
}

const EXPORT: &str = "\
# model = RB4011iGS+
/interface bridge
add name=lan-bridge
/interface bridge port
add bridge=lan-bridge interface=ether2
add bridge=lan-bridge interface=ether7
/ip address
add address=192.168.88.1/24 interface=lan-bridge
";

#[test]
fn test_cli_convert_rejects_same_input_output() {
    let input = write_temp_file("same_io", EXPORT);

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["convert", "--from", "rb4011igs", "--to", "rb750gr3", "--in"])
        .arg(&input)
        .args(["--out"])
        .arg(&input)
        .output()
        .expect("run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Output path must be different from input path"));
}

#[test]
fn test_cli_convert_requires_force_for_existing_output() {
    let input = write_temp_file("existing_out_in", EXPORT);
    let output_path = write_temp_file("existing_out_out", "# stale\n");

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["convert", "--from", "rb4011igs", "--to", "rb750gr3", "--in"])
        .arg(&input)
        .args(["--out"])
        .arg(&output_path)
        .output()
        .expect("run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Output file already exists"));
}

#[test]
fn test_cli_convert_writes_migrated_script() {
    let input = write_temp_file("convert_in", EXPORT);
    let out = temp_path("convert_out");

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["convert", "--from", "rb4011igs", "--to", "rb750gr3", "--in"])
        .arg(&input)
        .args(["--out"])
        .arg(&out)
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Migration completed"));
    assert!(stdout.contains("Statements dropped: 1"));
    assert!(stdout.contains("dropped-unmapped-interface"));

    let written = fs::read_to_string(&out).expect("read output");
    assert!(written.contains("interface=ether2"));
    assert!(!written.contains("interface=ether7"));
}

#[test]
fn test_cli_scan_missing_input() {
    let input = temp_path("missing_input");

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["scan", "--from", "rb4011igs", "--in"])
        .arg(&input)
        .output()
        .expect("run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read input file"));
}

#[test]
fn test_cli_scan_unknown_model() {
    let input = write_temp_file("scan_unknown_model", EXPORT);

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["scan", "--from", "rb9999", "--in"])
        .arg(&input)
        .output()
        .expect("run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown router model"));
}

#[test]
fn test_cli_scan_success() {
    let input = write_temp_file("scan_ok", EXPORT);

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["scan", "--from", "rb4011igs", "--in"])
        .arg(&input)
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Statements found: 4"));
    assert!(stdout.contains("Interface references (ethernet): 2"));
}

#[test]
fn test_cli_verify_same_model_reports_no_changes() {
    let input = write_temp_file("verify_clean", EXPORT);

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["verify", "--from", "rb4011igs", "--in"])
        .arg(&input)
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No changes."));
}

#[test]
fn test_cli_verify_cross_model_shows_diff_and_fails() {
    let input = write_temp_file("verify_diff", EXPORT);

    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe)
        .args(["verify", "--from", "rb4011igs", "--to", "rb750gr3", "--in"])
        .arg(&input)
        .output()
        .expect("run binary");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-add bridge=lan-bridge interface=ether7"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("verify: changes detected"));
}

#[test]
fn test_cli_models_lists_registry() {
    let exe = env!("CARGO_BIN_EXE_rosmigrate");
    let output = Command::new(exe).arg("models").output().expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rb4011igs"));
    assert!(stdout.contains("ccr2004-1g-12s"));
    assert!(stdout.contains("ethernet"));
}
