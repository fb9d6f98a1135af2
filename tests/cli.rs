use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const DEFAULT_VECTOR: &str = "5871334c6d39566232547a374b64315270626b646632a2b631a1c5c3985306df1f3c704b44cafca7257a0a2cb775c4ea047c924fc59c";

const WIDE_VECTOR: &str = "413434637952514332487a465379594375324a446d6365596e43396e6d65667070626b646632fda50d2d74d57b42a02d9b2d5d09a69121eaef9394ee77f0f465fe0707bf12acf103823b522973f42ba50e52ab9ba99c8c4de514afd9746eba923984dc19ec8a";

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pwcodec"));
    for var in [
        "PWCODEC_PASSWORD",
        "PWCODEC_SALT_LEN",
        "PWCODEC_ITERATIONS",
        "PWCODEC_KEY_LEN",
        "PWCODEC_HASH",
        "PWCODEC_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn hash(password: &str, extra: &[&str]) -> String {
    let out = bin()
        .env("PWCODEC_PASSWORD", password)
        .args(extra)
        .arg("hash")
        .output()
        .unwrap();
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}

#[test]
fn hash_prints_hex_record() {
    bin()
        .env("PWCODEC_PASSWORD", "pw")
        .arg("hash")
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{108}\n$").unwrap());
}

#[test]
fn hash_and_verify_roundtrip() {
    let record = hash("pw", &[]);

    bin()
        .env("PWCODEC_PASSWORD", "pw")
        .arg("verify")
        .arg(&record)
        .assert()
        .success()
        .stdout(predicate::str::contains("password verified"));
}

#[test]
fn hash_twice_gives_different_records() {
    assert_ne!(hash("pw", &[]), hash("pw", &[]));
}

#[test]
fn known_record_verifies() {
    bin()
        .env("PWCODEC_PASSWORD", "correct horse")
        .arg("verify")
        .arg(DEFAULT_VECTOR)
        .assert()
        .success();
}

#[test]
fn wrong_password_fails() {
    bin()
        .env("PWCODEC_PASSWORD", "wrong")
        .arg("verify")
        .arg(DEFAULT_VECTOR)
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password"));
}

#[test]
fn truncated_record_is_malformed() {
    bin()
        .env("PWCODEC_PASSWORD", "correct horse")
        .arg("verify")
        .arg(&DEFAULT_VECTOR[..DEFAULT_VECTOR.len() - 1])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed password record"));
}

#[test]
fn corrupted_tag_is_malformed() {
    let corrupted = DEFAULT_VECTOR.replacen("70626b646632", "70626b646633", 1);

    bin()
        .env("PWCODEC_PASSWORD", "correct horse")
        .arg("verify")
        .arg(corrupted)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format tag"));
}

#[test]
fn password_from_stdin() {
    bin()
        .arg("verify")
        .arg(DEFAULT_VECTOR)
        .write_stdin("correct horse\n")
        .assert()
        .success();
}

#[test]
fn empty_stdin_fails() {
    bin()
        .arg("verify")
        .arg(DEFAULT_VECTOR)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No password provided"));
}

#[test]
fn record_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user.pw");
    std::fs::write(&path, format!("{DEFAULT_VECTOR}\n")).unwrap();

    bin()
        .env("PWCODEC_PASSWORD", "correct horse")
        .arg("verify")
        .arg("--record-file")
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn missing_record_file_fails() {
    let dir = tempdir().unwrap();

    bin()
        .env("PWCODEC_PASSWORD", "pw")
        .arg("verify")
        .arg("--record-file")
        .arg(dir.path().join("missing.pw"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read record"));
}

#[test]
fn custom_layout_verifies_wide_record() {
    bin()
        .env("PWCODEC_PASSWORD", "123456")
        .args(["--salt-len", "32", "--key-len", "64"])
        .arg("verify")
        .arg(WIDE_VECTOR)
        .assert()
        .success();

    bin()
        .env("PWCODEC_PASSWORD", "123456")
        .arg("verify")
        .arg(WIDE_VECTOR)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 54 bytes, got 102"));
}

#[test]
fn options_from_env() {
    let record = hash("pw", &["--hash", "sha256", "--iterations", "500"]);

    bin()
        .env("PWCODEC_PASSWORD", "pw")
        .env("PWCODEC_HASH", "sha256")
        .env("PWCODEC_ITERATIONS", "500")
        .arg("verify")
        .arg(&record)
        .assert()
        .success();

    bin()
        .env("PWCODEC_PASSWORD", "pw")
        .arg("verify")
        .arg(&record)
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password"));
}

#[test]
fn invalid_options_fail() {
    bin()
        .env("PWCODEC_PASSWORD", "pw")
        .args(["--key-len", "0", "hash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid options"));

    bin()
        .env("PWCODEC_PASSWORD", "pw")
        .args(["--hash", "md5", "hash"])
        .assert()
        .failure();
}

#[test]
fn hash_json_reports_fields() {
    let out = bin()
        .env("PWCODEC_PASSWORD", "pw")
        .args(["hash", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["tag"], "pbkdf2");
    assert_eq!(report["record"].as_str().unwrap().len(), 108);
    assert_eq!(report["salt"].as_str().unwrap().len(), 16);
    assert_eq!(report["derived_key"].as_str().unwrap().len(), 64);
    assert_eq!(report["options"]["iterations"], 32);
    assert_eq!(report["options"]["hash"], "sha512");
}

#[test]
fn inspect_needs_no_password() {
    bin()
        .arg("inspect")
        .arg(DEFAULT_VECTOR)
        .assert()
        .success()
        .stdout(predicate::str::contains("Xq3Lm9Vb2Tz7Kd1R"))
        .stdout(predicate::str::contains("pbkdf2"))
        .stdout(predicate::str::contains(
            "a2b631a1c5c3985306df1f3c704b44cafca7257a0a2cb775c4ea047c924fc59c",
        ));
}

#[test]
fn inspect_rejects_garbage() {
    bin()
        .arg("inspect")
        .arg("not-a-record")
        .assert()
        .failure()
        .stderr(predicate::str::contains("record is not valid hex"));
}

#[test]
fn verbose_logs_to_stderr() {
    bin()
        .env("PWCODEC_PASSWORD", "correct horse")
        .args(["--verbose", "verify", DEFAULT_VECTOR])
        .assert()
        .success()
        .stdout(predicate::str::contains("password verified"))
        .stderr(predicate::str::contains("password verified"));
}

#[test]
fn json_logs_record_failure_kind() {
    bin()
        .env("PWCODEC_PASSWORD", "wrong")
        .args(["--log-format", "json", "verify", DEFAULT_VECTOR])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"kind\":\"password_mismatch\""));
}
