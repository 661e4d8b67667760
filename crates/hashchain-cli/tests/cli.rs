//! Runs the `hashchain` binary against temp-dir chains.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn hashchain(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hashchain"))
        .args(args)
        .arg("--chain-dir")
        .arg(dir)
        .env_remove("HASHCHAIN_DIR")
        .env_remove("HASHCHAIN_BACKEND")
        .env_remove("HASHCHAIN_DIGEST")
        .env_remove("RUST_LOG")
        .output()
        .expect("run hashchain")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_scenario(dir: &Path, extra: &[&str]) {
    for transfer in [["A", "B", "10"], ["B", "C", "5"], ["C", "A", "2"]] {
        let mut args = vec!["write"];
        args.extend(transfer);
        args.extend(extra);
        let output = hashchain(dir, &args);
        assert!(output.status.success(), "{}", stdout(&output));
        assert!(stdout(&output).contains("Block saved!"));
    }
}

#[test]
fn test_write_then_verify() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Blockchain");
    write_scenario(&dir, &[]);

    for i in 0..=3 {
        assert!(dir.join(format!("{i}.json")).is_file());
    }

    let output = hashchain(&dir, &["verify"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("SOFT TEST (from block):"));
    assert!(text.contains("[BLOCK]: 3 [STATUS] -> Readable"));
    assert!(!text.contains("Corrupted"));
}

#[test]
fn test_tampered_file_exits_with_corruption() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Blockchain");
    write_scenario(&dir, &[]);

    let path = dir.join("2.json");
    let mut block: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    block["data"]["sum"] = "5000".into();
    fs::write(&path, block.to_string()).unwrap();

    let output = hashchain(&dir, &["verify"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stdout(&output).contains("[BLOCK]: 2 [STATUS] -> Corrupted"));
}

#[test]
fn test_missing_arguments_print_usage() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Blockchain");

    let output = hashchain(&dir, &["write", "A", "B"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("USAGE:"));
    assert!(!dir.exists());
}

#[test]
fn test_read_commands_need_a_chain() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Blockchain");

    assert_eq!(hashchain(&dir, &["verify"]).status.code(), Some(3));
    assert_eq!(hashchain(&dir, &["list"]).status.code(), Some(3));
    assert!(!dir.exists());

    fs::create_dir(&dir).unwrap();
    assert_eq!(hashchain(&dir, &["verify"]).status.code(), Some(3));
}

#[test]
fn test_list_reports_missing_block() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Blockchain");
    write_scenario(&dir, &[]);
    fs::remove_file(dir.join("2.json")).unwrap();

    let output = hashchain(&dir, &["list"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("BLOCK: #1"));
    assert!(text.contains("Not found. Probably it was corrupted."));
    assert!(text.contains("DATA : Sender   -> C"));
}

#[test]
fn test_sqlite_backend() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Blockchain");
    write_scenario(&dir, &["--backend", "sqlite"]);

    assert!(dir.join("chain.db").is_file());
    let output = hashchain(&dir, &["verify", "--backend", "sqlite"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
}

#[test]
fn test_legacy_digest_reads_what_it_wrote() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Blockchain");
    write_scenario(&dir, &["--digest", "legacy-hmac"]);

    assert_eq!(
        hashchain(&dir, &["verify", "--digest", "legacy-hmac"]).status.code(),
        Some(0)
    );
    assert_eq!(hashchain(&dir, &["verify"]).status.code(), Some(5));
}

#[test]
fn test_unwritable_chain_dir_is_a_storage_failure() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, b"").unwrap();
    let dir = blocker.join("Blockchain");

    for backend in ["file", "sqlite"] {
        let output = hashchain(&dir, &["write", "A", "B", "10", "--backend", backend]);
        assert_eq!(output.status.code(), Some(4), "{backend}");
    }
}
