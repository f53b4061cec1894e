#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Home directory with `.env` pointing at a workbook named `shared`
pub fn home_with_store() -> tempfile::TempDir {
    let home = tempfile::TempDir::new().unwrap();
    std::fs::write(home.path().join(".env"), "ARUNI_DB=shared\n").unwrap();
    home
}

/// Run the binary with `home` as its home directory
pub fn aruni(home: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_aruni"))
        .args(args)
        .env("ARUNI_HOME", home)
        .env_remove("ARUNI_DB")
        .env_remove("ARUNI_KEY_PATH")
        .env_remove("ARUNI_KEY_ENC_PATH")
        .env_remove("ARUNI_STORE_DIR")
        .env_remove("ARUNI_PASSWORD")
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
