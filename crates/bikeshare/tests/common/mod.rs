//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Header used by the Chicago and New York City files.
pub const FULL_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

/// Header used by the Washington file (no demographics).
pub const WASHINGTON_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // Go up from crates/bikeshare to workspace root
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Helper that builds the binary once and returns its path
pub fn get_bikeshare_binary() -> PathBuf {
    let workspace = workspace_root();

    // Build the binary first (this should be quick if already built)
    let status = Command::new("cargo")
        .args(["build", "--package", "bikeshare", "--quiet"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build bikeshare");

    assert!(status.success(), "Failed to build bikeshare binary");

    workspace.join("target/debug/bikeshare")
}

/// Run the bikeshare binary with `args`, feeding `stdin` as the user's answers
pub fn run_bikeshare(args: &[&str], stdin: &str) -> Output {
    let binary = get_bikeshare_binary();

    let mut child = Command::new(&binary)
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("BIKESHARE_DATA_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute bikeshare binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write answers");

    child.wait_with_output().expect("Failed to wait for bikeshare")
}

/// Write a city file with `header` and one line per row, returning its path
pub fn write_city_csv(dir: &Path, file_name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(file_name);
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).expect("Failed to write city file");
    path
}

/// A small Chicago sample: five trips across January and February.
///
/// 2017-01-02 and 2017-01-09 are Mondays, 2017-01-03 is a Tuesday,
/// 2017-02-06 is a Monday and 2017-02-07 a Tuesday.
pub fn chicago_rows() -> Vec<&'static str> {
    vec![
        "1,2017-01-02 08:05:00,2017-01-02 08:07:05,125,Canal St,Clark St,Subscriber,Male,1990.0",
        "2,2017-01-03 08:40:00,2017-01-03 08:41:15,75,Canal St,Wells St,Customer,,",
        "3,2017-01-09 17:15:00,2017-01-09 17:20:00,300,Wells St,Clark St,Subscriber,Female,1985.0",
        "4,2017-02-06 08:00:00,2017-02-06 08:10:00,600,Canal St,Clark St,Subscriber,Female,1990.0",
        "5,2017-02-07 12:30:00,2017-02-07 12:31:00,60,Lake St,Canal St,Subscriber,Male,1972.0",
    ]
}
