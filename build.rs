//! Build script for PawPal
//!
//! Embeds a build number and timestamp. CI can pin the number with
//! PAWPAL_BUILD_NUMBER; local builds bump a counter in build_number.txt.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

fn read_counter(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=PAWPAL_BUILD_NUMBER");

    let pinned = std::env::var("PAWPAL_BUILD_NUMBER")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok());

    let build_number = match pinned {
        Some(n) => n,
        None => {
            let path = Path::new(COUNTER_FILE);
            let next = read_counter(path) + 1;
            fs::write(path, next.to_string()).expect("Failed to write build number file");
            next
        }
    };

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=PAWPAL_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=PAWPAL_BUILD_TIMESTAMP={}", timestamp);
}
