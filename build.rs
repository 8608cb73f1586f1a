fn main() {
    // Stamp the binary so startup logs can report which build is running
    let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    println!("cargo:rustc-env=ALUMHUB_BUILD_DATE={}", stamp);
    println!("cargo:rerun-if-changed=build.rs");
}
