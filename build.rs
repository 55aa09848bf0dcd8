fn main() {
    let sha = std::env::var("GIT_SHA").unwrap_or_else(|_| "unset".to_string());
    println!("cargo:rustc-env=GIT_SHA={sha}");
    println!("cargo:rerun-if-env-changed=GIT_SHA");
}
