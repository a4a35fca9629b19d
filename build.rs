fn main() {
    println!("cargo:rerun-if-env-changed=NEONFOLIO_BUILD");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let build_id = std::env::var("NEONFOLIO_BUILD")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(target_triple_label);
    println!("cargo:rustc-env=NEONFOLIO_BUILD={}", build_id);

    let sha = git_short_sha()
        .or_else(|| std::env::var("GITHUB_SHA").ok().and_then(|v| short_hex(&v)))
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=NEONFOLIO_GIT_SHA={}", sha);
}

/// `<os>-<arch>-<profile>`, e.g. `linux-x86_64-release`.
fn target_triple_label() -> String {
    let var = |k: &str| std::env::var(k).unwrap_or_else(|_| "unknown".to_string());
    format!(
        "{}-{}-{}",
        var("CARGO_CFG_TARGET_OS"),
        var("CARGO_CFG_TARGET_ARCH"),
        var("PROFILE")
    )
}

fn short_hex(v: &str) -> Option<String> {
    let short: String = v.trim().chars().take(7).collect();
    (!short.is_empty() && short.chars().all(|c| c.is_ascii_hexdigit()))
        .then(|| short.to_ascii_lowercase())
}

fn git_short_sha() -> Option<String> {
    let out = std::process::Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    short_hex(&String::from_utf8(out.stdout).ok()?)
}
