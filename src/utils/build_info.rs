/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One-line description used by the CLI `:version` command.
    pub fn summary(&self) -> String {
        format!(
            "stepform {} ({} built {} for {}, {})",
            self.version, self.git_hash, self.timestamp, self.target, self.rustc
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("STEPFORM_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("STEPFORM_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("STEPFORM_BUILD_TARGET").unwrap_or("unknown"),
        rustc: option_env!("STEPFORM_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
