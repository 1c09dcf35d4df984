use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".stepform";
const SESSIONS_DIR: &str = "sessions";

/// Returns the application data directory, defaulting to `~/.stepform`.
/// `STEPFORM_HOME` overrides it.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("STEPFORM_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default directory for suspended form sessions under `base`.
pub fn sessions_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(SESSIONS_DIR)
}

/// File that holds the suspended session of the form named `form`.
pub fn session_file_in(dir: &std::path::Path, form: &str) -> PathBuf {
    let slug: String = form
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    dir.join(format!("{}.json", slug.trim_matches('-')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn session_file_slugs_form_name() {
        let path = session_file_in(Path::new("/tmp/s"), "Sign Up!");
        assert_eq!(path, Path::new("/tmp/s/sign-up.json"));
    }
}
