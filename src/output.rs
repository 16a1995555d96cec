use log::{info, warn};
use std::{
    env,
    path::{Path, PathBuf},
};

const OUTPUT_DIRECTORY: &str = "dtogen";

// Environment variable holding the user's home, and the directory under it, if any.
fn platform_base() -> (&'static str, Option<&'static str>) {
    match env::consts::OS {
        "windows" => ("USERPROFILE", Some("Desktop")),
        "macos" => ("HOME", Some("Desktop")),
        _ => ("HOME", None),
    }
}

/// The default output directory on the current platform.
///
/// Falls back to a directory relative to the working directory
/// if the platform's home variable is not set.
pub fn default_output_dir() -> PathBuf {
    let (var, subdir) = platform_base();
    let dir = match env::var_os(var) {
        Some(home) => subdir
            .into_iter()
            .fold(PathBuf::from(home), |path, dir| path.join(dir))
            .join(OUTPUT_DIRECTORY),
        None => {
            warn!("environment variable {var} is not set, writing to the working directory");
            PathBuf::from(OUTPUT_DIRECTORY)
        }
    };
    info!("default output directory: '{}'", dir.display());
    dir
}

/// The path of the Java source of class `name` in package `package`, under `base`.
pub fn resource_path(base: &Path, package: &str, name: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
        .join(format!("{name}.java"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_in_package() {
        assert_eq!(
            resource_path(Path::new("out"), "com.example.shop", "User"),
            Path::new("out").join("com").join("example").join("shop").join("User.java")
        );
    }

    #[test]
    fn resource_without_package() {
        assert_eq!(
            resource_path(Path::new("out"), "", "User"),
            Path::new("out").join("User.java")
        );
    }

    #[test]
    fn default_dir_name() {
        assert!(default_output_dir().ends_with(OUTPUT_DIRECTORY));
    }
}
