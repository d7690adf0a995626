//! Version comparison between the running CLI and a project record

use semver::Version;

/// Compare the running CLI version against the version that generated a project
/// Returns a warning message if the project was generated by a newer CLI
pub fn check_compatibility(
    cli_version: &str,
    recorded_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let recorded_ver = parse_version(recorded_version)?;

    if cli_ver < recorded_ver {
        Some(format!(
            "This project was generated by CLI version {}.\n\
             You are running version {}.\n\
             Consider updating: {}",
            recorded_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, tolerating a leading 'v'
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim().strip_prefix('v').unwrap_or(version_str.trim());
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_record() {
        let warning = check_compatibility("0.1.0", "0.2.0", "cargo install keystone --force");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_as_record() {
        assert!(check_compatibility("0.1.0", "v0.1.0", "cargo install keystone --force").is_none());
    }

    #[test]
    fn test_cli_newer_than_record() {
        assert!(check_compatibility("0.2.0", "0.1.0", "cargo install keystone --force").is_none());
    }

    #[test]
    fn test_invalid_versions() {
        // Can't compare, so no warning
        assert!(check_compatibility("invalid", "0.1.0", "cargo install keystone --force").is_none());
    }
}
