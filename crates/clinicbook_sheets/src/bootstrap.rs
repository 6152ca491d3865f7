//! One-time credential file setup, run before the router is built.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clinicbook_config::{env_vars, SheetsConfig};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A credential file was already there and was left alone.
    AlreadyPresent,
    Written,
    /// No file and nothing to write it from.
    MissingSource,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to create credential directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write credential file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Writes `contents` to `path` unless a file already exists there.
///
/// Never overwrites. Two processes racing on the same path both succeed and
/// exactly one of them writes.
pub fn ensure_credentials_file(
    path: &Path,
    contents: Option<&str>,
) -> Result<BootstrapOutcome, BootstrapError> {
    if path.exists() {
        return Ok(BootstrapOutcome::AlreadyPresent);
    }
    let Some(contents) = contents else {
        return Ok(BootstrapOutcome::MissingSource);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| BootstrapError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(BootstrapOutcome::AlreadyPresent)
        }
        Err(source) => {
            return Err(BootstrapError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    file.write_all(contents.as_bytes())
        .map_err(|source| BootstrapError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(BootstrapOutcome::Written)
}

/// Bootstraps `config.key_path` from `GOOGLE_SERVICE_ACCOUNT_JSON`.
pub fn bootstrap_credentials(config: &SheetsConfig) -> Result<BootstrapOutcome, BootstrapError> {
    let path = Path::new(&config.key_path);
    let source = env_vars::service_account_json();
    let outcome = ensure_credentials_file(path, source.as_deref())?;
    match outcome {
        BootstrapOutcome::AlreadyPresent => {
            info!("Using existing credential file {}", path.display())
        }
        BootstrapOutcome::Written => {
            info!("Wrote credential file {}", path.display())
        }
        BootstrapOutcome::MissingSource => warn!(
            "No credential file at {} and {} is not set; contact submissions will fail",
            path.display(),
            env_vars::SERVICE_ACCOUNT_JSON_ENV
        ),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("clinicbook-bootstrap-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_writes_when_absent_and_creates_parents() {
        let dir = scratch_dir();
        let path = dir.join("credentials").join("service-account.json");

        let outcome = ensure_credentials_file(&path, Some(r#"{"type":"service_account"}"#)).unwrap();
        assert_eq!(outcome, BootstrapOutcome::Written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"type":"service_account"}"#
        );

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_never_overwrites() {
        let dir = scratch_dir();
        let path = dir.join("service-account.json");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "original").unwrap();

        let outcome = ensure_credentials_file(&path, Some("replacement")).unwrap();
        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");

        // running again changes nothing
        let again = ensure_credentials_file(&path, Some("replacement")).unwrap();
        assert_eq!(again, BootstrapOutcome::AlreadyPresent);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_source_writes_nothing() {
        let dir = scratch_dir();
        let path = dir.join("service-account.json");

        let outcome = ensure_credentials_file(&path, None).unwrap();
        assert_eq!(outcome, BootstrapOutcome::MissingSource);
        assert!(!path.exists());
        assert!(!dir.exists());
    }
}
