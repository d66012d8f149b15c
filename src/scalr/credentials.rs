//! Token lookup in the Terraform CLI credentials file

use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::credentials;
use crate::error::{Result, ScalrError};

/// Credentials file structure
#[derive(Deserialize, Debug)]
struct CredentialsFile {
    #[serde(default)]
    credentials: HashMap<String, CredentialEntry>,
}

/// Single credential entry
#[derive(Deserialize, Debug)]
struct CredentialEntry {
    token: String,
}

/// Reads tokens written by `terraform login <host>`
#[derive(Debug, Clone)]
pub struct TokenResolver {
    path: Option<PathBuf>,
}

impl TokenResolver {
    /// Resolver for the platform default credentials file location
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Resolver reading an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Token stored for `host`, if the file exists and has one.
    ///
    /// A missing file is not an error; a file that cannot be parsed is.
    pub fn lookup(&self, host: &str) -> Result<Option<String>> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };

        debug!("Looking for credentials file at: {}", path.display());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Ok(None),
        };

        let creds = Self::parse(&content, path)?;
        let token = creds.credentials.get(host).map(|c| c.token.clone());
        if token.is_some() {
            debug!(
                "Using token from credentials file {} for host: {}",
                path.display(),
                host
            );
        }
        Ok(token)
    }

    fn parse(content: &str, path: &Path) -> Result<CredentialsFile> {
        serde_json::from_str(content).map_err(|e| {
            ScalrError::Credentials(format!(
                "Could not parse credentials file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// - Windows: %APPDATA%\terraform.d\credentials.tfrc.json
    /// - Linux/macOS: ~/.terraform.d/credentials.tfrc.json
    fn default_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join(credentials::FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            dirs::home_dir().map(|p| p.join(credentials::FILE_PATH_UNIX))
        }
    }
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn credentials_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_lookup_by_host() {
        let file = credentials_file(
            r#"{
                "credentials": {
                    "acme.scalr.io": { "token": "acme-token" },
                    "other.scalr.io": { "token": "other-token" }
                }
            }"#,
        );
        let resolver = TokenResolver::with_path(file.path());
        assert_eq!(
            resolver.lookup("acme.scalr.io").unwrap(),
            Some("acme-token".to_string())
        );
        assert_eq!(resolver.lookup("missing.scalr.io").unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TokenResolver::with_path(dir.path().join("absent.json"));
        assert_eq!(resolver.lookup("acme.scalr.io").unwrap(), None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = credentials_file("{ not json");
        let resolver = TokenResolver::with_path(file.path());
        match resolver.lookup("acme.scalr.io") {
            Err(ScalrError::Credentials(msg)) => assert!(msg.contains("Could not parse")),
            other => panic!("Expected ScalrError::Credentials, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        let path = TokenResolver::default_path();
        assert!(path.is_some());
        assert!(path
            .unwrap()
            .to_string_lossy()
            .contains("credentials.tfrc.json"));
    }
}
