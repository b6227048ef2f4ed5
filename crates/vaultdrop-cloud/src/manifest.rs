//! Manifest model and loader
//!
//! A manifest is a YAML sequence of provisioning units, each naming a
//! template and its parameters:
//!
//! ```yaml
//! - file: https://templates.example.com/bucket.yaml
//!   parameters:
//!     - key: BucketName
//!       value: my-drops
//! - file: ./local/notifications.yaml
//! ```
//!
//! The manifest is read once per bootstrap run and immutable after parse.

use crate::deadline::Deadline;
use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};

/// One template reference plus its parameters, mapped to one remote stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisioningUnit {
    /// Template reference: local path, `file://`, or `https://` URL
    pub file: String,

    /// Ordered key/value pairs forwarded to the orchestration service.
    /// Keys may repeat; the service resolves conflicts.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A single provisioning parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

/// Ordered provisioning units, parsed once per bootstrap run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    pub units: Vec<ProvisioningUnit>,
}

impl Manifest {
    /// Parse a YAML document into a manifest.
    ///
    /// Unknown fields, missing template references, and unsupported schemes
    /// are rejected here, before any provisioning request is issued.
    pub fn parse(content: &str) -> Result<Self> {
        let units: Vec<ProvisioningUnit> =
            serde_yaml::from_str(content).map_err(|e| CloudError::ManifestParse(e.to_string()))?;
        let manifest = Self { units };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize back to the documented YAML shape.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.units).map_err(|e| CloudError::ManifestParse(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for (ordinal, unit) in self.units.iter().enumerate() {
            if unit.file.is_empty() {
                return Err(CloudError::ManifestParse(format!(
                    "unit {} is missing a template reference",
                    ordinal
                )));
            }
            if !supported_scheme(&unit.file) {
                return Err(CloudError::ManifestParse(format!(
                    "unit {}: unsupported template scheme in '{}' (local paths and https:// only)",
                    ordinal, unit.file
                )));
            }
        }
        Ok(())
    }
}

/// Bare strings are local paths; explicit schemes other than `file` and
/// `https` (notably `http`) are rejected.
fn supported_scheme(reference: &str) -> bool {
    if reference.starts_with("https://") || reference.starts_with("file://") {
        return true;
    }
    !reference.contains("://")
}

/// Fetches and parses manifests from local paths or HTTPS URLs
pub struct ManifestLoader {
    client: reqwest::Client,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Resolve `location` and parse its contents.
    pub async fn load(&self, location: &str, deadline: Deadline) -> Result<Manifest> {
        let content = deadline.bound(self.fetch(location)).await??;
        Manifest::parse(&content)
    }

    async fn fetch(&self, location: &str) -> Result<String> {
        if location.starts_with("https://") {
            self.fetch_https(location).await
        } else if let Some(path) = location.strip_prefix("file://") {
            read_local(path).await
        } else if location.contains("://") {
            Err(CloudError::ManifestFetch {
                location: location.to_string(),
                reason: "only local paths and https:// URLs are supported".to_string(),
            })
        } else {
            read_local(location).await
        }
    }

    async fn fetch_https(&self, location: &str) -> Result<String> {
        tracing::debug!(location, "Fetching manifest over HTTPS");

        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| CloudError::ManifestFetch {
                location: location.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CloudError::ManifestFetch {
                location: location.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        response.text().await.map_err(|e| CloudError::ManifestFetch {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_local(path: &str) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CloudError::ManifestFetch {
            location: path.to_string(),
            reason: e.to_string(),
        })
}
