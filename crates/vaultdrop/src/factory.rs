//! Backend selection
//!
//! Builds a concrete backend from its named settings section. Adding a
//! provider means adding an arm here and implementing the trait in its own
//! crate; callers only ever see `dyn CloudBackend`.

use anyhow::Context;
use vaultdrop_cloud::CloudBackend;
use vaultdrop_cloud_aws::{AmazonBackend, AmazonSettings};
use vaultdrop_config::Settings;

const SUPPORTED_BACKENDS: &[&str] = &["amazon"];

/// Construct the named backend from its settings section.
pub async fn backend_from_settings(
    name: &str,
    settings: &Settings,
) -> anyhow::Result<Box<dyn CloudBackend>> {
    match name {
        "amazon" => {
            let section = settings.amazon().context("amazon backend settings")?;
            let backend = AmazonBackend::connect(AmazonSettings {
                bucket: section.bucket.clone(),
                region: section.region.clone(),
                prefix: section.prefix.clone(),
                endpoint: section.endpoint.clone(),
                notification_arn: section.notification_arn.clone(),
            })
            .await?;
            Ok(Box::new(backend))
        }
        other => anyhow::bail!(
            "Unsupported backend '{}'. Supported backends: {}",
            other,
            SUPPORTED_BACKENDS.join(", ")
        ),
    }
}
