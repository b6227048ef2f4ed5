//! Amazon backend implementation

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::types::{Capability, Parameter as StackParameter, Tag};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;
use std::time::Instant;
use vaultdrop_cloud::{
    BootstrapReport, CloudBackend, CloudError, Deadline, DistributedObject, Manifest,
    ManifestLoader, Result, uid,
};

/// Fixed creation timeout attached to every provisioning request.
const STACK_TIMEOUT_MINUTES: i32 = 30;

/// Base for synthesized stack names; the manifest ordinal is appended.
const STACK_BASE_NAME: &str = "vaultdrop";

/// Namespace for the uid tag written on every distributed object.
const TAG_NAMESPACE: &str = "vaultdrop";

/// Connection settings for the Amazon backend
///
/// Validated at construction; immutable for the backend's lifetime.
#[derive(Debug, Clone, Default)]
pub struct AmazonSettings {
    /// Bucket receiving distributed objects (required)
    pub bucket: String,

    /// AWS region (required)
    pub region: String,

    /// Key prefix for distributed objects; surrounding `/` are trimmed
    pub prefix: String,

    /// Custom endpoint override (S3-compatible stores, testing)
    pub endpoint: Option<String>,

    /// SNS topic receiving stack events during bootstrap
    pub notification_arn: Option<String>,
}

/// Amazon backend: S3 for distribution, CloudFormation for bootstrap
pub struct AmazonBackend {
    s3: aws_sdk_s3::Client,
    cloudformation: aws_sdk_cloudformation::Client,
    loader: ManifestLoader,
    bucket: String,
    region: String,
    prefix: String,
    endpoint: Option<String>,
    notification_arn: Option<String>,
}

impl AmazonBackend {
    /// Build SDK clients from validated settings.
    ///
    /// Fails with a configuration error before any network activity when a
    /// required field is missing.
    pub async fn connect(settings: AmazonSettings) -> Result<Self> {
        if settings.bucket.is_empty() {
            return Err(CloudError::Configuration(
                "amazon backend requires a bucket".to_string(),
            ));
        }
        if settings.region.is_empty() {
            return Err(CloudError::Configuration(
                "amazon backend requires a region".to_string(),
            ));
        }

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &settings.endpoint {
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }
        let s3 = aws_sdk_s3::Client::from_conf(s3_config.build());
        let cloudformation = aws_sdk_cloudformation::Client::new(&shared);

        Ok(Self {
            s3,
            cloudformation,
            loader: ManifestLoader::new(),
            bucket: settings.bucket,
            region: settings.region,
            prefix: clean_prefix(&settings.prefix),
            endpoint: settings.endpoint,
            notification_arn: settings.notification_arn,
        })
    }

    /// Host embedded in returned distribution URLs: the endpoint override
    /// with its scheme stripped, else the bucket's virtual-hosted S3 host.
    fn share_host(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/')
                .to_string(),
            None => format!("{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }

    /// The shareable URL carries the uid, not the storage key; resolution
    /// back to the object goes through the uid tag.
    fn share_url(&self, uid: &str) -> String {
        format!("https://{}/{}", self.share_host(), uid)
    }

    async fn put_object(&self, key: &str, tag: &str, contents: Vec<u8>) -> Result<()> {
        let output = self
            .s3
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(contents))
            .tagging(tag)
            .send()
            .await
            .map_err(|e| CloudError::Distribution(format!("{}", DisplayErrorContext(e))))?;

        tracing::debug!(key, etag = ?output.e_tag(), "Object stored");
        Ok(())
    }

    /// Submit one CreateStack request; returns the acknowledged stack id.
    async fn create_stack(&self, request: &StackRequest) -> Result<String> {
        let managed_tag = Tag::builder()
            .key("managed-by")
            .value(TAG_NAMESPACE)
            .build();

        let mut call = self
            .cloudformation
            .create_stack()
            .stack_name(&request.stack_name)
            .capabilities(Capability::CapabilityIam)
            .timeout_in_minutes(STACK_TIMEOUT_MINUTES)
            .set_parameters(Some(stack_parameters(&request.parameters)))
            .tags(managed_tag);

        if let Some(arn) = &self.notification_arn {
            call = call.notification_arns(arn);
        }

        call = if request.template.starts_with("https://") {
            call.template_url(&request.template)
        } else {
            let path = request
                .template
                .strip_prefix("file://")
                .unwrap_or(&request.template);
            let body =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| CloudError::FileRead {
                        path: path.to_string(),
                        reason: e.to_string(),
                    })?;
            call.template_body(body)
        };

        let output = call
            .send()
            .await
            .map_err(|e| CloudError::Provisioning(format!("{}", DisplayErrorContext(e))))?;

        tracing::debug!(response = ?output, "CreateStack acknowledged");
        Ok(output.stack_id().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl CloudBackend for AmazonBackend {
    fn name(&self) -> &str {
        "amazon"
    }

    fn display_name(&self) -> &str {
        "Amazon Web Services"
    }

    async fn bootstrap(
        &self,
        manifest_location: &str,
        deadline: Deadline,
    ) -> Result<BootstrapReport> {
        let manifest = self.loader.load(manifest_location, deadline).await?;
        tracing::info!(units = manifest.len(), "Manifest loaded");

        let started = Instant::now();
        let mut report = BootstrapReport::new();

        for request in synthesize_requests(&manifest) {
            let result = deadline
                .bound(self.create_stack(&request))
                .await
                .and_then(|r| r);
            match result {
                Ok(stack_id) => {
                    tracing::info!(
                        stack = %request.stack_name,
                        stack_id = %stack_id,
                        "Stack creation acknowledged"
                    );
                    report.add_success(request.stack_name, request.template, stack_id);
                }
                Err(err) => {
                    tracing::warn!(
                        stack = %request.stack_name,
                        error = %err,
                        "Stack creation failed"
                    );
                    report.add_failure(request.stack_name, request.template, err.to_string());
                }
            }
        }

        report.duration_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }

    async fn distribute(&self, file_path: &Path, deadline: Deadline) -> Result<DistributedObject> {
        let uid = uid::generate();

        let contents = tokio::fs::read(file_path)
            .await
            .map_err(|e| CloudError::FileRead {
                path: file_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let key = object_key(&self.prefix, file_path);
        let tag = uid_tag(&uid);

        tracing::info!(key = %key, bytes = contents.len(), "Uploading object");
        deadline
            .bound(self.put_object(&key, &tag, contents))
            .await
            .and_then(|r| r)?;

        let url = self.share_url(&uid);
        Ok(DistributedObject {
            local_path: file_path.display().to_string(),
            uid,
            key,
            tag,
            url,
        })
    }
}

/// One synthesized provisioning request, derived from a manifest unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRequest {
    /// Deterministic name: base name plus the unit's manifest ordinal
    pub stack_name: String,

    /// Template reference exactly as written in the manifest
    pub template: String,

    /// Parameter pairs in manifest order
    pub parameters: Vec<(String, String)>,
}

/// Derive one request per manifest unit, in manifest order.
fn synthesize_requests(manifest: &Manifest) -> Vec<StackRequest> {
    manifest
        .units
        .iter()
        .enumerate()
        .map(|(ordinal, unit)| StackRequest {
            stack_name: format!("{}-{}", STACK_BASE_NAME, ordinal),
            template: unit.file.clone(),
            parameters: unit
                .parameters
                .iter()
                .map(|p| (p.key.clone(), p.value.clone()))
                .collect(),
        })
        .collect()
}

/// A pair with an empty value is sent as use-previous-value, so repeated
/// bootstraps update stacks in place without restating every parameter.
fn stack_parameters(parameters: &[(String, String)]) -> Vec<StackParameter> {
    parameters
        .iter()
        .map(|(key, value)| {
            let builder = StackParameter::builder().parameter_key(key);
            if value.is_empty() {
                builder.use_previous_value(true).build()
            } else {
                builder.parameter_value(value).build()
            }
        })
        .collect()
}

fn clean_prefix(prefix: &str) -> String {
    prefix.trim_matches('/').to_string()
}

fn object_key(prefix: &str, file_path: &Path) -> String {
    let name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if prefix.is_empty() {
        name
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// The uid tag, URL-encoded as a single query-string-style pair.
fn uid_tag(uid: &str) -> String {
    urlencoding::encode(&format!("{}-uid={}", TAG_NAMESPACE, uid)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use vaultdrop_cloud::{Parameter, ProvisioningUnit};

    fn two_unit_manifest() -> Manifest {
        Manifest {
            units: vec![
                ProvisioningUnit {
                    file: "https://templates.example.com/bucket.yaml".to_string(),
                    parameters: vec![Parameter {
                        key: "BucketName".to_string(),
                        value: "my-drops".to_string(),
                    }],
                },
                ProvisioningUnit {
                    file: "./notifications.yaml".to_string(),
                    parameters: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_clean_prefix_trims_separators() {
        assert_eq!(clean_prefix("/a/b/"), "a/b");
        assert_eq!(clean_prefix("a/b"), "a/b");
        assert_eq!(clean_prefix("/"), "");
        assert_eq!(clean_prefix(""), "");
    }

    #[test]
    fn test_clean_prefix_is_idempotent() {
        for prefix in ["/a/b/", "a/b", "///x///", ""] {
            let once = clean_prefix(prefix);
            assert_eq!(clean_prefix(&once), once);
        }
    }

    #[test]
    fn test_object_key_joins_prefix_and_basename() {
        assert_eq!(
            object_key("drops", Path::new("/tmp/some/dir/secret.txt")),
            "drops/secret.txt"
        );
        assert_eq!(object_key("", Path::new("secret.txt")), "secret.txt");
    }

    #[test]
    fn test_uid_tag_is_url_encoded() {
        let tag = uid_tag("0123abcd");
        assert_eq!(tag, "vaultdrop-uid%3D0123abcd");
        assert!(!tag.contains('='));
    }

    #[test]
    fn test_synthesize_two_requests_in_order() {
        let requests = synthesize_requests(&two_unit_manifest());
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].stack_name, "vaultdrop-0");
        assert_eq!(requests[1].stack_name, "vaultdrop-1");
        assert_ne!(requests[0].stack_name, requests[1].stack_name);
        assert_eq!(
            requests[0].template,
            "https://templates.example.com/bucket.yaml"
        );
        assert_eq!(
            requests[0].parameters,
            vec![("BucketName".to_string(), "my-drops".to_string())]
        );
    }

    #[test]
    fn test_empty_value_marks_use_previous() {
        let params = stack_parameters(&[
            ("Keep".to_string(), String::new()),
            ("Set".to_string(), "value".to_string()),
        ]);
        assert_eq!(params[0].use_previous_value(), Some(true));
        assert_eq!(params[0].parameter_value(), None);
        assert_eq!(params[1].parameter_value(), Some("value"));
        assert_eq!(params[1].use_previous_value(), None);
    }

    async fn offline_backend() -> AmazonBackend {
        AmazonBackend::connect(AmazonSettings {
            bucket: "test-bucket".to_string(),
            region: "eu-west-1".to_string(),
            prefix: "/drops/".to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_connect_requires_bucket_and_region() {
        let result = AmazonBackend::connect(AmazonSettings::default()).await;
        assert!(matches!(result, Err(CloudError::Configuration(_))));

        let result = AmazonBackend::connect(AmazonSettings {
            bucket: "test-bucket".to_string(),
            ..Default::default()
        })
        .await;
        assert!(matches!(result, Err(CloudError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_connect_cleans_prefix() {
        let backend = offline_backend().await;
        assert_eq!(backend.prefix, "drops");
    }

    #[tokio::test]
    async fn test_share_host_defaults_to_bucket_host() {
        let backend = offline_backend().await;
        assert_eq!(backend.share_host(), "test-bucket.s3.eu-west-1.amazonaws.com");
    }

    #[tokio::test]
    async fn test_share_host_strips_endpoint_scheme() {
        let backend = AmazonBackend::connect(AmazonSettings {
            bucket: "test-bucket".to_string(),
            region: "eu-west-1".to_string(),
            endpoint: Some("https://drops.example.com/".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(backend.share_host(), "drops.example.com");
    }

    #[tokio::test]
    async fn test_share_url_embeds_uid_not_key() {
        let backend = offline_backend().await;
        let url = backend.share_url("0190deadbeef");
        assert_eq!(
            url,
            "https://test-bucket.s3.eu-west-1.amazonaws.com/0190deadbeef"
        );
        assert!(!url.contains(&backend.prefix));
    }

    #[tokio::test]
    async fn test_distribute_missing_file_fails_before_upload() {
        let backend = offline_backend().await;
        let result = backend
            .distribute(Path::new("/nonexistent/missing.txt"), Deadline::none())
            .await;
        // The read fails first, so no upload request is ever built.
        assert!(matches!(result, Err(CloudError::FileRead { .. })));
    }

    #[tokio::test]
    async fn test_bootstrap_bad_manifest_fails_before_provisioning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.yaml");
        fs::write(&path, "- file: http://insecure.example.com/t.yaml\n").unwrap();

        let backend = offline_backend().await;
        let result = backend
            .bootstrap(path.to_str().unwrap(), Deadline::none())
            .await;
        assert!(matches!(result, Err(CloudError::ManifestParse(_))));
    }

    #[tokio::test]
    async fn test_bootstrap_missing_manifest_is_fetch_error() {
        let backend = offline_backend().await;
        let result = backend
            .bootstrap("/nonexistent/manifest.yaml", Deadline::none())
            .await;
        assert!(matches!(result, Err(CloudError::ManifestFetch { .. })));
    }
}
