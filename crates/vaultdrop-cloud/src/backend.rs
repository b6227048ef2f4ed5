//! Cloud backend trait definition

use crate::deadline::Deadline;
use crate::error::Result;
use crate::report::BootstrapReport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cloud backend abstraction trait
///
/// All backends (Amazon, future providers) implement this trait to provide
/// a unified interface for provisioning and secret distribution. Adding a
/// provider means implementing this trait; callers never branch on the
/// concrete type.
#[async_trait]
pub trait CloudBackend: Send + Sync {
    /// Returns the backend name (e.g., "amazon")
    fn name(&self) -> &str;

    /// Returns the backend display name for user-facing output
    fn display_name(&self) -> &str;

    /// Provision every unit declared in the manifest at `manifest_location`.
    ///
    /// Units are submitted strictly sequentially, in manifest order. The
    /// returned report carries one outcome per unit; a failed unit does not
    /// stop submission of the remaining units. The call returns once the
    /// orchestration service has acknowledged each request, not once the
    /// resources are ready.
    async fn bootstrap(
        &self,
        manifest_location: &str,
        deadline: Deadline,
    ) -> Result<BootstrapReport>;

    /// Upload the file at `file_path` and return its distribution record.
    ///
    /// The stored object is tagged with a fresh unique identifier; the
    /// returned URL embeds that identifier, not the storage key. Upload
    /// failure aborts the call with no retry and no cleanup.
    async fn distribute(&self, file_path: &Path, deadline: Deadline) -> Result<DistributedObject>;
}

/// A secret file that has been uploaded to a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributedObject {
    /// Local path the contents were read from
    pub local_path: String,

    /// Identifier generated for this upload, unique across the process
    pub uid: String,

    /// Storage key the object was written under (prefix/basename)
    pub key: String,

    /// URL-encoded uid tag attached to the stored object
    pub tag: String,

    /// Shareable URL, keyed by uid
    pub url: String,
}
