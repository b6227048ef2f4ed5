//! Vaultdrop Cloud Backend Abstraction
//!
//! This crate provides the backend abstraction for Vaultdrop, enabling
//! secret-file distribution and resource provisioning across cloud providers.
//!
//! # Supported Backends
//!
//! - **Amazon**: S3 object storage + CloudFormation stacks (`vaultdrop-cloud-aws`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                Vaultdrop CLI                 │
//! │         (vdrop bootstrap / distribute)       │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │              vaultdrop-cloud                 │
//! │  ┌──────────────────────────────────────┐   │
//! │  │        Backend Abstraction            │   │
//! │  │  trait CloudBackend { ... }           │   │
//! │  └──────────────────────────────────────┘   │
//! │  ┌───────────────┐  ┌─────────────────┐     │
//! │  │ Manifest      │  │ Uid Generator   │     │
//! │  │ Loader        │  │                 │     │
//! │  └───────────────┘  └─────────────────┘     │
//! └───────┬─────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │    amazon     │
//! │    backend    │
//! └───────────────┘
//! ```

pub mod backend;
pub mod deadline;
pub mod error;
pub mod manifest;
pub mod report;
pub mod uid;

// Re-exports
pub use backend::{CloudBackend, DistributedObject};
pub use deadline::Deadline;
pub use error::{CloudError, Result};
pub use manifest::{Manifest, ManifestLoader, Parameter, ProvisioningUnit};
pub use report::{BootstrapReport, UnitOutcome};
