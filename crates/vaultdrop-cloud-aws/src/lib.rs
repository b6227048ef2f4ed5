//! Amazon backend for Vaultdrop
//!
//! This crate implements the CloudBackend trait on top of Amazon Web
//! Services: S3 for secret-file distribution, CloudFormation for account
//! bootstrap.
//!
//! # Requirements
//!
//! - AWS credentials available through the default provider chain
//!   (environment, shared config, instance metadata)
//! - An existing S3 bucket for `distribute`; `bootstrap` can create it from
//!   a manifest template
//!
//! # Example
//!
//! ```ignore
//! use vaultdrop_cloud::{CloudBackend, Deadline};
//! use vaultdrop_cloud_aws::{AmazonBackend, AmazonSettings};
//!
//! let backend = AmazonBackend::connect(AmazonSettings {
//!     bucket: "my-drops".into(),
//!     region: "eu-west-1".into(),
//!     ..Default::default()
//! })
//! .await?;
//!
//! let object = backend.distribute("secret.txt".as_ref(), Deadline::none()).await?;
//! println!("{}", object.url);
//! ```

pub mod backend;

pub use backend::{AmazonBackend, AmazonSettings, StackRequest};
